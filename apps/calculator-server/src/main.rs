mod config;
mod logging;
mod signals;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::config::{AppConfig, CliOverrides};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Calculator Server - arithmetic, scientific and loan calculations over HTTP
#[derive(Parser)]
#[command(name = "calculator-server")]
#[command(about = "Calculator Server - arithmetic, scientific and loan calculations over HTTP")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database instead of the configured file
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config
        && !path.is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        port: cli.port,
        verbose: cli.verbose,
        mock: cli.mock,
    })?;

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    logging::init(&config.logging)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.validate()?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;
    let addr = config.bind_addr()?;

    tracing::info!(
        persistence = ?config.calculator.persistence,
        dsn = %config.database.dsn,
        "Calculator server starting"
    );

    let module = calculator::CalculatorModule::init(&config.calculator, &config.database)
        .await
        .context("failed to initialize calculator module")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, module.router())
        .with_graceful_shutdown(async {
            let signal = signals::shutdown_signal().await;
            tracing::info!(signal = signal.as_str(), "Shutdown signal received, draining connections");
        })
        .await
        .context("HTTP server failed")?;

    tracing::info!("Calculator server stopped");
    Ok(())
}
