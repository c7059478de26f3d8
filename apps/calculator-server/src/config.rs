//! Layered application configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the YAML file given
//! with `--config`, `APP__`-prefixed environment variables (`__` separates
//! nested keys), then command-line overrides.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use calculator::{CalculatorConfig, DatabaseConfig};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// DSN used by `--mock`.
pub const MOCK_DSN: &str = "sqlite::memory:";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub calculator: CalculatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `calculator=debug,info`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
        }
    }
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub verbose: u8,
    pub mock: bool,
}

impl AppConfig {
    /// Merge defaults, the optional YAML file and the environment.
    ///
    /// # Errors
    /// Returns an error if any source holds an invalid or unknown value.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed("APP__").split("__"))
            .extract()
            .context("failed to load configuration")
    }

    /// # Errors
    /// Returns an error if `--port` is given and `server.bind_addr` is not a socket address.
    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) -> anyhow::Result<()> {
        if let Some(port) = cli.port {
            let mut addr = self.bind_addr()?;
            addr.set_port(port);
            self.server.bind_addr = addr.to_string();
        }

        if cli.mock {
            self.database.dsn = MOCK_DSN.to_owned();
            self.database.max_conns = 1;
        }

        match cli.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
        Ok(())
    }

    /// # Errors
    /// Returns an error if `server.bind_addr` is not a socket address.
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        self.server
            .bind_addr
            .parse()
            .with_context(|| format!("invalid server.bind_addr '{}'", self.server.bind_addr))
    }

    /// Check everything that can be checked without opening the database.
    ///
    /// # Errors
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.bind_addr()?;
        calculator::validate_config(&self.calculator, &self.database)
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_saphyr::to_string(self).context("failed to render configuration")
    }
}
