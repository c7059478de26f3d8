//! Wiring of the calculator module: history store, service and router.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use calculator_sdk::CalculatorApi;
use tracing::{error, info};

use crate::api::rest::routes;
use crate::config::{CalculatorConfig, DatabaseConfig, PersistenceMode};
use crate::domain::repo::HistoryRepository;
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::storage::{db, InMemoryHistoryRepository, SeaOrmHistoryRepository};
use crate::local_client::CalculatorLocalClient;

/// Initialized calculator module.
///
/// Owns the history store for its whole lifetime; dropping the module
/// releases the database pool.
#[derive(Clone)]
pub struct CalculatorModule {
    service: Arc<Service>,
}

impl CalculatorModule {
    /// Open the configured history store and build the service.
    ///
    /// # Errors
    /// Fails when the durable store cannot be opened or its schema cannot be
    /// created.
    pub async fn init(cfg: &CalculatorConfig, db_cfg: &DatabaseConfig) -> anyhow::Result<Self> {
        info!(persistence = ?cfg.persistence, "Initializing calculator module");

        let repo: Arc<dyn HistoryRepository> = match cfg.persistence {
            PersistenceMode::Durable => {
                let conn = db::connect(db_cfg)
                    .await
                    .inspect_err(|e| log_startup_failure("database connection failed", e))?;
                db::ensure_schema(&conn)
                    .await
                    .inspect_err(|e| log_startup_failure("schema creation failed", e))?;
                Arc::new(SeaOrmHistoryRepository::new(conn))
            }
            PersistenceMode::InMemory => {
                Arc::new(InMemoryHistoryRepository::new(cfg.memory_capacity))
            }
        };

        let service = Arc::new(Service::new(repo, ServiceConfig::from(cfg)));
        info!("Calculator module initialized");
        Ok(Self { service })
    }

    /// Build a module around an already constructed store.
    #[must_use]
    pub fn with_repository(repo: Arc<dyn HistoryRepository>, cfg: &CalculatorConfig) -> Self {
        Self {
            service: Arc::new(Service::new(repo, ServiceConfig::from(cfg))),
        }
    }

    #[must_use]
    pub fn router(&self) -> Router {
        routes::router(self.service.clone())
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn CalculatorApi> {
        Arc::new(CalculatorLocalClient::new(self.service.clone()))
    }
}

fn log_startup_failure(what: &str, e: &anyhow::Error) {
    let reason = format!("{e:#}");
    error!(error = %reason, "{what}");
}

/// Fail fast on configuration values the module cannot work with.
///
/// # Errors
/// Returns an error describing the offending setting.
pub fn validate_config(cfg: &CalculatorConfig, db_cfg: &DatabaseConfig) -> anyhow::Result<()> {
    if cfg.persistence == PersistenceMode::Durable {
        anyhow::ensure!(
            db_cfg.dsn.starts_with("sqlite:"),
            "database.dsn must be a sqlite URL, got '{}'",
            db_cfg.dsn
        );
        anyhow::ensure!(db_cfg.max_conns > 0, "database.max_conns must be positive");
    }
    anyhow::ensure!(
        cfg.memory_capacity > 0,
        "calculator.memory_capacity must be positive"
    );
    anyhow::ensure!(
        cfg.history_limit > 0,
        "calculator.history_limit must be positive"
    );
    Ok(())
}

/// Convenience for callers that only hold an `anyhow` context.
///
/// # Errors
/// Same as [`CalculatorModule::init`], with the configuration checked first.
pub async fn init_checked(
    cfg: &CalculatorConfig,
    db_cfg: &DatabaseConfig,
) -> anyhow::Result<CalculatorModule> {
    validate_config(cfg, db_cfg).context("invalid calculator configuration")?;
    CalculatorModule::init(cfg, db_cfg).await
}
