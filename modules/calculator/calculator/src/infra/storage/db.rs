//! SQLite connection setup for the durable history store.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::migrations::Migrator;
use crate::config::DatabaseConfig;

/// Open the configured SQLite database.
///
/// File databases get their parent directory created and run in WAL mode.
/// In-memory databases are pinned to a single long-lived connection so the
/// data is not lost when the pool recycles connections.
///
/// # Errors
/// Returns an error if the DSN is not a valid SQLite URL or the database
/// cannot be opened.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut options = SqliteConnectOptions::from_str(&cfg.dsn)
        .with_context(|| format!("invalid database dsn '{}'", cfg.dsn))?
        .create_if_missing(true);

    let pool_options = if is_memory_dsn(&cfg.dsn) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        if let Some(path) = sqlite_file_path(&cfg.dsn) {
            prepare_parent_dir(&path)?;
        }
        options = options.journal_mode(SqliteJournalMode::Wal);
        SqlitePoolOptions::new().max_connections(cfg.max_conns.max(1))
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("failed to open database '{}'", cfg.dsn))?;

    info!(dsn = %cfg.dsn, "database connected");
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// Create the `calculations` table if it does not exist yet.
///
/// # Errors
/// Returns an error if the schema cannot be applied.
pub async fn ensure_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    Migrator::up(db, None)
        .await
        .context("failed to create the calculations table")
}

#[must_use]
pub fn is_memory_dsn(dsn: &str) -> bool {
    dsn.contains(":memory:") || dsn.contains("mode=memory")
}

/// Filesystem path of a file-backed SQLite DSN.
#[must_use]
pub fn sqlite_file_path(dsn: &str) -> Option<PathBuf> {
    let rest = dsn
        .strip_prefix("sqlite://")
        .or_else(|| dsn.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

fn prepare_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    Ok(())
}
