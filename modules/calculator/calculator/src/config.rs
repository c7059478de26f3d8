use serde::{Deserialize, Serialize};

/// Where calculation history lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceMode {
    /// SQLite-backed table, survives restarts.
    #[default]
    Durable,
    /// Bounded buffer owned by the process.
    InMemory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    pub persistence: PersistenceMode,
    /// Number of records returned by the history endpoint when no `limit` is given.
    pub history_limit: u64,
    /// Records kept by the in-memory store before the oldest is evicted.
    pub memory_capacity: usize,
    /// Reject unrecognized operations instead of answering `0`.
    pub reject_unknown_operations: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            persistence: PersistenceMode::default(),
            history_limit: default_history_limit(),
            memory_capacity: default_memory_capacity(),
            reject_unknown_operations: true,
        }
    }
}

fn default_history_limit() -> u64 {
    10
}

fn default_memory_capacity() -> usize {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// sea-orm connection string, e.g. `sqlite://data/calculations.db?mode=rwc`.
    pub dsn: String,
    pub max_conns: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: "sqlite://data/calculations.db?mode=rwc".to_owned(),
            max_conns: 5,
        }
    }
}
