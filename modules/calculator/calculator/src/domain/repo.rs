use async_trait::async_trait;
use calculator_sdk::{CalculationRecord, NewCalculation};

/// Append-only log of computed values.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Store a new record; the store assigns `id` and `timestamp`.
    async fn append(&self, calculation: NewCalculation) -> anyhow::Result<CalculationRecord>;

    /// Up to `limit` records, newest first (ties broken by descending id).
    async fn list_recent(&self, limit: u64) -> anyhow::Result<Vec<CalculationRecord>>;
}
