use std::collections::VecDeque;

use async_trait::async_trait;
use calculator_sdk::{CalculationRecord, NewCalculation};
use chrono::Utc;
use parking_lot::Mutex;

use crate::domain::repo::HistoryRepository;

/// Bounded history kept in process memory. The oldest record is evicted
/// once `capacity` is exceeded; contents are lost on restart.
pub struct InMemoryHistoryRepository {
    capacity: usize,
    state: Mutex<MemoryState>,
}

struct MemoryState {
    records: VecDeque<CalculationRecord>,
    next_id: i64,
}

impl InMemoryHistoryRepository {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            state: Mutex::new(MemoryState {
                records: VecDeque::with_capacity(capacity),
                next_id: 1,
            }),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append(&self, calculation: NewCalculation) -> anyhow::Result<CalculationRecord> {
        let mut state = self.state.lock();
        let record = CalculationRecord {
            id: state.next_id,
            expression: calculation.expression,
            result: calculation.result,
            kind: calculation.kind,
            inputs_count: calculation.inputs_count,
            timestamp: Utc::now(),
        };
        state.next_id += 1;
        state.records.push_back(record.clone());
        while state.records.len() > self.capacity {
            state.records.pop_front();
        }
        Ok(record)
    }

    async fn list_recent(&self, limit: u64) -> anyhow::Result<Vec<CalculationRecord>> {
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let state = self.state.lock();
        Ok(state.records.iter().rev().take(limit).cloned().collect())
    }
}
