use calculator_sdk::{CalculationKind, CalculationRecord};

use super::entity::Model as CalculationEntity;

impl From<CalculationEntity> for CalculationRecord {
    fn from(e: CalculationEntity) -> Self {
        Self {
            id: i64::from(e.id),
            expression: e.expression,
            result: e.result,
            kind: CalculationKind::from_tag(&e.calculation_type),
            inputs_count: u32::try_from(e.inputs_count).unwrap_or_default(),
            timestamp: e.timestamp,
        }
    }
}
