use anyhow::Context;
use async_trait::async_trait;
use calculator_sdk::{CalculationRecord, NewCalculation};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect,
    TransactionTrait,
};
use tracing::warn;

use super::entity::{self, Entity as CalculationEntity};
use crate::domain::repo::HistoryRepository;

/// History store backed by the `calculations` table.
pub struct SeaOrmHistoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmHistoryRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HistoryRepository for SeaOrmHistoryRepository {
    async fn append(&self, calculation: NewCalculation) -> anyhow::Result<CalculationRecord> {
        let active_model = entity::ActiveModel {
            id: ActiveValue::NotSet,
            calculation_type: ActiveValue::Set(calculation.kind.as_str().to_owned()),
            expression: ActiveValue::Set(calculation.expression),
            result: ActiveValue::Set(calculation.result),
            inputs_count: ActiveValue::Set(
                i32::try_from(calculation.inputs_count).unwrap_or(i32::MAX),
            ),
            timestamp: ActiveValue::Set(Utc::now()),
        };

        let txn = self
            .db
            .begin()
            .await
            .context("failed to begin transaction")?;

        match active_model.insert(&txn).await {
            Ok(model) => {
                txn.commit()
                    .await
                    .context("failed to commit calculation")?;
                Ok(model.into())
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    warn!(error = %rollback_err, "rollback after failed insert also failed");
                }
                Err(anyhow::Error::new(e).context("failed to insert calculation"))
            }
        }
    }

    async fn list_recent(&self, limit: u64) -> anyhow::Result<Vec<CalculationRecord>> {
        let models = CalculationEntity::find()
            .order_by_desc(entity::Column::Timestamp)
            .order_by_desc(entity::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .context("failed to load calculation history")?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
