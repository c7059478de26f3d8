//! Local client implementing the `CalculatorApi` trait.

use std::sync::Arc;

use async_trait::async_trait;
use calculator_sdk::{
    BasicCalculation, CalculationRecord, CalculatorApi, CalculatorError, LoanQuote, LoanTerms,
    NewCalculation, ScientificCalculation,
};

use crate::domain::service::Service;

/// In-process client for the calculator module.
///
/// Delegates to the same domain service that backs the REST endpoints.
pub struct CalculatorLocalClient {
    service: Arc<Service>,
}

impl CalculatorLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CalculatorApi for CalculatorLocalClient {
    async fn basic(&self, input: BasicCalculation) -> Result<f64, CalculatorError> {
        self.service.basic(&input).await.map_err(Into::into)
    }

    async fn scientific(&self, input: ScientificCalculation) -> Result<f64, CalculatorError> {
        self.service.scientific(&input).await.map_err(Into::into)
    }

    async fn loan(&self, terms: LoanTerms) -> Result<LoanQuote, CalculatorError> {
        self.service.loan(&terms).await.map_err(Into::into)
    }

    async fn save(
        &self,
        calculation: NewCalculation,
    ) -> Result<CalculationRecord, CalculatorError> {
        self.service
            .save_external(calculation)
            .await
            .map_err(Into::into)
    }

    async fn recent_history(&self, limit: u64) -> Result<Vec<CalculationRecord>, CalculatorError> {
        self.service
            .recent_history(Some(limit))
            .await
            .map_err(Into::into)
    }
}
