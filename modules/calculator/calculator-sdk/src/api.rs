//! `CalculatorApi` trait definition.
//!
//! In-process API of the calculator module. The REST layer and the local
//! client share the same domain service, so both surfaces behave identically
//! with respect to validation and history recording.

use async_trait::async_trait;

use crate::errors::CalculatorError;
use crate::models::{
    BasicCalculation, CalculationRecord, LoanQuote, LoanTerms, NewCalculation,
    ScientificCalculation,
};

#[async_trait]
pub trait CalculatorApi: Send + Sync {
    /// Evaluate `num1 <operation> num2` and record it in the history.
    /// A failed history write does not fail the calculation.
    async fn basic(&self, input: BasicCalculation) -> Result<f64, CalculatorError>;

    /// Evaluate a scientific function and record it in the history.
    /// A failed history write does not fail the calculation.
    async fn scientific(&self, input: ScientificCalculation) -> Result<f64, CalculatorError>;

    /// Compute the amortized monthly payment of a loan and record it.
    /// A failed history write does not fail the calculation.
    async fn loan(&self, terms: LoanTerms) -> Result<LoanQuote, CalculatorError>;

    /// Persist a caller-labelled record. Storage failures are returned.
    async fn save(&self, calculation: NewCalculation)
    -> Result<CalculationRecord, CalculatorError>;

    /// Most recent records, newest first.
    async fn recent_history(&self, limit: u64) -> Result<Vec<CalculationRecord>, CalculatorError>;
}
