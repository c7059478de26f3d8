use std::sync::Arc;

use calculator_sdk::{
    BasicCalculation, CalculationKind, CalculationRecord, LoanQuote, LoanTerms, NewCalculation,
    ScientificCalculation,
};
use tracing::{debug, instrument, warn};

use crate::config::CalculatorConfig;

use super::engine::{self, BasicOperation, ScientificOperation};
use super::error::DomainError;
use super::repo::HistoryRepository;

/// Upper bound for a single history page.
pub const MAX_HISTORY_LIMIT: u64 = 1000;

/// Tag of records submitted through the legacy `/calculate` endpoint.
pub const LEGACY_EXPRESSION_KIND: &str = "expression";

// ============================================================================
// Service Configuration
// ============================================================================

pub struct ServiceConfig {
    pub reject_unknown_operations: bool,
    pub history_limit: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from(&CalculatorConfig::default())
    }
}

impl From<&CalculatorConfig> for ServiceConfig {
    fn from(cfg: &CalculatorConfig) -> Self {
        Self {
            reject_unknown_operations: cfg.reject_unknown_operations,
            history_limit: cfg.history_limit,
        }
    }
}

// ============================================================================
// Service Implementation
// ============================================================================

/// Runs the calculation engine and records successful results.
///
/// History writes after a calculation are best-effort: a failing store is
/// logged and the computed value is still returned. Explicit saves surface
/// storage failures to the caller.
pub struct Service {
    repo: Arc<dyn HistoryRepository>,
    config: ServiceConfig,
}

impl Service {
    pub fn new(repo: Arc<dyn HistoryRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    #[instrument(skip(self), fields(operation = %input.operation))]
    pub async fn basic(&self, input: &BasicCalculation) -> Result<f64, DomainError> {
        let (result, symbol) = match BasicOperation::parse(&input.operation) {
            Some(op) => (engine::basic(input.num1, input.num2, op)?, op.symbol()),
            None => (
                self.unknown_operation(&input.operation)?,
                input.operation.as_str(),
            ),
        };

        self.record_best_effort(NewCalculation {
            expression: format!("{} {symbol} {}", input.num1, input.num2),
            result,
            kind: CalculationKind::Basic,
            inputs_count: input.inputs_count,
        })
        .await;

        Ok(result)
    }

    #[instrument(skip(self), fields(operation = %input.operation))]
    pub async fn scientific(&self, input: &ScientificCalculation) -> Result<f64, DomainError> {
        let (result, expression) = match ScientificOperation::parse(&input.operation) {
            Some(op) => (
                engine::scientific(input.value, op, input.power)?,
                op.render(input.value, input.power),
            ),
            None => (
                self.unknown_operation(&input.operation)?,
                format!("{}({})", input.operation, input.value),
            ),
        };

        self.record_best_effort(NewCalculation {
            expression,
            result,
            kind: CalculationKind::Scientific,
            inputs_count: input.inputs_count,
        })
        .await;

        Ok(result)
    }

    #[instrument(skip(self))]
    pub async fn loan(&self, terms: &LoanTerms) -> Result<LoanQuote, DomainError> {
        let quote = engine::amortize(terms.principal, terms.annual_rate, terms.years)?;

        self.record_best_effort(NewCalculation {
            expression: format!(
                "loan(principal={}, rate={}%, years={})",
                terms.principal, terms.annual_rate, terms.years
            ),
            result: quote.monthly_payment,
            kind: CalculationKind::Loan,
            inputs_count: terms.inputs_count,
        })
        .await;

        Ok(quote)
    }

    /// Persist a caller-labelled record as-is. Storage failures are returned.
    ///
    /// The result must be a finite number; NaN and infinities are rejected.
    pub async fn save_external(
        &self,
        calculation: NewCalculation,
    ) -> Result<CalculationRecord, DomainError> {
        engine::ensure_finite(calculation.result)?;
        let record = self.repo.append(calculation).await?;
        debug!(id = record.id, kind = %record.kind, "external calculation saved");
        Ok(record)
    }

    /// Record an already evaluated expression coming from the legacy endpoint.
    pub async fn record_expression(
        &self,
        expression: String,
        result: f64,
    ) -> Result<CalculationRecord, DomainError> {
        self.save_external(NewCalculation {
            expression,
            result,
            kind: CalculationKind::Custom(LEGACY_EXPRESSION_KIND.to_owned()),
            inputs_count: 2,
        })
        .await
    }

    /// Most recent records, newest first. `None` uses the configured page size.
    pub async fn recent_history(
        &self,
        limit: Option<u64>,
    ) -> Result<Vec<CalculationRecord>, DomainError> {
        let limit = limit
            .unwrap_or(self.config.history_limit)
            .clamp(1, MAX_HISTORY_LIMIT);
        Ok(self.repo.list_recent(limit).await?)
    }

    fn unknown_operation(&self, operation: &str) -> Result<f64, DomainError> {
        if self.config.reject_unknown_operations {
            return Err(DomainError::UnsupportedOperation {
                operation: operation.to_owned(),
            });
        }
        debug!(operation, "unknown operation answered with 0");
        Ok(0.0)
    }

    async fn record_best_effort(&self, calculation: NewCalculation) {
        let kind = calculation.kind.clone();
        match self.repo.append(calculation).await {
            Ok(record) => debug!(id = record.id, %kind, "calculation recorded"),
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(error = %reason, %kind, "failed to record calculation");
            }
        }
    }
}
