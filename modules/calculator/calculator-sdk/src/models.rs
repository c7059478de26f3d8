//! Public models for the calculator module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the calculator module and its consumers.

use std::fmt;

use chrono::{DateTime, Utc};

/// Tag distinguishing how a history record was produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CalculationKind {
    Basic,
    Scientific,
    Loan,
    /// Free-form label supplied by an external caller.
    Custom(String),
}

impl CalculationKind {
    pub const BASIC: &'static str = "basic";
    pub const SCIENTIFIC: &'static str = "scientific";
    pub const LOAN: &'static str = "loan";

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic => Self::BASIC,
            Self::Scientific => Self::SCIENTIFIC,
            Self::Loan => Self::LOAN,
            Self::Custom(tag) => tag,
        }
    }

    /// Interpret a stored tag. Unknown tags are kept verbatim.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            Self::BASIC => Self::Basic,
            Self::SCIENTIFIC => Self::Scientific,
            Self::LOAN => Self::Loan,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted history entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRecord {
    pub id: i64,
    pub expression: String,
    pub result: f64,
    pub kind: CalculationKind,
    pub inputs_count: u32,
    pub timestamp: DateTime<Utc>,
}

/// A history entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCalculation {
    pub expression: String,
    pub result: f64,
    pub kind: CalculationKind,
    pub inputs_count: u32,
}

/// Input of a basic arithmetic calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicCalculation {
    pub num1: f64,
    pub num2: f64,
    pub operation: String,
    /// How many of the request fields were actually supplied.
    pub inputs_count: u32,
}

/// Input of a scientific function evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScientificCalculation {
    pub value: f64,
    pub operation: String,
    /// Exponent, only used by the `power` operation.
    pub power: f64,
    pub inputs_count: u32,
}

/// Loan terms for an amortization quote.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanTerms {
    pub principal: f64,
    /// Percent per year, e.g. `6.0` for 6%.
    pub annual_rate: f64,
    pub years: f64,
    pub inputs_count: u32,
}

impl LoanTerms {
    #[must_use]
    pub fn new(principal: f64, annual_rate: f64, years: f64) -> Self {
        Self {
            principal,
            annual_rate,
            years,
            inputs_count: 3,
        }
    }
}

/// Amortization result. All amounts are rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanQuote {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub principal: f64,
}
