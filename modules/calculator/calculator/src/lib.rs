//! Calculator Module Implementation
//!
//! Arithmetic, scientific and loan-amortization calculations served over
//! REST, with a history of computed values kept in a durable (SQLite) or
//! in-memory store.
//!
//! The public API is defined in `calculator-sdk` and re-exported here.

pub use calculator_sdk::{
    BasicCalculation, CalculationKind, CalculationRecord, CalculatorApi, CalculatorError,
    LoanQuote, LoanTerms, NewCalculation, ScientificCalculation,
};

pub mod config;
pub use config::{CalculatorConfig, DatabaseConfig, PersistenceMode};

pub mod module;
pub use module::{CalculatorModule, init_checked, validate_config};

pub mod local_client;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
