//! Calculator SDK
//!
//! This crate provides the public API for the calculator module:
//! - `CalculatorApi` trait for in-process consumers
//! - Model types (`CalculationRecord`, `NewCalculation`, request inputs, `LoanQuote`)
//! - Error type (`CalculatorError`)
//!
//! ```ignore
//! let quote = client.loan(LoanTerms::new(100_000.0, 6.0, 30.0)).await?;
//! println!("monthly payment: {}", quote.monthly_payment);
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::CalculatorApi;
pub use errors::CalculatorError;
pub use models::{
    BasicCalculation, CalculationKind, CalculationRecord, LoanQuote, LoanTerms, NewCalculation,
    ScientificCalculation,
};
