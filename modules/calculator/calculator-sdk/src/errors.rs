//! Error types for the calculator SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    /// A domain rule rejected the input (division by zero, negative root, ...).
    #[error("{message}")]
    Validation { message: String },

    /// The input could not be interpreted as a number.
    #[error("{message}")]
    InvalidInput { message: String },

    /// The history store failed.
    #[error("{message}")]
    Storage { message: String },
}

impl CalculatorError {
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
