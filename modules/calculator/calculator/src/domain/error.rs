use calculator_sdk::CalculatorError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("Unsupported operation '{operation}'")]
    UnsupportedOperation { operation: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<DomainError> for CalculatorError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { .. } | DomainError::UnsupportedOperation { .. } => {
                Self::validation(e.to_string())
            }
            DomainError::InvalidInput(message) => Self::invalid_input(message),
            DomainError::Storage(_) => Self::storage(e.to_string()),
        }
    }
}
