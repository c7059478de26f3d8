//! Calculation engine.
//!
//! Pure functions from typed inputs to a numeric result or a validation
//! error. Nothing here touches the history store.

use calculator_sdk::LoanQuote;

use super::error::DomainError;
use super::fields::CalcFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BasicOperation {
    /// Parse the wire name of an operation (`add`, `subtract`, ...).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "add" => Some(Self::Add),
            "subtract" => Some(Self::Subtract),
            "multiply" => Some(Self::Multiply),
            "divide" => Some(Self::Divide),
            _ => None,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScientificOperation {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Log,
    Ln,
    Exp,
    Power,
}

impl ScientificOperation {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "sqrt" => Some(Self::Sqrt),
            "log" => Some(Self::Log),
            "ln" => Some(Self::Ln),
            "exp" => Some(Self::Exp),
            "power" => Some(Self::Power),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sqrt => "sqrt",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Exp => "exp",
            Self::Power => "power",
        }
    }

    /// Human-readable rendering stored in the history.
    #[must_use]
    pub fn render(self, value: f64, power: f64) -> String {
        match self {
            Self::Power => format!("{value}^{power}"),
            other => format!("{}({value})", other.name()),
        }
    }
}

/// Apply a basic arithmetic operator.
///
/// # Errors
/// Returns a validation error on division by zero or a non-finite result.
pub fn basic(num1: f64, num2: f64, op: BasicOperation) -> Result<f64, DomainError> {
    let result = match op {
        BasicOperation::Add => num1 + num2,
        BasicOperation::Subtract => num1 - num2,
        BasicOperation::Multiply => num1 * num2,
        BasicOperation::Divide => {
            if num2 == 0.0 {
                return Err(DomainError::validation(CalcFields::NUM2, "Division by zero"));
            }
            num1 / num2
        }
    };
    ensure_finite(result)
}

/// Evaluate a scientific function. Trigonometric arguments are in degrees.
///
/// # Errors
/// Returns a validation error when `value` is outside the function's domain
/// or the result is not finite.
pub fn scientific(value: f64, op: ScientificOperation, power: f64) -> Result<f64, DomainError> {
    let result = match op {
        ScientificOperation::Sin => value.to_radians().sin(),
        ScientificOperation::Cos => value.to_radians().cos(),
        ScientificOperation::Tan => value.to_radians().tan(),
        ScientificOperation::Sqrt => {
            if value < 0.0 {
                return Err(DomainError::validation(
                    CalcFields::VALUE,
                    "Cannot calculate square root of a negative number",
                ));
            }
            value.sqrt()
        }
        ScientificOperation::Log => {
            ensure_positive_log_argument(value)?;
            value.log10()
        }
        ScientificOperation::Ln => {
            ensure_positive_log_argument(value)?;
            value.ln()
        }
        ScientificOperation::Exp => value.exp(),
        ScientificOperation::Power => value.powf(power),
    };
    ensure_finite(result)
}

fn ensure_positive_log_argument(value: f64) -> Result<(), DomainError> {
    if value <= 0.0 {
        return Err(DomainError::validation(
            CalcFields::VALUE,
            "Logarithm is only defined for positive numbers",
        ));
    }
    Ok(())
}

/// Fixed monthly payment that repays `principal` over `years` at `annual_rate` percent.
///
/// Totals are derived from the unrounded monthly payment; every amount in the
/// returned quote is rounded to cents.
///
/// # Errors
/// Returns a validation error when `principal <= 0`, `annual_rate < 0` or `years <= 0`.
pub fn amortize(principal: f64, annual_rate: f64, years: f64) -> Result<LoanQuote, DomainError> {
    if principal <= 0.0 {
        return Err(DomainError::validation(
            CalcFields::PRINCIPAL,
            "Principal must be greater than zero",
        ));
    }
    if annual_rate < 0.0 {
        return Err(DomainError::validation(
            CalcFields::ANNUAL_RATE,
            "Interest rate cannot be negative",
        ));
    }
    if years <= 0.0 {
        return Err(DomainError::validation(
            CalcFields::YEARS,
            "Loan term must be greater than zero",
        ));
    }

    let monthly_rate = annual_rate / 100.0 / 12.0;
    let months = years * 12.0;

    let monthly_payment = if monthly_rate == 0.0 {
        principal / months
    } else {
        let growth = (1.0 + monthly_rate).powf(months);
        principal * monthly_rate * growth / (growth - 1.0)
    };
    let monthly_payment = ensure_finite(monthly_payment)?;

    let total_payment = monthly_payment * months;
    let total_interest = total_payment - principal;

    Ok(LoanQuote {
        monthly_payment: ensure_finite(round_cents(monthly_payment))?,
        total_payment: ensure_finite(round_cents(total_payment))?,
        total_interest: ensure_finite(round_cents(total_interest))?,
        principal: ensure_finite(round_cents(principal))?,
    })
}

/// Magnitude from which every `f64` is already a whole number.
const WHOLE_NUMBER_THRESHOLD: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round half away from zero to two decimal places.
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    if amount.abs() >= WHOLE_NUMBER_THRESHOLD {
        return amount;
    }
    (amount * 100.0).round() / 100.0
}

/// # Errors
/// Returns a validation error when `result` is NaN or infinite.
pub fn ensure_finite(result: f64) -> Result<f64, DomainError> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(DomainError::validation(
            CalcFields::RESULT,
            "Result is not a finite number",
        ))
    }
}
