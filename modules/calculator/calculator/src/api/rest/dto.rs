use calculator_sdk::{
    BasicCalculation, CalculationKind, CalculationRecord, LoanQuote, LoanTerms, NewCalculation,
    ScientificCalculation,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::error::DomainError;
use crate::domain::fields::CalcFields;

/// Label given to saved records that do not carry a `type`.
pub const DEFAULT_SAVE_TYPE: &str = "custom";

/// Numeric request field. Accepts a JSON number or a string holding one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    /// # Errors
    /// Returns [`DomainError::InvalidInput`] when the text is not a number.
    pub fn to_f64(&self, field: &str) -> Result<f64, DomainError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                DomainError::invalid_input(format!("invalid number for '{field}': '{s}'"))
            }),
        }
    }
}

/// Tracks how many of the expected fields a request actually supplied.
#[derive(Default)]
struct Inputs {
    supplied: u32,
}

impl Inputs {
    fn number(
        &mut self,
        input: Option<&NumberInput>,
        field: &str,
        default: f64,
    ) -> Result<f64, DomainError> {
        match input.filter(|v| !v.is_blank()) {
            Some(v) => {
                let parsed = v.to_f64(field)?;
                self.supplied += 1;
                Ok(parsed)
            }
            None => Ok(default),
        }
    }

    fn text(&mut self, input: Option<String>) -> String {
        match input.filter(|s| !s.trim().is_empty()) {
            Some(s) => {
                self.supplied += 1;
                s
            }
            None => String::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BasicRequest {
    #[serde(default)]
    pub num1: Option<NumberInput>,
    #[serde(default)]
    pub num2: Option<NumberInput>,
    #[serde(default)]
    pub operation: Option<String>,
}

impl BasicRequest {
    /// # Errors
    /// Returns an error when a numeric field holds non-numeric text.
    pub fn into_calculation(self) -> Result<BasicCalculation, DomainError> {
        let mut inputs = Inputs::default();
        let num1 = inputs.number(self.num1.as_ref(), CalcFields::NUM1, 0.0)?;
        let num2 = inputs.number(self.num2.as_ref(), CalcFields::NUM2, 0.0)?;
        let operation = inputs.text(self.operation);
        Ok(BasicCalculation {
            num1,
            num2,
            operation,
            inputs_count: inputs.supplied,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ScientificRequest {
    #[serde(default)]
    pub value: Option<NumberInput>,
    #[serde(default)]
    pub operation: Option<String>,
    /// Exponent for `power`, defaults to 2.
    #[serde(default)]
    pub power: Option<NumberInput>,
}

impl ScientificRequest {
    /// # Errors
    /// Returns an error when a numeric field holds non-numeric text.
    pub fn into_calculation(self) -> Result<ScientificCalculation, DomainError> {
        let mut inputs = Inputs::default();
        let value = inputs.number(self.value.as_ref(), CalcFields::VALUE, 0.0)?;
        let operation = inputs.text(self.operation);
        let power = inputs.number(self.power.as_ref(), CalcFields::POWER, 2.0)?;
        Ok(ScientificCalculation {
            value,
            operation,
            power,
            inputs_count: inputs.supplied,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoanRequest {
    #[serde(default)]
    pub principal: Option<NumberInput>,
    /// Percent per year.
    #[serde(default)]
    pub annual_rate: Option<NumberInput>,
    #[serde(default)]
    pub years: Option<NumberInput>,
}

impl LoanRequest {
    /// # Errors
    /// Returns an error when a numeric field holds non-numeric text.
    pub fn into_terms(self) -> Result<LoanTerms, DomainError> {
        let mut inputs = Inputs::default();
        let principal = inputs.number(self.principal.as_ref(), CalcFields::PRINCIPAL, 0.0)?;
        let annual_rate = inputs.number(self.annual_rate.as_ref(), CalcFields::ANNUAL_RATE, 0.0)?;
        let years = inputs.number(self.years.as_ref(), CalcFields::YEARS, 0.0)?;
        Ok(LoanTerms {
            principal,
            annual_rate,
            years,
            inputs_count: inputs.supplied,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveRequest {
    pub expression: String,
    pub result: NumberInput,
    #[serde(default, rename = "type")]
    pub calculation_type: Option<String>,
    #[serde(default)]
    pub inputs_count: Option<u32>,
}

impl SaveRequest {
    /// # Errors
    /// Returns an error when `result` is not a number.
    pub fn into_new_calculation(self) -> Result<NewCalculation, DomainError> {
        let result = self.result.to_f64(CalcFields::RESULT)?;
        let tag = self
            .calculation_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SAVE_TYPE.to_owned());
        Ok(NewCalculation {
            expression: self.expression,
            result,
            kind: CalculationKind::from_tag(&tag),
            inputs_count: self.inputs_count.unwrap_or_default(),
        })
    }
}

/// Body of the legacy `/calculate` endpoint. Both fields are required.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LegacyCalculateRequest {
    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub result: Option<NumberInput>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Number of records to return (1..=1000).
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResultDto {
    pub result: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoanQuoteDto {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub principal: f64,
}

impl From<LoanQuote> for LoanQuoteDto {
    fn from(quote: LoanQuote) -> Self {
        Self {
            monthly_payment: quote.monthly_payment,
            total_payment: quote.total_payment,
            total_interest: quote.total_interest,
            principal: quote.principal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusDto {
    pub status: String,
}

impl StatusDto {
    #[must_use]
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_owned(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryRecordDto {
    pub id: i64,
    pub expression: String,
    pub result: f64,
    pub calculation_type: String,
    pub inputs_count: u32,
    pub timestamp: DateTime<Utc>,
}

impl From<CalculationRecord> for HistoryRecordDto {
    fn from(record: CalculationRecord) -> Self {
        Self {
            id: record.id,
            calculation_type: record.kind.as_str().to_owned(),
            expression: record.expression,
            result: record.result,
            inputs_count: record.inputs_count,
            timestamp: record.timestamp,
        }
    }
}
