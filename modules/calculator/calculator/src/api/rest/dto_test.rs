use calculator_sdk::CalculationKind;
use serde_json::json;

use super::dto::{
    BasicRequest, HistoryRecordDto, LoanRequest, NumberInput, SaveRequest, ScientificRequest,
};
use crate::domain::error::DomainError;

fn basic(body: serde_json::Value) -> BasicRequest {
    serde_json::from_value(body).unwrap()
}

#[test]
fn test_numbers_and_numeric_strings_are_accepted() {
    let calc = basic(json!({"num1": 4, "num2": " 2.5 ", "operation": "add"}))
        .into_calculation()
        .unwrap();

    assert!((calc.num1 - 4.0).abs() < f64::EPSILON);
    assert!((calc.num2 - 2.5).abs() < f64::EPSILON);
    assert_eq!(calc.operation, "add");
    assert_eq!(calc.inputs_count, 3);
}

#[test]
fn test_missing_null_and_blank_fields_default_to_zero() {
    let calc = basic(json!({"num1": null, "num2": "", "operation": "multiply"}))
        .into_calculation()
        .unwrap();

    assert!(calc.num1.abs() < f64::EPSILON);
    assert!(calc.num2.abs() < f64::EPSILON);
    assert_eq!(calc.inputs_count, 1);

    let empty = basic(json!({})).into_calculation().unwrap();
    assert_eq!(empty.operation, "");
    assert_eq!(empty.inputs_count, 0);
}

#[test]
fn test_non_numeric_text_is_invalid_input() {
    let err = basic(json!({"num1": "abc", "num2": 1, "operation": "add"}))
        .into_calculation()
        .unwrap_err();

    assert!(matches!(err, DomainError::InvalidInput(_)));
    assert_eq!(err.to_string(), "invalid number for 'num1': 'abc'");
}

#[test]
fn test_non_numeric_json_type_fails_deserialization() {
    let result: Result<BasicRequest, _> = serde_json::from_value(json!({"num1": [1, 2]}));
    assert!(result.is_err());
}

#[test]
fn test_scientific_power_defaults_to_two() {
    let req: ScientificRequest =
        serde_json::from_value(json!({"value": 3, "operation": "power"})).unwrap();
    let calc = req.into_calculation().unwrap();

    assert!((calc.power - 2.0).abs() < f64::EPSILON);
    assert_eq!(calc.inputs_count, 2);
}

#[test]
fn test_loan_terms_from_strings() {
    let req: LoanRequest = serde_json::from_value(
        json!({"principal": "100000", "annual_rate": "6", "years": 30}),
    )
    .unwrap();
    let terms = req.into_terms().unwrap();

    assert!((terms.principal - 100_000.0).abs() < f64::EPSILON);
    assert!((terms.annual_rate - 6.0).abs() < f64::EPSILON);
    assert_eq!(terms.inputs_count, 3);
}

#[test]
fn test_save_defaults_type_and_count() {
    let req: SaveRequest =
        serde_json::from_value(json!({"expression": "2+2", "result": "4"})).unwrap();
    let calc = req.into_new_calculation().unwrap();

    assert_eq!(calc.kind, CalculationKind::Custom("custom".to_owned()));
    assert_eq!(calc.inputs_count, 0);
    assert!((calc.result - 4.0).abs() < f64::EPSILON);
}

#[test]
fn test_save_keeps_known_type() {
    let req: SaveRequest = serde_json::from_value(
        json!({"expression": "sqrt(9)", "result": 3, "type": "scientific", "inputs_count": 2}),
    )
    .unwrap();
    let calc = req.into_new_calculation().unwrap();

    assert_eq!(calc.kind, CalculationKind::Scientific);
    assert_eq!(calc.inputs_count, 2);
}

#[test]
fn test_save_requires_expression() {
    let result: Result<SaveRequest, _> = serde_json::from_value(json!({"result": 1}));
    assert!(result.is_err());
}

#[test]
fn test_number_input_blank_detection() {
    assert!(NumberInput::Text("   ".to_owned()).is_blank());
    assert!(!NumberInput::Text("0".to_owned()).is_blank());
    assert!(!NumberInput::Number(0.0).is_blank());
}

#[test]
fn test_history_record_serializes_type_tag_and_rfc3339() {
    let record = calculator_sdk::CalculationRecord {
        id: 5,
        expression: "1 + 1".to_owned(),
        result: 2.0,
        kind: CalculationKind::Basic,
        inputs_count: 3,
        timestamp: chrono::DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&chrono::Utc),
    };

    let value = serde_json::to_value(HistoryRecordDto::from(record)).unwrap();

    assert_eq!(value["calculation_type"], "basic");
    assert_eq!(value["id"], 5);
    assert_eq!(value["timestamp"], "2024-01-02T03:04:05Z");
}
