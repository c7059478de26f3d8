use std::sync::Arc;

use axum::extract::Extension;
use axum::Json;
use utoipa::OpenApi as _;

use crate::domain::service::Service;

use super::dto::{
    BasicRequest, ErrorDto, HealthDto, HistoryQuery, HistoryRecordDto, LegacyCalculateRequest,
    LoanQuoteDto, LoanRequest, ResultDto, SaveRequest, ScientificRequest, StatusDto,
};
use super::error::{ApiError, ApiResult};
use super::extract::{JsonBody, QueryParams};
use super::openapi::ApiDoc;
use crate::domain::fields::CalcFields;

#[utoipa::path(
    post,
    path = "/api/calculate/basic",
    request_body = BasicRequest,
    responses(
        (status = 200, body = ResultDto),
        (status = 400, body = ErrorDto)
    ),
    tag = "calculator"
)]
pub async fn calculate_basic(
    Extension(svc): Extension<Arc<Service>>,
    JsonBody(req): JsonBody<BasicRequest>,
) -> ApiResult<Json<ResultDto>> {
    let input = req.into_calculation()?;
    let result = svc.basic(&input).await?;
    Ok(Json(ResultDto { result }))
}

#[utoipa::path(
    post,
    path = "/api/calculate/scientific",
    request_body = ScientificRequest,
    responses(
        (status = 200, body = ResultDto),
        (status = 400, body = ErrorDto)
    ),
    tag = "calculator"
)]
pub async fn calculate_scientific(
    Extension(svc): Extension<Arc<Service>>,
    JsonBody(req): JsonBody<ScientificRequest>,
) -> ApiResult<Json<ResultDto>> {
    let input = req.into_calculation()?;
    let result = svc.scientific(&input).await?;
    Ok(Json(ResultDto { result }))
}

#[utoipa::path(
    post,
    path = "/api/calculate/loan",
    request_body = LoanRequest,
    responses(
        (status = 200, body = LoanQuoteDto),
        (status = 400, body = ErrorDto)
    ),
    tag = "calculator"
)]
pub async fn calculate_loan(
    Extension(svc): Extension<Arc<Service>>,
    JsonBody(req): JsonBody<LoanRequest>,
) -> ApiResult<Json<LoanQuoteDto>> {
    let terms = req.into_terms()?;
    let quote = svc.loan(&terms).await?;
    Ok(Json(quote.into()))
}

#[utoipa::path(
    post,
    path = "/api/save",
    request_body = SaveRequest,
    responses(
        (status = 200, body = StatusDto),
        (status = 400, body = ErrorDto)
    ),
    tag = "history"
)]
pub async fn save_calculation(
    Extension(svc): Extension<Arc<Service>>,
    JsonBody(req): JsonBody<SaveRequest>,
) -> ApiResult<Json<StatusDto>> {
    let calculation = req.into_new_calculation()?;
    svc.save_external(calculation).await?;
    Ok(Json(StatusDto::new("ok")))
}

/// Record an expression evaluated by the browser.
#[utoipa::path(
    post,
    path = "/calculate",
    request_body = LegacyCalculateRequest,
    responses(
        (status = 200, body = StatusDto),
        (status = 400, body = ErrorDto)
    ),
    tag = "history"
)]
pub async fn record_expression(
    Extension(svc): Extension<Arc<Service>>,
    JsonBody(req): JsonBody<LegacyCalculateRequest>,
) -> ApiResult<Json<StatusDto>> {
    let (Some(expression), Some(result)) = (req.expression, req.result) else {
        return Err(ApiError::bad_request("Invalid request"));
    };
    let result = result.to_f64(CalcFields::RESULT)?;
    svc.record_expression(expression, result).await?;
    Ok(Json(StatusDto::new("success")))
}

#[utoipa::path(
    get,
    path = "/history",
    params(HistoryQuery),
    responses(
        (status = 200, body = [HistoryRecordDto]),
        (status = 400, body = ErrorDto),
        (status = 500, body = ErrorDto)
    ),
    tag = "history"
)]
pub async fn history(
    Extension(svc): Extension<Arc<Service>>,
    QueryParams(query): QueryParams<HistoryQuery>,
) -> ApiResult<Json<Vec<HistoryRecordDto>>> {
    let records = svc
        .recent_history(query.limit)
        .await
        .map_err(ApiError::from_history_failure)?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, body = HealthDto)),
    tag = "system"
)]
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repo::HistoryRepository;
    use crate::config::CalculatorConfig;
    use crate::module::CalculatorModule;
    use crate::infra::storage::InMemoryHistoryRepository;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use calculator_sdk::{CalculationRecord, NewCalculation};
    use serde_json::Value;
    use tower::ServiceExt as _;

    struct FailingRepository;

    #[async_trait]
    impl HistoryRepository for FailingRepository {
        async fn append(&self, _calculation: NewCalculation) -> anyhow::Result<CalculationRecord> {
            anyhow::bail!("database is locked")
        }

        async fn list_recent(&self, _limit: u64) -> anyhow::Result<Vec<CalculationRecord>> {
            anyhow::bail!("database is locked")
        }
    }

    fn create_test_router(repo: Arc<dyn HistoryRepository>) -> Router {
        CalculatorModule::with_repository(repo, &CalculatorConfig::default()).router()
    }

    fn memory_router() -> Router {
        create_test_router(Arc::new(InMemoryHistoryRepository::new(10)))
    }

    async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        send(app, request).await
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        send(app, request).await
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_basic_handler_returns_result() {
        let app = memory_router();

        let (status, json) = post_json(
            &app,
            "/api/calculate/basic",
            r#"{"num1":"7","num2":2,"operation":"multiply"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"], 14.0);
    }

    #[tokio::test]
    async fn test_divide_by_zero_is_bad_request() {
        let app = memory_router();

        let (status, json) = post_json(
            &app,
            "/api/calculate/basic",
            r#"{"num1":1,"num2":0,"operation":"divide"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Division by zero");

        let (_, history) = get_json(&app, "/history").await;
        assert_eq!(history.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_malformed_number_is_bad_request() {
        let app = memory_router();

        let (status, json) = post_json(
            &app,
            "/api/calculate/scientific",
            r#"{"value":"twelve","operation":"sqrt"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid number for 'value': 'twelve'");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request_with_error_body() {
        let app = memory_router();

        let (status, json) = post_json(&app, "/api/calculate/basic", "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn test_loan_handler_returns_quote() {
        let app = memory_router();

        let (status, json) = post_json(
            &app,
            "/api/calculate/loan",
            r#"{"principal":100000,"annual_rate":6,"years":30}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["monthly_payment"], 599.55);
        assert_eq!(json["total_payment"], 215_838.19);
        assert_eq!(json["total_interest"], 115_838.19);
        assert_eq!(json["principal"], 100_000.0);
    }

    #[tokio::test]
    async fn test_huge_principal_quote_has_no_nulls() {
        let app = memory_router();

        let (status, json) = post_json(
            &app,
            "/api/calculate/loan",
            r#"{"principal":1e307,"annual_rate":0,"years":1}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        for field in ["monthly_payment", "total_payment", "total_interest", "principal"] {
            assert!(json[field].is_f64(), "{field} missing in {json}");
        }
        assert_eq!(json["principal"], 1e307);
    }

    #[tokio::test]
    async fn test_save_rejects_non_finite_result() {
        let app = memory_router();

        let (status, json) = post_json(
            &app,
            "/api/save",
            r#"{"expression":"big","result":"inf","type":"x"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Result is not a finite number");

        let (status, json) =
            post_json(&app, "/api/save", r#"{"expression":"?","result":"nan"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Result is not a finite number");

        let (_, history) = get_json(&app, "/history").await;
        assert_eq!(history.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_legacy_calculate_rejects_non_finite_result() {
        let app = memory_router();

        let (status, json) = post_json(
            &app,
            "/calculate",
            r#"{"expression":"1/0","result":"-infinity"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Result is not a finite number");
        let (_, history) = get_json(&app, "/history").await;
        assert_eq!(history.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_fail_basic() {
        let app = create_test_router(Arc::new(FailingRepository));

        let (status, json) = post_json(
            &app,
            "/api/calculate/basic",
            r#"{"num1":2,"num2":3,"operation":"add"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"], 5.0);
    }

    #[tokio::test]
    async fn test_storage_failure_fails_save() {
        let app = create_test_router(Arc::new(FailingRepository));

        let (status, json) =
            post_json(&app, "/api/save", r#"{"expression":"1+1","result":2}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Storage error: database is locked");
    }

    #[tokio::test]
    async fn test_storage_failure_on_history_is_server_error() {
        let app = create_test_router(Arc::new(FailingRepository));

        let (status, json) = get_json(&app, "/history").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Storage error: database is locked");
    }

    #[tokio::test]
    async fn test_save_then_history_round_trip() {
        let app = memory_router();

        let (status, json) = post_json(
            &app,
            "/api/save",
            r#"{"expression":"2 + 2","result":4,"type":"basic","inputs_count":3}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");

        let (status, history) = get_json(&app, "/api/history").await;
        assert_eq!(status, StatusCode::OK);
        let records = history.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["expression"], "2 + 2");
        assert_eq!(records[0]["result"], 4.0);
        assert_eq!(records[0]["calculation_type"], "basic");
        assert_eq!(records[0]["inputs_count"], 3);
    }

    #[tokio::test]
    async fn test_save_without_result_is_bad_request() {
        let app = memory_router();

        let (status, json) = post_json(&app, "/api/save", r#"{"expression":"1+1"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("result"));
    }

    #[tokio::test]
    async fn test_legacy_calculate_requires_both_fields() {
        let app = memory_router();

        let (status, json) = post_json(&app, "/calculate", r#"{"expression":"1+1"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid request");

        let (status, json) =
            post_json(&app, "/calculate", r#"{"expression":"6*7","result":42}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "success");

        let (_, history) = get_json(&app, "/history").await;
        assert_eq!(history[0]["calculation_type"], "expression");
        assert_eq!(history[0]["inputs_count"], 2);
    }

    #[tokio::test]
    async fn test_history_is_newest_first_and_limited() {
        let app = memory_router();
        for n in 1..=5 {
            let body = format!(r#"{{"num1":{n},"num2":1,"operation":"add"}}"#);
            post_json(&app, "/api/calculate/basic", &body).await;
        }

        let (status, history) = get_json(&app, "/history?limit=2").await;

        assert_eq!(status, StatusCode::OK);
        let records = history.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["expression"], "5 + 1");
        assert_eq!(records[1]["expression"], "4 + 1");
    }

    #[tokio::test]
    async fn test_invalid_limit_is_bad_request() {
        let app = memory_router();

        let (status, json) = get_json(&app, "/history?limit=lots").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_operation_is_rejected() {
        let app = memory_router();

        let (status, json) = post_json(
            &app,
            "/api/calculate/scientific",
            r#"{"value":8,"operation":"cbrt"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Unsupported operation 'cbrt'");
    }

    #[tokio::test]
    async fn test_health_and_openapi() {
        let app = memory_router();

        let (status, json) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));

        let (status, doc) = get_json(&app, "/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/api/calculate/loan"].is_object());
    }
}
