use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use super::handlers;
use crate::domain::service::Service;

/// All calculator endpoints with the service injected and request tracing applied.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/api/calculate/basic", post(handlers::calculate_basic))
        .route(
            "/api/calculate/scientific",
            post(handlers::calculate_scientific),
        )
        .route("/api/calculate/loan", post(handlers::calculate_loan))
        .route("/api/save", post(handlers::save_calculation))
        .route("/calculate", post(handlers::record_expression))
        .route("/history", get(handlers::history))
        .route("/api/history", get(handlers::history))
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(handlers::openapi_json))
        .layer(Extension(service))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<Body>| {
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        path = %req.uri().path(),
                        status = Empty,
                        latency_ms = Empty,
                    )
                })
                .on_response(|res: &Response<Body>, latency: Duration, span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                    tracing::debug!("request finished");
                }),
        )
}
