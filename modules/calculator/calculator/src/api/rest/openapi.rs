use utoipa::OpenApi;

use super::dto::{
    BasicRequest, ErrorDto, HealthDto, HistoryRecordDto, LegacyCalculateRequest, LoanQuoteDto,
    LoanRequest, NumberInput, ResultDto, SaveRequest, ScientificRequest, StatusDto,
};
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(title = "Calculator API"),
    paths(
        handlers::calculate_basic,
        handlers::calculate_scientific,
        handlers::calculate_loan,
        handlers::save_calculation,
        handlers::record_expression,
        handlers::history,
        handlers::health,
    ),
    components(schemas(
        NumberInput,
        BasicRequest,
        ScientificRequest,
        LoanRequest,
        SaveRequest,
        LegacyCalculateRequest,
        ResultDto,
        LoanQuoteDto,
        StatusDto,
        HealthDto,
        ErrorDto,
        HistoryRecordDto,
    )),
    tags(
        (name = "calculator", description = "Arithmetic, scientific and loan calculations"),
        (name = "history", description = "Calculation history"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;
