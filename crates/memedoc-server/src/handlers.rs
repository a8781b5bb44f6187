//! HTTP Handlers

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use memedoc_core::{
    DiagnosisRequest, MemeDocError, PriceSeries, RiskInput, TokenPair,
    descriptor::AxisReadings,
    diagnose,
    simulation::{MemeSeriesGenerator, SHORT_WINDOW},
};

use crate::state::AppState;

/// Longest synthetic series served
pub const MAX_SERIES_PERIODS: usize = 500;

type ApiError = (StatusCode, Json<ErrorResponse>);

type ApiResult<T> = Result<Json<T>, ApiError>;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub market_source: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    #[serde(default)]
    pub periods: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Slider values; range-checked by `RiskInput::from_raw`, not by serde
#[derive(Debug, Deserialize)]
pub struct AxesQuery {
    #[serde(default = "default_axis")]
    pub x: i64,
    #[serde(default = "default_axis")]
    pub y: i64,
    #[serde(default = "default_axis")]
    pub z: i64,
    #[serde(default = "default_position")]
    pub p: i64,
}

const fn default_axis() -> i64 {
    50
}

const fn default_position() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct DiagnoseRequest {
    pub narrative_strength: i64,
    pub sentiment_amplification: i64,
    pub price_position: i64,
    pub position_size_pct: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub token_address: Option<String>,
}

fn error_response(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

fn core_error(err: &MemeDocError) -> ApiError {
    let status = match err {
        MemeDocError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
        MemeDocError::InputOutOfRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        MemeDocError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    };
    if !err.is_client_error() {
        tracing::error!("Market lookup error: {}", err);
    }
    error_response(status, err.user_message(), err.code())
}

/// Malformed JSON body, keeping axum's status and reason
fn json_rejection(rejection: JsonRejection) -> ApiError {
    tracing::debug!(status = %rejection.status(), "Rejected request body");
    error_response(rejection.status(), rejection.body_text(), "INVALID_REQUEST")
}

/// Malformed query string
fn query_rejection(rejection: QueryRejection) -> ApiError {
    tracing::debug!(status = %rejection.status(), "Rejected query string");
    error_response(rejection.status(), rejection.body_text(), "INVALID_REQUEST")
}

/// Whether the client asked for the plain-text report
fn wants_text(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/plain") && !accept.contains("application/json"))
}

fn token_not_found(address: &str) -> ApiError {
    error_response(
        StatusCode::NOT_FOUND,
        format!("No trading pairs found for {}", address.trim()),
        "TOKEN_NOT_FOUND",
    )
}

async fn lookup_token(state: &AppState, address: &str) -> Result<TokenPair, ApiError> {
    state
        .market
        .token_info(address)
        .await
        .map_err(|e| core_error(&e))?
        .ok_or_else(|| token_not_found(address))
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        market_source: state.market.name().to_string(),
    })
}

/// Token market data lookup
pub async fn token_info(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult<TokenPair> {
    lookup_token(&state, &address).await.map(Json)
}

/// Synthetic meme-style price series for charting
pub async fn price_series(query: Result<Query<SeriesQuery>, QueryRejection>) -> ApiResult<PriceSeries> {
    let Query(query) = query.map_err(query_rejection)?;
    let periods = query.periods.unwrap_or(SHORT_WINDOW);
    if periods > MAX_SERIES_PERIODS {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("periods must be at most {MAX_SERIES_PERIODS}"),
            "INVALID_PERIODS",
        ));
    }

    let generator = MemeSeriesGenerator::new();
    let now = Utc::now();
    let series = match query.seed {
        Some(seed) => generator.generate_seeded(periods, now, seed),
        None => generator.generate_random(periods, now),
    };
    Ok(Json(series))
}

/// Level text and colour for slider values
pub async fn axis_readings(query: Result<Query<AxesQuery>, QueryRejection>) -> ApiResult<AxisReadings> {
    let Query(query) = query.map_err(query_rejection)?;
    let input = RiskInput::from_raw(query.x, query.y, query.z, query.p).map_err(|e| core_error(&e))?;
    Ok(Json(AxisReadings::from_input(&input)))
}

/// Score the submitted ratings and return a report.
///
/// JSON by default; `Accept: text/plain` gets the rendered text report.
pub async fn diagnose_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<DiagnoseRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(json_rejection)?;
    let input = RiskInput::from_raw(
        payload.narrative_strength,
        payload.sentiment_amplification,
        payload.price_position,
        payload.position_size_pct,
    )
    .map_err(|e| core_error(&e))?;

    let token = match payload.token_address.as_deref() {
        Some(address) => Some(lookup_token(&state, address).await?),
        None => None,
    };

    let report = diagnose(DiagnosisRequest {
        input,
        notes: payload.notes,
        token,
    });

    tracing::info!(
        id = %report.id,
        score = report.output.score,
        band = ?report.output.classification.band,
        "Diagnosis generated"
    );

    if wants_text(&headers) {
        return Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            report.render_text(),
        )
            .into_response());
    }
    Ok(Json(report).into_response())
}
