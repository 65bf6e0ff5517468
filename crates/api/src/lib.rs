mod rate_limit;

use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Json, Query, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{body::Body, Router};
use serde::{Deserialize, Serialize};
use sewa_agents::SahayakAgent;
use sewa_core::{
    default_district, nearest_district, quick_questions, ChatInput, CropRecommendation, District,
    IrrigationAdvisory, PestError, QuickQuestion, ResponseTable, Season, GREETING,
};
use sewa_observability::AppMetrics;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::rate_limit::ClientRateLimiter;

const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct ApiState {
    pub agent: Arc<SahayakAgent>,
    pub metrics: Arc<AppMetrics>,
    pub api_key: String,
    pub limiter: ClientRateLimiter,
    pub allowed_origins: Arc<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: sewa_observability::MetricsSnapshot,
    capabilities: &'static [&'static str],
}

#[derive(Debug, Clone, Deserialize)]
struct ChatRequest {
    session_id: Option<String>,
    text: String,
}

#[derive(Debug, Serialize)]
struct ChatSuggestionsResponse {
    greeting: &'static str,
    quick_questions: &'static [QuickQuestion],
}

#[derive(Debug, Clone, Deserialize)]
struct AdvisoryRequest {
    soil_moisture: Option<f64>,
}

#[derive(Debug, Serialize)]
struct AdvisoryResponse {
    advisory: Option<IrrigationAdvisory>,
}

#[derive(Debug, Clone, Deserialize)]
struct WeatherInterpretRequest {
    code: u16,
}

#[derive(Debug, Serialize)]
struct WeatherInterpretResponse {
    code: u16,
    condition: sewa_core::SkyCondition,
    label: &'static str,
    icon: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
struct DistrictsQuery {
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Serialize)]
struct DistrictsResponse {
    districts: &'static [District],
    default: District,
    nearest: Option<District>,
}

#[derive(Debug, Clone, Deserialize)]
struct CropsQuery {
    season: Option<String>,
}

#[derive(Debug, Serialize)]
struct CropsResponse {
    crops: Vec<&'static CropRecommendation>,
}

#[derive(Debug, Clone, Deserialize)]
struct MarketReportRequest {
    state: String,
    commodity: String,
    rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
struct PestInterpretRequest {
    predictions: BTreeMap<String, f64>,
}

pub fn build_app() -> Router {
    let metrics = AppMetrics::shared();
    let agent = Arc::new(SahayakAgent::new(ResponseTable::builtin(), metrics.clone()));

    let api_key = env::var("SEWA_API_KEY").unwrap_or_else(|_| "dev-sewa-key".to_string());
    let rate_limit_max = env::var("SEWA_RATE_LIMIT")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(80);
    let rate_limit_window = Duration::from_secs(
        env::var("SEWA_RATE_WINDOW_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(60),
    );
    let allowed_origins = parse_allowed_origins();

    let state = ApiState {
        agent,
        metrics,
        api_key,
        limiter: ClientRateLimiter::new(rate_limit_window, rate_limit_max),
        allowed_origins: Arc::new(allowed_origins),
    };

    build_router(state)
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/chat", post(chat))
        .route("/v1/chat/suggestions", get(chat_suggestions))
        .route("/v1/advisory", post(advisory))
        .route("/v1/weather/interpret", post(weather_interpret))
        .route("/v1/districts", get(districts))
        .route("/v1/crops", get(crops))
        .route("/v1/market/report", post(market_report))
        .route("/v1/pests/interpret", post(pests_interpret))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api_key_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
        capabilities: &[
            "chat",
            "irrigation_advisory",
            "weather_interpret",
            "districts",
            "crops",
            "market_report",
            "pest_interpret",
        ],
    };
    (StatusCode::OK, Json(payload))
}

async fn chat(State(state): State<ApiState>, Json(input): Json<ChatRequest>) -> impl IntoResponse {
    let reply = state.agent.handle_chat(ChatInput {
        session_id: input.session_id,
        text: input.text,
    });
    (StatusCode::OK, Json(reply))
}

async fn chat_suggestions() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ChatSuggestionsResponse {
            greeting: GREETING,
            quick_questions: quick_questions(),
        }),
    )
}

async fn advisory(
    State(state): State<ApiState>,
    Json(input): Json<AdvisoryRequest>,
) -> impl IntoResponse {
    let advisory = state.agent.irrigation_advisory(input.soil_moisture);
    (StatusCode::OK, Json(AdvisoryResponse { advisory }))
}

async fn weather_interpret(
    State(state): State<ApiState>,
    Json(input): Json<WeatherInterpretRequest>,
) -> impl IntoResponse {
    let condition = state.agent.weather_condition(input.code);
    (
        StatusCode::OK,
        Json(WeatherInterpretResponse {
            code: input.code,
            condition,
            label: condition.label(),
            icon: condition.icon(),
        }),
    )
}

async fn districts(Query(query): Query<DistrictsQuery>) -> impl IntoResponse {
    let nearest = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => Some(nearest_district(lat, lon)),
        _ => None,
    };
    (
        StatusCode::OK,
        Json(DistrictsResponse {
            districts: sewa_core::DISTRICTS,
            default: default_district(),
            nearest,
        }),
    )
}

async fn crops(State(state): State<ApiState>, Query(query): Query<CropsQuery>) -> Response {
    let season = match query.season.as_deref() {
        Some(raw) => match Season::parse(raw) {
            Some(season) => Some(season),
            None => {
                return error_response(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "invalid_season",
                    "season must be rabi or kharif",
                )
            }
        },
        None => None,
    };

    let crops = state.agent.crop_cards(season);
    (StatusCode::OK, Json(CropsResponse { crops })).into_response()
}

async fn market_report(
    State(state): State<ApiState>,
    Json(input): Json<MarketReportRequest>,
) -> impl IntoResponse {
    let report = state
        .agent
        .market_report(&input.state, &input.commodity, &input.rows);
    (StatusCode::OK, Json(report))
}

async fn pests_interpret(
    State(state): State<ApiState>,
    Json(input): Json<PestInterpretRequest>,
) -> Response {
    match state.agent.pest_diagnosis(&input.predictions) {
        Ok(diagnosis) => (StatusCode::OK, Json(diagnosis)).into_response(),
        Err(error @ PestError::EmptyPredictions) => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "empty_predictions",
            &error.to_string(),
        ),
    }
}

fn error_response(status: StatusCode, kind: &str, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": kind,
            "message": message
        })),
    )
        .into_response()
}

fn is_public_endpoint(path: &str) -> bool {
    path == "/health"
}

async fn api_key_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || is_public_endpoint(request.uri().path()) {
        return next.run(request).await;
    }

    let header_key = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if header_key != state.api_key {
        return error_response(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "missing or invalid x-api-key",
        );
    }

    next.run(request).await
}

async fn rate_limit_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || is_public_endpoint(request.uri().path()) {
        return next.run(request).await;
    }

    let ip = request_ip(&request);
    if !state.limiter.allow(&ip) {
        return error_response(
            StatusCode::TOO_MANY_REQUESTS,
            "rate_limited",
            "rate limit exceeded for this IP",
        );
    }

    next.run(request).await
}

async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}

fn build_cors_layer(allowed_origins: &Arc<Vec<String>>) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();
    let origins = if origins.is_empty() {
        vec![HeaderValue::from_static("http://localhost:3000")]
    } else {
        origins
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-api-key"),
        ])
}

fn parse_allowed_origins() -> Vec<String> {
    let default_origins = ["http://localhost:3000", "http://127.0.0.1:3000"];

    env::var("SEWA_ALLOWED_ORIGINS")
        .ok()
        .map(|value| {
            value
                .split(',')
                .map(|origin| origin.trim().trim_end_matches('/').to_string())
                .filter(|origin| !origin.is_empty())
                .collect::<Vec<_>>()
        })
        .unwrap_or_else(|| {
            default_origins
                .iter()
                .map(|value| value.to_string())
                .collect()
        })
}

fn request_ip(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            value
                .split(',')
                .next()
                .unwrap_or("unknown")
                .trim()
                .to_string()
        })
        .unwrap_or_else(|| "local".to_string())
}
