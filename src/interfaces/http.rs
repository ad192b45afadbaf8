//! REST surface of the survey service.
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /api/health` - Readiness, including the data directory check
//! - `GET /api/responses?type=<name>` - Read the document stored for a category
//! - `POST /api/responses?type=<name>` - Overwrite the document for a category
//! - `GET /api/distribution?mean=&std_dev=&points=` - Sample a Gaussian curve
//! - `GET /api/distribution/defaults` - Curve parameters used when a query omits them
//! - `PUT /api/distribution/defaults` - Replace and persist those parameters

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{
    application::{
        DistributionQuery, HealthStatusResponse, ResponseService, ResponsesQuery, SaveResponse,
    },
    domain::{DistributionParams, DomainError, Point, ResponseDocument},
    settings::ConfigManager,
};

/// Shared handles every handler can reach.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ResponseService>,
    pub config: Arc<ConfigManager>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Error returned from handlers, rendered as `{ "error", "code" }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Map a domain failure; `code` labels server-side failures of this handler.
    fn from_domain(err: DomainError, code: &'static str) -> Self {
        match err {
            DomainError::Validation(message) => Self::bad_request(message),
            other => Self::internal(other.to_string(), code),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "INVALID_REQUEST",
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>, code: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
                code: self.code.to_string(),
            }),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Query string as ordered pairs, so repeated keys never fail extraction.
pub type RawQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

fn query_pairs(raw: RawQuery) -> ApiResult<Vec<(String, String)>> {
    raw.map(|Query(pairs)| pairs)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/health", get(readiness))
        .route("/api/responses", get(get_responses).post(post_responses))
        .route("/api/distribution", get(get_distribution))
        .route(
            "/api/distribution/defaults",
            get(get_distribution_defaults).put(put_distribution_defaults),
        )
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "survey-service"
    }))
}

/// Readiness details, including a check that the data directory is usable.
pub async fn readiness(State(state): State<AppState>) -> ApiResult<Json<HealthStatusResponse>> {
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || service.health())
        .await
        .map_err(|err| ApiError::internal(err.to_string(), "HEALTH_FAILED"))?
        .map(Json)
        .map_err(|err| ApiError::from_domain(err, "HEALTH_FAILED"))
}

pub async fn get_responses(
    State(state): State<AppState>,
    raw: RawQuery,
) -> ApiResult<Json<ResponseDocument>> {
    let query = ResponsesQuery::from_pairs(&query_pairs(raw)?);
    if query.kind.is_none() {
        warn!("GET request missing type parameter");
    }
    let service = Arc::clone(&state.service);

    let result = tokio::task::spawn_blocking(move || service.fetch(query.kind.as_deref()))
        .await
        .map_err(|err| ApiError::internal(err.to_string(), "LOAD_FAILED"))?;

    match result {
        Ok(document) => Ok(Json(document)),
        Err(e) => {
            if !e.is_client_error() {
                error!("Error in GET /api/responses: {}", e);
            }
            Err(ApiError::from_domain(e, "LOAD_FAILED"))
        }
    }
}

pub async fn post_responses(
    State(state): State<AppState>,
    raw: RawQuery,
    body: Bytes,
) -> ApiResult<Json<SaveResponse>> {
    let query = ResponsesQuery::from_pairs(&query_pairs(raw)?);
    if query.kind.is_none() {
        warn!("POST request missing type parameter");
    }
    let service = Arc::clone(&state.service);

    let result = tokio::task::spawn_blocking(move || service.store(query.kind.as_deref(), &body))
        .await
        .map_err(|err| ApiError::internal(err.to_string(), "SAVE_FAILED"))?;

    match result {
        Ok(()) => Ok(Json(SaveResponse::ok())),
        Err(e) => {
            if !e.is_client_error() {
                error!("Error in POST /api/responses: {}", e);
            }
            Err(ApiError::from_domain(e, "SAVE_FAILED"))
        }
    }
}

pub async fn get_distribution(
    State(state): State<AppState>,
    raw: RawQuery,
) -> ApiResult<Json<Vec<Point>>> {
    let query = DistributionQuery::from_pairs(&query_pairs(raw)?)
        .map_err(|err| ApiError::from_domain(err, "DISTRIBUTION_FAILED"))?;
    let params = query.resolve(state.config.distribution_defaults());
    params
        .validate()
        .map_err(|err| ApiError::from_domain(err, "DISTRIBUTION_FAILED"))?;

    info!(
        mean = params.mean,
        std_dev = params.std_dev,
        points = params.num_points,
        "generating distribution"
    );
    Ok(Json(params.generate()))
}

pub async fn get_distribution_defaults(
    State(state): State<AppState>,
) -> Json<DistributionParams> {
    Json(state.config.current().distribution)
}

/// Replace the curve parameters used when a request leaves them out.
pub async fn put_distribution_defaults(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<DistributionParams>> {
    let params: DistributionParams = serde_json::from_slice(&body).map_err(|err| {
        ApiError::bad_request(format!("request body is not valid distribution params: {err}"))
    })?;
    params
        .validate()
        .map_err(|err| ApiError::from_domain(err, "CONFIG_FAILED"))?;

    let config = Arc::clone(&state.config);
    let updated = tokio::task::spawn_blocking(move || config.set_distribution(params))
        .await
        .map_err(|err| ApiError::internal(err.to_string(), "CONFIG_FAILED"))?
        .map_err(|err| {
            error!("Failed to persist distribution defaults: {}", err);
            ApiError::internal(err.to_string(), "CONFIG_FAILED")
        })?;

    info!(
        mean = updated.distribution.mean,
        std_dev = updated.distribution.std_dev,
        points = updated.distribution.num_points,
        "updated distribution defaults"
    );
    Ok(Json(updated.distribution))
}
