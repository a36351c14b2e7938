//! REST API endpoints.
//!
//! Axum-based HTTP API serving the league table, team profiles, round
//! leaderboards and lineup statistics to the rendering layer. Every table
//! endpoint takes the same cascading filters (season, competition, rounds).

pub mod routes;
pub mod state;

use axum::{
    extract::rejection::QueryRejection,
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::calculate::{self, CompetitionFilter, NoData, RangeQuery, RoundRange};
use crate::models::{Diagnostics, ResultsDataset};
use crate::normalize::coerce_season;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Whether a table response carries data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataStatus {
    Ok,
    NoData,
}

/// Filters shared by the table endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeParams {
    pub season: Option<String>,
    pub competition: Option<String>,
    pub from: Option<u32>,
    pub to: Option<u32>,
}

/// A ranked table plus the filters that produced it.
#[derive(Debug, Serialize)]
pub struct TableResponse<T> {
    pub status: DataStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub season: Option<String>,
    pub competition: Option<String>,
    pub rounds: Option<RoundRange>,
    pub rows: Vec<T>,
    pub diagnostics: Diagnostics,
}

impl<T> TableResponse<T> {
    pub fn ok(query: &RangeQuery, rows: Vec<T>, diagnostics: Diagnostics) -> Self {
        Self {
            status: DataStatus::Ok,
            message: None,
            season: Some(query.season.clone()),
            competition: Some(query.competition.label().to_string()),
            rounds: query.rounds,
            rows,
            diagnostics,
        }
    }

    pub fn no_data(reason: &NoData) -> Self {
        Self {
            status: DataStatus::NoData,
            message: Some(reason.to_string()),
            season: None,
            competition: None,
            rounds: None,
            rows: Vec::new(),
            diagnostics: Diagnostics::default(),
        }
    }
}

/// Turn request parameters into a query. A missing season means the most
/// recent one; missing round bounds mean the season's full range.
pub fn resolve_query(ds: &ResultsDataset, params: &RangeParams) -> Result<RangeQuery, NoData> {
    let season = match params.season.as_deref().and_then(coerce_season) {
        Some(s) => s,
        None => calculate::seasons(ds)
            .into_iter()
            .next()
            .ok_or(NoData::NoDataset)?,
    };

    let mut query = RangeQuery::season(season)
        .with_competition(CompetitionFilter::parse(params.competition.as_deref()));

    if let Some(bounds) = calculate::round_bounds(ds, &query.season) {
        query = query.with_rounds(bounds.with_overrides(params.from, params.to));
    }

    Ok(query)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET]);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, cross-origin requests disabled", origin);
            layer
        }
    }
}

/// Build the dashboard router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/api/health", get(routes::filters::health))
        .route("/api/filters", get(routes::filters::filters))
        .route("/api/standings", get(routes::standings::standings))
        .route("/api/teams", get(routes::teams::list_teams))
        .route("/api/teams/:name", get(routes::teams::team_profile))
        .route("/api/legends/hall-of-fame", get(routes::legends::hall_of_fame))
        .route(
            "/api/legends/round-champions",
            get(routes::legends::round_champions),
        )
        .route("/api/legends/round-kings", get(routes::legends::round_kings))
        .route("/api/lineups", get(routes::lineups::lineups))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
