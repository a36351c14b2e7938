use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{ApiError, DataStatus};
use crate::calculate::{self, NoData, RoundRange, ALL_COMPETITIONS};
use crate::normalize::coerce_season;
use crate::storage::SourceStatus;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub results: SourceStatus,
    pub lineups: SourceStatus,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    state.results().await;
    state.lineups().await;
    let store = state.store.read().await;

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        results: store.results_status(),
        lineups: store.lineups_status(),
    })
}

#[derive(Debug, Deserialize)]
pub struct FilterParams {
    pub season: Option<String>,
}

/// Options for the season → competition → round selectors.
#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub status: DataStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub seasons: Vec<String>,
    pub season: Option<String>,

    /// "Todas" first, then each competition of the season
    pub competitions: Vec<String>,

    pub rounds: Option<RoundRange>,
    pub single_round: bool,
}

impl FiltersResponse {
    fn no_data(reason: NoData, seasons: Vec<String>) -> Self {
        Self {
            status: DataStatus::NoData,
            message: Some(reason.to_string()),
            seasons,
            season: None,
            competitions: Vec::new(),
            rounds: None,
            single_round: false,
        }
    }
}

pub async fn filters(
    State(state): State<AppState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<FiltersResponse>, ApiError> {
    let Query(params) = params?;

    let Some(ds) = state.results().await else {
        return Ok(Json(FiltersResponse::no_data(NoData::NoDataset, Vec::new())));
    };

    let seasons = calculate::seasons(&ds);
    let season = params
        .season
        .as_deref()
        .and_then(coerce_season)
        .or_else(|| seasons.first().cloned());

    let Some(season) = season else {
        return Ok(Json(FiltersResponse::no_data(NoData::NoDataset, seasons)));
    };

    let comps = calculate::competitions(&ds, &season);
    if comps.is_empty() {
        let reason = NoData::NoFixtures {
            season,
            competition: ALL_COMPETITIONS.to_string(),
        };
        return Ok(Json(FiltersResponse::no_data(reason, seasons)));
    }

    let mut competitions = vec![ALL_COMPETITIONS.to_string()];
    competitions.extend(comps);

    let rounds = calculate::round_bounds(&ds, &season);

    Ok(Json(FiltersResponse {
        status: DataStatus::Ok,
        message: None,
        seasons,
        season: Some(season),
        competitions,
        rounds,
        single_round: rounds.is_some_and(|r| r.is_single()),
    }))
}
