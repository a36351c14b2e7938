use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{ApiError, DataStatus};
use crate::calculate::{self, LineupReport, NoData};
use crate::normalize::coerce_season;

#[derive(Debug, Deserialize)]
pub struct LineupParams {
    pub season: Option<String>,
    pub round: Option<u32>,
    pub team: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LineupResponse {
    pub status: DataStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Seasons with lineups, most recent first
    pub seasons: Vec<String>,

    pub report: Option<LineupReport>,
}

impl LineupResponse {
    fn no_data(reason: NoData, seasons: Vec<String>) -> Self {
        Self {
            status: DataStatus::NoData,
            message: Some(reason.to_string()),
            seasons,
            report: None,
        }
    }
}

/// Favourite picks, captains and per-position tops for one round.
pub async fn lineups(
    State(state): State<AppState>,
    params: Result<Query<LineupParams>, QueryRejection>,
) -> Result<Json<LineupResponse>, ApiError> {
    let Query(params) = params?;

    let Some(ds) = state.lineups().await else {
        return Ok(Json(LineupResponse::no_data(NoData::NoDataset, Vec::new())));
    };

    let seasons = calculate::lineup_seasons(&ds);
    let season = params
        .season
        .as_deref()
        .and_then(coerce_season)
        .or_else(|| seasons.first().cloned());

    let Some(season) = season else {
        return Ok(Json(LineupResponse::no_data(NoData::NoDataset, seasons)));
    };

    match calculate::lineup_report(&ds, &season, params.round, params.team.as_deref()) {
        Ok(report) => Ok(Json(LineupResponse {
            status: DataStatus::Ok,
            message: None,
            seasons,
            report: Some(report),
        })),
        Err(reason) => Ok(Json(LineupResponse::no_data(reason, seasons))),
    }
}
