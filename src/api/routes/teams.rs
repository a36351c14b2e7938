use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{resolve_query, ApiError, DataStatus, RangeParams, TableResponse};
use crate::calculate::{self, NoData, RangeQuery};
use crate::models::{ResultsDataset, TeamProfile};

fn resolved_sides(
    ds: &ResultsDataset,
    params: &RangeParams,
    draw_margin: f64,
) -> Result<(RangeQuery, calculate::Resolved), NoData> {
    let query = resolve_query(ds, params)?;
    let resolved = calculate::sides_for(ds, &query, draw_margin)?;
    Ok((query, resolved))
}

/// Team names available under the current filters.
pub async fn list_teams(
    State(state): State<AppState>,
    params: Result<Query<RangeParams>, QueryRejection>,
) -> Result<Json<TableResponse<String>>, ApiError> {
    let Query(params) = params?;

    let Some(ds) = state.results().await else {
        return Ok(Json(TableResponse::no_data(&NoData::NoDataset)));
    };

    match resolved_sides(&ds, &params, state.config.scoring.draw_margin) {
        Ok((query, resolved)) => Ok(Json(TableResponse::ok(
            &query,
            calculate::entities(&resolved.sides),
            resolved.diagnostics,
        ))),
        Err(reason) => Ok(Json(TableResponse::no_data(&reason))),
    }
}

#[derive(Debug, Serialize)]
pub struct TeamProfileResponse {
    pub status: DataStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub profile: Option<TeamProfile>,
}

/// Points, averages and match history of one team.
pub async fn team_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
    params: Result<Query<RangeParams>, QueryRejection>,
) -> Result<Json<TeamProfileResponse>, ApiError> {
    let Query(params) = params?;

    let no_data = |reason: NoData| {
        Json(TeamProfileResponse {
            status: DataStatus::NoData,
            message: Some(reason.to_string()),
            profile: None,
        })
    };

    let Some(ds) = state.results().await else {
        return Ok(no_data(NoData::NoDataset));
    };

    let resolved = match resolved_sides(&ds, &params, state.config.scoring.draw_margin) {
        Ok((_, resolved)) => resolved,
        Err(reason) => return Ok(no_data(reason)),
    };

    let profile = calculate::team_profile(&resolved.sides, &name)
        .ok_or_else(|| ApiError::NotFound(format!("Team '{}'", name)))?;

    Ok(Json(TeamProfileResponse {
        status: DataStatus::Ok,
        message: None,
        profile: Some(profile),
    }))
}
