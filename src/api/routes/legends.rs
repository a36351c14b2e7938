use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{resolve_query, ApiError, DataStatus, RangeParams, TableResponse};
use crate::calculate::{self, LeagueChampions, NoData, RangeQuery, Resolved};
use crate::config::ScoringConfig;
use crate::models::LeaderboardEntry;

#[derive(Debug, Deserialize)]
pub struct LegendParams {
    pub season: Option<String>,
    pub from: Option<u32>,
    pub to: Option<u32>,
    pub limit: Option<usize>,
    pub league: Option<String>,
}

impl LegendParams {
    /// Leaderboards always span every competition of the season.
    fn range(&self) -> RangeParams {
        RangeParams {
            season: self.season.clone(),
            competition: None,
            from: self.from,
            to: self.to,
        }
    }
}

async fn season_sides(
    state: &AppState,
    params: &LegendParams,
) -> Result<(RangeQuery, Resolved), NoData> {
    let ds = state.results().await.ok_or(NoData::NoDataset)?;
    let query = resolve_query(&ds, &params.range())?;
    let resolved = calculate::sides_for(&ds, &query, state.config.scoring.draw_margin)?;
    Ok((query, resolved))
}

/// All-time best single-round scores of the season.
pub async fn hall_of_fame(
    State(state): State<AppState>,
    params: Result<Query<LegendParams>, QueryRejection>,
) -> Result<Json<TableResponse<LeaderboardEntry>>, ApiError> {
    let Query(params) = params?;

    let (query, resolved) = match season_sides(&state, &params).await {
        Ok(v) => v,
        Err(reason) => return Ok(Json(TableResponse::no_data(&reason))),
    };

    let max = state.config.scoring.hall_of_fame_limit;
    let limit = params.limit.unwrap_or(max).clamp(1, max);
    let rows = calculate::hall_of_fame(&resolved.sides, limit);
    Ok(Json(TableResponse::ok(&query, rows, resolved.diagnostics)))
}

#[derive(Debug, Serialize)]
pub struct RoundChampionsResponse {
    pub status: DataStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub season: Option<String>,

    /// Every league competition of the season
    pub leagues: Vec<String>,

    pub champions: Vec<LeagueChampions>,
}

/// Top scorer(s) of each round, per league. `league` narrows to one.
pub async fn round_champions(
    State(state): State<AppState>,
    params: Result<Query<LegendParams>, QueryRejection>,
) -> Result<Json<RoundChampionsResponse>, ApiError> {
    let Query(params) = params?;

    let (query, resolved) = match season_sides(&state, &params).await {
        Ok(v) => v,
        Err(reason) => {
            return Ok(Json(RoundChampionsResponse {
                status: DataStatus::NoData,
                message: Some(reason.to_string()),
                season: None,
                leagues: Vec::new(),
                champions: Vec::new(),
            }))
        }
    };

    let scoring: &ScoringConfig = &state.config.scoring;
    let leagues = calculate::league_competitions(&resolved.sides, scoring);

    let champions = match params.league.as_deref() {
        Some(league) => {
            if !leagues.iter().any(|l| l == league) {
                return Err(ApiError::NotFound(format!("League '{}'", league)));
            }
            vec![LeagueChampions {
                competition: league.to_string(),
                champions: calculate::round_champions(&resolved.sides, league, scoring),
            }]
        }
        None => calculate::round_champions_by_league(&resolved.sides, scoring),
    };

    let (status, message) = if leagues.is_empty() {
        (
            DataStatus::NoData,
            Some("No league competitions found".to_string()),
        )
    } else {
        (DataStatus::Ok, None)
    };

    Ok(Json(RoundChampionsResponse {
        status,
        message,
        season: Some(query.season),
        leagues,
        champions,
    }))
}

/// Top scorer(s) of each round across every league jointly.
pub async fn round_kings(
    State(state): State<AppState>,
    params: Result<Query<LegendParams>, QueryRejection>,
) -> Result<Json<TableResponse<LeaderboardEntry>>, ApiError> {
    let Query(params) = params?;

    let (query, resolved) = match season_sides(&state, &params).await {
        Ok(v) => v,
        Err(reason) => return Ok(Json(TableResponse::no_data(&reason))),
    };

    let rows = calculate::round_kings(&resolved.sides, &state.config.scoring);
    Ok(Json(TableResponse::ok(&query, rows, resolved.diagnostics)))
}
