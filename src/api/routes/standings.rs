use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::{resolve_query, ApiError, RangeParams, TableResponse};
use crate::calculate::{self, NoData};
use crate::models::StandingsRow;

pub async fn standings(
    State(state): State<AppState>,
    params: Result<Query<RangeParams>, QueryRejection>,
) -> Result<Json<TableResponse<StandingsRow>>, ApiError> {
    let Query(params) = params?;

    let Some(ds) = state.results().await else {
        return Ok(Json(TableResponse::no_data(&NoData::NoDataset)));
    };

    let query = match resolve_query(&ds, &params) {
        Ok(q) => q,
        Err(reason) => return Ok(Json(TableResponse::no_data(&reason))),
    };

    let resolved = match calculate::sides_for(&ds, &query, state.config.scoring.draw_margin) {
        Ok(r) => r,
        Err(reason) => return Ok(Json(TableResponse::no_data(&reason))),
    };

    let table = calculate::standings(&resolved.sides);
    Ok(Json(TableResponse::ok(&query, table, resolved.diagnostics)))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::{get_json, setup_test_state, write_sheet, RESULTS_HEADER};
    use axum::http::StatusCode;

    fn write_results(dir: &std::path::Path) {
        write_sheet(
            &dir.join("jogos.csv"),
            RESULTS_HEADER,
            &[
                "2025,Liga A,1,A,55.0,B,50.0",
                "2025,Liga A,1,C,40.0,D,42.0",
                "2025,Liga A,2,A,60.0,C,70.0",
                "2025,Liga A,2,B,45.0,D,30.0",
                "2025,Copa,2,A,90.0,D,10.0",
                "2025,Liga A,3,A,,D,10.0",
            ],
        );
    }

    #[tokio::test]
    async fn test_standings_table() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        write_results(tmp.path());

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/standings?competition=Liga%20A").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["competition"], "Liga A");

        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["Pos"], 1);
        assert_eq!(rows[0]["Time"], "C");
        assert_eq!(rows[0]["Pontos"], 4);
        assert_eq!(rows[1]["Time"], "A");
        assert_eq!(rows[1]["Pts Cartola"], 115.0);
        assert_eq!(rows[1]["Jogos"], 2);
        assert_eq!(json["diagnostics"]["skipped"]["missing_score"], 1);
    }

    #[tokio::test]
    async fn test_standings_round_interval() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        write_results(tmp.path());

        let app = build_router(state);
        let (_, json) = get_json(app, "/api/standings?season=2025&from=1&to=1").await;

        assert_eq!(json["rounds"]["from"], 1);
        assert_eq!(json["rounds"]["to"], 1);
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows[0]["Time"], "A");
        assert_eq!(rows[0]["Pontos"], 3);
        assert_eq!(rows.len(), 4);
    }

    #[tokio::test]
    async fn test_standings_unknown_season_is_no_data() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        write_results(tmp.path());

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/standings?season=1999").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "no_data");
        assert!(json["rows"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_standings_interval_without_fixtures_is_no_data() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        write_sheet(
            &tmp.path().join("jogos.csv"),
            RESULTS_HEADER,
            &["2025,Liga A,1,A,55.0,B,50.0", "2025,Copa,5,A,60.0,B,40.0"],
        );

        let app = build_router(state);
        let (status, json) =
            get_json(app, "/api/standings?competition=Liga%20A&from=3&to=5").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "no_data");
        assert_eq!(
            json["message"],
            "No fixtures for Liga A in season 2025, rounds 3 to 5"
        );
        assert!(json["rows"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_standings_blank_round_column_is_no_data() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        write_sheet(
            &tmp.path().join("jogos.csv"),
            RESULTS_HEADER,
            &["2025,Liga A,,A,55.0,B,50.0", "2025,Liga A,,C,40.0,D,42.0"],
        );

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/standings").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "no_data");
        assert_eq!(json["message"], "No round data for Todas in season 2025");
        assert!(json["rows"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_standings_malformed_round_param() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        write_results(tmp.path());

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/standings?from=abc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_standings_without_file() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let (status, json) = get_json(app, "/api/standings").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "no_data");
        assert_eq!(json["message"], "No results loaded yet");
    }
}
