use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cartola_dashboard::api::state::AppState;
use cartola_dashboard::api::{build_router, resolve_query, RangeParams};
use cartola_dashboard::calculate::{self, LeagueChampions, RangeQuery};
use cartola_dashboard::config::AppConfig;
use cartola_dashboard::models::{Diagnostics, LeaderboardEntry, StandingsRow};
use cartola_dashboard::storage::DatasetStore;

#[derive(Parser)]
#[command(name = "cartola-dashboard")]
#[command(about = "Fantasy football league dashboard: standings and round legends")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard API server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print standings and round leaderboards as JSON
    Report {
        /// Season, defaults to the most recent
        #[arg(long)]
        season: Option<String>,

        /// Competition name, or "Todas" for all
        #[arg(long)]
        competition: Option<String>,

        /// First round
        #[arg(long)]
        from: Option<u32>,

        /// Last round
        #[arg(long)]
        to: Option<u32>,
    },
}

#[derive(Serialize)]
struct Report {
    season: String,
    competition: String,
    standings: Vec<StandingsRow>,
    hall_of_fame: Vec<LeaderboardEntry>,
    round_champions: Vec<LeagueChampions>,
    round_kings: Vec<LeaderboardEntry>,
    diagnostics: Diagnostics,
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn load_config(path: &Path, data_dir: Option<PathBuf>) -> Result<AppConfig> {
    let mut config = AppConfig::load_or_default(path)
        .with_context(|| format!("Failed to load config from {:?}", path))?;
    if let Some(dir) = data_dir {
        config.data.data_dir = dir;
    }
    Ok(config)
}

fn build_report(store: &mut DatasetStore, config: &AppConfig, params: RangeParams) -> Result<Report> {
    let ds = store
        .results()
        .with_context(|| format!("No results could be loaded from {:?}", config.results_path()))?;

    let query = resolve_query(&ds, &params)?;
    let margin = config.scoring.draw_margin;
    let resolved = calculate::sides_for(&ds, &query, margin)?;

    // Leaderboards always span every competition of the season
    let season_query = RangeQuery {
        competition: calculate::CompetitionFilter::All,
        ..query.clone()
    };
    let season_sides = calculate::sides_for(&ds, &season_query, margin)?.sides;

    Ok(Report {
        season: query.season.clone(),
        competition: query.competition.label().to_string(),
        standings: calculate::standings(&resolved.sides),
        hall_of_fame: calculate::hall_of_fame(&season_sides, config.scoring.hall_of_fame_limit),
        round_champions: calculate::round_champions_by_league(&season_sides, &config.scoring),
        round_kings: calculate::round_kings(&season_sides, &config.scoring),
        diagnostics: resolved.diagnostics,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);
    tracing::info!("Starting cartola-dashboard v{}", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(&cli.config, cli.data_dir)?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            tracing::info!("Results sheet: {:?}", config.results_path());
            tracing::info!("Lineups sheet: {:?}", config.lineups_path());

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let state = AppState::new(DatasetStore::from_config(&config), config);
            let app = build_router(state);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Report {
            season,
            competition,
            from,
            to,
        } => {
            let mut store = DatasetStore::from_config(&config);
            let params = RangeParams {
                season,
                competition,
                from,
                to,
            };
            let report = build_report(&mut store, &config, params)?;
            if report.diagnostics.total() > 0 {
                tracing::warn!("Skipped {} malformed fixtures", report.diagnostics.total());
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
