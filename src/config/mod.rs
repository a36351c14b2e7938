//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Source spreadsheet locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory the file names below are resolved against
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Match results sheet (.xlsx or .csv)
    #[serde(default = "default_results_file")]
    pub results_file: PathBuf,

    /// Lineup selections sheet (.xlsx or .csv)
    #[serde(default = "default_lineups_file")]
    pub lineups_file: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_results_file() -> PathBuf {
    PathBuf::from("dados_campeonato.xlsx")
}

fn default_lineups_file() -> PathBuf {
    PathBuf::from("dados_escalacoes.xlsx")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            results_file: default_results_file(),
            lineups_file: default_lineups_file(),
        }
    }
}

/// Scoring and leaderboard rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Fixtures decided by this margin or less are draws
    #[serde(default = "default_draw_margin")]
    pub draw_margin: f64,

    /// Competitions whose name contains one of these (case-insensitive) are leagues
    #[serde(default = "default_league_tokens")]
    pub league_tokens: Vec<String>,

    /// Rows kept in the Hall of Fame
    #[serde(default = "default_hall_of_fame_limit")]
    pub hall_of_fame_limit: usize,
}

fn default_draw_margin() -> f64 {
    3.0
}

fn default_league_tokens() -> Vec<String> {
    vec!["liga".to_string(), "league".to_string()]
}

fn default_hall_of_fame_limit() -> usize {
    50
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            draw_margin: default_draw_margin(),
            league_tokens: default_league_tokens(),
            hall_of_fame_limit: default_hall_of_fame_limit(),
        }
    }
}

impl ScoringConfig {
    /// Whether a competition counts as a league for round leaderboards.
    pub fn is_league(&self, competition: &str) -> bool {
        let name = competition.to_lowercase();
        self.league_tokens
            .iter()
            .any(|t| name.contains(&t.to_lowercase()))
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("No config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scoring.draw_margin.is_finite() || self.scoring.draw_margin < 0.0 {
            return Err(ConfigError::ValidationError(
                "Draw margin must be a non-negative number".to_string(),
            ));
        }

        if self.scoring.league_tokens.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "League tokens must not be empty".to_string(),
            ));
        }

        if self.scoring.hall_of_fame_limit == 0 {
            return Err(ConfigError::ValidationError(
                "Hall of fame limit must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Full path of the results sheet.
    pub fn results_path(&self) -> PathBuf {
        self.data.data_dir.join(&self.data.results_file)
    }

    /// Full path of the lineup sheet.
    pub fn lineups_path(&self) -> PathBuf {
        self.data.data_dir.join(&self.data.lineups_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.scoring.draw_margin, 3.0);
        assert_eq!(config.scoring.hall_of_fame_limit, 50);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.results_path(), PathBuf::from("./dados_campeonato.xlsx"));
        assert_eq!(config.lineups_path(), PathBuf::from("./dados_escalacoes.xlsx"));
    }

    #[test]
    fn test_is_league() {
        let scoring = ScoringConfig::default();

        assert!(scoring.is_league("Liga Cartolendária"));
        assert!(scoring.is_league("SUPERLIGA"));
        assert!(scoring.is_league("Champions League"));
        assert!(!scoring.is_league("Copa do Brasil"));
        assert!(!scoring.is_league("Geral"));
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_margin() {
        let mut config = AppConfig::default();
        config.scoring.draw_margin = -1.0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_limit() {
        let mut config = AppConfig::default();
        config.scoring.hall_of_fame_limit = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_partial_toml() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [data]
            data_dir = "/srv/cartola"
            results_file = "jogos.csv"

            [scoring]
            league_tokens = ["liga"]
            "#,
        )
        .unwrap();

        assert_eq!(parsed.results_path(), PathBuf::from("/srv/cartola/jogos.csv"));
        assert_eq!(parsed.data.lineups_file, PathBuf::from("dados_escalacoes.xlsx"));
        assert_eq!(parsed.scoring.league_tokens, vec!["liga"]);
        assert_eq!(parsed.scoring.draw_margin, 3.0);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data.results_file, parsed.data.results_file);
    }
}
