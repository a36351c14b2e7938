//! Source spreadsheets and the memoized normalized datasets.
//!
//! Every read re-hashes the source file. An unchanged hash returns the cached
//! dataset; a new hash (the file was replaced) re-parses and re-normalizes.
//! Load failures never propagate: the dataset is simply absent.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::ingest::{parse_bytes, RawTable, SheetFormat};
use crate::models::{ContentHash, LineupDataset, ResultsDataset};
use crate::normalize::Normalizer;

struct Memo<T> {
    hash: ContentHash,
    value: Arc<T>,
}

/// One source file and its cached normalized form.
pub struct SourceFile<T> {
    path: PathBuf,
    memo: Option<Memo<T>>,
    last_error: Option<String>,
}

/// Load state of a source file, for health reporting.
#[derive(Debug, Clone, Serialize)]
pub struct SourceStatus {
    pub path: PathBuf,
    pub loaded: bool,
    pub hash: Option<String>,
    pub error: Option<String>,
}

impl<T> SourceFile<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            memo: None,
            last_error: None,
        }
    }

    pub fn hash(&self) -> Option<&ContentHash> {
        self.memo.as_ref().map(|m| &m.hash)
    }

    pub fn status(&self) -> SourceStatus {
        SourceStatus {
            path: self.path.clone(),
            loaded: self.memo.is_some(),
            hash: self.hash().map(|h| h.to_string()),
            error: self.last_error.clone(),
        }
    }

    fn fail(&mut self, error: String) -> Option<Arc<T>> {
        self.memo = None;
        self.last_error = Some(error);
        None
    }

    /// Current dataset, re-normalized only when the file content changed.
    pub fn get(&mut self, normalize: impl FnOnce(&RawTable) -> T) -> Option<Arc<T>> {
        let format = match SheetFormat::from_path(&self.path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Cannot load {:?}: {}", self.path, e);
                return self.fail(e.to_string());
            }
        };

        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Source file {:?} not present", self.path);
                return self.fail(format!("File not found: {}", self.path.display()));
            }
            Err(e) => {
                warn!("Failed to read {:?}: {}", self.path, e);
                return self.fail(e.to_string());
            }
        };

        let hash = ContentHash::of(&bytes);
        if let Some(memo) = &self.memo {
            if memo.hash == hash {
                return Some(Arc::clone(&memo.value));
            }
        }

        let table = match parse_bytes(&bytes, format) {
            Ok(t) => t,
            Err(e) => {
                warn!("Failed to parse {:?}: {}", self.path, e);
                return self.fail(e.to_string());
            }
        };

        info!("Loaded {:?} ({} rows, hash {})", self.path, table.rows.len(), hash.short());
        let value = Arc::new(normalize(&table));
        self.memo = Some(Memo {
            hash,
            value: Arc::clone(&value),
        });
        self.last_error = None;
        Some(value)
    }
}

/// The results and lineup sheets behind the dashboard.
pub struct DatasetStore {
    normalizer: Normalizer,
    results: SourceFile<ResultsDataset>,
    lineups: SourceFile<LineupDataset>,
}

impl DatasetStore {
    pub fn new(results_path: PathBuf, lineups_path: PathBuf) -> Self {
        Self {
            normalizer: Normalizer::new(),
            results: SourceFile::new(results_path),
            lineups: SourceFile::new(lineups_path),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.results_path(), config.lineups_path())
    }

    /// Replace the normalizer (e.g. to pin the default season).
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn results(&mut self) -> Option<Arc<ResultsDataset>> {
        let normalizer = &self.normalizer;
        self.results.get(|t| normalizer.results(t))
    }

    pub fn lineups(&mut self) -> Option<Arc<LineupDataset>> {
        let normalizer = &self.normalizer;
        self.lineups.get(|t| normalizer.lineups(t))
    }

    pub fn results_status(&self) -> SourceStatus {
        self.results.status()
    }

    pub fn lineups_status(&self) -> SourceStatus {
        self.lineups.status()
    }
}
