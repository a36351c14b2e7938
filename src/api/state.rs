use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::error;

use crate::config::AppConfig;
use crate::models::{LineupDataset, ResultsDataset};
use crate::storage::DatasetStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<DatasetStore>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: DatasetStore, config: AppConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
        }
    }

    /// Run `f` against the store on the blocking pool. Refreshing a dataset
    /// reads, hashes and parses the source file.
    async fn with_store<T, F>(&self, f: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut DatasetStore) -> Option<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        match tokio::task::spawn_blocking(move || f(&mut store.blocking_write())).await {
            Ok(value) => value,
            Err(e) => {
                error!("Dataset refresh task failed: {}", e);
                None
            }
        }
    }

    /// Current results dataset, refreshed if the source file changed.
    pub async fn results(&self) -> Option<Arc<ResultsDataset>> {
        self.with_store(|store| store.results()).await
    }

    /// Current lineup dataset, refreshed if the source file changed.
    pub async fn lineups(&self) -> Option<Arc<LineupDataset>> {
        self.with_store(|store| store.lineups()).await
    }
}
