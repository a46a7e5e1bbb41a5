use std::path::PathBuf;
use std::sync::Arc;

use fanyi_config::Config;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// Profile the config was loaded from, re-read on reload
    pub profile_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            profile_path: None,
        }
    }

    pub fn with_profile_path(mut self, path: Option<PathBuf>) -> Self {
        self.profile_path = path;
        self
    }
}
