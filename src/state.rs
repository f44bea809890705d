use crate::config::Config;
use crate::models::AppData;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The single owned container for the snapshot; every mutation goes through its lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(config: Config, data: AppData) -> Self {
        Self {
            config: Arc::new(config),
            data: Arc::new(Mutex::new(data)),
        }
    }
}
