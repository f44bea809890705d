pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod recorder;
pub mod state;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;
pub use streak::compute_streaks;
