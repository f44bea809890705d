use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/submit", post(handlers::submit_form))
        .route("/api/today", get(handlers::get_today))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/submit", post(handlers::submit))
        .with_state(state)
}
