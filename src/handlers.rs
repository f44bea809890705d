use crate::errors::AppError;
use crate::models::{
    CalendarQuery, CalendarResponse, DayKey, SubmissionRequest, SummaryResponse, TodayResponse,
};
use crate::recorder::{record_submission, validate};
use crate::state::AppState;
use crate::stats::{build_calendar, build_summary};
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Datelike, Local};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    Html(render_index(&build_summary(&data)))
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let date = today_key();
    let data = state.data.lock().await;
    let entry = data.submissions().get(date).cloned();

    Json(TodayResponse {
        date,
        submitted: entry.is_some(),
        entry,
    })
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let data = state.data.lock().await;
    Json(build_summary(&data))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let today = today_key();
    let year = query.year.unwrap_or_else(|| today.date().year());
    let month = query.month.unwrap_or_else(|| today.date().month());

    let data = state.data.lock().await;
    Ok(Json(build_calendar(&data, year, month, today)?))
}

pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<SubmissionRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = apply_submission(&state, payload).await?;
    Ok(Json(summary))
}

pub async fn submit_form(
    State(state): State<AppState>,
    Form(payload): Form<SubmissionRequest>,
) -> Result<Redirect, AppError> {
    apply_submission(&state, payload).await?;
    Ok(Redirect::to("/"))
}

async fn apply_submission(
    state: &AppState,
    request: SubmissionRequest,
) -> Result<SummaryResponse, AppError> {
    validate(&request)?;

    let delay = state.config.submit_delay;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let mut data = state.data.lock().await;
    let streaks = record_submission(&mut data, request)?;
    persist_data(&state.config.data_path, &data).await?;

    info!(
        current = streaks.current_streak,
        longest = streaks.longest_streak,
        total = data.submissions().len(),
        "submission recorded"
    );

    Ok(build_summary(&data))
}

fn today_key() -> DayKey {
    DayKey::new(Local::now().date_naive())
}
