use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{CreateLogRequest, DailySummary, ListLogsQuery, ProteinLogOut, WeeklySummary},
    summary::{daily_summary, week_window, weekly_summary},
};
use crate::{
    auth::AuthUser, dates::today_utc, error::AppError, state::AppState, users::active_profile,
};

pub fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/protein-logs", get(list_logs).post(create_log))
        .route("/protein-logs/today", get(today_summary))
        .route("/protein-logs/weekly", get(weekly_trend))
        .route("/protein-logs/:id", delete(delete_log))
}

#[instrument(skip(state, payload))]
pub async fn create_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateLogRequest>,
) -> Result<(StatusCode, Json<ProteinLogOut>), AppError> {
    payload.validate()?;
    active_profile(&state, user_id).await?;
    let log = state
        .store
        .insert_event(user_id, payload.food_name.trim(), payload.protein_amount)
        .await?;
    info!(%user_id, log_id = %log.id, protein_amount = log.protein_amount, "protein logged");
    Ok((StatusCode::CREATED, Json(log.into())))
}

#[instrument(skip(state))]
pub async fn list_logs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<ListLogsQuery>,
) -> Result<Json<Vec<ProteinLogOut>>, AppError> {
    let on = q.validate()?;
    active_profile(&state, user_id).await?;
    let logs = state.store.list_events(user_id, on, q.limit).await?;
    Ok(Json(logs.into_iter().map(ProteinLogOut::from).collect()))
}

#[instrument(skip(state))]
pub async fn today_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DailySummary>, AppError> {
    let user = active_profile(&state, user_id).await?;
    let today = today_utc();
    let logs = state.store.fetch_events_on(user_id, today).await?;
    Ok(Json(daily_summary(today, user.protein_goal, logs)))
}

#[instrument(skip(state))]
pub async fn weekly_trend(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<WeeklySummary>, AppError> {
    let user = active_profile(&state, user_id).await?;
    let (start, end) = week_window(today_utc());
    let logs = state.store.fetch_events_between(user_id, start, end).await?;
    Ok(Json(weekly_summary(end, user.protein_goal, &logs)))
}

#[instrument(skip(state))]
pub async fn delete_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    active_profile(&state, user_id).await?;
    if !state.store.delete_event(user_id, id).await? {
        warn!(%user_id, log_id = %id, "log not found");
        return Err(AppError::NotFound("Log not found"));
    }
    info!(%user_id, log_id = %id, "protein log deleted");
    Ok(StatusCode::NO_CONTENT)
}
