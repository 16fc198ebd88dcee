use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use time::Duration;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{UpdateProfileRequest, UserStats},
    repo::User,
};
use crate::{
    auth::AuthUser, dates::today_utc, error::AppError, rounding::round_to, state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(get_me).patch(update_me))
        .route("/users/me/stats", get(get_stats))
}

/// Profile of the caller, refusing deactivated accounts.
pub async fn active_profile(state: &AppState, user_id: Uuid) -> Result<User, AppError> {
    let user = state.store.fetch_profile(user_id).await?;
    if !user.is_active {
        warn!(%user_id, "inactive user");
        return Err(AppError::Forbidden("Inactive user".into()));
    }
    Ok(user)
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, AppError> {
    Ok(Json(active_profile(&state, user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<User>, AppError> {
    let changes = payload.validate()?;
    active_profile(&state, user_id).await?;
    let user = state.store.update_profile(user_id, &changes).await?;
    info!(%user_id, protein_goal = user.protein_goal, "profile updated");
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserStats>, AppError> {
    let user = active_profile(&state, user_id).await?;
    let since = today_utc() - Duration::days(7);
    let stats = state.store.log_stats_since(user_id, since).await?;
    Ok(Json(UserStats {
        total_logs: stats.total_logs,
        weekly_protein: round_to(stats.weekly_protein, 1),
        days_logged_this_week: stats.days_logged,
        protein_goal: user.protein_goal,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{protein_logs::repo::ProteinLog, store::InMemoryStore, users::repo};
    use axum::http::StatusCode;
    use time::{macros::time, OffsetDateTime};

    fn log_days_ago(user_id: Uuid, amount: f64, days_ago: i64) -> ProteinLog {
        ProteinLog {
            id: Uuid::new_v4(),
            user_id,
            food_name: "Chickpeas".into(),
            protein_amount: amount,
            logged_at: (today_utc() - Duration::days(days_ago))
                .with_time(time!(9:30))
                .assume_utc(),
        }
    }

    #[tokio::test]
    async fn stats_cover_the_last_seven_days_inclusive() {
        let user_id = Uuid::new_v4();
        let state = AppState::fake_with(
            InMemoryStore::default()
                .with_profile(InMemoryStore::profile(user_id, 90))
                .with_log(log_days_ago(user_id, 10.0, 0))
                .with_log(log_days_ago(user_id, 5.0, 0))
                .with_log(log_days_ago(user_id, 20.0, 7))
                .with_log(log_days_ago(user_id, 99.0, 8))
                .with_log(log_days_ago(Uuid::new_v4(), 50.0, 1)),
        );

        let Json(stats) = get_stats(State(state), AuthUser(user_id)).await.expect("stats");
        assert_eq!(stats.total_logs, 4);
        assert_eq!(stats.weekly_protein, 35.0);
        assert_eq!(stats.days_logged_this_week, 2);
        assert_eq!(stats.protein_goal, 90);
    }

    #[tokio::test]
    async fn goal_update_feeds_later_reads() {
        let user_id = Uuid::new_v4();
        let state = AppState::fake();

        let Json(updated) = update_me(
            State(state.clone()),
            AuthUser(user_id),
            Json(UpdateProfileRequest {
                full_name: Some("Ada".into()),
                location: None,
                protein_goal: Some(0),
            }),
        )
        .await
        .expect("updated");
        assert_eq!(updated.protein_goal, 0);
        assert_eq!(updated.full_name.as_deref(), Some("Ada"));
        assert!(updated.updated_at.is_some());

        let Json(profile) = get_me(State(state), AuthUser(user_id)).await.expect("profile");
        assert_eq!(profile.protein_goal, 0);
        assert!(profile.updated_at.map_or(false, |t| t > OffsetDateTime::UNIX_EPOCH));
    }

    #[tokio::test]
    async fn first_request_provisions_default_profile() {
        let state = AppState::fake();
        let user_id = Uuid::new_v4();
        let Json(user) = get_me(State(state), AuthUser(user_id)).await.expect("profile");
        assert_eq!(user.id, user_id);
        assert_eq!(user.protein_goal, repo::DEFAULT_PROTEIN_GOAL);
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn inactive_profile_is_forbidden() {
        let user_id = Uuid::new_v4();
        let mut profile = InMemoryStore::profile(user_id, 100);
        profile.is_active = false;
        let state = AppState::fake_with(InMemoryStore::default().with_profile(profile));
        let err = get_me(State(state), AuthUser(user_id)).await.err().expect("rejected");
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn profile_serializes_timestamps_as_rfc3339() {
        let user = InMemoryStore::profile(Uuid::nil(), 90);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["protein_goal"], 90);
        assert!(json["created_at"].as_str().unwrap().contains('T'));
        assert!(json["updated_at"].is_null());
    }
}
