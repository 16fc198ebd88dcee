use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{ListFoodsQuery, TopProteinQuery, SEED_FOODS},
    repo::{self, Food},
};
use crate::{error::AppError, state::AppState, stores::dto::SeedResponse};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods))
        .route("/foods/categories", get(list_categories))
        .route("/foods/top-protein", get(top_protein_foods))
        .route("/foods/seed", post(seed_foods))
        .route("/foods/:id", get(get_food))
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    Query(q): Query<ListFoodsQuery>,
) -> Result<Json<Vec<Food>>, AppError> {
    let filter = q.validate()?;
    Ok(Json(repo::list(&state.db, &filter).await?))
}

#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(repo::categories(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn top_protein_foods(
    State(state): State<AppState>,
    Query(q): Query<TopProteinQuery>,
) -> Result<Json<Vec<Food>>, AppError> {
    let filter = q.validate()?;
    Ok(Json(repo::list(&state.db, &filter).await?))
}

#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Food>, AppError> {
    repo::find(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Food not found"))
}

#[instrument(skip(state))]
pub async fn seed_foods(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    if !state.config.enable_seed {
        return Err(AppError::NotFound("Not found"));
    }
    let (seeded, count) = repo::seed_if_empty(&state.db, SEED_FOODS).await?;
    let message = if seeded {
        info!(count, "foods seeded");
        "Foods seeded successfully"
    } else {
        "Foods already seeded"
    };
    Ok(Json(SeedResponse { message, count }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeding_is_hidden_unless_enabled() {
        let err = seed_foods(State(AppState::fake())).await.err().expect("hidden");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn oversized_limit_is_rejected_before_querying() {
        let err = list_foods(
            State(AppState::fake()),
            Query(ListFoodsQuery {
                search: None,
                category: None,
                vegan_only: false,
                limit: 500,
            }),
        )
        .await
        .err()
        .expect("rejected");
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
