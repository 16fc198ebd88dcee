use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{ListStoresQuery, NearbyQuery, NearbyStore, SeedResponse, SEED_STORES},
    proximity::{rank_nearby, BoundingBox},
    repo::{self, Store},
};
use crate::{error::AppError, state::AppState};

pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/stores", get(list_stores))
        .route("/stores/nearby", get(nearby_stores))
        .route("/stores/seed", post(seed_stores))
        .route("/stores/:id", get(get_store))
}

#[instrument(skip(state))]
pub async fn list_stores(
    State(state): State<AppState>,
    Query(q): Query<ListStoresQuery>,
) -> Result<Json<Vec<Store>>, AppError> {
    q.validate()?;
    let stores = repo::list(&state.db, q.search.as_deref(), q.limit).await?;
    Ok(Json(stores))
}

#[instrument(skip(state))]
pub async fn nearby_stores(
    State(state): State<AppState>,
    Query(q): Query<NearbyQuery>,
) -> Result<Json<Vec<NearbyStore>>, AppError> {
    let origin = q.validate()?;
    let bounds = BoundingBox::around(origin, q.radius_miles);
    let candidates = state.store.fetch_store_catalog(Some(bounds)).await?;
    Ok(Json(rank_nearby(origin, q.radius_miles, candidates)))
}

#[instrument(skip(state))]
pub async fn get_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Store>, AppError> {
    repo::find(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Store not found"))
}

#[instrument(skip(state))]
pub async fn seed_stores(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    if !state.config.enable_seed {
        return Err(AppError::NotFound("Not found"));
    }
    let (seeded, count) = repo::seed_if_empty(&state.db, SEED_STORES).await?;
    let message = if seeded {
        info!(count, "stores seeded");
        "Stores seeded successfully"
    } else {
        "Stores already seeded"
    };
    Ok(Json(SeedResponse { message, count }))
}
