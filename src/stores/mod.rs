pub mod dto;
pub mod handlers;
pub mod proximity;
pub mod repo;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::store_routes()
}
