use crate::state::AppState;
use axum::Router;

mod dto;
pub mod enrich;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::bookmark_routes()
}
