use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    bookmarks::{
        dto::{CreateBookmarkRequest, DeleteBookmarkRequest, DeleteBookmarkResponse},
        repo::{Bookmark, NewBookmark},
    },
    error::ApiError,
    state::AppState,
};

pub fn bookmark_routes() -> Router<AppState> {
    Router::new().route(
        "/bookmarks",
        get(list_bookmarks)
            .post(create_bookmark)
            .delete(delete_bookmark),
    )
}

#[instrument(skip(state))]
pub async fn list_bookmarks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let bookmarks = Bookmark::list_by_user(&state.db, user_id).await?;
    Ok(Json(bookmarks))
}

#[instrument(skip(state, payload))]
pub async fn create_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateBookmarkRequest>,
) -> Result<(StatusCode, Json<Bookmark>), ApiError> {
    if payload.url.is_empty() {
        return Err(ApiError::validation("url is required"));
    }

    // Best-effort: a dead or slow target never fails the create.
    let enrichment = state.enricher.enrich(&payload.url).await;

    let bookmark = Bookmark::create(
        &state.db,
        user_id,
        NewBookmark {
            url: payload.url,
            title: enrichment.title,
            favicon: enrichment.favicon,
            summary: enrichment.summary,
            tags: payload.tags,
        },
    )
    .await?;

    info!(user_id = %user_id, bookmark_id = %bookmark.id, "bookmark created");
    Ok((StatusCode::CREATED, Json(bookmark)))
}

#[instrument(skip(state, payload))]
pub async fn delete_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<DeleteBookmarkRequest>,
) -> Result<Json<DeleteBookmarkResponse>, ApiError> {
    let id = payload
        .id
        .ok_or_else(|| ApiError::validation("id is required"))?;

    // Fire-and-forget: success whether or not a row existed, and a foreign
    // id owned by another user silently affects nothing.
    let deleted = Bookmark::delete_scoped(&state.db, user_id, id).await?;
    info!(user_id = %user_id, bookmark_id = %id, deleted, "bookmark delete");
    Ok(Json(DeleteBookmarkResponse { success: true }))
}
