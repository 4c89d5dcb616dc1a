use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for bookmark creation. Tags are stored exactly as given:
/// order preserved, no trimming, no de-duplication.
#[derive(Debug, Deserialize)]
pub struct CreateBookmarkRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for bookmark deletion.
#[derive(Debug, Deserialize)]
pub struct DeleteBookmarkRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct DeleteBookmarkResponse {
    pub success: bool,
}
