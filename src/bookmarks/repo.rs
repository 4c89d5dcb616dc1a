use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Bookmark record in the database. Written once at creation, never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bookmark {
    pub id: Uuid,
    pub user_id: Uuid,
    pub url: String,
    pub title: String,
    pub favicon: String,
    pub summary: String,
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Fields supplied by the create handler after enrichment.
#[derive(Debug)]
pub struct NewBookmark {
    pub url: String,
    pub title: String,
    pub favicon: String,
    pub summary: String,
    pub tags: Vec<String>,
}

impl Bookmark {
    /// All bookmarks owned by `user_id`, newest first.
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Bookmark>> {
        let rows = sqlx::query_as::<_, Bookmark>(
            r#"
            SELECT id, user_id, url, title, favicon, summary, tags, created_at
            FROM bookmarks
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(db: &PgPool, user_id: Uuid, new: NewBookmark) -> anyhow::Result<Bookmark> {
        let bookmark = sqlx::query_as::<_, Bookmark>(
            r#"
            INSERT INTO bookmarks (user_id, url, title, favicon, summary, tags)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, url, title, favicon, summary, tags, created_at
            "#,
        )
        .bind(user_id)
        .bind(new.url)
        .bind(new.title)
        .bind(new.favicon)
        .bind(new.summary)
        .bind(new.tags)
        .fetch_one(db)
        .await?;
        Ok(bookmark)
    }

    /// Delete scoped to the owner. Deleting another user's bookmark (or a
    /// nonexistent id) affects zero rows and is not an error.
    pub async fn delete_scoped(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM bookmarks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookmark_serializes_with_tags_in_order() {
        let bookmark = Bookmark {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            url: "https://example.com".into(),
            title: "Example Domain".into(),
            favicon: "https://example.com/favicon.ico".into(),
            summary: "An example page.".into(),
            tags: vec!["x".into(), "x".into(), "Reading".into()],
            created_at: OffsetDateTime::now_utc(),
        };

        let v: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&bookmark).unwrap()).unwrap();
        // Duplicates and casing are preserved exactly as stored.
        assert_eq!(v["tags"], serde_json::json!(["x", "x", "Reading"]));
        assert_eq!(v["url"], "https://example.com");
        assert!(v["created_at"].is_string());
    }
}
