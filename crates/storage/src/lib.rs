//! SQLite persistence for image records.
//!
//! The `images.tags` column is an opaque TEXT payload: write sites store a
//! JSON-encoded label list, but historical rows carry other encodings and
//! the read side owns their interpretation. This crate only moves the
//! payload; it never decodes it.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

pub use sqlx::SqlitePool;

/// Fields written at ingestion. `category_id` is never set here; it is
/// assigned by a separate workflow and stays NULL for new rows.
#[derive(Debug, Clone)]
pub struct NewImage<'a> {
    pub title: &'a str,
    pub image_url: &'a str,
    pub tags_json: &'a str,
    pub category: &'a str,
    pub is_public: bool,
    pub created_at: i64,
}

/// One image row as stored, tag payload untouched.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredImage {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub tags: Option<String>,
    pub category: Option<String>,
    pub category_id: Option<i64>,
    pub is_public: bool,
    pub created_at: i64,
}

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let opts = if database_url.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(database_url)?
    } else {
        // Bare filesystem path: create the parent directory and the file.
        let path = Path::new(database_url);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
    };
    // In-memory databases get a single connection so every caller sees
    // the same data.
    let max_connections = if database_url.contains("memory") { 1 } else { 5 };
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    // Applies SQLx migrations located in crates/storage/migrations.
    // Safe to run multiple times (idempotent).
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn insert_image(pool: &SqlitePool, image: &NewImage<'_>) -> anyhow::Result<i64> {
    let res = sqlx::query(
        "INSERT INTO images (title, image_url, tags, category, is_public, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(image.title)
    .bind(image.image_url)
    .bind(image.tags_json)
    .bind(image.category)
    .bind(image.is_public)
    .bind(image.created_at)
    .execute(pool)
    .await?;

    let id = res.last_insert_rowid();
    debug!(id, "image row inserted");
    Ok(id)
}

/// All image rows, newest first.
pub async fn list_images(pool: &SqlitePool) -> anyhow::Result<Vec<StoredImage>> {
    let rows = sqlx::query_as::<_, StoredImage>(
        "SELECT id, title, image_url, tags, category, category_id, is_public, created_at
         FROM images ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_then_list_round_trips() {
        let pool = connect("sqlite://file:storage_test?mode=memory&cache=shared")
            .await
            .unwrap();
        migrate(&pool).await.unwrap();

        let id = insert_image(
            &pool,
            &NewImage {
                title: "t2",
                image_url: "images/t2.jpg",
                tags_json: r#"["tabby cat"]"#,
                category: "动物",
                is_public: false,
                created_at: 42,
            },
        )
        .await
        .unwrap();

        let rows = list_images(&pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].tags.as_deref(), Some(r#"["tabby cat"]"#));
        assert_eq!(rows[0].category.as_deref(), Some("动物"));
        // category_id is never written at ingestion.
        assert_eq!(rows[0].category_id, None);
    }
}
