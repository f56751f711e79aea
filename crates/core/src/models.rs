use serde::{Deserialize, Serialize};

/// One persisted image row. `tags` is the opaque payload exactly as stored;
/// use [`crate::tags::decode_tags_str`] to interpret it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub tags: Option<String>,
    /// Keyword-vocabulary category assigned at ingestion.
    pub category: Option<String>,
    /// Id into the fixed 30-entry category table, when assigned.
    pub category_id: Option<i64>,
    pub is_public: bool,
    pub created_at: i64,
}

/// Client-facing view of an image with the tag payload decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageView {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    /// Canonical decoded label list.
    pub tags: Vec<String>,
    /// Display category from the id vocabulary ("未知" when unassigned).
    pub category: String,
    /// Keyword-vocabulary category from ingestion. Kept separate from
    /// `category`; the two vocabularies must not be conflated.
    pub ai_category: Option<String>,
    pub is_public: bool,
    pub created_at: i64,
}
