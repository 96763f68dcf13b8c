use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of the `posts` table as stored by the data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inbound payload for creating a post. Any `id` or timestamp fields sent by
/// the client are ignored.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Partial row sent with `PATCH`. `created_at` is never part of it, the
/// data service keeps the stored value.
#[derive(Debug, Serialize)]
pub struct PostPatch {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(req: CreatePostRequest) -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: req.title,
            body: req.body,
            created_at: now,
            updated_at: now,
        }
    }
}

impl PostPatch {
    /// The path id always wins over whatever id the body carried.
    pub fn new(id: &str, req: UpdatePostRequest) -> Self {
        Self {
            id: id.to_string(),
            title: req.title,
            body: req.body,
            updated_at: now(),
        }
    }
}

// Postgres stores timestamps with microsecond precision.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
