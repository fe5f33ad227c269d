use serde::{Deserialize, Serialize};

/// Login credentials. WordPress accepts either the account password or an
/// application password over basic auth; the latter survives 2FA and can be
/// revoked on its own.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Subset of `GET /wp/v2/users/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// Subset of the media object returned by `POST /wp/v2/media`.
#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    pub id: i64,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Subset of the post object returned by `POST /wp/v2/posts/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub featured_media: Option<i64>,
}

/// Partial post update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Map<String, serde_json::Value>>,
}

impl PostUpdate {
    pub fn featured_media(media_id: i64) -> Self {
        Self {
            featured_media: Some(media_id),
            ..Default::default()
        }
    }

    pub fn meta_field(key: impl Into<String>, media_id: i64) -> Self {
        let mut meta = serde_json::Map::new();
        meta.insert(key.into(), serde_json::Value::from(media_id));
        Self {
            meta: Some(meta),
            ..Default::default()
        }
    }
}

/// Error envelope (`{"code": "rest_cannot_create", "message": "..."}`).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
