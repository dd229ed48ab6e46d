use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Generated page copy for a tenant site. `services` is a JSON array of
/// `{title, description}` objects.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub home_title: String,
    pub tagline: String,
    pub about_us: String,
    pub services: Value,
    pub contact_blurb: String,
    pub website_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
