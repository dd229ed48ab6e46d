use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One customer's website instance. The slug doubles as the subdomain label
/// and obeys the `[a-z0-9-]` charset enforced at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub slug: String,
    pub company_name: String,
    pub template: String,
    pub logo_url: String,
    pub favicon_url: Option<String>,
    pub industry: Option<String>,
    pub theme_colors: Option<Value>,
    pub contact_info: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
