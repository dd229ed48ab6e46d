use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Enquiry, EnquiryStatus};

#[derive(Debug, thiserror::Error)]
pub enum EnquiryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Database manager error: {0}")]
    Manager(#[from] DatabaseError),
    #[error("Tenant not found: {0}")]
    TenantNotFound(String),
    #[error("Enquiry not found: {0}")]
    NotFound(Uuid),
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
}

#[derive(Debug, Clone)]
pub struct NewEnquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

/// Contact details from a visitor's most recent enquiry, used by the site
/// templates to prefill the contact form.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

pub struct EnquiryService {
    pool: PgPool,
}

impl EnquiryService {
    pub async fn new() -> Result<Self, EnquiryError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// Record a visitor enquiry against a tenant, resolved by slug. New
    /// enquiries always start in the `new` triage state.
    pub async fn create(&self, slug: &str, enquiry: NewEnquiry) -> Result<Enquiry, EnquiryError> {
        let tenant_id: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM tenants WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        let (tenant_id,) = tenant_id.ok_or_else(|| EnquiryError::TenantNotFound(slug.to_string()))?;

        let created = sqlx::query_as::<_, Enquiry>(
            r#"
            INSERT INTO enquiries (tenant_id, name, email, phone, message, status)
            VALUES ($1, $2, $3, $4, $5, 'new')
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(&enquiry.name)
        .bind(&enquiry.email)
        .bind(&enquiry.phone)
        .bind(&enquiry.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// List a tenant's enquiries, newest first, optionally filtered by
    /// triage status.
    pub async fn list(
        &self,
        slug: &str,
        status: Option<EnquiryStatus>,
    ) -> Result<Vec<Enquiry>, EnquiryError> {
        let tenant_id: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM tenants WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        let (tenant_id,) = tenant_id.ok_or_else(|| EnquiryError::TenantNotFound(slug.to_string()))?;

        let enquiries = match status {
            Some(status) => {
                sqlx::query_as::<_, Enquiry>(
                    r#"
                    SELECT * FROM enquiries
                    WHERE tenant_id = $1 AND status = $2
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(tenant_id)
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Enquiry>(
                    "SELECT * FROM enquiries WHERE tenant_id = $1 ORDER BY created_at DESC",
                )
                .bind(tenant_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(enquiries)
    }

    pub async fn set_status(
        &self,
        enquiry_id: Uuid,
        status: EnquiryStatus,
    ) -> Result<Enquiry, EnquiryError> {
        let updated = sqlx::query_as::<_, Enquiry>(
            "UPDATE enquiries SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(enquiry_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or(EnquiryError::NotFound(enquiry_id))
    }

    /// Most recent contact details for an email address, if any.
    pub async fn latest_contact(&self, email: &str) -> Result<Option<ContactInfo>, EnquiryError> {
        let contact = sqlx::query_as::<_, ContactInfo>(
            r#"
            SELECT name, email, phone FROM enquiries
            WHERE email = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }
}
