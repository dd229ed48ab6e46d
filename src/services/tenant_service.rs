use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{PageContent, Seo, Tenant};
use crate::services::templates;

#[derive(Debug, thiserror::Error)]
pub enum TenantError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Database manager error: {0}")]
    Manager(#[from] DatabaseError),
    #[error("Tenant already exists: {0}")]
    AlreadyExists(String),
    #[error("Tenant not found: {0}")]
    NotFound(String),
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
    #[error("{0}")]
    InvalidSlug(String),
}

/// Row shape for the admin tenant listing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TenantSummary {
    pub id: uuid::Uuid,
    pub slug: String,
    pub company_name: String,
    pub template: String,
    pub logo_url: String,
    pub favicon_url: Option<String>,
    pub contact_info: Option<Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Full renderable document for one tenant site: the tenant record plus its
/// page copy and SEO metadata. This is what the site templates consume.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDocument {
    pub tenant: Tenant,
    pub page: Option<PageContent>,
    pub seo: Option<Seo>,
}

/// Tenant fields supplied by the admin at creation time, after image upload.
#[derive(Debug, Clone)]
pub struct NewTenant {
    pub slug: String,
    pub company_name: String,
    pub template: String,
    pub logo_url: String,
    pub favicon_url: Option<String>,
    pub industry: Option<String>,
    pub theme_colors: Option<Value>,
    pub contact_info: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct NewSeo {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub og_image: Option<String>,
}

/// Generated page copy persisted alongside the tenant.
#[derive(Debug, Clone)]
pub struct NewPageContent {
    pub home_title: String,
    pub tagline: String,
    pub about_us: String,
    pub services: Value,
    pub contact_blurb: String,
    pub website_image_url: Option<String>,
}

/// Slug charset invariant, enforced at creation time. The edge router never
/// validates slugs; it only extracts and forwards them.
pub fn validate_slug(slug: &str) -> Result<(), TenantError> {
    if slug.is_empty() {
        return Err(TenantError::InvalidSlug("Slug is required".to_string()));
    }
    // DNS label limit, since the slug doubles as a subdomain.
    if slug.len() > 63 {
        return Err(TenantError::InvalidSlug(
            "Slug must be at most 63 characters".to_string(),
        ));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(TenantError::InvalidSlug(
            "Invalid slug format. Use only lowercase letters, numbers, and hyphens.".to_string(),
        ));
    }
    Ok(())
}

pub struct TenantService {
    pool: PgPool,
}

impl TenantService {
    pub async fn new() -> Result<Self, TenantError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// List tenants for the admin dashboard, newest first.
    pub async fn list(&self) -> Result<Vec<TenantSummary>, TenantError> {
        let tenants = sqlx::query_as::<_, TenantSummary>(
            r#"
            SELECT id, slug, company_name, template, logo_url, favicon_url, contact_info, created_at
            FROM tenants
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tenants)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Tenant>, TenantError> {
        let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tenant)
    }

    /// Resolve the full renderable document for a tenant site. Unknown slugs
    /// surface as a distinguishable not-found outcome.
    pub async fn get_site(&self, slug: &str) -> Result<SiteDocument, TenantError> {
        let tenant = self
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| TenantError::NotFound(slug.to_string()))?;

        let page = sqlx::query_as::<_, PageContent>(
            "SELECT * FROM page_content WHERE tenant_id = $1 ORDER BY created_at LIMIT 1",
        )
        .bind(tenant.id)
        .fetch_optional(&self.pool)
        .await?;

        let seo = sqlx::query_as::<_, Seo>("SELECT * FROM seo WHERE tenant_id = $1")
            .bind(tenant.id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(SiteDocument { tenant, page, seo })
    }

    /// Create a tenant with its SEO record and page content in a single
    /// transaction. The images must already be uploaded and the copy already
    /// generated; this method only persists.
    pub async fn create(
        &self,
        tenant: NewTenant,
        seo: Option<NewSeo>,
        page: NewPageContent,
    ) -> Result<(Tenant, PageContent), TenantError> {
        validate_slug(&tenant.slug)?;

        if !templates::exists(&tenant.template) {
            return Err(TenantError::UnknownTemplate(tenant.template));
        }

        if self.get_by_slug(&tenant.slug).await?.is_some() {
            return Err(TenantError::AlreadyExists(tenant.slug));
        }

        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants
                (slug, company_name, template, logo_url, favicon_url, industry, theme_colors, contact_info)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&tenant.slug)
        .bind(&tenant.company_name)
        .bind(&tenant.template)
        .bind(&tenant.logo_url)
        .bind(&tenant.favicon_url)
        .bind(&tenant.industry)
        .bind(&tenant.theme_colors)
        .bind(&tenant.contact_info)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(seo) = seo {
            sqlx::query(
                r#"
                INSERT INTO seo (tenant_id, title, description, keywords, og_image)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(created.id)
            .bind(&seo.title)
            .bind(&seo.description)
            .bind(&seo.keywords)
            .bind(&seo.og_image)
            .execute(&mut *tx)
            .await?;
        }

        let page_content = sqlx::query_as::<_, PageContent>(
            r#"
            INSERT INTO page_content
                (tenant_id, home_title, tagline, about_us, services, contact_blurb, website_image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(created.id)
        .bind(&page.home_title)
        .bind(&page.tagline)
        .bind(&page.about_us)
        .bind(&page.services)
        .bind(&page.contact_blurb)
        .bind(&page.website_image_url)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((created, page_content))
    }

    /// Delete a tenant and all dependent rows. The dependent tables cascade
    /// on delete; running inside a transaction keeps the outcome atomic.
    pub async fn delete(&self, slug: &str) -> Result<(), TenantError> {
        let tenant = self
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| TenantError::NotFound(slug.to_string()))?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM enquiries WHERE tenant_id = $1")
            .bind(tenant.id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM seo WHERE tenant_id = $1")
            .bind(tenant.id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM page_content WHERE tenant_id = $1")
            .bind(tenant.id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM tenants WHERE id = $1")
            .bind(tenant.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_charset_is_enforced() {
        assert!(validate_slug("acme").is_ok());
        assert!(validate_slug("acme-2024").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Acme").is_err());
        assert!(validate_slug("acme co").is_err());
        assert!(validate_slug("acme.co").is_err());
        assert!(validate_slug(&"a".repeat(64)).is_err());
    }
}
