//! Idempotent seeding of the admin account and an optional demo tenant.

use anyhow::Result;
use serde_json::json;

use crate::auth::hash_password;
use crate::database::manager::DatabaseManager;
use crate::services::content_service::{fallback_services, SiteCopy};
use crate::services::tenant_service::{NewPageContent, NewTenant, TenantService};

pub async fn run(username: &str, password: &str, demo: bool) -> Result<()> {
    DatabaseManager::run_migrations().await?;
    let pool = DatabaseManager::pool().await?;

    let existing: Option<(uuid::Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&pool)
            .await?;

    match existing {
        Some((id,)) => {
            tracing::info!(%username, %id, "Admin user already exists");
        }
        None => {
            let (id,): (uuid::Uuid,) = sqlx::query_as(
                "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id",
            )
            .bind(username)
            .bind(hash_password(password))
            .fetch_one(&pool)
            .await?;
            tracing::info!(%username, %id, "Created admin user");
        }
    }

    if demo {
        seed_demo_tenant().await?;
    }

    Ok(())
}

async fn seed_demo_tenant() -> Result<()> {
    let tenants = TenantService::new().await?;

    if tenants.get_by_slug("demo").await?.is_some() {
        tracing::info!("Demo tenant already exists");
        return Ok(());
    }

    let copy = SiteCopy::fallback("Demo Company");
    tenants
        .create(
            NewTenant {
                slug: "demo".to_string(),
                company_name: "Demo Company".to_string(),
                template: "professional".to_string(),
                logo_url: "https://placehold.co/200x80".to_string(),
                favicon_url: None,
                industry: Some("Technology".to_string()),
                theme_colors: None,
                contact_info: Some(json!({
                    "email": "hello@demo.example.com",
                    "phone": "",
                    "address": ""
                })),
            },
            None,
            NewPageContent {
                home_title: copy.home_title,
                tagline: copy.tagline,
                about_us: copy.about_us,
                services: serde_json::to_value(fallback_services())?,
                contact_blurb: copy.contact_blurb,
                website_image_url: None,
            },
        )
        .await?;

    tracing::info!("Created demo tenant");
    Ok(())
}
