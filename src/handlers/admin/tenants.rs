//! Admin tenant management: list, create (with image upload and generated
//! copy), and delete.

use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::content_service::ContentService;
use crate::services::image_service::ImageService;
use crate::services::tenant_service::{
    validate_slug, NewPageContent, NewSeo, NewTenant, TenantService, TenantSummary,
};

/// GET /api/admin/tenants
pub async fn list() -> ApiResult<Vec<TenantSummary>> {
    let service = TenantService::new().await?;
    Ok(ApiResponse::success(service.list().await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantRequest {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub template: String,
    /// Logo as a base64 data URL or an already-hosted URL.
    #[serde(default)]
    pub logo_url: String,
    pub favicon_url: Option<String>,
    pub website_image_url: Option<String>,
    pub industry: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_address: Option<String>,
    pub theme_colors: Option<Value>,
}

fn contact_info(req: &CreateTenantRequest) -> Option<Value> {
    let any_present = [&req.contact_email, &req.contact_phone, &req.contact_address]
        .iter()
        .any(|f| f.as_deref().is_some_and(|v| !v.is_empty()));

    any_present.then(|| {
        json!({
            "email": req.contact_email.clone().unwrap_or_default(),
            "phone": req.contact_phone.clone().unwrap_or_default(),
            "address": req.contact_address.clone().unwrap_or_default(),
        })
    })
}

/// POST /api/admin/tenants - the full creation pipeline: validate, upload
/// images to the image host, generate site copy and services through the
/// content service (with fixed fallbacks), then persist atomically.
pub async fn create(Json(payload): Json<CreateTenantRequest>) -> ApiResult<Value> {
    if payload.slug.is_empty()
        || payload.company_name.is_empty()
        || payload.template.is_empty()
        || payload.logo_url.is_empty()
    {
        return Err(ApiError::bad_request("Missing required fields"));
    }
    validate_slug(&payload.slug)?;

    let services_config = &config::config().services;
    let images = ImageService::from_config(services_config);
    let content = ContentService::from_config(services_config);

    let logo_url = images.upload(&payload.logo_url).await?;
    let favicon_url = images.upload_optional(payload.favicon_url.as_deref()).await?;
    let website_image_url = images
        .upload_optional(payload.website_image_url.as_deref())
        .await?;

    let industry = payload.industry.as_deref().filter(|i| !i.is_empty());
    let copy = content.site_copy(&payload.company_name, industry).await?;
    let service_items = content.service_list(&payload.company_name, industry).await?;

    let seo = [&payload.seo_title, &payload.seo_description, &payload.seo_keywords]
        .iter()
        .any(|f| f.as_deref().is_some_and(|v| !v.is_empty()))
        .then(|| NewSeo {
            title: payload
                .seo_title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| payload.company_name.clone()),
            description: payload.seo_description.clone().unwrap_or_default(),
            keywords: payload.seo_keywords.clone().unwrap_or_default(),
            og_image: website_image_url.clone(),
        });

    let tenants = TenantService::new().await?;
    let (tenant, page_content) = tenants
        .create(
            NewTenant {
                slug: payload.slug.clone(),
                company_name: payload.company_name.clone(),
                template: payload.template.clone(),
                logo_url,
                favicon_url,
                industry: industry.map(str::to_string),
                theme_colors: payload.theme_colors.clone(),
                contact_info: contact_info(&payload),
            },
            seo,
            NewPageContent {
                home_title: copy.home_title,
                tagline: copy.tagline,
                about_us: copy.about_us,
                services: serde_json::to_value(&service_items).unwrap_or_else(|_| json!([])),
                contact_blurb: copy.contact_blurb,
                website_image_url,
            },
        )
        .await?;

    tracing::info!(slug = %tenant.slug, template = %tenant.template, "Tenant created");

    Ok(ApiResponse::created(json!({
        "tenant": tenant,
        "pageContent": page_content
    })))
}

#[derive(Debug, Deserialize)]
pub struct DeleteTenantRequest {
    #[serde(default)]
    pub slug: String,
}

/// POST /api/admin/tenants/delete
pub async fn delete(Json(payload): Json<DeleteTenantRequest>) -> ApiResult<Value> {
    if payload.slug.is_empty() {
        return Err(ApiError::bad_request("Slug is required"));
    }

    let service = TenantService::new().await?;
    service.delete(&payload.slug).await?;

    tracing::info!(slug = %payload.slug, "Tenant deleted");

    Ok(ApiResponse::success(json!({ "deleted": payload.slug })))
}
