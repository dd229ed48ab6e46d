//! Generation endpoints backing the admin create-site form: SEO copy, logo
//! analysis (including palette extraction), and image upload.

use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::content_service::ContentService;
use crate::services::image_service::{data_url_mime, strip_data_url, ImageService};

// Default theme when no brand colors are known yet.
const DEFAULT_PRIMARY: &str = "#0f172a";
const DEFAULT_SECONDARY: &str = "#1e40af";
const DEFAULT_ACCENT: &str = "#3b82f6";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSeoRequest {
    #[serde(default)]
    pub company_name: String,
    pub industry: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
}

/// POST /api/admin/generate-seo
pub async fn generate_seo(Json(payload): Json<GenerateSeoRequest>) -> ApiResult<Value> {
    if payload.company_name.is_empty() {
        return Err(ApiError::bad_request("Company name is required"));
    }

    let content = ContentService::from_config(&config::config().services);
    let seo = content
        .seo_copy(
            &payload.company_name,
            payload.industry.as_deref().filter(|i| !i.is_empty()),
            &payload.colors,
        )
        .await?;

    let pick = |n: usize, default: &str| {
        payload
            .colors
            .get(n)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    };

    Ok(ApiResponse::success(json!({
        "seoTitle": seo.seo_title,
        "seoDescription": seo.seo_description,
        "seoKeywords": seo.seo_keywords,
        "primaryColor": pick(0, DEFAULT_PRIMARY),
        "secondaryColor": pick(1, DEFAULT_SECONDARY),
        "accentColor": pick(2, DEFAULT_ACCENT),
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeLogoRequest {
    /// Logo as a base64 data URL.
    #[serde(default)]
    pub logo_data: String,
    pub industry: Option<String>,
}

/// POST /api/admin/analyze-logo - vision-model analysis of an uploaded logo:
/// company name, industry, style, symbols, and a five-color palette.
pub async fn analyze_logo(Json(payload): Json<AnalyzeLogoRequest>) -> ApiResult<Value> {
    if payload.logo_data.is_empty() {
        return Err(ApiError::bad_request("No logo provided"));
    }

    let mime = data_url_mime(&payload.logo_data).unwrap_or("image/png");
    let base64_data = strip_data_url(&payload.logo_data);

    let content = ContentService::from_config(&config::config().services);
    let analysis = content
        .analyze_logo(
            mime,
            base64_data,
            payload.industry.as_deref().filter(|i| !i.is_empty()),
        )
        .await?;

    Ok(ApiResponse::success(json!(analysis)))
}

#[derive(Debug, Deserialize)]
pub struct ImageUploadRequest {
    /// Base64 data URL, bare base64, or an already-hosted URL.
    #[serde(default)]
    pub image: String,
}

/// POST /api/admin/image-upload - push image data to the image host and
/// return its public URL.
pub async fn image_upload(Json(payload): Json<ImageUploadRequest>) -> ApiResult<Value> {
    if payload.image.is_empty() {
        return Err(ApiError::bad_request("No image provided"));
    }

    let images = ImageService::from_config(&config::config().services);
    let url = images.upload(&payload.image).await?;

    Ok(ApiResponse::success(json!({ "url": url })))
}
