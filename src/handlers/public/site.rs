//! Tenant-site content endpoints: the rewrite target of the edge router and
//! the JSON document the site templates render from.

use axum::extract::Path;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::tenant_service::{SiteDocument, TenantService};

async fn resolve(slug: &str) -> Result<SiteDocument, ApiError> {
    let service = TenantService::new().await.map_err(ApiError::from)?;
    service.get_site(slug).await.map_err(ApiError::from)
}

/// GET /sites/:slug - landing document for a tenant site. Requests to
/// `<slug>.<root-domain>/` land here via the edge rewrite. Unknown slugs get
/// the distinguishable tenant-not-found outcome, not a router error.
pub async fn site_root(Path(slug): Path<String>) -> ApiResult<SiteDocument> {
    Ok(ApiResponse::success(resolve(&slug).await?))
}

/// GET /sites/:slug/*page - sub-pages of a tenant site share the same
/// document; the template decides what to show for the sub-path.
pub async fn site_page(Path((slug, _page)): Path<(String, String)>) -> ApiResult<SiteDocument> {
    Ok(ApiResponse::success(resolve(&slug).await?))
}

/// GET /api/tenant/:slug - same document over the API surface, consumed by
/// the admin preview.
pub async fn tenant_get(Path(slug): Path<String>) -> ApiResult<SiteDocument> {
    Ok(ApiResponse::success(resolve(&slug).await?))
}
