use crate::middleware::{ApiResponse, ApiResult};
use crate::services::templates::{self, TemplateInfo};

/// GET /api/admin/templates
pub async fn list() -> ApiResult<&'static [TemplateInfo]> {
    Ok(ApiResponse::success(templates::all()))
}
