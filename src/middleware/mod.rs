pub mod auth;
pub mod response;

pub use auth::{cookie_value, require_admin_middleware, AdminUser};
pub use response::{ApiResponse, ApiResult};
