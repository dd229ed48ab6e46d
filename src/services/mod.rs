pub mod content_service;
pub mod enquiry_service;
pub mod image_service;
pub mod templates;
pub mod tenant_service;
