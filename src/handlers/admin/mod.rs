pub mod enquiries;
pub mod generate;
pub mod templates;
pub mod tenants;
