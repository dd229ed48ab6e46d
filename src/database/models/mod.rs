pub mod enquiry;
pub mod page;
pub mod seo;
pub mod tenant;
pub mod user;

pub use enquiry::{Enquiry, EnquiryStatus};
pub use page::PageContent;
pub use seo::Seo;
pub use tenant::Tenant;
pub use user::AdminAccount;
