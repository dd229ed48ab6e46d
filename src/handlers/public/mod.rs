pub mod enquiry;
pub mod site;
