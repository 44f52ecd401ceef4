pub mod header;
pub mod lead_form;

pub use header::Header;
pub use lead_form::LeadForm;
