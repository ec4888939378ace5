pub mod bmi;
pub mod form;
pub mod health;


// Re-export handlers for easier imports
pub use bmi::evaluate_bmi;
pub use form::{copy_form, export_form, get_form, share_form, update_form};
pub use health::health_check;
