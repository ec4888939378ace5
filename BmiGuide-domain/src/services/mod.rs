pub mod bmi;
pub mod classification;
pub mod normalize;
pub mod validation;

// Domain services
// This module contains business logic implementations.

// Re-export the pure building blocks and the service trait
pub use bmi::{create_default_bmi_service, BmiEvaluation, BmiService, BmiServiceTrait};
pub use classification::{classify, compute_bmi, format_one_decimal, round_one_decimal};
pub use normalize::{normalize_number_input, normalize_optional};
pub use validation::validate;
