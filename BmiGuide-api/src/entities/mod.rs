// Public entities for the BMI Guide API
// This module contains data structures that are shared across the application boundary

// Request and response payloads for BMI evaluation and the form session
pub mod bmi;

// Common entities for error handling
pub mod common;
