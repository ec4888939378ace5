// BMI Guide Domain
// This crate contains the business logic for the BMI Guide patient form

// Domain entities
pub mod entities;

// Services that implement business logic
pub mod services;

// Derived display state for the result box
pub mod presenter;

// Share, clipboard and CSV export adapters
pub mod export;

// Application state for a single patient form
pub mod form;

// Health checks and system status
pub mod health;

// Testing utilities - only available in tests or with the mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;

pub use entities::bmi::{BmiCategory, BmiResult, CategoryInfo};
pub use entities::measurement::{FieldError, FieldErrors, FormInput, PatientMeasurement};
pub use form::{FormController, FormView};
