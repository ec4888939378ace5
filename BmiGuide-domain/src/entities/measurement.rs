use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Upper bound (inclusive) for a patient's weight in kilograms
pub const MAX_WEIGHT_KG: f64 = 500.0;

/// Upper bound (inclusive) for a patient's height in centimetres
pub const MAX_HEIGHT_CM: f64 = 250.0;

/// A patient measurement that passed validation.
///
/// Instances only exist when every field is valid; callers hold an
/// `Option<PatientMeasurement>` for the "no valid measurement" state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct PatientMeasurement {
    /// Patient name, trimmed and non-empty
    pub name: String,

    /// Weight in kilograms, within (0, 500]
    pub weight_kg: f64,

    /// Height in centimetres, within (0, 250]
    pub height_cm: f64,
}

/// Validation failure for a single form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    /// Name is empty after trimming
    #[error("Enter patient name.")]
    NameRequired,

    /// Weight is unparsable, not positive, or above 500 kg
    #[error("Enter valid weight (1–500 kg).")]
    WeightInvalid,

    /// Height is unparsable, not positive, or above 250 cm
    #[error("Enter valid height (50–250 cm).")]
    HeightInvalid,
}

impl FieldError {
    /// Machine-readable code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::NameRequired => "name_required",
            FieldError::WeightInvalid => "weight_invalid",
            FieldError::HeightInvalid => "height_invalid",
        }
    }
}

/// Per-field validation errors. Every field is checked, so several
/// errors can be present at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[error("{}", field_summary([("name", .name), ("weight", .weight), ("height", .height)]))]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldError>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<FieldError>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<FieldError>,
}

impl FieldErrors {
    /// True when no field has an error
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.weight.is_none() && self.height.is_none()
    }

    /// Number of fields with an error
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Iterate over `(field, error)` pairs in form order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FieldError)> + '_ {
        [
            ("name", self.name),
            ("weight", self.weight),
            ("height", self.height),
        ]
        .into_iter()
        .filter_map(|(field, error)| error.map(|e| (field, e)))
    }
}

/// `field: message` pairs joined with `; `
fn field_summary(fields: [(&str, &Option<FieldError>); 3]) -> String {
    fields
        .iter()
        .filter_map(|(field, error)| error.map(|e| format!("{}: {}", field, e)))
        .collect::<Vec<String>>()
        .join("; ")
}

/// Raw form field text. `None` leaves a field untouched when applied to
/// a form; `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct FormInput {
    pub name: Option<String>,
    pub weight: Option<String>,
    pub height: Option<String>,
}

impl FormInput {
    /// Build a complete input from the three field texts
    pub fn new(name: impl Into<String>, weight: impl Into<String>, height: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            weight: Some(weight.into()),
            height: Some(height.into()),
        }
    }

    /// The record a freshly opened form is filled with
    pub fn sample() -> Self {
        Self::new("John Doe", "70", "170")
    }
}
