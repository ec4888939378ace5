use tracing::debug;

use crate::entities::measurement::{
    FieldError, FieldErrors, PatientMeasurement, MAX_HEIGHT_CM, MAX_WEIGHT_KG,
};
use crate::services::normalize::{normalize_number_input, parse_decimal};

/// Validate the three raw form fields.
///
/// Every field is checked so all applicable errors are reported together.
/// Numeric text is normalized before parsing. Zero and negative values are
/// rejected; the upper bounds (500 kg, 250 cm) are inclusive.
pub fn validate(
    name: &str,
    weight_text: &str,
    height_text: &str,
) -> Result<PatientMeasurement, FieldErrors> {
    let name = name.trim();
    let weight = parse_bounded(weight_text, MAX_WEIGHT_KG);
    let height = parse_bounded(height_text, MAX_HEIGHT_CM);

    let errors = FieldErrors {
        name: name.is_empty().then_some(FieldError::NameRequired),
        weight: weight.is_none().then_some(FieldError::WeightInvalid),
        height: height.is_none().then_some(FieldError::HeightInvalid),
    };

    match (weight, height) {
        (Some(weight_kg), Some(height_cm)) if errors.is_empty() => Ok(PatientMeasurement {
            name: name.to_string(),
            weight_kg,
            height_cm,
        }),
        _ => {
            debug!("Patient input rejected: {}", errors);
            Err(errors)
        }
    }
}

/// Parse a numeric field and keep it only when it lies in (0, max]
fn parse_bounded(text: &str, max: f64) -> Option<f64> {
    parse_decimal(&normalize_number_input(text)).filter(|value| *value > 0.0 && *value <= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let measurement = validate("  John Doe ", "70", "170").unwrap();
        assert_eq!(measurement.name, "John Doe");
        assert_eq!(measurement.weight_kg, 70.0);
        assert_eq!(measurement.height_cm, 170.0);
    }

    #[test]
    fn test_empty_name_only() {
        let errors = validate("   ", "70", "170").unwrap_err();
        assert_eq!(errors.name, Some(FieldError::NameRequired));
        assert_eq!(errors.weight, None);
        assert_eq!(errors.height, None);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_all_errors_reported_together() {
        let errors = validate("", "", "abc").unwrap_err();
        assert_eq!(errors.name, Some(FieldError::NameRequired));
        assert_eq!(errors.weight, Some(FieldError::WeightInvalid));
        assert_eq!(errors.height, Some(FieldError::HeightInvalid));
    }

    #[test]
    fn test_zero_is_rejected() {
        let errors = validate("Ann", "0", "0.0").unwrap_err();
        assert_eq!(errors.weight, Some(FieldError::WeightInvalid));
        assert_eq!(errors.height, Some(FieldError::HeightInvalid));
    }

    #[test]
    fn test_upper_bounds_are_inclusive() {
        let measurement = validate("Ann", "500", "250").unwrap();
        assert_eq!(measurement.weight_kg, 500.0);
        assert_eq!(measurement.height_cm, 250.0);

        let errors = validate("Ann", "500.1", "250.01").unwrap_err();
        assert_eq!(errors.weight, Some(FieldError::WeightInvalid));
        assert_eq!(errors.height, Some(FieldError::HeightInvalid));
    }

    #[test]
    fn test_raw_text_is_normalized_before_parsing() {
        let measurement = validate("Ann", "70,5 kg", "1.7.0").unwrap();
        assert_eq!(measurement.weight_kg, 70.5);
        assert_eq!(measurement.height_cm, 1.70);
    }

    #[test]
    fn test_lone_point_is_unparsable() {
        let errors = validate("Ann", ".", "170").unwrap_err();
        assert_eq!(errors.weight, Some(FieldError::WeightInvalid));
        assert_eq!(errors.height, None);
    }
}
