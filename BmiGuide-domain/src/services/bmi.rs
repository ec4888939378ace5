use tracing::debug;

use crate::entities::bmi::BmiResult;
use crate::entities::measurement::{FieldErrors, PatientMeasurement};
use crate::presenter::summary_text;
use crate::services::classification::{categorize_bmi, compute_bmi, format_one_decimal};
use crate::services::validation;

/// Full evaluation of one patient input
#[derive(Debug, Clone, PartialEq)]
pub struct BmiEvaluation {
    /// The validated input
    pub measurement: PatientMeasurement,

    /// Computed BMI and category
    pub result: BmiResult,

    /// Multi-line summary used as the share payload
    pub summary: String,
}

/// Trait for BMI service operations
pub trait BmiServiceTrait {
    /// Validate raw field text into a measurement
    fn validate(
        &self,
        name: &str,
        weight_text: &str,
        height_text: &str,
    ) -> Result<PatientMeasurement, FieldErrors>;

    /// Compute and classify the BMI of a validated measurement
    fn calculate(&self, measurement: &PatientMeasurement) -> BmiResult;

    /// Validate, compute, classify and summarize in one step
    fn evaluate(
        &self,
        name: &str,
        weight_text: &str,
        height_text: &str,
    ) -> Result<BmiEvaluation, FieldErrors> {
        let measurement = self.validate(name, weight_text, height_text)?;
        let result = self.calculate(&measurement);
        let summary = summary_text(&measurement, &format_one_decimal(result.value), &result.label);

        Ok(BmiEvaluation {
            measurement,
            result,
            summary,
        })
    }
}

/// BMI service for domain logic
#[derive(Debug, Clone, Copy, Default)]
pub struct BmiService;

impl BmiService {
    /// Create a new BMI service
    pub fn new() -> Self {
        Self
    }
}

impl BmiServiceTrait for BmiService {
    fn validate(
        &self,
        name: &str,
        weight_text: &str,
        height_text: &str,
    ) -> Result<PatientMeasurement, FieldErrors> {
        validation::validate(name, weight_text, height_text)
    }

    fn calculate(&self, measurement: &PatientMeasurement) -> BmiResult {
        let value = compute_bmi(measurement.weight_kg, measurement.height_cm);
        let category = categorize_bmi(value);
        debug!(bmi = value, category = %category, "BMI calculated");
        BmiResult::new(value, category)
    }
}

/// Create the default BMI service
pub fn create_default_bmi_service() -> impl BmiServiceTrait + Send + Sync {
    BmiService::new()
}
