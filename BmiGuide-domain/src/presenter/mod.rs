//! Derived display state for the BMI result box, and the text payloads
//! built from it.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use crate::entities::bmi::{BmiCategory, BmiResult};
use crate::entities::measurement::PatientMeasurement;
use crate::services::classification::{categorize_bmi, compute_bmi, format_one_decimal};

/// BMI text shown while there is no valid measurement
pub const BMI_PLACEHOLDER: &str = "--";

/// Advice text shown while there is no valid measurement
pub const PROMPT_ADVICE: &str = "Enter patient name, weight and height above to see BMI.";

/// Closing line of every shared summary
pub const DISCLAIMER: &str =
    "Note: BMI is a general indicator and does not replace full clinical assessment.";

/// What the result box currently shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct DisplayState {
    /// BMI with one decimal, or the placeholder
    pub bmi_text: String,

    /// Category of the current result, if any
    pub category: Option<BmiCategory>,

    /// Category pill label, empty when there is no result
    pub category_label: String,

    /// Category pill style class, empty when there is no result
    pub pill_class: String,

    /// Advice for the category, or a prompt to fill the form
    pub advice: String,

    /// Whether the result box is shown
    pub visible: bool,

    /// Whether share, copy and export are enabled
    pub actions_enabled: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            bmi_text: BMI_PLACEHOLDER.to_string(),
            category: None,
            category_label: String::new(),
            pill_class: String::new(),
            advice: PROMPT_ADVICE.to_string(),
            visible: false,
            actions_enabled: false,
        }
    }
}

/// Holds the current derived result and its display state
#[derive(Debug, Clone, Default)]
pub struct ResultPresenter {
    display: DisplayState,
    result: Option<BmiResult>,
}

impl ResultPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the display from the latest validation outcome
    pub fn present(&mut self, measurement: Option<&PatientMeasurement>) {
        match measurement {
            None => {
                self.result = None;
                self.display = DisplayState::default();
            }
            Some(measurement) => {
                let value = compute_bmi(measurement.weight_kg, measurement.height_cm);
                let category = categorize_bmi(value);

                self.display = DisplayState {
                    bmi_text: format_one_decimal(value),
                    category: Some(category),
                    category_label: category.label().to_string(),
                    pill_class: category.pill_class().to_string(),
                    advice: category.advice().to_string(),
                    visible: true,
                    actions_enabled: true,
                };
                self.result = Some(BmiResult::new(value, category));
                debug!(bmi = %self.display.bmi_text, category = %category, "Result presented");
            }
        }
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn result(&self) -> Option<&BmiResult> {
        self.result.as_ref()
    }

    /// Share payload for a measurement, using the displayed BMI and label
    pub fn summary_text(&self, measurement: &PatientMeasurement) -> String {
        summary_text(measurement, &self.display.bmi_text, &self.display.category_label)
    }

    /// Clipboard payload for a patient name, using the displayed BMI
    pub fn clipboard_text(&self, name: &str) -> String {
        clipboard_text(name, &self.display.bmi_text)
    }
}

/// Multi-line plain text summary of a measurement and its result
pub fn summary_text(measurement: &PatientMeasurement, bmi_text: &str, category_label: &str) -> String {
    format!(
        "Patient: {}\nWeight: {} kg\nHeight: {} cm\nBMI: {}\nCategory: {}\n{}",
        measurement.name,
        format_one_decimal(measurement.weight_kg),
        format_one_decimal(measurement.height_cm),
        bmi_text,
        category_label,
        DISCLAIMER,
    )
}

/// Short "name | BMI" line for the clipboard
pub fn clipboard_text(name: &str, bmi_text: &str) -> String {
    format!("Patient: {} | BMI: {}", name, bmi_text)
}
