use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use bmi_guide_domain::entities::bmi::BmiResult;
use bmi_guide_domain::entities::measurement::{FormInput, PatientMeasurement};
use bmi_guide_domain::export::{ActionStatus, ShareRequest};
use bmi_guide_domain::form::FormView;
use bmi_guide_domain::services::{format_one_decimal, BmiEvaluation};

use crate::entities::common::ErrorResponse;

/// Patient form fields as typed by the user.
///
/// Non-string JSON values (numbers, booleans, objects) are treated as empty
/// text. On a form update, an absent field keeps its current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PatientFormRequest {
    /// Patient name
    #[serde(default, deserialize_with = "lenient_text")]
    #[validate(length(max = 200, message = "Name cannot exceed 200 characters"))]
    pub name: Option<String>,

    /// Weight in kilograms, free text (e.g. "70,5")
    #[serde(default, deserialize_with = "lenient_text")]
    #[validate(length(max = 32, message = "Weight cannot exceed 32 characters"))]
    pub weight: Option<String>,

    /// Height in centimetres, free text
    #[serde(default, deserialize_with = "lenient_text")]
    #[validate(length(max = 32, message = "Height cannot exceed 32 characters"))]
    pub height: Option<String>,
}

impl PatientFormRequest {
    /// Check payload limits, producing a bad request response on failure
    pub fn check_limits(&self) -> Result<(), ErrorResponse> {
        self.validate().map_err(|validation_errors| {
            let message = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors
                        .iter()
                        .map(|err| match &err.message {
                            Some(msg) => msg.to_string(),
                            None => format!("Invalid {}", field),
                        })
                        .collect();
                    format!("{}: {}", field, error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");
            ErrorResponse::bad_request(&message)
        })
    }

    pub fn into_form_input(self) -> FormInput {
        FormInput {
            name: self.name,
            weight: self.weight,
            height: self.height,
        }
    }
}

/// Keep strings, treat any other JSON value as empty text
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(_) => Some(String::new()),
    })
}

/// Result of a stateless BMI evaluation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EvaluateBmiResponse {
    /// The validated measurement
    pub measurement: PatientMeasurement,

    /// Computed BMI, category and advice
    pub result: BmiResult,

    /// BMI formatted with one decimal
    pub bmi_text: String,

    /// Multi-line summary suitable for sharing
    pub summary: String,
}

impl From<BmiEvaluation> for EvaluateBmiResponse {
    fn from(evaluation: BmiEvaluation) -> Self {
        Self {
            bmi_text: format_one_decimal(evaluation.result.value),
            measurement: evaluation.measurement,
            result: evaluation.result,
            summary: evaluation.summary,
        }
    }
}

/// Status slot content after an action
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusPayload {
    /// Machine-readable status code (e.g. "shared", "input_invalid")
    pub code: String,

    /// Message shown to the user
    pub message: String,

    /// Whether the action completed
    pub success: bool,
}

impl From<ActionStatus> for StatusPayload {
    fn from(status: ActionStatus) -> Self {
        Self {
            code: status.code().to_string(),
            message: status.message().to_string(),
            success: status.is_success(),
        }
    }
}

/// Response to a share or copy action
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActionResponse {
    /// Outcome of the action
    pub status: StatusPayload,

    /// Share payload for the client's share facility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share: Option<ShareRequest>,

    /// Text for the client's clipboard
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clipboard_text: Option<String>,

    /// Form state after the action
    pub form: FormView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_string_values_become_empty_text() {
        let request: PatientFormRequest =
            serde_json::from_value(json!({ "name": "Ann", "weight": 70, "height": null })).unwrap();

        assert_eq!(request.name.as_deref(), Some("Ann"));
        assert_eq!(request.weight.as_deref(), Some(""));
        assert_eq!(request.height, None);
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let request: PatientFormRequest = serde_json::from_value(json!({ "weight": "80" })).unwrap();
        let input = request.into_form_input();

        assert_eq!(input.name, None);
        assert_eq!(input.weight.as_deref(), Some("80"));
        assert_eq!(input.height, None);
    }

    #[test]
    fn test_length_limits() {
        let request = PatientFormRequest {
            name: Some("x".repeat(201)),
            weight: Some("70".to_string()),
            height: Some("170".to_string()),
        };

        let error = request.check_limits().unwrap_err();
        assert_eq!(error.error, "bad_request");
        assert!(error.message.contains("Name cannot exceed 200 characters"));
    }

    #[test]
    fn test_status_payload() {
        let payload = StatusPayload::from(ActionStatus::Copied);
        assert_eq!(payload.code, "copied");
        assert_eq!(payload.message, "Name & BMI copied to clipboard.");
        assert!(payload.success);
    }
}
