use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{info, instrument, warn};

use bmi_guide_domain::entities::measurement::FieldErrors;
use bmi_guide_domain::services::{create_default_bmi_service, BmiServiceTrait};

use crate::api::AppState;
use crate::entities::bmi::{EvaluateBmiResponse, PatientFormRequest};
use crate::entities::common::ErrorResponse;

/// Service type for dependency injection
pub type BmiService = Arc<dyn BmiServiceTrait + Send + Sync>;

/// Create a default service for the handlers to use
pub fn create_service() -> BmiService {
    Arc::new(create_default_bmi_service())
}

/// Evaluate a patient's BMI without touching the form session
#[utoipa::path(
    post,
    path = "/api/v1/bmi",
    request_body = PatientFormRequest,
    responses(
        (status = 200, description = "BMI computed and classified", body = EvaluateBmiResponse),
        (status = 400, description = "Payload exceeds field limits", body = ErrorResponse),
        (status = 422, description = "One or more fields are invalid", body = ErrorResponse),
    ),
    tag = "bmi"
)]
#[instrument(skip(state, request))]
pub async fn evaluate_bmi(
    State(state): State<AppState>,
    Json(request): Json<PatientFormRequest>,
) -> Result<impl IntoResponse, Response> {
    request.check_limits().map_err(IntoResponse::into_response)?;

    let name = request.name.as_deref().unwrap_or_default();
    let weight = request.weight.as_deref().unwrap_or_default();
    let height = request.height.as_deref().unwrap_or_default();

    match state.bmi_service.evaluate(name, weight, height) {
        Ok(evaluation) => {
            info!(
                bmi = evaluation.result.value,
                category = %evaluation.result.category,
                "BMI evaluated"
            );
            Ok((StatusCode::OK, Json(EvaluateBmiResponse::from(evaluation))))
        }
        Err(errors) => {
            warn!("Invalid patient input: {}", errors);
            let error = ErrorResponse::validation_error(
                "Patient input is invalid",
                Some(field_error_details(&errors)),
            );
            Err(error.into_response())
        }
    }
}

/// Per-field error messages as a JSON object
pub(crate) fn field_error_details(errors: &FieldErrors) -> serde_json::Value {
    errors
        .iter()
        .map(|(field, error)| {
            (
                field.to_string(),
                serde_json::json!({ "code": error.code(), "message": error.to_string() }),
            )
        })
        .collect::<serde_json::Map<String, serde_json::Value>>()
        .into()
}
