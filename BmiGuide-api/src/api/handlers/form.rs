use axum::{
    extract::{Json, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument};

use bmi_guide_domain::export::{Action, ActionStatus};
use bmi_guide_domain::form::FormView;

use crate::api::AppState;
use crate::entities::bmi::{ActionResponse, PatientFormRequest};
use crate::entities::common::ErrorResponse;
use crate::platform::HandoffPlatform;

/// Get the current state of the patient form
#[utoipa::path(
    get,
    path = "/api/v1/form",
    responses(
        (status = 200, description = "Current form state", body = FormView),
    ),
    tag = "form"
)]
#[instrument(skip(state))]
pub async fn get_form(State(state): State<AppState>) -> Json<FormView> {
    let form = state.form.lock().await;
    Json(form.view())
}

/// Edit one or more form fields and recompute the result
#[utoipa::path(
    put,
    path = "/api/v1/form",
    request_body = PatientFormRequest,
    responses(
        (status = 200, description = "Form updated; errors and result recomputed", body = FormView),
        (status = 400, description = "Payload exceeds field limits", body = ErrorResponse),
    ),
    tag = "form"
)]
#[instrument(skip(state, request))]
pub async fn update_form(
    State(state): State<AppState>,
    Json(request): Json<PatientFormRequest>,
) -> Result<impl IntoResponse, Response> {
    request.check_limits().map_err(IntoResponse::into_response)?;

    let mut form = state.form.lock().await;
    form.apply(request.into_form_input());

    Ok((StatusCode::OK, Json(form.view())))
}

/// Share the result summary through the client's share facility
#[utoipa::path(
    post,
    path = "/api/v1/form/share",
    responses(
        (status = 200, description = "Share attempted; see status", body = ActionResponse),
    ),
    tag = "form"
)]
#[instrument(skip(state))]
pub async fn share_form(State(state): State<AppState>) -> Json<ActionResponse> {
    let platform = HandoffPlatform::from_config(&state.config);
    let mut form = state.form.lock().await;

    let status = form.share(&platform).await;

    Json(ActionResponse {
        status: status.into(),
        share: platform.take_share(),
        clipboard_text: None,
        form: form.view(),
    })
}

/// Copy "name | BMI" through the client's clipboard
#[utoipa::path(
    post,
    path = "/api/v1/form/copy",
    responses(
        (status = 200, description = "Copy attempted; see status", body = ActionResponse),
    ),
    tag = "form"
)]
#[instrument(skip(state))]
pub async fn copy_form(State(state): State<AppState>) -> Json<ActionResponse> {
    let platform = HandoffPlatform::from_config(&state.config);
    let mut form = state.form.lock().await;

    let status = form.copy(&platform).await;

    Json(ActionResponse {
        status: status.into(),
        share: None,
        clipboard_text: platform.take_clipboard(),
        form: form.view(),
    })
}

/// Download the current result as a CSV file
#[utoipa::path(
    post,
    path = "/api/v1/form/export",
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String),
        (status = 422, description = "Form input is invalid", body = ActionResponse),
        (status = 500, description = "CSV could not be produced", body = ActionResponse),
    ),
    tag = "form"
)]
#[instrument(skip(state))]
pub async fn export_form(State(state): State<AppState>) -> Response {
    let platform = HandoffPlatform::from_config(&state.config);
    let mut form = state.form.lock().await;

    let status = form.export(&platform);

    match (status, platform.take_file()) {
        (ActionStatus::Exported, Some(file)) => {
            info!(filename = %file.filename, bytes = file.contents.len(), "Serving CSV export");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, file.mime_type),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", file.filename),
                    ),
                ],
                file.contents,
            )
                .into_response()
        }
        (status, _) => {
            let code = match status {
                ActionStatus::InputInvalid(Action::Export) => StatusCode::UNPROCESSABLE_ENTITY,
                _ => {
                    error!("CSV export did not produce a file: {}", status);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            let body = ActionResponse {
                status: status.into(),
                share: None,
                clipboard_text: None,
                form: form.view(),
            };
            (code, Json(body)).into_response()
        }
    }
}
