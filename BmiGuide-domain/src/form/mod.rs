//! Application state for one patient form.
//!
//! Field edits recompute the derived result synchronously. Share, copy and
//! export re-validate the current fields and write their outcome into a
//! single status slot; the next edit clears it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use crate::entities::measurement::{FieldErrors, FormInput, PatientMeasurement};
use crate::export::{
    build_csv, Action, ActionStatus, ClipboardPlatform, FileDownloader, SharePlatform,
    ShareRequest, SHARE_TITLE,
};
use crate::presenter::{DisplayState, ResultPresenter};
use crate::services::normalize::normalize_number_input;
use crate::services::validation::validate;

/// Serializable snapshot of the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct FormView {
    /// Name field text as entered
    pub name: String,

    /// Weight field text after normalization
    pub weight: String,

    /// Height field text after normalization
    pub height: String,

    /// Current per-field errors
    pub errors: FieldErrors,

    /// Per-field error messages keyed by field name
    pub error_messages: Vec<FieldMessage>,

    /// Result box state
    pub display: DisplayState,

    /// Shared status message, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Error message for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct FieldMessage {
    pub field: String,
    pub message: String,
}

/// Holds raw field text, validation errors, the presenter and the status slot
#[derive(Debug, Clone, Default)]
pub struct FormController {
    name: String,
    weight: String,
    height: String,
    errors: FieldErrors,
    presenter: ResultPresenter,
    status: Option<ActionStatus>,
}

impl FormController {
    /// Empty form. Nothing is validated until the first edit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form opened with the sample record and its result already shown
    pub fn prefilled() -> Self {
        let mut form = Self::new();
        form.apply(FormInput::sample());
        form
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
        self.recompute();
    }

    pub fn set_weight(&mut self, weight: &str) {
        self.weight = normalize_number_input(weight);
        self.recompute();
    }

    pub fn set_height(&mut self, height: &str) {
        self.height = normalize_number_input(height);
        self.recompute();
    }

    /// Apply a partial edit; absent fields keep their current text
    pub fn apply(&mut self, input: FormInput) {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(weight) = input.weight {
            self.weight = normalize_number_input(&weight);
        }
        if let Some(height) = input.height {
            self.height = normalize_number_input(&height);
        }
        self.recompute();
    }

    /// Revalidate, refresh the result box and clear the status slot
    pub fn recompute(&mut self) -> Option<PatientMeasurement> {
        let measurement = self.revalidate();
        self.presenter.present(measurement.as_ref());
        self.status = None;
        measurement
    }

    /// Hand the summary text to the platform share facility
    pub async fn share(&mut self, platform: &dyn SharePlatform) -> ActionStatus {
        let Some(measurement) = self.revalidate() else {
            return self.set_status(ActionStatus::InputInvalid(Action::Share));
        };

        let request = ShareRequest {
            title: SHARE_TITLE.to_string(),
            text: self.presenter.summary_text(&measurement),
        };

        let outcome = platform.share(&request).await;
        if let Err(e) = &outcome {
            warn!("Share did not complete: {}", e);
        }
        self.set_status(ActionStatus::from_share(&outcome))
    }

    /// Write "name | BMI" to the platform clipboard
    pub async fn copy(&mut self, platform: &dyn ClipboardPlatform) -> ActionStatus {
        let Some(measurement) = self.revalidate() else {
            return self.set_status(ActionStatus::InputInvalid(Action::Copy));
        };

        let text = self.presenter.clipboard_text(&measurement.name);
        let outcome = platform.write_text(&text).await;
        if let Err(e) = &outcome {
            warn!("Clipboard write did not complete: {}", e);
        }
        self.set_status(ActionStatus::from_copy(&outcome))
    }

    /// Build the CSV file and hand it to the platform downloader
    pub fn export(&mut self, downloader: &dyn FileDownloader) -> ActionStatus {
        let Some(measurement) = self.revalidate() else {
            return self.set_status(ActionStatus::InputInvalid(Action::Export));
        };

        let display = self.presenter.display();
        let status = match build_csv(&measurement, &display.bmi_text, &display.category_label) {
            Ok(file) => match downloader.download(&file) {
                Ok(()) => ActionStatus::Exported,
                Err(e) => {
                    warn!("CSV download did not complete: {}", e);
                    ActionStatus::ExportFailed
                }
            },
            Err(e) => {
                warn!("Failed to render CSV export: {}", e);
                ActionStatus::ExportFailed
            }
        };
        self.set_status(status)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> &str {
        &self.weight
    }

    pub fn height(&self) -> &str {
        &self.height
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn display(&self) -> &DisplayState {
        self.presenter.display()
    }

    pub fn presenter(&self) -> &ResultPresenter {
        &self.presenter
    }

    pub fn status(&self) -> Option<ActionStatus> {
        self.status
    }

    /// Snapshot of the whole form
    pub fn view(&self) -> FormView {
        FormView {
            name: self.name.clone(),
            weight: self.weight.clone(),
            height: self.height.clone(),
            errors: self.errors.clone(),
            error_messages: self
                .errors
                .iter()
                .map(|(field, error)| FieldMessage {
                    field: field.to_string(),
                    message: error.to_string(),
                })
                .collect(),
            display: self.presenter.display().clone(),
            status: self.status.map(|s| s.message().to_string()),
        }
    }

    fn revalidate(&mut self) -> Option<PatientMeasurement> {
        match validate(&self.name, &self.weight, &self.height) {
            Ok(measurement) => {
                self.errors = FieldErrors::default();
                Some(measurement)
            }
            Err(errors) => {
                debug!("Form has {} invalid field(s)", errors.len());
                self.errors = errors;
                None
            }
        }
    }

    fn set_status(&mut self, status: ActionStatus) -> ActionStatus {
        info!(status = status.code(), "{}", status.message());
        self.status = Some(status);
        status
    }
}
