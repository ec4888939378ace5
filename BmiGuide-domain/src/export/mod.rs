//! Share, clipboard and CSV export adapters.
//!
//! The host platform (share sheet, clipboard, file save) is reached through
//! the traits below. Every action ends in exactly one [`ActionStatus`].

pub mod csv_file;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

pub use csv_file::{build_csv, CsvExportError, CsvFile, CSV_FILENAME, CSV_MIME_TYPE};

/// Title attached to every share request
pub const SHARE_TITLE: &str = "Patient BMI Result";

/// Platform capability an action depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Share,
    Clipboard,
    Download,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Share => "share",
            Capability::Clipboard => "clipboard",
            Capability::Download => "download",
        };
        f.write_str(name)
    }
}

/// Failure reported by a platform facility.
///
/// A user cancelling a share sheet is reported as `OperationFailed`;
/// cancel and error are not told apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The platform has no such facility
    #[error("{0} is not supported on this platform")]
    Unsupported(Capability),

    /// The facility exists but the operation did not complete
    #[error("{0} operation failed: {1}")]
    OperationFailed(Capability, String),
}

/// Structured request handed to the platform share facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
}

/// Native share facility
#[async_trait]
pub trait SharePlatform: Send + Sync {
    async fn share(&self, request: &ShareRequest) -> Result<(), PlatformError>;
}

/// System clipboard writer
#[async_trait]
pub trait ClipboardPlatform: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), PlatformError>;
}

/// File-save mechanism for generated downloads
pub trait FileDownloader: Send + Sync {
    fn download(&self, file: &CsvFile) -> Result<(), PlatformError>;
}

/// User-triggered export action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Share,
    Copy,
    Export,
}

/// Content of the shared status slot after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "code", content = "action")]
pub enum ActionStatus {
    /// Current input failed validation, nothing was handed to the platform
    InputInvalid(Action),
    Shared,
    ShareUnsupported,
    ShareFailed,
    Copied,
    CopyUnsupported,
    CopyFailed,
    Exported,
    ExportFailed,
}

impl ActionStatus {
    /// Message shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            ActionStatus::InputInvalid(Action::Share) => "Fix input errors before sharing.",
            ActionStatus::InputInvalid(Action::Copy) => "Fix input errors before copying.",
            ActionStatus::InputInvalid(Action::Export) => "Fix input errors before exporting.",
            ActionStatus::Shared => "Shared via system share (if app selected).",
            ActionStatus::ShareUnsupported => "System share not supported; use copy instead.",
            ActionStatus::ShareFailed => "Share cancelled or failed.",
            ActionStatus::Copied => "Name & BMI copied to clipboard.",
            ActionStatus::CopyUnsupported => "Clipboard not supported on this platform.",
            ActionStatus::CopyFailed => "Copy to clipboard failed.",
            ActionStatus::Exported => "CSV file downloaded.",
            ActionStatus::ExportFailed => "CSV export failed.",
        }
    }

    /// Machine-readable code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            ActionStatus::InputInvalid(_) => "input_invalid",
            ActionStatus::Shared => "shared",
            ActionStatus::ShareUnsupported => "share_unsupported",
            ActionStatus::ShareFailed => "share_failed",
            ActionStatus::Copied => "copied",
            ActionStatus::CopyUnsupported => "copy_unsupported",
            ActionStatus::CopyFailed => "copy_failed",
            ActionStatus::Exported => "exported",
            ActionStatus::ExportFailed => "export_failed",
        }
    }

    /// True when the action reached the platform and completed
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ActionStatus::Shared | ActionStatus::Copied | ActionStatus::Exported
        )
    }

    /// Map the platform outcome of a share
    pub fn from_share(outcome: &Result<(), PlatformError>) -> Self {
        match outcome {
            Ok(()) => ActionStatus::Shared,
            Err(PlatformError::Unsupported(_)) => ActionStatus::ShareUnsupported,
            Err(PlatformError::OperationFailed(..)) => ActionStatus::ShareFailed,
        }
    }

    /// Map the platform outcome of a clipboard write
    pub fn from_copy(outcome: &Result<(), PlatformError>) -> Self {
        match outcome {
            Ok(()) => ActionStatus::Copied,
            Err(PlatformError::Unsupported(_)) => ActionStatus::CopyUnsupported,
            Err(PlatformError::OperationFailed(..)) => ActionStatus::CopyFailed,
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_outcome_mapping() {
        assert_eq!(ActionStatus::from_share(&Ok(())), ActionStatus::Shared);
        assert_eq!(
            ActionStatus::from_share(&Err(PlatformError::Unsupported(Capability::Share))),
            ActionStatus::ShareUnsupported
        );
        assert_eq!(
            ActionStatus::from_share(&Err(PlatformError::OperationFailed(
                Capability::Share,
                "AbortError".to_string()
            ))),
            ActionStatus::ShareFailed
        );
    }

    #[test]
    fn test_copy_outcome_mapping() {
        assert_eq!(ActionStatus::from_copy(&Ok(())), ActionStatus::Copied);
        assert_eq!(
            ActionStatus::from_copy(&Err(PlatformError::Unsupported(Capability::Clipboard))),
            ActionStatus::CopyUnsupported
        );
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(
            ActionStatus::InputInvalid(Action::Export).to_string(),
            "Fix input errors before exporting."
        );
        assert_eq!(ActionStatus::Exported.message(), "CSV file downloaded.");
        assert!(ActionStatus::Copied.is_success());
        assert!(!ActionStatus::ShareFailed.is_success());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_value(ActionStatus::InputInvalid(Action::Copy)).unwrap();
        assert_eq!(json, serde_json::json!({ "code": "input_invalid", "action": "copy" }));

        let json = serde_json::to_value(ActionStatus::Shared).unwrap();
        assert_eq!(json, serde_json::json!({ "code": "shared" }));
    }
}
