//! Platform facilities for HTTP clients.
//!
//! The server has no share sheet, clipboard or file system of its own: the
//! payload of each action is captured here and returned to the client, which
//! performs the actual share, copy or save.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use bmi_guide_domain::export::{
    Capability, ClipboardPlatform, CsvFile, FileDownloader, PlatformError, SharePlatform,
    ShareRequest,
};

use crate::config::AppConfig;

/// Captures action payloads for the current request
#[derive(Debug, Default)]
pub struct HandoffPlatform {
    share_enabled: bool,
    clipboard_enabled: bool,
    shared: Mutex<Option<ShareRequest>>,
    clipboard: Mutex<Option<String>>,
    file: Mutex<Option<CsvFile>>,
}

impl HandoffPlatform {
    pub fn new(share_enabled: bool, clipboard_enabled: bool) -> Self {
        Self {
            share_enabled,
            clipboard_enabled,
            ..Default::default()
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.share_enabled, config.clipboard_enabled)
    }

    /// Share request handed off during this request, if any
    pub fn take_share(&self) -> Option<ShareRequest> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    /// Clipboard text handed off during this request, if any
    pub fn take_clipboard(&self) -> Option<String> {
        self.clipboard.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    /// File handed off during this request, if any
    pub fn take_file(&self) -> Option<CsvFile> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

fn store<T>(slot: &Mutex<Option<T>>, capability: Capability, value: T) -> Result<(), PlatformError> {
    let mut guard = slot
        .lock()
        .map_err(|e| PlatformError::OperationFailed(capability, e.to_string()))?;
    *guard = Some(value);
    Ok(())
}

#[async_trait]
impl SharePlatform for HandoffPlatform {
    async fn share(&self, request: &ShareRequest) -> Result<(), PlatformError> {
        if !self.share_enabled {
            return Err(PlatformError::Unsupported(Capability::Share));
        }
        debug!("Handing share payload to client");
        store(&self.shared, Capability::Share, request.clone())
    }
}

#[async_trait]
impl ClipboardPlatform for HandoffPlatform {
    async fn write_text(&self, text: &str) -> Result<(), PlatformError> {
        if !self.clipboard_enabled {
            return Err(PlatformError::Unsupported(Capability::Clipboard));
        }
        debug!("Handing clipboard text to client");
        store(&self.clipboard, Capability::Clipboard, text.to_string())
    }
}

impl FileDownloader for HandoffPlatform {
    fn download(&self, file: &CsvFile) -> Result<(), PlatformError> {
        debug!(filename = %file.filename, "Handing download to client");
        store(&self.file, Capability::Download, file.clone())
    }
}
