// Testing utilities and mock implementations for the domain layer
// This module is only available in tests or when the "mock" feature is enabled

use std::sync::Mutex;

use async_trait::async_trait;

use crate::export::{
    Capability, ClipboardPlatform, CsvFile, FileDownloader, PlatformError, SharePlatform,
    ShareRequest,
};

/// How a mock platform facility responds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockBehavior {
    #[default]
    Succeed,
    Unsupported,
    Fail,
}

impl MockBehavior {
    fn outcome(&self, capability: Capability) -> Result<(), PlatformError> {
        match self {
            MockBehavior::Succeed => Ok(()),
            MockBehavior::Unsupported => Err(PlatformError::Unsupported(capability)),
            MockBehavior::Fail => Err(PlatformError::OperationFailed(
                capability,
                "mock is configured to fail".to_string(),
            )),
        }
    }
}

/// Mock share facility that records every request it receives
#[derive(Debug, Default)]
pub struct MockSharePlatform {
    behavior: MockBehavior,
    requests: Mutex<Vec<ShareRequest>>,
}

impl MockSharePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to report share as unsupported
    pub fn with_unsupported(mut self) -> Self {
        self.behavior = MockBehavior::Unsupported;
        self
    }

    /// Configure the mock to fail (e.g. the user cancelled the share sheet)
    pub fn with_failure(mut self) -> Self {
        self.behavior = MockBehavior::Fail;
        self
    }

    /// Requests received so far, including ones that failed
    pub fn requests(&self) -> Vec<ShareRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SharePlatform for MockSharePlatform {
    async fn share(&self, request: &ShareRequest) -> Result<(), PlatformError> {
        if self.behavior != MockBehavior::Unsupported {
            self.requests.lock().unwrap().push(request.clone());
        }
        self.behavior.outcome(Capability::Share)
    }
}

/// Mock clipboard holding the last text written to it
#[derive(Debug, Default)]
pub struct MockClipboardPlatform {
    behavior: MockBehavior,
    contents: Mutex<Option<String>>,
}

impl MockClipboardPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to report the clipboard as unsupported
    pub fn with_unsupported(mut self) -> Self {
        self.behavior = MockBehavior::Unsupported;
        self
    }

    /// Configure the mock to fail clipboard writes
    pub fn with_failure(mut self) -> Self {
        self.behavior = MockBehavior::Fail;
        self
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClipboardPlatform for MockClipboardPlatform {
    async fn write_text(&self, text: &str) -> Result<(), PlatformError> {
        if self.behavior == MockBehavior::Succeed {
            *self.contents.lock().unwrap() = Some(text.to_string());
        }
        self.behavior.outcome(Capability::Clipboard)
    }
}

/// Mock downloader that keeps every file it is given
#[derive(Debug, Default)]
pub struct MockFileDownloader {
    behavior: MockBehavior,
    files: Mutex<Vec<CsvFile>>,
}

impl MockFileDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to fail downloads
    pub fn with_failure(mut self) -> Self {
        self.behavior = MockBehavior::Fail;
        self
    }

    pub fn files(&self) -> Vec<CsvFile> {
        self.files.lock().unwrap().clone()
    }
}

impl FileDownloader for MockFileDownloader {
    fn download(&self, file: &CsvFile) -> Result<(), PlatformError> {
        if self.behavior == MockBehavior::Succeed {
            self.files.lock().unwrap().push(file.clone());
        }
        self.behavior.outcome(Capability::Download)
    }
}
