use std::path::{Path, PathBuf};

/// Route that accepts dataset uploads as multipart form data.
pub const UPLOAD_ENDPOINT: &str = "/upload";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    /// Server confirmation message.
    Success(String),
    Error(String),
}

impl UploadStatus {
    pub fn message(&self) -> Option<&str> {
        match self {
            UploadStatus::Success(message) => Some(message),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UploadStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadState {
    selected_file: Option<PathBuf>,
    status: UploadStatus,
}

impl UploadState {
    pub fn selected_file(&self) -> Option<&Path> {
        self.selected_file.as_deref()
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.status, UploadStatus::Uploading)
    }

    /// Replaces the selection and clears the previous message or error.
    /// An upload already in flight keeps its `Uploading` status.
    pub(crate) fn select_file(&mut self, path: PathBuf) {
        self.selected_file = Some(path);
        if !self.is_uploading() {
            self.status = UploadStatus::Idle;
        }
    }

    pub(crate) fn begin(&mut self) {
        self.status = UploadStatus::Uploading;
    }

    pub(crate) fn finish(&mut self, status: UploadStatus) {
        self.status = status;
    }
}
