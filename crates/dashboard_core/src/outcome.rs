use crate::{ChannelStatus, UploadStatus};

pub const CONNECT_FAILURE: &str = "Failed to connect to the API. Is the backend running?";
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";
pub const NO_FILE_SELECTED: &str = "Please select a file to upload.";
pub const UPLOAD_CONNECT_FAILURE: &str =
    "Failed to connect to the API for upload. Is the backend running?";
pub const UPLOAD_UNKNOWN_ERROR: &str = "An unknown error occurred during upload.";
pub const FILE_UNREADABLE: &str = "Could not read the selected file.";

/// Classified result of one recommendation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 2xx with a `recommendations` list.
    Recommendations(Vec<String>),
    /// Non-2xx response; `error` is the server-supplied text, if any.
    Rejected { error: Option<String> },
    /// No usable response: connection failure or unparsable body.
    Unreachable,
}

impl FetchOutcome {
    pub(crate) fn into_status(self) -> ChannelStatus {
        match self {
            FetchOutcome::Recommendations(results) => ChannelStatus::Success(results),
            FetchOutcome::Rejected { error } => {
                ChannelStatus::Error(error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()))
            }
            FetchOutcome::Unreachable => ChannelStatus::Error(CONNECT_FAILURE.to_string()),
        }
    }
}

/// Classified result of a dataset upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Accepted { message: String },
    Rejected { error: Option<String> },
    Unreachable,
    /// The selected file could not be read; nothing was sent.
    FileUnreadable,
}

impl UploadOutcome {
    pub(crate) fn into_status(self) -> UploadStatus {
        match self {
            UploadOutcome::Accepted { message } => UploadStatus::Success(message),
            UploadOutcome::Rejected { error } => {
                UploadStatus::Error(error.unwrap_or_else(|| UPLOAD_UNKNOWN_ERROR.to_string()))
            }
            UploadOutcome::Unreachable => UploadStatus::Error(UPLOAD_CONNECT_FAILURE.to_string()),
            UploadOutcome::FileUnreadable => UploadStatus::Error(FILE_UNREADABLE.to_string()),
        }
    }
}
