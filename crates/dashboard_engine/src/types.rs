use std::fmt;

use reqwest::Method;
use serde_json::Value;

pub type RequestId = u64;

/// One JSON call against the backend. `endpoint` is appended verbatim to the
/// configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonRequest {
    pub method: Method,
    pub endpoint: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    FetchCompleted {
        request_id: RequestId,
        result: Result<Vec<String>, ApiError>,
    },
    UploadCompleted {
        result: Result<String, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// No response reached us.
    Network,
    /// A response arrived but its body was not the expected JSON.
    Decode,
    /// Non-2xx response. `error` is the body's non-empty `error` field.
    Rejected { status: u16, error: Option<String> },
    /// The file to upload could not be read.
    FileRead,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Rejected { status, .. } => write!(f, "http status {status}"),
            FailureKind::FileRead => write!(f, "file read error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid base url {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("unsupported scheme {scheme:?} in base url, expected http or https")]
    UnsupportedScheme { scheme: String },
    #[error("failed to build http client: {0}")]
    Client(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
