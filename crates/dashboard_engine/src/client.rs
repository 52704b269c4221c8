use std::path::Path;

use engine_logging::{engine_debug, engine_trace};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::{ApiError, FailureKind, JsonRequest, SettingsError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    base_url: String,
}

impl ClientSettings {
    /// Validates `base_url` as an http(s) origin. A trailing `/` is dropped so
    /// endpoint paths can be appended as-is.
    pub fn new(base_url: &str) -> Result<Self, SettingsError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|err| SettingsError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SettingsError::UnsupportedScheme {
                scheme: parsed.scheme().to_string(),
            });
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait::async_trait]
pub trait RecommendationApi: Send + Sync {
    /// Performs one recommendation call and returns the `recommendations` list.
    async fn fetch_recommendations(&self, request: &JsonRequest) -> Result<Vec<String>, ApiError>;

    /// Posts `path` as the multipart field `file` and returns the server message.
    async fn upload_file(&self, endpoint: &str, path: &Path) -> Result<String, ApiError>;
}

#[derive(Deserialize)]
struct RecommendationsBody {
    recommendations: Vec<String>,
}

#[derive(Deserialize)]
struct UploadBody {
    message: String,
}

/// [`RecommendationApi`] over a single shared `reqwest::Client`.
///
/// No retries and no timeouts beyond the transport defaults.
#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ClientSettings) -> Result<Self, SettingsError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| SettingsError::Client(err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl RecommendationApi for ReqwestApi {
    async fn fetch_recommendations(&self, request: &JsonRequest) -> Result<Vec<String>, ApiError> {
        let url = self.settings.url_for(&request.endpoint);
        engine_debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await.map_err(map_reqwest_error)?;

        let (status, body) = read_json(response).await?;
        if !status.is_success() {
            return Err(rejected(status, &body));
        }
        let parsed: RecommendationsBody = serde_json::from_value(body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        Ok(parsed.recommendations)
    }

    async fn upload_file(&self, endpoint: &str, path: &Path) -> Result<String, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            ApiError::new(FailureKind::FileRead, format!("{}: {}", path.display(), err))
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let url = self.settings.url_for(endpoint);
        engine_debug!("POST {} file={} bytes={}", url, file_name, bytes.len());

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let (status, body) = read_json(response).await?;
        if !status.is_success() {
            return Err(rejected(status, &body));
        }
        let parsed: UploadBody = serde_json::from_value(body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        Ok(parsed.message)
    }
}

/// Reads the whole body and parses it as JSON, whatever the status.
async fn read_json(response: reqwest::Response) -> Result<(StatusCode, Value), ApiError> {
    let status = response.status();
    let text = response.text().await.map_err(map_reqwest_error)?;
    engine_trace!("status={} body_len={}", status, text.len());
    let body = serde_json::from_str(&text).map_err(|err| {
        ApiError::new(
            FailureKind::Decode,
            format!("status {}: {}", status.as_u16(), err),
        )
    })?;
    Ok((status, body))
}

fn rejected(status: StatusCode, body: &Value) -> ApiError {
    let error = body
        .get("error")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned);
    let message = error.clone().unwrap_or_else(|| status.to_string());
    ApiError::new(
        FailureKind::Rejected {
            status: status.as_u16(),
            error,
        },
        message,
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
