use std::path::PathBuf;

use serde_json::Value;

use crate::{ChannelId, HttpMethod, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchRecommendations {
        channel: ChannelId,
        request_id: RequestId,
        method: HttpMethod,
        endpoint: &'static str,
        payload: Option<Value>,
    },
    UploadFile {
        endpoint: &'static str,
        path: PathBuf,
    },
}
