//! Dashboard engine: HTTP calls to the recommendation backend and effect execution.
mod client;
mod engine;
mod types;

pub use client::{ClientSettings, RecommendationApi, ReqwestApi};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use reqwest::Method;
pub use types::{
    ApiError, EngineError, EngineEvent, FailureKind, JsonRequest, RequestId,
    SettingsError,
};
