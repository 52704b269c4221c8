use std::fmt;

use serde_json::{json, Value};

use crate::{parse_basket_items, RequestId};

/// Identity of a recommendation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChannelId {
    Popular,
    Content,
    Collaborative,
    Basket,
}

impl ChannelId {
    /// All channels in display order.
    pub const ALL: [ChannelId; 4] = [
        ChannelId::Popular,
        ChannelId::Content,
        ChannelId::Collaborative,
        ChannelId::Basket,
    ];

    pub fn spec(self) -> &'static ChannelSpec {
        match self {
            ChannelId::Popular => &POPULAR,
            ChannelId::Content => &CONTENT,
            ChannelId::Collaborative => &COLLABORATIVE,
            ChannelId::Basket => &BASKET,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChannelId::Popular => "popular",
            ChannelId::Content => "content",
            ChannelId::Collaborative => "collaborative",
            ChannelId::Basket => "basket",
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// Fixed routing data of a channel. The payload builder maps the raw user
/// input for the channel to the JSON request body.
pub struct ChannelSpec {
    pub id: ChannelId,
    pub title: &'static str,
    pub endpoint: &'static str,
    pub method: HttpMethod,
    build_payload: fn(&str) -> Option<Value>,
}

impl ChannelSpec {
    pub fn payload(&self, input: &str) -> Option<Value> {
        (self.build_payload)(input)
    }
}

impl fmt::Debug for ChannelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelSpec")
            .field("id", &self.id)
            .field("endpoint", &self.endpoint)
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

static POPULAR: ChannelSpec = ChannelSpec {
    id: ChannelId::Popular,
    title: "Most Popular Products",
    endpoint: "/recommend/popular",
    method: HttpMethod::Get,
    build_payload: |_| None,
};

static CONTENT: ChannelSpec = ChannelSpec {
    id: ChannelId::Content,
    title: "Content-Based Recommendations",
    endpoint: "/recommend/content",
    method: HttpMethod::Post,
    build_payload: |product_name| Some(json!({ "product_name": product_name })),
};

static COLLABORATIVE: ChannelSpec = ChannelSpec {
    id: ChannelId::Collaborative,
    title: "Collaborative Filtering Recommendations",
    endpoint: "/recommend/collaborative",
    method: HttpMethod::Post,
    build_payload: |customer_id| Some(json!({ "customer_id": customer_id })),
};

static BASKET: ChannelSpec = ChannelSpec {
    id: ChannelId::Basket,
    title: "Market Basket Recommendations",
    endpoint: "/recommend/basket",
    method: HttpMethod::Post,
    build_payload: |raw_items| Some(json!({ "items": parse_basket_items(raw_items) })),
};

/// Lifecycle of a channel. Results and error text live in distinct variants,
/// so a channel never shows both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChannelStatus {
    #[default]
    Idle,
    Loading,
    Success(Vec<String>),
    Error(String),
}

impl ChannelStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, ChannelStatus::Loading)
    }

    /// Results of the last successful call; empty in every other state.
    pub fn results(&self) -> &[String] {
        match self {
            ChannelStatus::Success(results) => results,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ChannelStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    id: ChannelId,
    status: ChannelStatus,
    /// Id of the newest request issued for this channel that has not settled.
    pending: Option<RequestId>,
}

impl Channel {
    pub(crate) fn new(id: ChannelId) -> Self {
        Self {
            id,
            status: ChannelStatus::Idle,
            pending: None,
        }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn spec(&self) -> &'static ChannelSpec {
        self.id.spec()
    }

    pub fn status(&self) -> &ChannelStatus {
        &self.status
    }

    /// True when a completion carrying `request_id` would be applied.
    pub fn is_awaiting(&self, request_id: RequestId) -> bool {
        self.pending == Some(request_id)
    }

    pub(crate) fn begin(&mut self, request_id: RequestId) {
        self.status = ChannelStatus::Loading;
        self.pending = Some(request_id);
    }

    /// Applies a settled status if `request_id` is the newest one issued.
    /// Returns false when the completion is stale and was discarded.
    pub(crate) fn settle(&mut self, request_id: RequestId, status: ChannelStatus) -> bool {
        if !self.is_awaiting(request_id) {
            return false;
        }
        self.status = status;
        self.pending = None;
        true
    }
}
