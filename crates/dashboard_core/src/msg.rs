use std::path::PathBuf;

use crate::{ChannelId, FetchOutcome, RequestId, UploadOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The dashboard became active. Only the first activation fetches.
    Activated,
    /// User asked a channel for recommendations. `input` is the raw text the
    /// channel's payload builder consumes (ignored by `popular`).
    RecommendationsRequested { channel: ChannelId, input: String },
    /// User picked a dataset file.
    FileSelected(PathBuf),
    /// User asked to upload the selected file.
    UploadSubmitted,
    /// Engine completion for a recommendation request.
    RecommendationsLoaded {
        channel: ChannelId,
        request_id: RequestId,
        outcome: FetchOutcome,
    },
    /// Engine completion for the upload in flight.
    UploadFinished { outcome: UploadOutcome },
}

impl Msg {
    pub fn request_popular() -> Self {
        Msg::RecommendationsRequested {
            channel: ChannelId::Popular,
            input: String::new(),
        }
    }

    /// The product name is sent verbatim.
    pub fn request_content(product_name: impl Into<String>) -> Self {
        Msg::RecommendationsRequested {
            channel: ChannelId::Content,
            input: product_name.into(),
        }
    }

    /// The customer id is sent verbatim.
    pub fn request_collaborative(customer_id: impl Into<String>) -> Self {
        Msg::RecommendationsRequested {
            channel: ChannelId::Collaborative,
            input: customer_id.into(),
        }
    }

    /// Comma-separated basket text; parsed by [`crate::parse_basket_items`].
    pub fn request_basket(raw_items: impl Into<String>) -> Self {
        Msg::RecommendationsRequested {
            channel: ChannelId::Basket,
            input: raw_items.into(),
        }
    }
}
