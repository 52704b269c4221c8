//! Dashboard core: pure state machine for the recommendation channels and the
//! dataset upload workflow, plus view-model helpers.
mod basket;
mod channel;
mod effect;
mod msg;
mod outcome;
mod state;
mod update;
mod upload;
mod view_model;

pub use basket::parse_basket_items;
pub use channel::{Channel, ChannelId, ChannelSpec, ChannelStatus, HttpMethod};
pub use effect::Effect;
pub use msg::Msg;
pub use outcome::{
    FetchOutcome, UploadOutcome, CONNECT_FAILURE, FILE_UNREADABLE, NO_FILE_SELECTED,
    UNKNOWN_ERROR, UPLOAD_CONNECT_FAILURE, UPLOAD_UNKNOWN_ERROR,
};
pub use state::{AppState, RequestId};
pub use update::update;
pub use upload::{UploadState, UploadStatus, UPLOAD_ENDPOINT};
pub use view_model::{ChannelCardView, DashboardViewModel, UploadView};
