use std::path::PathBuf;

use crate::{ChannelId, ChannelStatus, UploadStatus};

/// Read-only snapshot handed to the view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardViewModel {
    /// One card per channel, in [`ChannelId::ALL`] order.
    pub cards: Vec<ChannelCardView>,
    pub upload: UploadView,
    pub activated: bool,
    pub dirty: bool,
}

impl DashboardViewModel {
    pub fn card(&self, channel: ChannelId) -> Option<&ChannelCardView> {
        self.cards.iter().find(|card| card.channel == channel)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCardView {
    pub channel: ChannelId,
    pub title: &'static str,
    pub status: ChannelStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadView {
    pub selected_file: Option<PathBuf>,
    pub status: UploadStatus,
    /// Submit is disabled while true.
    pub busy: bool,
}
