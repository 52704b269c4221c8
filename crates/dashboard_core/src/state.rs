use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::view_model::{ChannelCardView, DashboardViewModel, UploadView};
use crate::{Channel, ChannelId, ChannelStatus, Effect, UploadState, UploadStatus};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    channels: BTreeMap<ChannelId, Channel>,
    upload: UploadState,
    activated: bool,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            channels: ChannelId::ALL
                .into_iter()
                .map(|id| (id, Channel::new(id)))
                .collect(),
            upload: UploadState::default(),
            activated: false,
            next_request_id: 1,
            dirty: false,
        }
    }

    pub fn view(&self) -> DashboardViewModel {
        let cards = self
            .channels
            .values()
            .map(|channel| ChannelCardView {
                channel: channel.id(),
                title: channel.spec().title,
                status: channel.status().clone(),
            })
            .collect();

        DashboardViewModel {
            cards,
            upload: UploadView {
                selected_file: self.upload.selected_file().map(PathBuf::from),
                status: self.upload.status().clone(),
                busy: self.upload.is_uploading(),
            },
            activated: self.activated,
            dirty: self.dirty,
        }
    }

    pub fn channel(&self, id: ChannelId) -> &Channel {
        // Every id is inserted in `new` and never removed.
        &self.channels[&id]
    }

    pub fn upload(&self) -> &UploadState {
        &self.upload
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mark_activated(&mut self) {
        self.activated = true;
    }

    /// Puts the channel into `Loading` and describes the call to make.
    pub(crate) fn issue_request(&mut self, id: ChannelId, input: &str) -> Effect {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let spec = id.spec();
        if let Some(channel) = self.channels.get_mut(&id) {
            channel.begin(request_id);
        }
        self.mark_dirty();

        Effect::FetchRecommendations {
            channel: id,
            request_id,
            method: spec.method,
            endpoint: spec.endpoint,
            payload: spec.payload(input),
        }
    }

    /// Returns false when the completion is stale and nothing changed.
    pub(crate) fn settle_request(
        &mut self,
        id: ChannelId,
        request_id: RequestId,
        status: ChannelStatus,
    ) -> bool {
        let applied = self
            .channels
            .get_mut(&id)
            .is_some_and(|channel| channel.settle(request_id, status));
        if applied {
            self.mark_dirty();
        }
        applied
    }

    pub(crate) fn select_file(&mut self, path: PathBuf) {
        self.upload.select_file(path);
        self.mark_dirty();
    }

    /// Starts the upload of the selected file, or records the validation
    /// error when nothing is selected.
    pub(crate) fn begin_upload(&mut self) -> Option<PathBuf> {
        self.mark_dirty();
        match self.upload.selected_file().map(PathBuf::from) {
            Some(path) => {
                self.upload.begin();
                Some(path)
            }
            None => {
                self.upload
                    .finish(UploadStatus::Error(crate::NO_FILE_SELECTED.to_string()));
                None
            }
        }
    }

    pub(crate) fn finish_upload(&mut self, status: UploadStatus) {
        self.upload.finish(status);
        self.mark_dirty();
    }
}
