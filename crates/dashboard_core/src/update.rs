use crate::{AppState, ChannelId, Effect, Msg, UploadStatus, UPLOAD_ENDPOINT};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Activated => {
            if state.is_activated() {
                return (state, Vec::new());
            }
            state.mark_activated();
            vec![state.issue_request(ChannelId::Popular, "")]
        }
        Msg::RecommendationsRequested { channel, input } => {
            vec![state.issue_request(channel, &input)]
        }
        Msg::FileSelected(path) => {
            state.select_file(path);
            Vec::new()
        }
        Msg::UploadSubmitted => {
            if state.upload().is_uploading() {
                return (state, Vec::new());
            }
            match state.begin_upload() {
                Some(path) => vec![Effect::UploadFile {
                    endpoint: UPLOAD_ENDPOINT,
                    path,
                }],
                None => Vec::new(),
            }
        }
        Msg::RecommendationsLoaded {
            channel,
            request_id,
            outcome,
        } => {
            state.settle_request(channel, request_id, outcome.into_status());
            Vec::new()
        }
        Msg::UploadFinished { outcome } => {
            if !state.upload().is_uploading() {
                return (state, Vec::new());
            }
            let status = outcome.into_status();
            let accepted = matches!(status, UploadStatus::Success(_));
            state.finish_upload(status);
            if accepted {
                // New dataset on the backend: refresh the popular list now.
                vec![state.issue_request(ChannelId::Popular, "")]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}
