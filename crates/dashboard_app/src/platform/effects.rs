use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};

use dashboard_core::{ChannelId, Effect, FetchOutcome, HttpMethod, Msg, RequestId, UploadOutcome};
use dashboard_engine::{
    ApiError, ClientSettings, EngineError, EngineEvent, EngineHandle, EventSink, FailureKind,
    JsonRequest, Method,
};
use engine_logging::{engine_info, engine_warn};

use super::app::AppEvent;

type PendingFetches = Arc<Mutex<HashMap<RequestId, ChannelId>>>;

/// Executes core effects on the engine and feeds completions back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    pending: PendingFetches,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        let pending = PendingFetches::default();
        let sink = Arc::new(MsgSink {
            tx,
            pending: pending.clone(),
        });
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self { engine, pending })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchRecommendations {
                    channel,
                    request_id,
                    method,
                    endpoint,
                    payload,
                } => {
                    engine_info!(
                        "Fetch channel={} request_id={} {} {}",
                        channel,
                        request_id,
                        method,
                        endpoint
                    );
                    if let Ok(mut pending) = self.pending.lock() {
                        pending.insert(request_id, channel);
                    }
                    self.engine.fetch(
                        request_id,
                        JsonRequest {
                            method: map_method(method),
                            endpoint: endpoint.to_string(),
                            body: payload,
                        },
                    );
                }
                Effect::UploadFile { endpoint, path } => {
                    engine_info!("Upload path={:?} endpoint={}", path, endpoint);
                    self.engine.upload(endpoint, path);
                }
            }
        }
    }
}

struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
    pending: PendingFetches,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::FetchCompleted { request_id, result } => {
                let channel = self
                    .pending
                    .lock()
                    .ok()
                    .and_then(|mut pending| pending.remove(&request_id));
                let Some(channel) = channel else {
                    engine_warn!("Completion for unknown request_id={}", request_id);
                    return;
                };
                Msg::RecommendationsLoaded {
                    channel,
                    request_id,
                    outcome: map_fetch_result(result),
                }
            }
            EngineEvent::UploadCompleted { result } => Msg::UploadFinished {
                outcome: map_upload_result(result),
            },
        };
        let _ = self.tx.send(AppEvent::Msg(msg));
    }
}

fn map_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}

fn map_fetch_result(result: Result<Vec<String>, ApiError>) -> FetchOutcome {
    match result {
        Ok(recommendations) => FetchOutcome::Recommendations(recommendations),
        Err(err) => match err.kind {
            FailureKind::Rejected { error, .. } => FetchOutcome::Rejected { error },
            FailureKind::Network | FailureKind::Decode | FailureKind::FileRead => {
                FetchOutcome::Unreachable
            }
        },
    }
}

fn map_upload_result(result: Result<String, ApiError>) -> UploadOutcome {
    match result {
        Ok(message) => UploadOutcome::Accepted { message },
        Err(err) => match err.kind {
            FailureKind::Rejected { error, .. } => UploadOutcome::Rejected { error },
            FailureKind::FileRead => UploadOutcome::FileUnreadable,
            FailureKind::Network | FailureKind::Decode => UploadOutcome::Unreachable,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use dashboard_core::{update, AppState, ChannelStatus, UploadStatus, CONNECT_FAILURE};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    fn api_error(kind: FailureKind) -> ApiError {
        ApiError {
            kind,
            message: "boom".to_string(),
        }
    }

    /// Drives `update` with one message and hands effects to the runner.
    fn dispatch(state: AppState, runner: &EffectRunner, msg: Msg) -> AppState {
        let (state, effects) = update(state, msg);
        runner.enqueue(effects);
        state
    }

    fn next_msg(rx: &mpsc::Receiver<AppEvent>) -> Msg {
        match rx.recv_timeout(WAIT).expect("engine event") {
            AppEvent::Msg(msg) => msg,
            _ => panic!("expected a message"),
        }
    }

    fn runner_for(server: &MockServer) -> (EffectRunner, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::new(ClientSettings::new(&server.uri()).unwrap(), tx).unwrap();
        (runner, rx)
    }

    #[test]
    fn fetch_failures_map_to_outcomes() {
        assert_eq!(
            map_fetch_result(Ok(vec!["A".into()])),
            FetchOutcome::Recommendations(vec!["A".into()])
        );
        assert_eq!(
            map_fetch_result(Err(api_error(FailureKind::Rejected {
                status: 404,
                error: Some("not found".into()),
            }))),
            FetchOutcome::Rejected {
                error: Some("not found".into())
            }
        );
        assert_eq!(
            map_fetch_result(Err(api_error(FailureKind::Decode))),
            FetchOutcome::Unreachable
        );
        assert_eq!(
            map_fetch_result(Err(api_error(FailureKind::Network))),
            FetchOutcome::Unreachable
        );
    }

    #[test]
    fn upload_failures_map_to_outcomes() {
        assert_eq!(
            map_upload_result(Ok("done".into())),
            UploadOutcome::Accepted {
                message: "done".into()
            }
        );
        assert_eq!(
            map_upload_result(Err(api_error(FailureKind::Rejected {
                status: 400,
                error: None,
            }))),
            UploadOutcome::Rejected { error: None }
        );
        assert_eq!(
            map_upload_result(Err(api_error(FailureKind::FileRead))),
            UploadOutcome::FileUnreadable
        );
        assert_eq!(
            map_upload_result(Err(api_error(FailureKind::Network))),
            UploadOutcome::Unreachable
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn activation_makes_exactly_one_popular_call() {
        engine_logging::initialize_for_tests();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recommend/popular"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "recommendations": ["Staples", "Paper"] })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let (runner, rx) = runner_for(&server);
        let state = dispatch(AppState::new(), &runner, Msg::Activated);
        let state = dispatch(state, &runner, Msg::Activated);
        let state = dispatch(state, &runner, next_msg(&rx));

        assert_eq!(
            state.channel(ChannelId::Popular).status(),
            &ChannelStatus::Success(vec!["Staples".into(), "Paper".into()])
        );
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
        server.verify().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn successful_upload_refreshes_popular_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "Data loaded" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/recommend/popular"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "recommendations": ["New"] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "Product Name\nNew\n").unwrap();

        let (runner, rx) = runner_for(&server);
        let state = dispatch(
            AppState::new(),
            &runner,
            Msg::FileSelected(PathBuf::from(file.path())),
        );
        let state = dispatch(state, &runner, Msg::UploadSubmitted);
        let state = dispatch(state, &runner, next_msg(&rx));
        assert_eq!(
            state.upload().status(),
            &UploadStatus::Success("Data loaded".into())
        );
        assert!(state.channel(ChannelId::Popular).status().is_loading());

        let state = dispatch(state, &runner, next_msg(&rx));
        assert_eq!(
            state.channel(ChannelId::Popular).status().results(),
            ["New".to_string()]
        );
        server.verify().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn unreachable_backend_marks_only_the_requested_channel() {
        // Nothing listens on a port we just released.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::new(ClientSettings::new(&origin).unwrap(), tx).unwrap();
        let state = dispatch(AppState::new(), &runner, Msg::request_content("Widget"));
        let state = dispatch(state, &runner, next_msg(&rx));

        assert_eq!(
            state.channel(ChannelId::Content).status(),
            &ChannelStatus::Error(CONNECT_FAILURE.into())
        );
        for id in [ChannelId::Popular, ChannelId::Collaborative, ChannelId::Basket] {
            assert_eq!(state.channel(id).status(), &ChannelStatus::Idle);
        }
    }
}
