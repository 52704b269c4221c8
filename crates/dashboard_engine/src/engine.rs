use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_debug, engine_warn};
use tokio::task::JoinHandle;

use crate::{
    ClientSettings, EngineError, EngineEvent, JsonRequest, RecommendationApi, RequestId,
    ReqwestApi,
};

/// Receiver side of engine completions.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Fetch {
        request_id: RequestId,
        request: JsonRequest,
    },
    Upload {
        endpoint: String,
        path: PathBuf,
    },
}

/// Runs API calls on a background tokio runtime. Every command is spawned as
/// its own task, so calls for different channels overlap freely. Calls are
/// never cancelled: dropping the handle stops new commands, and the runtime
/// thread finishes the calls already in flight before it exits.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let api = ReqwestApi::new(settings)?;
        Self::with_api(Arc::new(api), sink)
    }

    pub fn with_api(
        api: Arc<dyn RecommendationApi>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new().map_err(EngineError::Runtime)?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut in_flight: Vec<JoinHandle<()>> = Vec::new();
            while let Ok(command) = cmd_rx.recv() {
                in_flight.retain(|task| !task.is_finished());
                let api = api.clone();
                let sink = sink.clone();
                in_flight.push(runtime.spawn(async move {
                    handle_command(api.as_ref(), command, sink.as_ref()).await;
                }));
            }
            engine_debug!("Engine handle dropped, draining {} calls", in_flight.len());
            runtime.block_on(async {
                for task in in_flight {
                    let _ = task.await;
                }
            });
        });

        Ok(Self { cmd_tx })
    }

    pub fn fetch(&self, request_id: RequestId, request: JsonRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch {
            request_id,
            request,
        });
    }

    pub fn upload(&self, endpoint: impl Into<String>, path: impl Into<PathBuf>) {
        let _ = self.cmd_tx.send(EngineCommand::Upload {
            endpoint: endpoint.into(),
            path: path.into(),
        });
    }
}

async fn handle_command(api: &dyn RecommendationApi, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Fetch {
            request_id,
            request,
        } => {
            let result = api.fetch_recommendations(&request).await;
            if let Err(err) = &result {
                engine_warn!(
                    "Request {} to {} failed: {}",
                    request_id,
                    request.endpoint,
                    err
                );
            }
            sink.emit(EngineEvent::FetchCompleted { request_id, result });
        }
        EngineCommand::Upload { endpoint, path } => {
            let result = api.upload_file(&endpoint, &path).await;
            if let Err(err) = &result {
                engine_warn!("Upload of {:?} failed: {}", path, err);
            }
            sink.emit(EngineEvent::UploadCompleted { result });
        }
    }
}
