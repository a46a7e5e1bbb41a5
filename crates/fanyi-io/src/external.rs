use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, Uri};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const GET_ONLY_MESSAGE: &str =
    "Please use GET like `curl 127.0.0.1:50020/translate -d 'helloworld'`";

/// What an external caller asks for, taken from the request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalCallAction {
    Translate,
    /// Translate even if the same text was translated before
    TranslateForce,
    /// Only place the text as input, do not translate
    TranslateInput,
}

impl ExternalCallAction {
    /// Unknown or empty paths fall back to `Translate`
    pub fn from_path(path: &str) -> Self {
        match path.trim_start_matches('/') {
            "translate_force" => ExternalCallAction::TranslateForce,
            "translate_input" => ExternalCallAction::TranslateInput,
            _ => ExternalCallAction::Translate,
        }
    }
}

/// Receives the action and the raw request body
pub type CallHandler = Arc<dyn Fn(ExternalCallAction, String) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallResponse {
    pub code: u16,
    pub data: String,
}

impl CallResponse {
    fn succeed() -> Self {
        Self {
            code: 200,
            data: "Call Succeed".to_string(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            code: 500,
            data: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

struct RunningListener {
    addr: SocketAddr,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Loopback HTTP endpoint that forwards `GET /<action>` bodies to a handler
#[derive(Default)]
pub struct ExternalCallService {
    running: Option<RunningListener>,
}

impl ExternalCallService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start listening on `addr`.
    ///
    /// Starting an already running service is a no-op unless `stop_first` is
    /// set, in which case the old listener is shut down and a new one bound.
    pub async fn start(
        &mut self,
        addr: &str,
        stop_first: bool,
        handler: CallHandler,
    ) -> Result<SocketAddr, ListenerError> {
        if stop_first {
            self.stop().await;
        }

        if let Some(running) = &self.running {
            return Ok(running.addr);
        }

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ListenerError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| ListenerError::Bind {
            addr: addr.to_string(),
            source,
        })?;

        let app = Router::new().fallback(handle_call).with_state(handler);

        let cancel = CancellationToken::new();
        let shutdown = cancel.clone();
        let task = tokio::spawn(async move {
            let server = axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.cancelled().await });
            if let Err(e) = server.await {
                tracing::error!("[EXTERNAL_CALL] Listener exited: {}", e);
            }
        });

        tracing::info!("[EXTERNAL_CALL] Listening on http://{}/", local_addr);

        self.running = Some(RunningListener {
            addr: local_addr,
            cancel,
            task,
        });

        Ok(local_addr)
    }

    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        running.cancel.cancel();
        if let Err(e) = running.task.await {
            tracing::warn!("[EXTERNAL_CALL] Listener task failed: {}", e);
        }
        tracing::info!("[EXTERNAL_CALL] Stopped listener on {}", running.addr);
    }

    pub fn is_started(&self) -> bool {
        self.running.is_some()
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|r| r.addr)
    }
}

async fn handle_call(
    State(handler): State<CallHandler>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Json<CallResponse> {
    if method != Method::GET {
        tracing::error!("[EXTERNAL_CALL] Rejected {} {}", method, uri.path());
        return Json(CallResponse::failed(GET_ONLY_MESSAGE));
    }

    let action = ExternalCallAction::from_path(uri.path());
    let content = String::from_utf8_lossy(&body).into_owned();
    tracing::debug!(
        "[EXTERNAL_CALL] {:?} with {} chars",
        action,
        content.chars().count()
    );

    handler(action, content);

    Json(CallResponse::succeed())
}
