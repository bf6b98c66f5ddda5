//! HTTP boundary for the tracking simulator
//!
//! Serves the lookup endpoint over plain HTTP and, for consumers that want
//! per-stage progress, over a WebSocket that streams progress frames
//! followed by the final result envelope.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Json, Response},
    routing::get,
    Router,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};

use crate::tracking::{
    self, SearchProgress, TrackingRequest, TrackingResponse, FAILURE_PROBABILITY, PROGRESS_STAGES,
};

/// Server state shared across requests.
#[derive(Clone)]
pub struct ServerState {
    /// Chance that a finished lookup reports failure. Kept in state so the
    /// boundary can be driven deterministically in tests.
    pub failure_probability: f64,
}

impl Default for ServerState {
    fn default() -> Self {
        Self {
            failure_probability: FAILURE_PROBABILITY,
        }
    }
}

/// Tracking server handle for managing the server lifecycle.
pub struct TrackingServer {
    /// Port the server is listening on.
    pub port: u16,
    /// Shutdown signal sender.
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TrackingServer {
    /// Get the base URL for this server.
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Stop the server gracefully.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Error reported when the boundary itself breaks mid-run
pub const INTERNAL_ERROR: &str = "Erro interno do servidor. Tente novamente.";

/// Frame sent over the live lookup socket.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum LiveFrame<'a> {
    Progress(&'a SearchProgress),
    Result(&'a TrackingResponse),
}

/// Handle a one-shot lookup request.
///
/// The envelope always comes back as JSON; the status is 200 for a
/// successful lookup and 400 for any rejected or failed one.
async fn track_handler(
    State(state): State<ServerState>,
    Json(request): Json<TrackingRequest>,
) -> (StatusCode, Json<TrackingResponse>) {
    let response = tracking::track_with(
        &request.phone_number,
        request.country_code.as_deref(),
        |_: &SearchProgress| {},
        None,
        state.failure_probability,
    )
    .await;

    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(response))
}

/// Describe the lookup endpoint.
async fn describe_handler() -> Json<serde_json::Value> {
    Json(json!({
        "message": "WhatsApp Tracker API - Use POST method to track a phone number",
        "endpoints": {
            "track": {
                "method": "POST",
                "url": "/track",
                "body": {
                    "phoneNumber": "string (required)",
                    "countryCode": "string (optional, default: +55)"
                }
            },
            "trackLive": {
                "method": "GET (WebSocket)",
                "url": "/track/live",
                "body": "one request frame, answered by progress frames and a result frame"
            }
        },
        "disclaimer": "This is a educational simulator that generates fake data only."
    }))
}

/// Upgrade to the live lookup socket.
async fn track_live_handler(State(state): State<ServerState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_live_socket(socket, state))
}

async fn send_frame(
    sink: &mut SplitSink<WebSocket, Message>,
    frame: &LiveFrame<'_>,
) -> Result<(), axum::Error> {
    let text = serde_json::to_string(frame).expect("live frames serialize to JSON");
    sink.send(Message::Text(text.into())).await
}

/// Drive one lookup over a WebSocket.
///
/// The client sends a single `TrackingRequest` text frame. Each stage is
/// streamed back as a progress frame, then the result envelope follows and
/// the socket closes. A client-side close cancels the run.
async fn handle_live_socket(socket: WebSocket, state: ServerState) {
    let (mut sink, mut stream) = socket.split();

    let request = loop {
        match stream.next().await {
            Some(Ok(Message::Text(text))) => match serde_json::from_str::<TrackingRequest>(&text) {
                Ok(request) => break request,
                Err(err) => {
                    log::warn!("live lookup: malformed request frame: {err}");
                    let _ = sink.close().await;
                    return;
                }
            },
            Some(Ok(Message::Close(_))) | None => return,
            Some(Ok(_)) => {}
            Some(Err(err)) => {
                log::warn!("live lookup: socket error before the request: {err}");
                return;
            }
        }
    };

    let cancel = CancellationToken::new();
    let (progress_tx, mut progress_rx) = mpsc::channel::<SearchProgress>(PROGRESS_STAGES.len());

    let run = {
        let cancel = cancel.clone();
        let failure_probability = state.failure_probability;
        tokio::spawn(async move {
            tracking::track_with(
                &request.phone_number,
                request.country_code.as_deref(),
                move |progress: &SearchProgress| {
                    let _ = progress_tx.try_send(progress.clone());
                },
                Some(&cancel),
                failure_probability,
            )
            .await
        })
    };

    let response = loop {
        tokio::select! {
            maybe_progress = progress_rx.recv() => match maybe_progress {
                Some(progress) => {
                    if send_frame(&mut sink, &LiveFrame::Progress(&progress)).await.is_err() {
                        log::info!("live lookup: send failed, cancelling the run");
                        cancel.cancel();
                        let _ = run.await;
                        return;
                    }
                }
                // The only sender lives in the run's progress callback, so a
                // closed channel means the run has finished
                None => match run.await {
                    Ok(response) => break response,
                    Err(err) => {
                        log::error!("live lookup task failed: {err}");
                        break TrackingResponse::failure(INTERNAL_ERROR, 0);
                    }
                },
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => {
                    log::info!("live lookup: socket closed by the client");
                    cancel.cancel();
                    let _ = run.await;
                    return;
                }
                Some(Err(err)) => {
                    log::warn!("live lookup: socket error: {err}");
                    cancel.cancel();
                    let _ = run.await;
                    return;
                }
                Some(Ok(_)) => {}
            },
        }
    };

    let _ = send_frame(&mut sink, &LiveFrame::Result(&response)).await;
    let _ = sink.close().await;
}

/// Build the application router.
pub fn router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/track", axum::routing::post(track_handler).get(describe_handler))
        .route("/track/live", get(track_live_handler))
        .layer(cors)
        .with_state(state)
}

/// Start the tracking server.
///
/// Returns a TrackingServer handle that can be used to get the port and
/// stop the server. Binding to port 0 picks a free port.
pub async fn start_server(addr: &str, state: ServerState) -> std::io::Result<TrackingServer> {
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let port = local_addr.port();

    log::info!("Tracking server started on http://{local_addr}");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                log::info!("Tracking server shutting down");
            })
            .await
            .ok();
    });

    Ok(TrackingServer {
        port,
        shutdown_tx: Some(shutdown_tx),
    })
}
