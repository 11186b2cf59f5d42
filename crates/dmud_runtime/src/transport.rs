//! WebSocket transport: one tokio task per connection attempt.
//!
//! Every event the task reports is tagged with its [AttemptId], so the
//! connection manager can ignore a superseded attempt.

use dmud_core::{AttemptId, Payload};
use dmud_observability::{connection_span, record_error};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use url::Url;

/// Lifecycle of one attempt, as reported by its task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The URL could not be used to construct a connection.
    ConnectFailed(String),
    Opened,
    Message(Payload),
    Error(String),
    /// Always the last event. `clean` means a close frame was exchanged.
    Closed { clean: bool },
    /// A text frame could not be written; carries the command back.
    SendFailed(String),
}

#[derive(Debug)]
enum Outbound {
    Text(String),
    Close { code: u16, reason: String },
}

/// Handle to a running attempt. Dropping the handle detaches the task; a
/// queued close still runs to completion.
#[derive(Debug)]
pub struct Transport {
    attempt: AttemptId,
    outbound: mpsc::UnboundedSender<Outbound>,
    task: JoinHandle<()>,
}

impl Transport {
    pub fn spawn(
        attempt: AttemptId,
        url: String,
        events: mpsc::Sender<(AttemptId, TransportEvent)>,
    ) -> Self {
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let span = connection_span!(attempt.0, url);
        let task = tokio::spawn(run(attempt, url, outbound_rx, events).instrument(span));
        Self {
            attempt,
            outbound,
            task,
        }
    }

    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    /// Queue one text frame. Hands the text back when the task has ended.
    pub fn send(&self, text: String) -> std::result::Result<(), String> {
        self.outbound.send(Outbound::Text(text)).map_err(|e| match e.0 {
            Outbound::Text(text) => text,
            Outbound::Close { .. } => String::new(),
        })
    }

    /// Start the closing handshake.
    pub fn close(&self, code: u16, reason: impl Into<String>) {
        let _ = self.outbound.send(Outbound::Close {
            code,
            reason: reason.into(),
        });
    }

    pub fn abort(&self) {
        self.task.abort();
    }
}

/// Only `ws` and `wss` URLs can be opened.
pub fn validate_url(url: &str) -> std::result::Result<Url, String> {
    let parsed = Url::parse(url).map_err(|e| e.to_string())?;
    match parsed.scheme() {
        "ws" | "wss" => Ok(parsed),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

fn closed(clean: bool) -> TransportEvent {
    tracing::Span::current().record("connection.clean", clean);
    TransportEvent::Closed { clean }
}

async fn run(
    attempt: AttemptId,
    url: String,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
    events: mpsc::Sender<(AttemptId, TransportEvent)>,
) {
    let emit = |event: TransportEvent| {
        let events = events.clone();
        async move {
            let _ = events.send((attempt, event)).await;
        }
    };

    let url = match validate_url(&url) {
        Ok(url) => url,
        Err(reason) => {
            tracing::warn!(%attempt, %url, %reason, "cannot create websocket");
            emit(TransportEvent::ConnectFailed(reason)).await;
            return;
        }
    };

    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(err) => {
            record_error(&err);
            emit(TransportEvent::Error(err.to_string())).await;
            for text in take_unsent(&mut outbound) {
                emit(TransportEvent::SendFailed(text)).await;
            }
            emit(closed(false)).await;
            return;
        }
    };
    emit(TransportEvent::Opened).await;

    let (mut writer, mut reader) = stream.split();
    let mut closing = false;

    let clean = loop {
        tokio::select! {
            incoming = reader.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    emit(TransportEvent::Message(Payload::Text(text))).await;
                }
                Some(Ok(Message::Binary(bytes))) => {
                    emit(TransportEvent::Message(Payload::Binary(bytes))).await;
                }
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(%attempt, ?frame, "close frame received");
                    break true;
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    emit(TransportEvent::Error(err.to_string())).await;
                    break false;
                }
                None => {
                    if !closing {
                        emit(TransportEvent::Error("connection reset".to_string())).await;
                    }
                    break closing;
                }
            },
            request = outbound.recv(), if !closing => match request {
                Some(Outbound::Text(text)) => {
                    if let Err(err) = writer.send(Message::Text(text.clone())).await {
                        tracing::warn!(%attempt, error = %err, "send failed");
                        emit(TransportEvent::SendFailed(text)).await;
                        emit(TransportEvent::Error(err.to_string())).await;
                        break false;
                    }
                }
                Some(Outbound::Close { code, reason }) => {
                    closing = true;
                    let frame = CloseFrame {
                        code: CloseCode::from(code),
                        reason: reason.into(),
                    };
                    if let Err(err) = writer.send(Message::Close(Some(frame))).await {
                        tracing::debug!(%attempt, error = %err, "close frame not sent");
                        break false;
                    }
                }
                None => {
                    let _ = writer.send(Message::Close(None)).await;
                    return;
                }
            },
        }
    };

    let unsent = take_unsent(&mut outbound);
    if !unsent.is_empty() {
        tracing::debug!(%attempt, count = unsent.len(), "returning unsent commands");
    }
    for text in unsent {
        emit(TransportEvent::SendFailed(text)).await;
    }
    emit(closed(clean)).await;
}

/// Stop accepting requests and return the text of every request not yet
/// written, in submission order. Later [Transport::send] calls fail, so the
/// caller requeues those itself.
fn take_unsent(outbound: &mut mpsc::UnboundedReceiver<Outbound>) -> Vec<String> {
    outbound.close();
    let mut unsent = Vec::new();
    while let Ok(request) = outbound.try_recv() {
        if let Outbound::Text(text) = request {
            unsent.push(text);
        }
    }
    unsent
}
