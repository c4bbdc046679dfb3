use huddle_core::{ClientEnvelope, ServerMessage};
use tokio::sync::mpsc;

/// The session's side of an in-process channel.
pub struct SessionChannel {
    pub outbound: mpsc::UnboundedSender<ClientEnvelope>,
    pub inbound: mpsc::UnboundedReceiver<ServerMessage>,
}

/// The far side: whatever bridges to the real server (a websocket task, a test harness).
pub struct RemoteEnd {
    pub requests: mpsc::UnboundedReceiver<ClientEnvelope>,
    pub pushes: mpsc::UnboundedSender<ServerMessage>,
}

pub fn memory_channel() -> (SessionChannel, RemoteEnd) {
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (push_tx, push_rx) = mpsc::unbounded_channel();

    (
        SessionChannel {
            outbound: request_tx,
            inbound: push_rx,
        },
        RemoteEnd {
            requests: request_rx,
            pushes: push_tx,
        },
    )
}
