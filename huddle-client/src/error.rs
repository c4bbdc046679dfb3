use crate::session::SessionState;
use huddle_core::MessageKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("signalling channel closed")]
    Closed,
    #[error("failed to encode outbound message: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode inbound message: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("{kind} rejected by server: {reason}")]
    Rejected { kind: MessageKind, reason: String },

    #[error("expected {expected} response, got {actual}")]
    KindMismatch {
        expected: MessageKind,
        actual: MessageKind,
    },

    /// The pending entry was overwritten or cleared; no response will ever arrive.
    #[error("request abandoned before a response arrived")]
    Abandoned,

    #[error("{0} request timed out")]
    TimedOut(MessageKind),

    #[error(transparent)]
    Channel(#[from] ChannelError),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot {action} while session is {state}")]
    InvalidState {
        action: &'static str,
        state: SessionState,
    },

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("media engine: {0:#}")]
    Engine(#[from] anyhow::Error),

    #[error("expected {expected} response, got {actual}")]
    UnexpectedResponse {
        expected: MessageKind,
        actual: MessageKind,
    },

    /// The room was left while this operation was still running.
    #[error("room context is gone")]
    Abandoned,
}

impl SessionError {
    pub fn is_abandoned(&self) -> bool {
        matches!(
            self,
            SessionError::Abandoned | SessionError::Request(RequestError::Abandoned)
        )
    }
}
