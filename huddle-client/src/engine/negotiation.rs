use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NegotiationError {
    #[error("negotiation failed: {0}")]
    Failed(String),
    /// The fulfilling side dropped its half without answering.
    #[error("negotiation abandoned")]
    Abandoned,
}

/// Fulfilling half of a transport negotiation: exactly one of `succeed` / `fail` settles it.
pub struct Negotiation<T> {
    reply: oneshot::Sender<Result<T, NegotiationError>>,
}

/// Awaiting half, held by the engine while it waits for the server round trip.
pub struct PendingNegotiation<T> {
    outcome: oneshot::Receiver<Result<T, NegotiationError>>,
}

impl<T> Negotiation<T> {
    pub fn channel() -> (Self, PendingNegotiation<T>) {
        let (reply, outcome) = oneshot::channel();
        (Self { reply }, PendingNegotiation { outcome })
    }

    pub fn succeed(self, value: T) {
        let _ = self.reply.send(Ok(value));
    }

    pub fn fail(self, reason: impl Into<String>) {
        let _ = self.reply.send(Err(NegotiationError::Failed(reason.into())));
    }
}

impl<T> Future for PendingNegotiation<T> {
    type Output = Result<T, NegotiationError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().outcome)
            .poll(cx)
            .map(|outcome| outcome.unwrap_or(Err(NegotiationError::Abandoned)))
    }
}
