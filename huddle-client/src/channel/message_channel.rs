use crate::error::ChannelError;
use async_trait::async_trait;
use huddle_core::{ClientEnvelope, ServerMessage};
use tokio::sync::mpsc;

/// Sending half of the signalling channel. Fire-and-forget.
pub trait OutboundChannel: Send + Sync {
    fn send(&self, envelope: ClientEnvelope) -> Result<(), ChannelError>;
}

/// Receiving half of the signalling channel. Yields messages in arrival order.
#[async_trait]
pub trait InboundChannel: Send {
    /// Suspends until the next message. `None` once the channel is closed.
    async fn receive(&mut self) -> Option<ServerMessage>;
}

impl OutboundChannel for mpsc::UnboundedSender<ClientEnvelope> {
    fn send(&self, envelope: ClientEnvelope) -> Result<(), ChannelError> {
        mpsc::UnboundedSender::send(self, envelope).map_err(|_| ChannelError::Closed)
    }
}

#[async_trait]
impl InboundChannel for mpsc::UnboundedReceiver<ServerMessage> {
    async fn receive(&mut self) -> Option<ServerMessage> {
        self.recv().await
    }
}

#[async_trait]
impl InboundChannel for mpsc::Receiver<ServerMessage> {
    async fn receive(&mut self) -> Option<ServerMessage> {
        self.recv().await
    }
}
