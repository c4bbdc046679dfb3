use crate::channel::message_channel::{InboundChannel, OutboundChannel};
use crate::error::ChannelError;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use huddle_core::{ClientEnvelope, ServerMessage};
use tokio::sync::mpsc;
use tracing::warn;

pub fn encode_request(envelope: &ClientEnvelope) -> Result<String, ChannelError> {
    serde_json::to_string(envelope).map_err(ChannelError::Encode)
}

pub fn decode_server_message(text: &str) -> Result<ServerMessage, ChannelError> {
    serde_json::from_str(text).map_err(ChannelError::Decode)
}

/// Outbound adapter for hosts that own a text-frame websocket writer.
#[derive(Clone)]
pub struct JsonOutbound {
    frames: mpsc::UnboundedSender<String>,
}

impl JsonOutbound {
    pub fn new(frames: mpsc::UnboundedSender<String>) -> Self {
        Self { frames }
    }
}

impl OutboundChannel for JsonOutbound {
    fn send(&self, envelope: ClientEnvelope) -> Result<(), ChannelError> {
        let text = encode_request(&envelope)?;
        self.frames.send(text).map_err(|_| ChannelError::Closed)
    }
}

/// Inbound adapter over a stream of text frames. Undecodable frames are logged and skipped.
pub struct JsonInbound<S> {
    frames: S,
}

impl<S> JsonInbound<S> {
    pub fn new(frames: S) -> Self {
        Self { frames }
    }
}

#[async_trait]
impl<S> InboundChannel for JsonInbound<S>
where
    S: Stream<Item = String> + Unpin + Send,
{
    async fn receive(&mut self) -> Option<ServerMessage> {
        while let Some(text) = self.frames.next().await {
            match decode_server_message(&text) {
                Ok(message) => return Some(message),
                Err(e) => warn!("Invalid server message: {}. Text: {}", e, text),
            }
        }
        None
    }
}
