use crate::model::media::{RtpCapabilities, TransportOptions};
use crate::model::participant::ParticipantId;
use crate::model::producer::ProducerId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the server tells a client when it enters a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub router_rtp_capabilities: RtpCapabilities,
    pub producer_transport_options: TransportOptions,
    pub consumer_transport_options: TransportOptions,
    /// Producers already live in the room, as `(participant, producer)` pairs.
    #[serde(default)]
    pub producers: Vec<(ParticipantId, ProducerId)>,
}
