use crate::engine::{Producer, RecvTransport, SendTransport, Track};
use huddle_core::{ParticipantId, ProducerId, RoomId};
use std::fmt;
use std::sync::Arc;

/// Outcomes the host may want to surface. Track changes go to the `View` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Joined {
        room_id: RoomId,
    },
    JoinFailed {
        room_id: RoomId,
        reason: String,
        /// Whatever the join had built before it failed. The session no longer holds it.
        stranded: StrandedMedia,
    },
    ProduceFailed {
        track: Track,
        reason: String,
    },
    ConsumeFailed {
        participant_id: ParticipantId,
        producer_id: ProducerId,
        reason: String,
    },
    Left {
        room_id: Option<RoomId>,
    },
}

/// Transports and producers left over from a failed join.
///
/// The session does not tear these down; the host decides whether to close or reuse them.
#[derive(Clone, Default)]
pub struct StrandedMedia {
    pub send_transport: Option<Arc<dyn SendTransport>>,
    pub recv_transport: Option<Arc<dyn RecvTransport>>,
    pub producers: Vec<Producer>,
}

impl StrandedMedia {
    pub fn is_empty(&self) -> bool {
        self.send_transport.is_none() && self.recv_transport.is_none() && self.producers.is_empty()
    }

    /// Close both transports, if any.
    pub async fn close(self) {
        if let Some(transport) = self.send_transport {
            transport.close().await;
        }
        if let Some(transport) = self.recv_transport {
            transport.close().await;
        }
    }

    fn send_id(&self) -> Option<&str> {
        self.send_transport.as_ref().map(|t| t.id())
    }

    fn recv_id(&self) -> Option<&str> {
        self.recv_transport.as_ref().map(|t| t.id())
    }
}

impl fmt::Debug for StrandedMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrandedMedia")
            .field("send_transport", &self.send_id())
            .field("recv_transport", &self.recv_id())
            .field("producers", &self.producers)
            .finish()
    }
}

/// Transports compare by id.
impl PartialEq for StrandedMedia {
    fn eq(&self, other: &Self) -> bool {
        self.send_id() == other.send_id()
            && self.recv_id() == other.recv_id()
            && self.producers == other.producers
    }
}
