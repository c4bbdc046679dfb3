use crate::error::{RequestError, SessionError};
use crate::session::{Session, SessionEvent, SessionState, unexpected_response};
use huddle_core::{ClientRequest, MessageKind, ResponsePayload};
use std::sync::atomic::Ordering;
use tracing::{debug, info, warn};

impl Session {
    /// Ask the server to let us out of the room.
    ///
    /// Teardown runs in the dispatch loop once the acknowledgement arrives, so by the time the
    /// host sees `SessionEvent::Left` every participant has been removed from the view.
    pub async fn leave(&self) -> Result<(), SessionError> {
        let state = self.state();
        if !state.is_in_room() {
            return Err(SessionError::InvalidState {
                action: "leave",
                state,
            });
        }

        info!("Leaving room");
        match self.inner.correlator.request(ClientRequest::LeaveRoom).await {
            Ok(ResponsePayload::LeaveRoom(_)) | Err(RequestError::Abandoned) => Ok(()),
            Ok(other) => Err(unexpected_response(MessageKind::LeaveRoom, &other)),
            Err(e) => Err(e.into()),
        }
    }

    pub(super) async fn finish_leave(&self) {
        let state = self.state();
        if !state.is_in_room() {
            warn!("Ignoring LeaveRoom acknowledgement while {}", state);
            return;
        }

        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        self.set_state(SessionState::Left);

        self.inner.registry.lock().await.clear();

        let orphaned = self.inner.correlator.clear();
        if orphaned > 0 {
            debug!("Abandoned {} pending request(s) on leave", orphaned);
        }

        let media = std::mem::take(&mut *self.inner.media.lock().await);
        if let Some(transport) = media.send_transport {
            transport.close().await;
        }
        if let Some(transport) = media.recv_transport {
            transport.close().await;
        }

        self.set_state(SessionState::Idle);
        match &media.room_id {
            Some(room_id) => info!("Left room {}", room_id),
            None => info!("Left room"),
        }
        self.emit(SessionEvent::Left {
            room_id: media.room_id,
        });
    }
}
