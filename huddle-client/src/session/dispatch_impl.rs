use crate::session::Session;
use huddle_core::{
    ParticipantId, ProducerId, RequestId, ResponseError, ResponsePayload, ServerMessage,
};
use tracing::{debug, info, warn};

impl Session {
    /// Handle one inbound message.
    ///
    /// Anything that has to wait on the server (joining, consuming) is spawned, so the caller can
    /// go straight back to receiving and deliver the responses that work is waiting for.
    pub async fn dispatch(&self, message: ServerMessage) {
        match message {
            ServerMessage::SetRoom(snapshot) => self.begin_join(snapshot),

            ServerMessage::ProducerAdded {
                participant_id,
                producer_id,
            } => self.on_producer_added(participant_id, producer_id).await,

            ServerMessage::ProducerRemove {
                participant_id,
                producer_id,
            } => {
                info!("Producer {} of {} removed", producer_id, participant_id);
                self.inner
                    .registry
                    .lock()
                    .await
                    .remove_track(&participant_id, &producer_id);
            }

            ServerMessage::RequestResponse { id, result } => self.on_response(id, result).await,
        }
    }

    async fn on_response(
        &self,
        id: Option<RequestId>,
        result: Result<ResponsePayload, ResponseError>,
    ) {
        let correlator = &self.inner.correlator;
        let key = correlator.key_for_response(id, &result);

        // A snapshot nobody asked for is the server's initial push.
        if let Ok(ResponsePayload::SetRoom(snapshot)) = &result {
            if !key.is_some_and(|key| correlator.is_pending(&key)) {
                self.begin_join(snapshot.clone());
                return;
            }
        }

        let leave_ack = matches!(result, Ok(ResponsePayload::LeaveRoom(_)));

        match key {
            Some(key) => {
                correlator.resolve(&key, result);
            }
            None => warn!("Dropping response without a correlation key: {:?}", result),
        }

        if leave_ack {
            self.finish_leave().await;
        }
    }

    async fn on_producer_added(&self, participant_id: ParticipantId, producer_id: ProducerId) {
        let state = self.state();
        if !state.is_in_room() {
            debug!(
                "Ignoring producer {} of {} while {}",
                producer_id, participant_id, state
            );
            return;
        }

        {
            let mut media = self.inner.media.lock().await;
            if media.recv_transport.is_none() {
                debug!(
                    "Deferring producer {} until the receive transport exists",
                    producer_id
                );
                media.deferred.push((participant_id, producer_id));
                return;
            }
        }

        info!("Producer {} of {} added", producer_id, participant_id);
        self.spawn_consume(participant_id, producer_id);
    }
}
