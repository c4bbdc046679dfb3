use crate::correlator::CorrelationMode;
use crate::engine::Track;
use crate::error::SessionError;
use crate::session::{Session, SessionEvent, unexpected_response};
use huddle_core::{ClientRequest, MessageKind, ParticipantId, ProducerId, ResponsePayload};
use tracing::{debug, error, info};

impl Session {
    pub(super) fn spawn_consume(&self, participant_id: ParticipantId, producer_id: ProducerId) {
        let session = self.clone();
        let generation = self.generation();
        tokio::spawn(async move {
            session.consume(participant_id, producer_id, generation).await;
        });
    }

    /// Subscribe to one remote producer. Failures are reported and stay local to this producer.
    pub(super) async fn consume(
        &self,
        participant_id: ParticipantId,
        producer_id: ProducerId,
        generation: u64,
    ) {
        // Consume and ConsumerResume share a key across producers when matching by kind.
        let _gate = match self.inner.correlator.mode() {
            CorrelationMode::ByKind => Some(self.inner.consume_gate.lock().await),
            CorrelationMode::ByRequestId => None,
        };

        match self
            .try_consume(&participant_id, &producer_id, generation)
            .await
        {
            Ok(track) => info!(
                "Consuming {} track {} of {} (producer {})",
                track.kind, track.id, participant_id, producer_id
            ),
            Err(e) if e.is_abandoned() => {
                debug!("Consume of producer {} abandoned: {}", producer_id, e)
            }
            Err(e) => {
                error!(
                    "Failed to consume producer {} of {}: {}",
                    producer_id, participant_id, e
                );
                self.emit(SessionEvent::ConsumeFailed {
                    participant_id,
                    producer_id,
                    reason: e.to_string(),
                });
            }
        }
    }

    async fn try_consume(
        &self,
        participant_id: &ParticipantId,
        producer_id: &ProducerId,
        generation: u64,
    ) -> Result<Track, SessionError> {
        self.ensure_current(generation)?;
        let transport = self
            .inner
            .media
            .lock()
            .await
            .recv_transport
            .clone()
            .ok_or_else(|| SessionError::InvalidState {
                action: "consume",
                state: self.state(),
            })?;
        let correlator = &self.inner.correlator;

        let parameters = match correlator
            .request(ClientRequest::Consume(producer_id.clone()))
            .await?
        {
            ResponsePayload::Consume(parameters) => parameters,
            other => return Err(unexpected_response(MessageKind::Consume, &other)),
        };

        let consumer = transport.consume(parameters).await?;

        // Server-side consumers start paused.
        match correlator
            .request(ClientRequest::ConsumerResume(consumer.id.clone()))
            .await?
        {
            ResponsePayload::ConsumerResume(_) => {}
            other => return Err(unexpected_response(MessageKind::ConsumerResume, &other)),
        }

        let mut registry = self.inner.registry.lock().await;
        self.ensure_current(generation)?;
        registry.add_track(
            participant_id.clone(),
            producer_id.clone(),
            consumer.track.clone(),
        );

        Ok(consumer.track)
    }
}
