use crate::correlator::CorrelationMode;
use crate::engine::{SendTransport, Track};
use crate::error::SessionError;
use crate::session::negotiation_impl::NegotiationBridge;
use crate::session::{
    MediaState, Session, SessionEvent, SessionState, StrandedMedia, unexpected_response,
};
use futures::future::join_all;
use huddle_core::{
    ClientRequest, FinishInitAck, MessageKind, ResponsePayload, RoomSnapshot, TransportOptions,
};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing::{debug, error, info, warn};

impl Session {
    pub(super) fn begin_join(&self, snapshot: RoomSnapshot) {
        let claimed = self.inner.state.send_if_modified(|state| {
            if *state == SessionState::Idle {
                *state = SessionState::Joining;
                true
            } else {
                false
            }
        });
        if !claimed {
            warn!(
                "Ignoring snapshot for room {} while {}",
                snapshot.room_id,
                self.state()
            );
            return;
        }

        info!("Joining room {}", snapshot.room_id);
        let session = self.clone();
        let generation = self.generation();
        tokio::spawn(async move { session.run_join(snapshot, generation).await });
    }

    async fn run_join(self, snapshot: RoomSnapshot, generation: u64) {
        let room_id = snapshot.room_id.clone();

        match self.join(snapshot, generation).await {
            Ok(()) => {
                info!("Joined room {}", room_id);
                self.emit(SessionEvent::Joined { room_id });
            }
            Err(e) if e.is_abandoned() => debug!("Join of room {} abandoned: {}", room_id, e),
            Err(e) => {
                error!("Failed to join room {}: {}", room_id, e);
                let stranded = self.abort_join(generation).await;
                self.emit(SessionEvent::JoinFailed {
                    room_id,
                    reason: e.to_string(),
                    stranded,
                });
            }
        }
    }

    /// Drop the failed join's room context and hand back whatever media it had built.
    async fn abort_join(&self, generation: u64) -> StrandedMedia {
        let mut media = self.inner.media.lock().await;
        if self.ensure_current(generation).is_err() {
            return StrandedMedia::default();
        }

        let MediaState {
            send_transport,
            recv_transport,
            producers,
            deferred,
            ..
        } = std::mem::take(&mut *media);
        if !deferred.is_empty() {
            debug!("Discarding {} deferred producer(s)", deferred.len());
        }

        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        self.set_state(SessionState::Idle);

        StrandedMedia {
            send_transport,
            recv_transport,
            producers,
        }
    }

    async fn join(&self, snapshot: RoomSnapshot, generation: u64) -> Result<(), SessionError> {
        let RoomSnapshot {
            room_id,
            router_rtp_capabilities,
            producer_transport_options,
            consumer_transport_options,
            producers,
        } = snapshot;
        let engine = self.inner.engine.clone();

        self.inner.media.lock().await.room_id = Some(room_id);

        let device_capabilities = engine.load_capabilities(router_rtp_capabilities).await?;
        self.advance(generation, SessionState::CapabilitiesLoaded)?;

        // Transports must not exist before the server has accepted our capabilities.
        let ack = match self
            .inner
            .correlator
            .request(ClientRequest::FinishInit(device_capabilities))
            .await?
        {
            ResponsePayload::FinishInit(ack) => ack,
            other => return Err(unexpected_response(MessageKind::FinishInit, &other)),
        };

        let send_transport = engine
            .create_send_transport(
                self.with_connectivity(producer_transport_options, &ack),
                NegotiationBridge::producer_side(self),
            )
            .await?;
        info!("Producer transport {} created", send_transport.id());
        {
            let mut media = self.inner.media.lock().await;
            if let Err(e) = self.ensure_current(generation) {
                drop(media);
                send_transport.close().await;
                return Err(e);
            }
            media.send_transport = Some(send_transport.clone());
        }
        self.advance(generation, SessionState::ProducerTransportReady)?;

        let tracks = self.inner.capture.acquire().await?;
        self.produce_all(&send_transport, tracks).await;
        self.ensure_current(generation)?;

        let recv_transport = engine
            .create_recv_transport(
                self.with_connectivity(consumer_transport_options, &ack),
                NegotiationBridge::consumer_side(self),
            )
            .await?;
        info!("Consumer transport {} created", recv_transport.id());
        {
            let mut media = self.inner.media.lock().await;
            if let Err(e) = self.ensure_current(generation) {
                drop(media);
                recv_transport.close().await;
                return Err(e);
            }
            media.recv_transport = Some(recv_transport);
        }

        for (participant_id, producer_id) in producers {
            self.consume(participant_id, producer_id, generation).await;
        }
        let deferred = std::mem::take(&mut self.inner.media.lock().await.deferred);
        for (participant_id, producer_id) in deferred {
            self.consume(participant_id, producer_id, generation).await;
        }

        self.advance(generation, SessionState::Active)
    }

    fn with_connectivity(
        &self,
        mut options: TransportOptions,
        ack: &FinishInitAck,
    ) -> TransportOptions {
        options.add_ice_servers(self.inner.config.ice_servers.iter().cloned());
        options.add_ice_servers(ack.ice_servers.iter().cloned());
        if let Some(policy) = ack.ice_transport_policy {
            options.ice_transport_policy = Some(policy);
        }
        options
    }

    /// Each track fails on its own; a failed track does not stop the others.
    async fn produce_all(&self, transport: &Arc<dyn SendTransport>, tracks: Vec<Track>) {
        let concurrent = self.inner.config.concurrent_produce
            && self.inner.correlator.mode() == CorrelationMode::ByRequestId;

        if concurrent {
            join_all(
                tracks
                    .into_iter()
                    .map(|track| self.produce_track(transport, track)),
            )
            .await;
        } else {
            for track in tracks {
                self.produce_track(transport, track).await;
            }
        }
    }

    async fn produce_track(&self, transport: &Arc<dyn SendTransport>, track: Track) {
        match transport.produce(track.clone()).await {
            Ok(producer) => {
                info!(
                    "Producing {} track {} as {}",
                    track.kind, track.id, producer.id
                );
                self.inner.media.lock().await.producers.push(producer);
            }
            Err(e) => {
                error!("Failed to produce {} track {}: {:#}", track.kind, track.id, e);
                self.emit(SessionEvent::ProduceFailed {
                    track,
                    reason: format!("{:#}", e),
                });
            }
        }
    }
}
