use crate::channel::{InboundChannel, OutboundChannel};
use crate::correlator::{CorrelationMode, RequestCorrelator};
use crate::engine::{CaptureSource, MediaEngine, Producer, RecvTransport, SendTransport};
use crate::error::SessionError;
use crate::registry::{Participant, ParticipantRegistry};
use crate::view::View;
use huddle_core::{MessageKind, ParticipantId, ProducerId, ResponsePayload, RoomId};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{info, warn};

mod consume_impl;
mod dispatch_impl;
mod join_impl;
mod leave_impl;
mod negotiation_impl;
mod session_config;
mod session_event;
mod session_state;

pub use session_config::SessionConfig;
pub use session_event::{SessionEvent, StrandedMedia};
pub use session_state::SessionState;

pub type SessionEvents = mpsc::UnboundedReceiver<SessionEvent>;

/// Transports and local producers for the current room.
#[derive(Default)]
struct MediaState {
    room_id: Option<RoomId>,
    send_transport: Option<Arc<dyn SendTransport>>,
    recv_transport: Option<Arc<dyn RecvTransport>>,
    producers: Vec<Producer>,
    /// `ProducerAdded` pushes that arrived before the receive transport existed.
    deferred: Vec<(ParticipantId, ProducerId)>,
}

pub(crate) struct SessionInner {
    config: SessionConfig,
    correlator: RequestCorrelator,
    registry: Mutex<ParticipantRegistry>,
    media: Mutex<MediaState>,
    engine: Arc<dyn MediaEngine>,
    capture: Arc<dyn CaptureSource>,
    state: watch::Sender<SessionState>,
    events: mpsc::UnboundedSender<SessionEvent>,
    /// Serializes consume sequences when responses are matched by kind.
    consume_gate: Mutex<()>,
    /// Bumped on every leave so work started for an earlier room can tell it is stale.
    generation: AtomicU64,
}

/// Client-side coordinator for one conference room.
///
/// Cheap to clone; all clones drive the same session.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        outbound: Arc<dyn OutboundChannel>,
        engine: Arc<dyn MediaEngine>,
        capture: Arc<dyn CaptureSource>,
        view: Arc<dyn View>,
    ) -> (Self, SessionEvents) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(SessionState::Idle);
        let correlator =
            RequestCorrelator::new(config.correlation, outbound, config.request_timeout);

        if config.concurrent_produce && config.correlation == CorrelationMode::ByKind {
            warn!("concurrent_produce needs request-id correlation; producing sequentially");
        }

        let inner = SessionInner {
            config,
            correlator,
            registry: Mutex::new(ParticipantRegistry::new(view)),
            media: Mutex::new(MediaState::default()),
            engine,
            capture,
            state,
            events: events_tx,
            consume_gate: Mutex::new(()),
            generation: AtomicU64::new(0),
        };

        (
            Self {
                inner: Arc::new(inner),
            },
            events_rx,
        )
    }

    /// Dispatch loop: handles inbound messages one at a time until the channel closes.
    pub async fn run<I: InboundChannel>(&self, mut inbound: I) {
        info!("Session dispatch loop started");

        while let Some(message) = inbound.receive().await {
            self.dispatch(message).await;
        }

        info!("Inbound channel closed. Session dispatch loop finished");
    }

    pub fn state(&self) -> SessionState {
        *self.inner.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn correlator(&self) -> &RequestCorrelator {
        &self.inner.correlator
    }

    pub async fn room_id(&self) -> Option<RoomId> {
        self.inner.media.lock().await.room_id.clone()
    }

    pub async fn participants(&self) -> Vec<Participant> {
        self.inner
            .registry
            .lock()
            .await
            .participants()
            .cloned()
            .collect()
    }

    pub async fn producers(&self) -> Vec<Producer> {
        self.inner.media.lock().await.producers.clone()
    }

    fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }

    fn ensure_current(&self, generation: u64) -> Result<(), SessionError> {
        if self.generation() == generation {
            Ok(())
        } else {
            Err(SessionError::Abandoned)
        }
    }

    /// Move the join forward, unless the room was left in the meantime.
    fn advance(&self, generation: u64, next: SessionState) -> Result<(), SessionError> {
        self.ensure_current(generation)?;
        self.set_state(next);
        Ok(())
    }

    fn set_state(&self, next: SessionState) {
        let previous = self.inner.state.send_replace(next);
        if previous == next {
            return;
        }
        if !previous.can_transition_to(next) {
            warn!("Unexpected session transition {} -> {}", previous, next);
        }
        info!("Session state {} -> {}", previous, next);
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.inner.events.send(event);
    }
}

fn unexpected_response(expected: MessageKind, actual: &ResponsePayload) -> SessionError {
    SessionError::UnexpectedResponse {
        expected,
        actual: actual.kind(),
    }
}
