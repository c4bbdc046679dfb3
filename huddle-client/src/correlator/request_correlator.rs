use crate::channel::OutboundChannel;
use crate::correlator::correlation_key::{CorrelationKey, CorrelationMode};
use crate::error::RequestError;
use dashmap::DashMap;
use huddle_core::{
    ClientEnvelope, ClientRequest, MessageKind, RequestId, ResponseError, ResponsePayload,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

type Reply = Result<ResponsePayload, RequestError>;

struct PendingRequest {
    kind: MessageKind,
    seq: u64,
    reply: oneshot::Sender<Reply>,
}

/// Matches outgoing requests to the responses that eventually arrive on the same channel.
///
/// Holds one pending entry per key. Registering a second request under a key that is still
/// pending replaces the first, whose caller then sees [`RequestError::Abandoned`].
pub struct RequestCorrelator {
    mode: CorrelationMode,
    outbound: Arc<dyn OutboundChannel>,
    pending: DashMap<CorrelationKey, PendingRequest>,
    next_seq: AtomicU64,
    timeout: Option<Duration>,
}

impl RequestCorrelator {
    pub fn new(
        mode: CorrelationMode,
        outbound: Arc<dyn OutboundChannel>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            mode,
            outbound,
            pending: DashMap::new(),
            next_seq: AtomicU64::new(0),
            timeout,
        }
    }

    pub fn mode(&self) -> CorrelationMode {
        self.mode
    }

    /// Send `request` and wait for its response.
    pub async fn request(&self, request: ClientRequest) -> Result<ResponsePayload, RequestError> {
        let kind = request.kind();
        let (id, key) = match self.mode {
            CorrelationMode::ByKind => (RequestId::nil(), CorrelationKey::Kind(kind)),
            CorrelationMode::ByRequestId => {
                let id = RequestId::new();
                (id, CorrelationKey::Id(id))
            }
        };
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let (reply, rx) = oneshot::channel();

        // Registered before sending so an immediate response always finds its entry.
        if let Some(previous) = self.pending.insert(key, PendingRequest { kind, seq, reply }) {
            warn!(
                "Overwriting pending {} request under {}; the earlier caller is orphaned",
                previous.kind, key
            );
        }

        if let Err(e) = self.outbound.send(ClientEnvelope { id, data: request }) {
            self.pending.remove_if(&key, |_, p| p.seq == seq);
            return Err(e.into());
        }
        debug!("Sent {} request ({})", kind, key);

        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, rx).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    self.pending.remove_if(&key, |_, p| p.seq == seq);
                    warn!("{} request timed out after {:?}", kind, limit);
                    return Err(RequestError::TimedOut(kind));
                }
            },
            None => rx.await,
        };

        outcome.unwrap_or(Err(RequestError::Abandoned))
    }

    /// Key the given response would be matched under, if any.
    pub fn key_for_response(
        &self,
        id: Option<RequestId>,
        result: &Result<ResponsePayload, ResponseError>,
    ) -> Option<CorrelationKey> {
        CorrelationKey::for_response(self.mode, id, result)
    }

    pub fn is_pending(&self, key: &CorrelationKey) -> bool {
        self.pending.contains_key(key)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Complete the request registered under `key`. Returns `false` when nobody was waiting,
    /// in which case the response is dropped.
    pub fn resolve(
        &self,
        key: &CorrelationKey,
        result: Result<ResponsePayload, ResponseError>,
    ) -> bool {
        let Some((_, pending)) = self.pending.remove(key) else {
            warn!("Dropping unmatched response for {}", key);
            return false;
        };

        let outcome = match result {
            Ok(payload) if payload.kind() == pending.kind => Ok(payload),
            Ok(payload) => Err(RequestError::KindMismatch {
                expected: pending.kind,
                actual: payload.kind(),
            }),
            Err(e) => Err(RequestError::Rejected {
                kind: pending.kind,
                reason: e.reason,
            }),
        };

        if pending.reply.send(outcome).is_err() {
            debug!("Caller of {} request went away before its response", pending.kind);
        }
        true
    }

    /// Drop every pending entry. Their callers see [`RequestError::Abandoned`].
    pub fn clear(&self) -> usize {
        let orphaned = self.pending.len();
        self.pending.clear();
        orphaned
    }
}
