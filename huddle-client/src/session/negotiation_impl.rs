use crate::engine::{Negotiation, TransportListener};
use crate::error::RequestError;
use crate::session::{Session, SessionInner};
use huddle_core::{
    ClientRequest, DtlsParameters, MediaKind, ProducerId, ResponsePayload, RtpParameters,
};
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransportSide {
    Producer,
    Consumer,
}

/// Turns transport callbacks into request/response round trips over the session's channel.
///
/// Holds the session weakly: the session owns the transports, which own their listener.
pub(crate) struct NegotiationBridge {
    session: Weak<SessionInner>,
    side: TransportSide,
}

impl NegotiationBridge {
    pub(crate) fn producer_side(session: &Session) -> Arc<Self> {
        Arc::new(Self {
            session: Arc::downgrade(&session.inner),
            side: TransportSide::Producer,
        })
    }

    pub(crate) fn consumer_side(session: &Session) -> Arc<Self> {
        Arc::new(Self {
            session: Arc::downgrade(&session.inner),
            side: TransportSide::Consumer,
        })
    }

    fn bridge<T, F>(&self, request: ClientRequest, negotiation: Negotiation<T>, extract: F)
    where
        T: Send + 'static,
        F: FnOnce(ResponsePayload) -> Option<T> + Send + 'static,
    {
        let Some(inner) = self.session.upgrade() else {
            negotiation.fail("session is gone");
            return;
        };
        let kind = request.kind();
        debug!("{:?} transport negotiating {}", self.side, kind);

        tokio::spawn(async move {
            match inner.correlator.request(request).await {
                Ok(payload) => {
                    let actual = payload.kind();
                    match extract(payload) {
                        Some(value) => negotiation.succeed(value),
                        None => negotiation
                            .fail(format!("expected {} response, got {}", kind, actual)),
                    }
                }
                // Room context is gone; the engine sees its negotiation dropped.
                Err(RequestError::Abandoned) => debug!("{} negotiation abandoned", kind),
                Err(e) => {
                    warn!("{} negotiation failed: {}", kind, e);
                    negotiation.fail(e.to_string());
                }
            }
        });
    }
}

impl TransportListener for NegotiationBridge {
    fn on_connect(&self, dtls_parameters: DtlsParameters, negotiation: Negotiation<()>) {
        let request = match self.side {
            TransportSide::Producer => ClientRequest::ConnectProducerTransport(dtls_parameters),
            TransportSide::Consumer => ClientRequest::ConnectConsumerTransport(dtls_parameters),
        };
        self.bridge(request, negotiation, |payload| match payload {
            ResponsePayload::ConnectProducerTransport(_)
            | ResponsePayload::ConnectConsumerTransport(_) => Some(()),
            _ => None,
        });
    }

    fn on_produce(
        &self,
        kind: MediaKind,
        rtp_parameters: RtpParameters,
        negotiation: Negotiation<ProducerId>,
    ) {
        if self.side == TransportSide::Consumer {
            negotiation.fail("cannot produce on the consumer transport");
            return;
        }
        self.bridge(
            ClientRequest::Produce(kind, rtp_parameters),
            negotiation,
            |payload| match payload {
                ResponsePayload::Produce(producer_id) => Some(producer_id),
                _ => None,
            },
        );
    }
}
