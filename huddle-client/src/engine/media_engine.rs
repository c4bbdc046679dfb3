use crate::engine::negotiation::Negotiation;
use crate::engine::track::{Consumer, Producer, Track};
use async_trait::async_trait;
use huddle_core::{
    ConsumerParameters, DtlsParameters, MediaKind, ProducerId, RtpCapabilities, RtpParameters,
    TransportOptions,
};
use std::sync::Arc;

/// Callbacks a transport fires when it needs the server's cooperation.
///
/// The engine suspends its own step until the handed-over [`Negotiation`] is settled.
pub trait TransportListener: Send + Sync {
    /// Transport is about to connect and needs the server to accept its DTLS parameters.
    fn on_connect(&self, dtls_parameters: DtlsParameters, negotiation: Negotiation<()>);

    /// A local track is being produced and needs a server-side producer id.
    fn on_produce(
        &self,
        kind: MediaKind,
        rtp_parameters: RtpParameters,
        negotiation: Negotiation<ProducerId>,
    ) {
        let _ = (kind, rtp_parameters);
        negotiation.fail("transport does not produce");
    }
}

#[async_trait]
pub trait SendTransport: Send + Sync {
    fn id(&self) -> &str;

    async fn produce(&self, track: Track) -> anyhow::Result<Producer>;

    async fn close(&self);
}

#[async_trait]
pub trait RecvTransport: Send + Sync {
    fn id(&self) -> &str;

    async fn consume(&self, parameters: ConsumerParameters) -> anyhow::Result<Consumer>;

    async fn close(&self);
}

/// Device-level media capability: everything that touches ICE, DTLS, RTP and codecs.
#[async_trait]
pub trait MediaEngine: Send + Sync {
    /// Load the router's capabilities and return what this device can do with them.
    async fn load_capabilities(
        &self,
        router_capabilities: RtpCapabilities,
    ) -> anyhow::Result<RtpCapabilities>;

    async fn create_send_transport(
        &self,
        options: TransportOptions,
        listener: Arc<dyn TransportListener>,
    ) -> anyhow::Result<Arc<dyn SendTransport>>;

    async fn create_recv_transport(
        &self,
        options: TransportOptions,
        listener: Arc<dyn TransportListener>,
    ) -> anyhow::Result<Arc<dyn RecvTransport>>;
}

/// Local capture devices (microphone, camera).
#[async_trait]
pub trait CaptureSource: Send + Sync {
    async fn acquire(&self) -> anyhow::Result<Vec<Track>>;
}
