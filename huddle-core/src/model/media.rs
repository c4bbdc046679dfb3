use crate::model::producer::{ConsumerId, ProducerId};
use crate::model::signaling::{IceServerConfig, IceTransportPolicy};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Audio => f.write_str("audio"),
            MediaKind::Video => f.write_str("video"),
        }
    }
}

macro_rules! opaque_json {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Value);

        impl From<Value> for $name {
            fn from(value: Value) -> Self {
                Self(value)
            }
        }
    };
}

opaque_json!(
    /// Codec and header extension set, either the router's or the local device's.
    RtpCapabilities
);

opaque_json!(
    /// Encoding parameters for a single producer or consumer.
    RtpParameters
);

opaque_json!(DtlsParameters);

/// Parameters the server hands out for building one WebRTC transport.
///
/// Only `id` is interpreted here; the ICE/DTLS blobs travel to the media engine untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportOptions {
    pub id: String,
    #[serde(default)]
    pub ice_parameters: Value,
    #[serde(default)]
    pub ice_candidates: Value,
    #[serde(default)]
    pub dtls_parameters: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ice_servers: Vec<IceServerConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ice_transport_policy: Option<IceTransportPolicy>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransportOptions {
    /// Append ICE servers, skipping ones whose url list is already present.
    pub fn add_ice_servers<I>(&mut self, servers: I)
    where
        I: IntoIterator<Item = IceServerConfig>,
    {
        for server in servers {
            if !self.ice_servers.iter().any(|s| s.urls == server.urls) {
                self.ice_servers.push(server);
            }
        }
    }
}

/// Server answer to a `Consume` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerParameters {
    pub id: ConsumerId,
    pub producer_id: ProducerId,
    pub kind: MediaKind,
    #[serde(default)]
    pub rtp_parameters: RtpParameters,
}
