use crate::correlator::CorrelationMode;
use huddle_core::IceServerConfig;
use huddle_core::utils::DEFAULT_STUN_ADDR;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub correlation: CorrelationMode,
    /// Give up on a request after this long. `None` waits forever.
    #[serde(with = "millis", rename = "request_timeout_ms")]
    pub request_timeout: Option<Duration>,
    /// Produce local tracks in parallel. Only honoured with `CorrelationMode::ByRequestId`.
    pub concurrent_produce: bool,
    /// Added to both transports' options before construction.
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            correlation: CorrelationMode::ByKind,
            request_timeout: None,
            concurrent_produce: false,
            ice_servers: vec![IceServerConfig {
                urls: vec![DEFAULT_STUN_ADDR.to_owned()],
                username: None,
                credential: None,
            }],
        }
    }
}

impl SessionConfig {
    pub fn with_correlation(mut self, correlation: CorrelationMode) -> Self {
        self.correlation = correlation;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_concurrent_produce(mut self, enabled: bool) -> Self {
        self.concurrent_produce = enabled;
        self
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&(d.as_millis() as u64)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}
