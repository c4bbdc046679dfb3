use huddle_core::{MessageKind, RequestId, ResponseError, ResponsePayload};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two protocol variants matches responses to requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationMode {
    /// Responses are matched by message kind. At most one request per kind may be in flight.
    #[default]
    ByKind,
    /// Every request carries a fresh id that the server echoes back.
    ByRequestId,
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum CorrelationKey {
    Kind(MessageKind),
    Id(RequestId),
}

impl CorrelationKey {
    /// Key under which a response should be looked up, if it carries one.
    pub fn for_response(
        mode: CorrelationMode,
        id: Option<RequestId>,
        result: &Result<ResponsePayload, ResponseError>,
    ) -> Option<Self> {
        match mode {
            CorrelationMode::ByRequestId => id.filter(|id| !id.is_nil()).map(CorrelationKey::Id),
            CorrelationMode::ByKind => match result {
                Ok(payload) => Some(CorrelationKey::Kind(payload.kind())),
                Err(e) => e.kind.map(CorrelationKey::Kind),
            },
        }
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationKey::Kind(kind) => write!(f, "kind:{}", kind),
            CorrelationKey::Id(id) => write!(f, "id:{}", id),
        }
    }
}
