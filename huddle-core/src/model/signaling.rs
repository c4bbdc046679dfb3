use crate::model::media::{
    ConsumerParameters, DtlsParameters, MediaKind, RtpCapabilities, RtpParameters,
};
use crate::model::participant::ParticipantId;
use crate::model::producer::{ConsumerId, ProducerId};
use crate::model::request::RequestId;
use crate::model::room::RoomSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IceTransportPolicy {
    All,
    Relay,
}

/// Logical message kinds. Doubles as the correlation key when responses are matched by kind.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum MessageKind {
    SetRoom,
    FinishInit,
    ConnectProducerTransport,
    Produce,
    ConnectConsumerTransport,
    Consume,
    ConsumerResume,
    ProducerAdded,
    ProducerRemove,
    LeaveRoom,
    RequestResponse,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::SetRoom => "SetRoom",
            MessageKind::FinishInit => "FinishInit",
            MessageKind::ConnectProducerTransport => "ConnectProducerTransport",
            MessageKind::Produce => "Produce",
            MessageKind::ConnectConsumerTransport => "ConnectConsumerTransport",
            MessageKind::Consume => "Consume",
            MessageKind::ConsumerResume => "ConsumerResume",
            MessageKind::ProducerAdded => "ProducerAdded",
            MessageKind::ProducerRemove => "ProducerRemove",
            MessageKind::LeaveRoom => "LeaveRoom",
            MessageKind::RequestResponse => "RequestResponse",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requests a client sends to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum ClientRequest {
    FinishInit(RtpCapabilities),
    ConnectProducerTransport(DtlsParameters),
    Produce(MediaKind, RtpParameters),
    ConnectConsumerTransport(DtlsParameters),
    Consume(ProducerId),
    ConsumerResume(ConsumerId),
    LeaveRoom,
}

impl ClientRequest {
    pub fn kind(&self) -> MessageKind {
        match self {
            ClientRequest::FinishInit(_) => MessageKind::FinishInit,
            ClientRequest::ConnectProducerTransport(_) => MessageKind::ConnectProducerTransport,
            ClientRequest::Produce(..) => MessageKind::Produce,
            ClientRequest::ConnectConsumerTransport(_) => MessageKind::ConnectConsumerTransport,
            ClientRequest::Consume(_) => MessageKind::Consume,
            ClientRequest::ConsumerResume(_) => MessageKind::ConsumerResume,
            ClientRequest::LeaveRoom => MessageKind::LeaveRoom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientEnvelope {
    pub id: RequestId,
    pub data: ClientRequest,
}

/// Empty acknowledgement body (`"d": {}` on the wire).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {}

/// Reply to `FinishInit`. May carry connectivity hints for transport construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinishInitAck {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ice_servers: Vec<IceServerConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ice_transport_policy: Option<IceTransportPolicy>,
}

/// Successful response bodies. The tag names the request kind being answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "d")]
pub enum ResponsePayload {
    SetRoom(RoomSnapshot),
    FinishInit(FinishInitAck),
    ConnectProducerTransport(Ack),
    Produce(ProducerId),
    ConnectConsumerTransport(Ack),
    Consume(ConsumerParameters),
    ConsumerResume(Ack),
    LeaveRoom(Ack),
}

impl ResponsePayload {
    pub fn kind(&self) -> MessageKind {
        match self {
            ResponsePayload::SetRoom(_) => MessageKind::SetRoom,
            ResponsePayload::FinishInit(_) => MessageKind::FinishInit,
            ResponsePayload::ConnectProducerTransport(_) => MessageKind::ConnectProducerTransport,
            ResponsePayload::Produce(_) => MessageKind::Produce,
            ResponsePayload::ConnectConsumerTransport(_) => MessageKind::ConnectConsumerTransport,
            ResponsePayload::Consume(_) => MessageKind::Consume,
            ResponsePayload::ConsumerResume(_) => MessageKind::ConsumerResume,
            ResponsePayload::LeaveRoom(_) => MessageKind::LeaveRoom,
        }
    }
}

/// Failure body of a `RequestResponse`.
///
/// Servers may send either the full object or just the reason as a bare string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResponseErrorRepr")]
pub struct ResponseError {
    /// Kind of the failed request. Needed to route failures when correlating by kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageKind>,
    pub reason: String,
}

impl ResponseError {
    pub fn new(kind: MessageKind, reason: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            reason: reason.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResponseErrorRepr {
    Reason(String),
    Full {
        #[serde(default)]
        kind: Option<MessageKind>,
        reason: String,
    },
}

impl From<ResponseErrorRepr> for ResponseError {
    fn from(repr: ResponseErrorRepr) -> Self {
        match repr {
            ResponseErrorRepr::Reason(reason) => Self { kind: None, reason },
            ResponseErrorRepr::Full { kind, reason } => Self { kind, reason },
        }
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Everything the server can push down the channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "d")]
pub enum ServerMessage {
    SetRoom(RoomSnapshot),
    ProducerAdded {
        participant_id: ParticipantId,
        producer_id: ProducerId,
    },
    ProducerRemove {
        participant_id: ParticipantId,
        producer_id: ProducerId,
    },
    RequestResponse {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<RequestId>,
        result: Result<ResponsePayload, ResponseError>,
    },
}

impl ServerMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            ServerMessage::SetRoom(_) => MessageKind::SetRoom,
            ServerMessage::ProducerAdded { .. } => MessageKind::ProducerAdded,
            ServerMessage::ProducerRemove { .. } => MessageKind::ProducerRemove,
            ServerMessage::RequestResponse { .. } => MessageKind::RequestResponse,
        }
    }
}
