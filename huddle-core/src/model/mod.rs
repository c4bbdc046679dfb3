mod media;
mod participant;
mod producer;
mod request;
mod room;
mod signaling;

pub use media::{
    ConsumerParameters, DtlsParameters, MediaKind, RtpCapabilities, RtpParameters,
    TransportOptions,
};
pub use participant::ParticipantId;
pub use producer::{ConsumerId, ProducerId};
pub use request::RequestId;
pub use room::{RoomId, RoomSnapshot};
pub use signaling::{
    Ack, ClientEnvelope, ClientRequest, FinishInitAck, IceServerConfig, IceTransportPolicy,
    MessageKind, ResponseError, ResponsePayload, ServerMessage,
};
