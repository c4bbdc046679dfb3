pub use huddle_core::{ParticipantId, ProducerId, RoomId};

pub mod model {
    pub use huddle_core::model::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use huddle_client::*;
}
