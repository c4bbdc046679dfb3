use huddle_core::{ConsumerId, MediaKind, ProducerId};

/// Engine-owned media track, referred to by id. The engine maps ids to its native objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Track {
    pub id: String,
    pub kind: MediaKind,
}

impl Track {
    pub fn new(id: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

/// A local track published through the send transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Producer {
    pub id: ProducerId,
    pub track: Track,
}

/// A remote producer received on the receive transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Consumer {
    pub id: ConsumerId,
    pub producer_id: ProducerId,
    pub track: Track,
}
