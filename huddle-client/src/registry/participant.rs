use crate::engine::Track;
use huddle_core::{ParticipantId, ProducerId};
use std::collections::HashMap;

/// A remote room member and the tracks it currently contributes, keyed by producer.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    id: ParticipantId,
    tracks: HashMap<ProducerId, Track>,
}

impl Participant {
    pub(crate) fn new(id: ParticipantId) -> Self {
        Self {
            id,
            tracks: HashMap::new(),
        }
    }

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn track(&self, producer_id: &ProducerId) -> Option<&Track> {
        self.tracks.get(producer_id)
    }

    pub fn tracks(&self) -> impl Iterator<Item = (&ProducerId, &Track)> {
        self.tracks.iter()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub(crate) fn insert(&mut self, producer_id: ProducerId, track: Track) -> Option<Track> {
        self.tracks.insert(producer_id, track)
    }

    pub(crate) fn remove(&mut self, producer_id: &ProducerId) -> Option<Track> {
        self.tracks.remove(producer_id)
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (ProducerId, Track)> + '_ {
        self.tracks.drain()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
