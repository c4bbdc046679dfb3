use crate::engine::Track;
use crate::registry::participant::Participant;
use crate::view::View;
use huddle_core::{ParticipantId, ProducerId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Remote participants and their tracks, kept in step with the [`View`].
///
/// A participant exists exactly while it owns at least one track. The producer index records
/// which participant owns each producer, since remove notifications only name the producer.
pub struct ParticipantRegistry {
    participants: HashMap<ParticipantId, Participant>,
    producers: HashMap<ProducerId, ParticipantId>,
    view: Arc<dyn View>,
}

impl ParticipantRegistry {
    pub fn new(view: Arc<dyn View>) -> Self {
        Self {
            participants: HashMap::new(),
            producers: HashMap::new(),
            view,
        }
    }

    /// Register `track` for `producer_id`. Returns `false` if the exact same entry already exists.
    ///
    /// A known producer arriving with a different track or owner replaces the old entry.
    pub fn add_track(
        &mut self,
        participant_id: ParticipantId,
        producer_id: ProducerId,
        track: Track,
    ) -> bool {
        if let Some(owner) = self.producers.get(&producer_id).cloned() {
            if owner != participant_id {
                self.remove_track(&owner, &producer_id);
            } else if let Some(participant) = self.participants.get_mut(&owner) {
                if participant.track(&producer_id) == Some(&track) {
                    debug!("Track for producer {} already registered", producer_id);
                    return false;
                }
                // Same owner: swap in place so the participant never disappears.
                if let Some(old) = participant.insert(producer_id, track.clone()) {
                    self.view.track_removed(&owner, &old);
                }
                self.view.track_added(&owner, &track);
                return true;
            }
        }

        let participant = self
            .participants
            .entry(participant_id.clone())
            .or_insert_with(|| {
                info!("Participant {} appeared", participant_id);
                Participant::new(participant_id.clone())
            });
        participant.insert(producer_id.clone(), track.clone());
        self.producers.insert(producer_id, participant_id.clone());

        self.view.track_added(&participant_id, &track);
        true
    }

    /// Drop the track behind `producer_id`. Unknown producers are ignored.
    pub fn remove_track(
        &mut self,
        participant_id: &ParticipantId,
        producer_id: &ProducerId,
    ) -> Option<Track> {
        let Some(owner) = self.producers.remove(producer_id) else {
            debug!(
                "Ignoring removal of unknown producer {} ({})",
                producer_id, participant_id
            );
            return None;
        };
        if &owner != participant_id {
            warn!(
                "Producer {} is owned by {}, not {}; removing from owner",
                producer_id, owner, participant_id
            );
        }

        let participant = self.participants.get_mut(&owner)?;
        let track = participant.remove(producer_id)?;
        let now_empty = participant.is_empty();

        self.view.track_removed(&owner, &track);

        if now_empty {
            self.participants.remove(&owner);
            info!("Participant {} left (no tracks)", owner);
            self.view.participant_removed(&owner);
        }
        Some(track)
    }

    /// Tear down every participant, telling the view about each track and participant.
    pub fn clear(&mut self) {
        for (id, mut participant) in self.participants.drain() {
            for (_, track) in participant.drain() {
                self.view.track_removed(&id, &track);
            }
            self.view.participant_removed(&id);
        }
        self.producers.clear();
    }

    pub fn participant(&self, participant_id: &ParticipantId) -> Option<&Participant> {
        self.participants.get(participant_id)
    }

    pub fn owner_of(&self, producer_id: &ProducerId) -> Option<&ParticipantId> {
        self.producers.get(producer_id)
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
