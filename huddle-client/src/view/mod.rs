use crate::engine::Track;
use huddle_core::ParticipantId;

/// Whatever renders remote media. Receives plain ids and track handles, returns nothing.
pub trait View: Send + Sync {
    fn track_added(&self, participant_id: &ParticipantId, track: &Track);

    fn track_removed(&self, participant_id: &ParticipantId, track: &Track);

    fn participant_removed(&self, participant_id: &ParticipantId);
}
