use std::fmt;

/// Room lifecycle. Moves forward only, except that leaving and failed joins return to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Joining,
    CapabilitiesLoaded,
    ProducerTransportReady,
    Active,
    Left,
}

impl SessionState {
    fn rank(self) -> u8 {
        match self {
            SessionState::Idle => 0,
            SessionState::Joining => 1,
            SessionState::CapabilitiesLoaded => 2,
            SessionState::ProducerTransportReady => 3,
            SessionState::Active => 4,
            SessionState::Left => 5,
        }
    }

    /// True between receiving a room snapshot and becoming `Active`.
    pub fn is_joining(self) -> bool {
        matches!(
            self,
            SessionState::Joining
                | SessionState::CapabilitiesLoaded
                | SessionState::ProducerTransportReady
        )
    }

    /// True from the snapshot until the leave sequence starts.
    pub fn is_in_room(self) -> bool {
        self.is_joining() || self == SessionState::Active
    }

    pub fn can_transition_to(self, next: SessionState) -> bool {
        match (self, next) {
            (SessionState::Left, SessionState::Idle) => true,
            (from, SessionState::Idle) => from.is_joining(),
            (from, to) => to.rank() > from.rank(),
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Joining => "joining",
            SessionState::CapabilitiesLoaded => "capabilities-loaded",
            SessionState::ProducerTransportReady => "producer-transport-ready",
            SessionState::Active => "active",
            SessionState::Left => "left",
        };
        f.write_str(name)
    }
}
