mod participant;
mod participant_registry;

pub use participant::*;
pub use participant_registry::*;
