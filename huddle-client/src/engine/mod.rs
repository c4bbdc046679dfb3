mod media_engine;
mod negotiation;
mod track;

pub use media_engine::*;
pub use negotiation::*;
pub use track::*;
