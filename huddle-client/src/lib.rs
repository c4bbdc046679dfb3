mod channel;
mod correlator;
mod engine;
mod error;
mod registry;
mod session;
mod view;

pub use channel::*;
pub use correlator::*;
pub use engine::*;
pub use error::*;
pub use registry::*;
pub use session::*;
pub use view::*;
