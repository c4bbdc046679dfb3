mod correlation_key;
mod request_correlator;

pub use correlation_key::*;
pub use request_correlator::*;
