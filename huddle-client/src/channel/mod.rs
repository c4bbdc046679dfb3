mod json_codec;
mod memory_channel;
mod message_channel;

pub use json_codec::*;
pub use memory_channel::*;
pub use message_channel::*;
