// Messaging module - bounded channels between contexts

pub mod channels;
pub mod command;

pub use channels::{
    ByteConsumer, ByteProducer, ToneCommandConsumer, ToneCommandProducer, create_byte_channel,
    create_tone_channel,
};
pub use command::ToneCommand;
