// Audio module - CPAL backend and the real-time callback

pub mod engine;

pub use engine::{AudioEngine, AudioError, AudioResult};
