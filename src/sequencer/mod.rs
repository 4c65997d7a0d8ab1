// Sequencer module - beat clock, recording buffer and transport

pub mod buffer;
pub mod metronome;
pub mod song;
pub mod transport;

pub use buffer::{NoteEvent, SEQUENCE_CAPACITY, SequenceBuffer};
pub use metronome::{BEAT_PERIOD_TICKS, BeatClock, LAMP_WINDOW_TICKS};
pub use song::DEMO_SONG;
pub use transport::{Patch, PlaybackStep, Transport, TransportMode};
