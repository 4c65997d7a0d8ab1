// Octabox - Library exports for tests and benchmarks

pub mod audio;
pub mod display;
pub mod hal;
pub mod input;
pub mod instrument;
pub mod messaging;
pub mod sequencer;
pub mod serial;
pub mod synth;

// Re-export commonly used types for convenience
pub use audio::engine::AudioEngine;
pub use hal::{BeatLamp, DacOutput, GlyphDisplay, GlyphLatch, LampLatch, SampleLatch};
pub use input::keys::{KeyEvent, KeyScanner};
pub use instrument::{Instrument, ToneSettings};
pub use messaging::channels::{create_byte_channel, create_tone_channel};
pub use messaging::command::ToneCommand;
pub use sequencer::{
    BeatClock, NoteEvent, Patch, SequenceBuffer, Transport, TransportMode, DEMO_SONG,
};
pub use serial::console::Console;
pub use serial::queue::{create_tx_queue, SharedTxQueue, TxQueue};
pub use synth::pitch::{Note, Octave, CLOCK_HZ};
pub use synth::tone::{ToneGenerator, Waveform};
