// Synth module - pitch table and the tone generator

pub mod pitch;
pub mod tone;

pub use pitch::{CLOCK_HZ, Note, Octave};
pub use tone::{ToneGenerator, Waveform};
