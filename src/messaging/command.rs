// Command types - scheduler tick thread → audio callback

use crate::synth::pitch::{Note, Octave};
use crate::synth::tone::Waveform;

/// Everything the tone generator can be told. `Start` carries a snapshot of
/// the live settings so the callback never reads scheduler state.
#[derive(Debug, Clone, Copy)]
pub enum ToneCommand {
    Start {
        note: Note,
        octave: Octave,
        shape: Waveform,
        tri_steps: u8,
    },
    Stop,
}
