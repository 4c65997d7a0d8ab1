// Tone generator - the waveform state machine behind the speaker
//
// `step` plays the role of the tone-timer interrupt: one call per elapsed
// period advances the amplitude by a single increment of the selected shape
// and latches it on the DAC. The pacing itself lives with whoever owns the
// generator (the audio callback in the hosted build).

use super::pitch::{self, Note, Octave};
use crate::hal::DacOutput;

pub const TRI_STEPS_MIN: u8 = 4;
pub const TRI_STEPS_MAX: u8 = 16;
pub const TRI_STEPS_DEFAULT: u8 = 8;

/// Entries in the sine table, one full cycle.
const SINE_STEPS: usize = 32;

/// Precomputed 8-bit sine cycle, kept verbatim from the lookup data
/// (including the 127 at the halfway entry).
const SINE_TABLE: [u8; SINE_STEPS] = [
    128, 176, 218, 246, 255, 246, 218, 176, 128, 79, 37, 9, 0, 9, 37, 79, 127, 176, 218, 246, 255,
    246, 218, 176, 128, 79, 37, 9, 0, 9, 37, 79,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Square,
    Triangle,
    Sine,
}

/// Monophonic tone generator.
///
/// Starting a note loads a new period without rewinding the amplitude state;
/// only `stop` resets it. That mirrors the way a retuned hardware timer keeps
/// counting from wherever the waveform was.
#[derive(Debug)]
pub struct ToneGenerator {
    shape: Waveform,
    amplitude: u8,
    rising: bool,
    sine_index: u8,
    tri_steps: u8,
    period: u32,
    running: bool,
}

impl ToneGenerator {
    pub fn new() -> Self {
        Self {
            shape: Waveform::Square,
            amplitude: 0,
            rising: true,
            sine_index: 0,
            tri_steps: TRI_STEPS_DEFAULT,
            period: 0,
            running: false,
        }
    }

    /// Load the timer period for a note and begin stepping.
    pub fn start(&mut self, note: Note, octave: Octave, shape: Waveform, tri_steps: u8) {
        let tri_steps = tri_steps.clamp(TRI_STEPS_MIN, TRI_STEPS_MAX);
        self.shape = shape;
        self.tri_steps = tri_steps;
        self.period = pitch::period_cycles(note, octave, shape, tri_steps);
        self.running = true;
    }

    /// Halt stepping and rewind the amplitude state.
    pub fn stop(&mut self) {
        self.running = false;
        self.amplitude = 0;
        self.rising = true;
        self.sine_index = 0;
    }

    /// Advance the waveform by one increment and latch the sample.
    pub fn step(&mut self, dac: &mut impl DacOutput) {
        match self.shape {
            Waveform::Square => {
                self.amplitude = 255 - self.amplitude;
            }
            Waveform::Triangle => {
                let delta = (256 / u16::from(self.tri_steps)) as u8;
                if self.rising {
                    self.amplitude = self.amplitude.saturating_add(delta);
                    if self.amplitude > 254 {
                        self.amplitude = 255;
                        self.rising = false;
                    }
                } else {
                    self.amplitude = self.amplitude.saturating_sub(delta);
                    if self.amplitude < 1 {
                        self.amplitude = 0;
                        self.rising = true;
                    }
                }
            }
            Waveform::Sine => {
                self.sine_index = (self.sine_index + 1) % SINE_STEPS as u8;
                self.amplitude = SINE_TABLE[self.sine_index as usize];
            }
        }
        dac.output(self.amplitude);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current timer period in clock cycles. Zero until the first start.
    pub fn period_cycles(&self) -> u32 {
        self.period
    }

    pub fn amplitude(&self) -> u8 {
        self.amplitude
    }

    pub fn shape(&self) -> Waveform {
        self.shape
    }
}

impl Default for ToneGenerator {
    fn default() -> Self {
        Self::new()
    }
}
