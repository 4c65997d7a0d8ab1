// Pitch - the note period table and its derivation rules

use super::tone::Waveform;

/// Master clock the period table is expressed in, in Hz.
pub const CLOCK_HZ: u32 = 8_000_000;

/// Timer periods in clock cycles for one octave starting at middle C.
/// Each entry is the interval between square-wave toggles, so the audible
/// frequency is `CLOCK_HZ / (2 * period)`.
const NOTE_PERIODS: [u16; Note::COUNT] = [
    15_287, 13_620, 12_133, 11_452, 10_203, 9_089, 8_098, 7_643,
];

/// One key of the eight-key octave, middle C up to the C above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Note {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
    HighC,
}

impl Note {
    pub const COUNT: usize = 8;

    /// Map a raw key index to a note. Anything past the top key is None.
    pub fn from_index(index: u8) -> Option<Note> {
        match index {
            0 => Some(Note::C),
            1 => Some(Note::D),
            2 => Some(Note::E),
            3 => Some(Note::F),
            4 => Some(Note::G),
            5 => Some(Note::A),
            6 => Some(Note::B),
            7 => Some(Note::HighC),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Letter used on the console and the display.
    pub fn letter(self) -> char {
        match self {
            Note::C | Note::HighC => 'C',
            Note::D => 'D',
            Note::E => 'E',
            Note::F => 'F',
            Note::G => 'G',
            Note::A => 'A',
            Note::B => 'B',
        }
    }
}

/// Which octave the eight keys cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Octave {
    Low,
    High,
}

impl Octave {
    pub fn toggled(self) -> Octave {
        match self {
            Octave::Low => Octave::High,
            Octave::High => Octave::Low,
        }
    }

    /// Numeral printed or displayed beside a note letter. The top key sits
    /// one octave number above the rest of the row.
    pub fn numeral(self, note: Note) -> u8 {
        let base = match self {
            Octave::Low => 4,
            Octave::High => 5,
        };
        if note == Note::HighC { base + 1 } else { base }
    }
}

impl Default for Octave {
    fn default() -> Self {
        Octave::Low
    }
}

/// Timer period in clock cycles for a note under the given settings.
///
/// Triangle subdivides the base period by its step count, sine by half the
/// table length (16 steps per half cycle), and the upper octave halves the
/// result. Square uses the base period as-is.
pub fn period_cycles(note: Note, octave: Octave, shape: Waveform, tri_steps: u8) -> u32 {
    let mut period = u32::from(NOTE_PERIODS[note.index() as usize]);
    period /= match shape {
        Waveform::Square => 1,
        Waveform::Triangle => u32::from(tri_steps),
        Waveform::Sine => 16,
    };
    if octave == Octave::High {
        period /= 2;
    }
    period
}
