// Segment display - glyph codes for the two-digit readout

use crate::synth::pitch::{Note, Octave};

/// Segment patterns: note letters C D E F G A B C, then numerals 4 5 6.
const SEGMENT_CODES: [u8; 11] = [
    0xB9, 0xDE, 0xF9, 0xF1, 0xBD, 0xF7, 0xFC, 0xB9, 0x66, 0x6D, 0x7D,
];

/// Index of the numeral glyphs within the code table.
const NUMERAL_BASE: usize = 8;

/// The digit being refreshed this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Digit {
    /// Left digit: the note letter.
    Letter,
    /// Right digit: the octave numeral.
    Numeral,
}

/// Glyph for one digit. A silent instrument blanks both digits.
pub fn glyph(note: Option<Note>, digit: Digit, octave: Octave) -> u8 {
    match (note, digit) {
        (None, _) => 0,
        (Some(note), Digit::Letter) => SEGMENT_CODES[note.index() as usize],
        (Some(note), Digit::Numeral) => {
            SEGMENT_CODES[NUMERAL_BASE + usize::from(octave.numeral(note)) - 4]
        }
    }
}
