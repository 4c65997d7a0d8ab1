// Demo song - built-in sequence behind the D command

use super::buffer::NoteEvent;
use crate::synth::pitch::Note;

/// Gap between demo events in stored 10 ms units: 50 replays as 500 ms,
/// one beat at 120 bpm.
const DEMO_GAP: u8 = 50;

const fn played(note: Note) -> NoteEvent {
    NoteEvent {
        note: Some(note),
        duration: DEMO_GAP,
    }
}

const fn rest() -> NoteEvent {
    NoteEvent {
        note: None,
        duration: DEMO_GAP,
    }
}

/// The demo melody in record order, rests separating the phrases. Playback
/// drains the buffer tail-first, so the audible order is reversed.
pub const DEMO_SONG: [NoteEvent; 16] = [
    played(Note::C),
    played(Note::C),
    played(Note::G),
    played(Note::G),
    played(Note::A),
    played(Note::A),
    played(Note::G),
    rest(),
    played(Note::F),
    played(Note::F),
    played(Note::E),
    played(Note::E),
    played(Note::D),
    played(Note::D),
    played(Note::C),
    rest(),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::buffer::SEQUENCE_CAPACITY;

    #[test]
    fn test_demo_fits_the_buffer() {
        assert!(DEMO_SONG.len() <= SEQUENCE_CAPACITY);
    }

    #[test]
    fn test_demo_layout() {
        assert_eq!(DEMO_SONG[0].note, Some(Note::C));
        assert_eq!(DEMO_SONG[7].note, None);
        assert_eq!(DEMO_SONG[15].note, None);
        assert!(DEMO_SONG.iter().all(|e| e.duration == DEMO_GAP));
    }
}
