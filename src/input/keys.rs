// Key scanner - resolves raw port samples into note events

use crate::synth::pitch::Note;

/// Outcome of one key-port sample: voice a note or fall silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Sound(Note),
    Silence,
}

/// Edge detector over the 8-bit key mask.
///
/// At most one event per sample. Ties break toward the lowest-indexed newly
/// pressed key; a release that leaves other keys held re-voices the lowest
/// one still down.
#[derive(Debug, Default)]
pub struct KeyScanner {
    previous: u8,
}

impl KeyScanner {
    pub fn new() -> Self {
        Self { previous: 0 }
    }

    /// Feed one port sample. The previous mask updates unconditionally, so
    /// edges suppressed by the caller (playback running) do not fire later.
    pub fn scan(&mut self, current: u8) -> Option<KeyEvent> {
        let previous = self.previous;
        self.previous = current;

        if current == previous {
            return None;
        }
        if current == 0 {
            return Some(KeyEvent::Silence);
        }

        let newly_set = current & (current ^ previous);
        let winner = if newly_set != 0 { newly_set } else { current };
        Note::from_index(winner.trailing_zeros() as u8).map(KeyEvent::Sound)
    }

    pub fn previous_mask(&self) -> u8 {
        self.previous
    }
}
