// Console output - note labels and status text through the transmit queue

use super::queue::SharedTxQueue;
use crate::synth::pitch::{Note, Octave};

/// Note labels per line before a CRLF is inserted.
const LABELS_PER_LINE: u8 = 20;

/// Formats instrument activity onto the serial line.
///
/// Note labels read like ` C4`: uppercase when the note lands near the
/// beat, lowercase otherwise. A line break follows every twentieth label.
pub struct Console {
    tx: SharedTxQueue,
    labels: u8,
}

impl Console {
    pub fn new(tx: SharedTxQueue) -> Self {
        Self { tx, labels: 0 }
    }

    /// Print one voiced note.
    pub fn note(&mut self, note: Note, octave: Octave, near_beat: bool) {
        let letter = if near_beat {
            note.letter()
        } else {
            note.letter().to_ascii_lowercase()
        };
        let label = [b' ', letter as u8, b'0' + octave.numeral(note)];
        if let Ok(mut queue) = self.tx.lock() {
            for byte in label {
                queue.enqueue(byte);
            }
        }

        self.labels += 1;
        if self.labels >= LABELS_PER_LINE {
            self.labels = 0;
            self.status("\r\n");
        }
    }

    /// Print a status marker, e.g. ` -RecordingStart-`.
    pub fn status(&mut self, text: &str) {
        if let Ok(mut queue) = self.tx.lock() {
            queue.enqueue_str(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serial::queue::create_tx_queue;

    fn drain(tx: &SharedTxQueue) -> String {
        let mut queue = tx.lock().unwrap();
        let bytes: Vec<u8> = std::iter::from_fn(|| queue.take()).collect();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_note_label_casing_follows_the_beat() {
        let tx = create_tx_queue();
        let mut console = Console::new(tx.clone());

        console.note(Note::C, Octave::Low, true);
        console.note(Note::C, Octave::Low, false);
        assert_eq!(drain(&tx), " C4 c4");
    }

    #[test]
    fn test_octave_numerals_in_labels() {
        let tx = create_tx_queue();
        let mut console = Console::new(tx.clone());

        console.note(Note::HighC, Octave::Low, true);
        console.note(Note::A, Octave::High, true);
        console.note(Note::HighC, Octave::High, true);
        assert_eq!(drain(&tx), " C5 A5 C6");
    }

    #[test]
    fn test_line_break_after_twenty_labels() {
        let tx = create_tx_queue();
        let mut console = Console::new(tx.clone());

        for _ in 0..21 {
            console.note(Note::D, Octave::Low, false);
        }
        let text = drain(&tx);
        assert_eq!(text.matches("\r\n").count(), 1);
        assert!(text.ends_with(" d4"));
        // 21 labels of 3 bytes plus one CRLF
        assert_eq!(text.len(), 21 * 3 + 2);
    }

    #[test]
    fn test_status_passes_through() {
        let tx = create_tx_queue();
        let mut console = Console::new(tx.clone());

        console.status(" -RecordingStart-");
        assert_eq!(drain(&tx), " -RecordingStart-");
    }
}
