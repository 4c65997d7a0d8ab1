// Sequence buffer - bounded storage for recorded note events

use crate::synth::pitch::Note;

/// Capacity of the recording buffer, in events.
pub const SEQUENCE_CAPACITY: usize = 24;

/// One recorded event: the note voiced (None for a rest) and the gap that
/// preceded it, in 10 ms units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub note: Option<Note>,
    pub duration: u8,
}

/// Fixed-capacity event store: appended at the tail while recording, drained
/// from the tail during playback.
#[derive(Debug)]
pub struct SequenceBuffer {
    events: [NoteEvent; SEQUENCE_CAPACITY],
    len: usize,
}

impl SequenceBuffer {
    pub fn new() -> Self {
        Self {
            events: [NoteEvent { note: None, duration: 0 }; SEQUENCE_CAPACITY],
            len: 0,
        }
    }

    /// Append one event. A full buffer stores nothing and reports false.
    pub fn push(&mut self, event: NoteEvent) -> bool {
        if self.len == SEQUENCE_CAPACITY {
            return false;
        }
        self.events[self.len] = event;
        self.len += 1;
        true
    }

    /// Remove and return the most recently stored event.
    pub fn pop(&mut self) -> Option<NoteEvent> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.events[self.len])
    }

    /// The oldest stored event, if any.
    pub fn head(&self) -> Option<NoteEvent> {
        if self.len == 0 {
            None
        } else {
            Some(self.events[0])
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == SEQUENCE_CAPACITY
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Stored events in record order.
    pub fn as_slice(&self) -> &[NoteEvent] {
        &self.events[..self.len]
    }
}

impl Default for SequenceBuffer {
    fn default() -> Self {
        Self::new()
    }
}
