// Transmit queue - 64-byte circular buffer feeding the serial pump

use std::sync::{Arc, Mutex};

/// Transmit buffer capacity in bytes.
pub const TX_CAPACITY: usize = 64;

/// Circular transmit queue.
///
/// Writers enqueue at the insert index; the pump takes the oldest byte. A
/// full queue drops new bytes, an empty queue disarms the pump, and
/// enqueueing re-arms it. All index arithmetic is explicit modulo over the
/// fixed capacity.
#[derive(Debug)]
pub struct TxQueue {
    buf: [u8; TX_CAPACITY],
    insert: usize,
    count: usize,
    armed: bool,
}

impl TxQueue {
    pub fn new() -> Self {
        Self {
            buf: [0; TX_CAPACITY],
            insert: 0,
            count: 0,
            armed: false,
        }
    }

    /// Queue one byte for transmit. A full queue drops the byte and
    /// reports false.
    pub fn enqueue(&mut self, byte: u8) -> bool {
        if self.count == TX_CAPACITY {
            return false;
        }
        self.buf[self.insert] = byte;
        self.insert = (self.insert + 1) % TX_CAPACITY;
        self.count += 1;
        self.armed = true;
        true
    }

    /// Queue a whole string. Bytes past a full queue drop individually.
    pub fn enqueue_str(&mut self, text: &str) {
        for &byte in text.as_bytes() {
            self.enqueue(byte);
        }
    }

    /// Hand the oldest byte to the pump. An empty queue disarms and
    /// returns None.
    pub fn take(&mut self) -> Option<u8> {
        if self.count == 0 {
            self.armed = false;
            return None;
        }
        let read = (self.insert + TX_CAPACITY - self.count) % TX_CAPACITY;
        self.count -= 1;
        Some(self.buf[read])
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether the pump has work scheduled.
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl Default for TxQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Queue handle shared between the tick thread and the pump thread.
pub type SharedTxQueue = Arc<Mutex<TxQueue>>;

pub fn create_tx_queue() -> SharedTxQueue {
    Arc::new(Mutex::new(TxQueue::new()))
}
