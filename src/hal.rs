// Hardware abstraction - collaborator traits and host-side latches

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Analog output stage. One 8-bit sample per call, latched until the next
/// write. Implementations must return in bounded time and never block the
/// caller.
pub trait DacOutput {
    fn output(&mut self, sample: u8);
}

/// One digit of the two-digit segment display. The caller alternates digits,
/// one glyph per tick.
pub trait GlyphDisplay {
    fn set_glyph(&mut self, code: u8);
}

/// The beat indicator lamp.
pub trait BeatLamp {
    fn set_lit(&mut self, lit: bool);
}

/// DAC latch: holds the most recent sample the way a hardware DAC holds its
/// output level between writes.
#[derive(Debug)]
pub struct SampleLatch {
    level: u8,
}

impl SampleLatch {
    pub fn new() -> Self {
        Self { level: 0 }
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

impl Default for SampleLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl DacOutput for SampleLatch {
    fn output(&mut self, sample: u8) {
        self.level = sample;
    }
}

/// Shared glyph latch. Clones observe the same digit, so the front end can
/// read what the scheduler last wrote.
#[derive(Debug, Clone)]
pub struct GlyphLatch {
    code: Arc<AtomicU8>,
}

impl GlyphLatch {
    pub fn new() -> Self {
        Self {
            code: Arc::new(AtomicU8::new(0)),
        }
    }

    pub fn code(&self) -> u8 {
        self.code.load(Ordering::Relaxed)
    }
}

impl Default for GlyphLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphDisplay for GlyphLatch {
    fn set_glyph(&mut self, code: u8) {
        self.code.store(code, Ordering::Relaxed);
    }
}

/// Shared lamp latch.
#[derive(Debug, Clone)]
pub struct LampLatch {
    lit: Arc<AtomicBool>,
}

impl LampLatch {
    pub fn new() -> Self {
        Self {
            lit: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit.load(Ordering::Relaxed)
    }
}

impl Default for LampLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl BeatLamp for LampLatch {
    fn set_lit(&mut self, lit: bool) {
        self.lit.store(lit, Ordering::Relaxed);
    }
}
