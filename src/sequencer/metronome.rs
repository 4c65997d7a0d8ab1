// Beat clock - the 120 bpm reference everything sequenced locks to

/// Ticks per beat period on the 1 ms scheduler.
pub const BEAT_PERIOD_TICKS: u16 = 499;

/// The lamp is lit for the first stretch of each beat (20% duty).
pub const LAMP_WINDOW_TICKS: u16 = 100;

/// Ticks either side of the beat edge that still count as "on the beat"
/// for console casing.
const NEAR_BEAT_TICKS: u16 = 50;

/// Beat phase counter: advances once per tick, wraps 498 -> 0.
#[derive(Debug, Default)]
pub struct BeatClock {
    phase: u16,
}

impl BeatClock {
    pub fn new() -> Self {
        Self { phase: 0 }
    }

    pub fn tick(&mut self) {
        self.phase += 1;
        if self.phase == BEAT_PERIOD_TICKS {
            self.phase = 0;
        }
    }

    pub fn phase(&self) -> u16 {
        self.phase
    }

    /// True while the beat lamp should be lit.
    pub fn lamp_on(&self) -> bool {
        self.phase < LAMP_WINDOW_TICKS
    }

    /// True within 50 ticks of the beat edge, on either side.
    pub fn near_beat(&self) -> bool {
        self.phase > BEAT_PERIOD_TICKS - NEAR_BEAT_TICKS || self.phase <= NEAR_BEAT_TICKS
    }
}
