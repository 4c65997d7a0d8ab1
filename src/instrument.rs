// Instrument - the 1 ms tick scheduler tying every component together
//
// Tick order is fixed: keys, beat, display, sequencer. Each tick runs to
// completion on the tick thread; serial command bytes are dispatched between
// ticks on the same thread, so no handler ever observes another mid-flight.

use crate::display::{self, Digit};
use crate::hal::{BeatLamp, GlyphDisplay};
use crate::input::keys::{KeyEvent, KeyScanner};
use crate::messaging::channels::ToneCommandProducer;
use crate::messaging::command::ToneCommand;
use crate::sequencer::metronome::BeatClock;
use crate::sequencer::song::DEMO_SONG;
use crate::sequencer::transport::{Patch, Transport};
use crate::serial::commands::{self, CommandAction};
use crate::serial::console::Console;
use crate::synth::pitch::{Note, Octave};
use crate::synth::tone::{TRI_STEPS_DEFAULT, TRI_STEPS_MAX, TRI_STEPS_MIN, Waveform};
use ringbuf::traits::Producer;

/// Live tone settings owned by the scheduler. Playback swaps the shape and
/// octave for the recorded ones and restores them afterwards; the triangle
/// step count rides along untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneSettings {
    pub shape: Waveform,
    pub octave: Octave,
    pub tri_steps: u8,
}

impl ToneSettings {
    pub fn patch(&self) -> Patch {
        Patch {
            shape: self.shape,
            octave: self.octave,
        }
    }

    fn apply(&mut self, patch: Patch) {
        self.shape = patch.shape;
        self.octave = patch.octave;
    }
}

impl Default for ToneSettings {
    fn default() -> Self {
        Self {
            shape: Waveform::Square,
            octave: Octave::Low,
            tri_steps: TRI_STEPS_DEFAULT,
        }
    }
}

pub struct Instrument<D: GlyphDisplay, L: BeatLamp> {
    scanner: KeyScanner,
    beat: BeatClock,
    transport: Transport,
    console: Console,
    settings: ToneSettings,
    active: Option<Note>,
    display: D,
    lamp: L,
    left_digit: bool,
    tone_tx: ToneCommandProducer,
}

impl<D: GlyphDisplay, L: BeatLamp> Instrument<D, L> {
    pub fn new(console: Console, display: D, lamp: L, tone_tx: ToneCommandProducer) -> Self {
        Self {
            scanner: KeyScanner::new(),
            beat: BeatClock::new(),
            transport: Transport::new(),
            console,
            settings: ToneSettings::default(),
            active: None,
            display,
            lamp,
            left_digit: true,
            tone_tx,
        }
    }

    /// One scheduler tick: scan the key port, advance the beat, refresh one
    /// display digit, step the sequencer.
    pub fn tick(&mut self, key_sample: u8) {
        let key_event = self.scanner.scan(key_sample);
        if self.transport.mode().is_playback_idle() {
            match key_event {
                Some(KeyEvent::Sound(note)) => {
                    self.voice(Some(note));
                    self.transport.capture(note);
                }
                Some(KeyEvent::Silence) => self.voice(None),
                None => {}
            }
        }

        self.beat.tick();
        self.lamp.set_lit(self.beat.lamp_on());

        self.refresh_display();

        if let Some(step) = self.transport.step(self.beat.phase()) {
            self.voice(step.voice);
            if let Some(patch) = step.restore {
                self.settings.apply(patch);
            }
        }
    }

    /// Dispatch one received serial byte.
    pub fn handle_command(&mut self, byte: u8) {
        if let Some(action) = commands::decode(byte) {
            self.dispatch(action);
        }
    }

    fn dispatch(&mut self, action: CommandAction) {
        match action {
            CommandAction::ToggleTriangle => self.toggle_waveform(Waveform::Triangle),
            CommandAction::ToggleSine => self.toggle_waveform(Waveform::Sine),
            CommandAction::TriangleStepsDown => {
                if self.settings.tri_steps > TRI_STEPS_MIN {
                    self.settings.tri_steps -= 1;
                }
            }
            CommandAction::TriangleStepsUp => {
                if self.settings.tri_steps < TRI_STEPS_MAX {
                    self.settings.tri_steps += 1;
                }
            }
            CommandAction::ToggleOctave => {
                if !self.transport.mode().is_recording() {
                    self.settings.octave = self.settings.octave.toggled();
                    self.console.status("\r\n-OctaveToggle- ");
                }
            }
            CommandAction::ToggleRecording => self.toggle_recording(),
            CommandAction::StartPlayback => self.start_playback(),
            CommandAction::StartDemo => self.start_demo(),
        }
    }

    /// Switch to the target shape, or back to square when it is already
    /// selected, and retune whatever is sounding. Locked out while recording
    /// so the recorded patch stays coherent.
    fn toggle_waveform(&mut self, target: Waveform) {
        if self.transport.mode().is_recording() {
            return;
        }
        self.settings.shape = if self.settings.shape == target {
            Waveform::Square
        } else {
            target
        };
        // The waveform state rewinds before the new shape takes over;
        // a plain retune would carry the old amplitude across shapes
        if self.active.is_some() {
            let _ = self.tone_tx.try_push(ToneCommand::Stop);
        }
        self.retune(self.active);
    }

    fn toggle_recording(&mut self) {
        if !self.transport.mode().is_playback_idle() {
            return;
        }
        if self.transport.mode().is_recording() {
            self.transport.record_stop();
            self.console.status(" -RecordingStop-");
        } else if self
            .transport
            .record_start(self.settings.patch(), self.beat.phase())
        {
            self.console.status(" -RecordingStart-");
        }
    }

    fn start_playback(&mut self) {
        if let Some(patch) = self.transport.begin_playback(self.settings.patch()) {
            self.settings.apply(patch);
            self.console.status(" -playbackStart-");
        }
    }

    fn start_demo(&mut self) {
        let demo_patch = Patch {
            shape: self.settings.shape,
            octave: Octave::Low,
        };
        if self.transport.load(&DEMO_SONG, demo_patch, 0) {
            self.console.status("\r\n-DemoTune- ");
            if let Some(patch) = self.transport.begin_playback(self.settings.patch()) {
                self.settings.apply(patch);
            }
        }
    }

    /// Voice a note the way a key press does: retune the tone and print the
    /// label. Silence retunes without printing.
    fn voice(&mut self, note: Option<Note>) {
        self.retune(note);
        if let Some(note) = note {
            self.console
                .note(note, self.settings.octave, self.beat.near_beat());
        }
    }

    /// Point the tone generator at a note, or stop it. A full channel drops
    /// the command.
    fn retune(&mut self, note: Option<Note>) {
        self.active = note;
        let command = match note {
            Some(note) => ToneCommand::Start {
                note,
                octave: self.settings.octave,
                shape: self.settings.shape,
                tri_steps: self.settings.tri_steps,
            },
            None => ToneCommand::Stop,
        };
        let _ = self.tone_tx.try_push(command);
    }

    fn refresh_display(&mut self) {
        let digit = if self.left_digit {
            Digit::Letter
        } else {
            Digit::Numeral
        };
        let code = display::glyph(self.active, digit, self.settings.octave);
        self.display.set_glyph(code);
        self.left_digit = !self.left_digit;
    }

    pub fn settings(&self) -> ToneSettings {
        self.settings
    }

    pub fn active_note(&self) -> Option<Note> {
        self.active
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn beat(&self) -> &BeatClock {
        &self.beat
    }
}
