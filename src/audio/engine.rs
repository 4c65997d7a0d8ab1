// Audio engine - CPAL output stream hosting the tone generator
//
// # Format Support
//
// The device's preferred sample format is detected via `sample_format()` and
// the matching stream type is built. Levels are produced as f32 internally
// and converted at the buffer write through CPAL's `FromSample` trait.
//
// # Timer emulation
//
// The tone timer is emulated inside the callback: every output frame accrues
// `CLOCK_HZ / sample_rate` cycles of budget, and the generator steps once per
// elapsed period. Stepping therefore stays cycle-accurate at any device rate,
// and the DAC latch holds the level between steps exactly as the hardware
// stage would.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig};
use ringbuf::traits::Consumer;
use thiserror::Error;

use crate::hal::SampleLatch;
use crate::messaging::channels::ToneCommandConsumer;
use crate::messaging::command::ToneCommand;
use crate::synth::pitch::CLOCK_HZ;
use crate::synth::tone::ToneGenerator;

/// Host-side audio failures. All of these are fatal at startup; the running
/// callback has no error path.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device available")]
    NoDevice,
    #[error("default stream config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),
    #[error("stream build: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("stream start: {0}")]
    Play(#[from] cpal::PlayStreamError),
    #[error("unsupported sample format: {0:?}")]
    UnsupportedFormat(SampleFormat),
}

pub type AudioResult<T> = Result<T, AudioError>;

/// Output scaling for the centered 8-bit level.
const OUTPUT_GAIN: f32 = 0.25;

pub struct AudioEngine {
    _device: Device,
    _stream: Stream,
    sample_rate: f32,
}

impl AudioEngine {
    /// Open the default output device and start the stream. The command
    /// consumer moves into the callback; the tick thread keeps the producer.
    pub fn new(command_rx: ToneCommandConsumer) -> AudioResult<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        println!(
            "Audio device: {}",
            device.name().unwrap_or("Unknown".to_string())
        );

        let supported_config = device.default_output_config()?;
        let sample_format = supported_config.sample_format();
        let sample_rate = supported_config.sample_rate().0 as f32;
        let channels = supported_config.channels() as usize;
        let config: StreamConfig = supported_config.into();

        let stream = match sample_format {
            SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &config, channels, sample_rate, command_rx)
            }
            SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &config, channels, sample_rate, command_rx)
            }
            SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &config, channels, sample_rate, command_rx)
            }
            other => return Err(AudioError::UnsupportedFormat(other)),
        }?;

        stream.play()?;

        println!("Audio engine started: {} Hz, {} channels", sample_rate, channels);

        Ok(Self {
            _device: device,
            _stream: stream,
            sample_rate,
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Build an output stream for one sample type. The callback owns the
    /// tone generator and its DAC latch outright.
    fn build_stream<T>(
        device: &Device,
        config: &StreamConfig,
        channels: usize,
        sample_rate: f32,
        mut command_rx: ToneCommandConsumer,
    ) -> AudioResult<Stream>
    where
        T: SizedSample + FromSample<f32> + Send + 'static,
    {
        let mut tone = ToneGenerator::new();
        let mut dac = SampleLatch::new();
        let cycles_per_frame = f64::from(CLOCK_HZ) / f64::from(sample_rate);
        let mut cycle_budget = 0.0f64;

        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                // ========== SACRED ZONE ==========
                // No allocations, No I/O, No blocking locks

                while let Some(command) = command_rx.try_pop() {
                    match command {
                        ToneCommand::Start {
                            note,
                            octave,
                            shape,
                            tri_steps,
                        } => tone.start(note, octave, shape, tri_steps),
                        ToneCommand::Stop => tone.stop(),
                    }
                }

                for frame in data.chunks_mut(channels) {
                    let level = if tone.is_running() {
                        cycle_budget += cycles_per_frame;
                        let period = f64::from(tone.period_cycles());
                        while cycle_budget >= period {
                            tone.step(&mut dac);
                            cycle_budget -= period;
                        }
                        (f32::from(dac.level()) - 128.0) / 128.0 * OUTPUT_GAIN
                    } else {
                        cycle_budget = 0.0;
                        0.0
                    };

                    let sample = T::from_sample(level);
                    for channel_sample in frame.iter_mut() {
                        *channel_sample = sample;
                    }
                }
                // ========== SACRED ZONE END ==========
            },
            move |err| {
                // Runs outside the audio callback, I/O is fine here
                eprintln!("Audio stream error: {}", err);
            },
            None,
        )?;

        Ok(stream)
    }
}
