use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use octabox::synth::pitch::period_cycles;
use octabox::synth::tone::TRI_STEPS_DEFAULT;
use octabox::{
    Console, GlyphLatch, Instrument, LampLatch, Note, Octave, SampleLatch, ToneGenerator, TxQueue,
    Waveform, create_tone_channel, create_tx_queue,
};

/// Benchmark tone stepping per waveform (runs inside the audio callback)
fn bench_tone_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("tone_step");
    let steps_per_iter = 512;

    for shape in [Waveform::Square, Waveform::Triangle, Waveform::Sine] {
        let mut tone = ToneGenerator::new();
        let mut dac = SampleLatch::new();
        tone.start(Note::A, Octave::Low, shape, TRI_STEPS_DEFAULT);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", shape)),
            &steps_per_iter,
            |b, &count| {
                b.iter(|| {
                    for _ in 0..count {
                        tone.step(&mut dac);
                        black_box(dac.level());
                    }
                });
            },
        );
    }
    group.finish();
}

/// Benchmark period lookup across the whole keyboard
fn bench_period_lookup(c: &mut Criterion) {
    c.bench_function("period_lookup_all_notes", |b| {
        b.iter(|| {
            for index in 0..8u8 {
                if let Some(note) = Note::from_index(index) {
                    black_box(period_cycles(
                        black_box(note),
                        Octave::High,
                        Waveform::Sine,
                        TRI_STEPS_DEFAULT,
                    ));
                }
            }
        });
    });
}

/// Benchmark one scheduler tick (must fit well inside a millisecond)
fn bench_instrument_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("instrument_tick");

    group.bench_function("idle", |b| {
        let (tone_tx, _tone_rx) = create_tone_channel(1024);
        let mut instrument = Instrument::new(
            Console::new(create_tx_queue()),
            GlyphLatch::new(),
            LampLatch::new(),
            tone_tx,
        );
        b.iter(|| instrument.tick(black_box(0)));
    });

    group.bench_function("key_chatter", |b| {
        let (tone_tx, _tone_rx) = create_tone_channel(1024);
        let mut instrument = Instrument::new(
            Console::new(create_tx_queue()),
            GlyphLatch::new(),
            LampLatch::new(),
            tone_tx,
        );
        let mut mask = 0u8;
        b.iter(|| {
            mask = mask.wrapping_add(1);
            instrument.tick(black_box(mask));
        });
    });

    group.finish();
}

/// Benchmark transmit queue churn (touched from two threads in the host)
fn bench_tx_queue(c: &mut Criterion) {
    c.bench_function("tx_queue_enqueue_take", |b| {
        let mut queue = TxQueue::new();
        b.iter(|| {
            for byte in 0..48u8 {
                queue.enqueue(black_box(byte));
            }
            while let Some(byte) = queue.take() {
                black_box(byte);
            }
        });
    });
}

criterion_group!(
    benches,
    bench_tone_step,
    bench_period_lookup,
    bench_instrument_tick,
    bench_tx_queue
);
criterion_main!(benches);
