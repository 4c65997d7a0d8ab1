use octabox::{
    AudioEngine, Console, GlyphLatch, Instrument, LampLatch, create_byte_channel,
    create_tone_channel, create_tx_queue,
};
use ringbuf::traits::{Consumer, Producer};
use std::io::{Read, Write};
use std::time::{Duration, Instant};
use std::{io, thread};

// Ringbuffer capacity constants
// Sized for burst input through a line-buffered terminal:
// - a pasted line arrives all at once, tens of bytes
// - the tick thread drains the serial ring every millisecond
// - the tone ring never holds more than one command per tick
const TONE_RINGBUFFER_CAPACITY: usize = 64;
const SERIAL_RINGBUFFER_CAPACITY: usize = 64;

/// How long one typed digit holds its key down. Stdin is line buffered, so a
/// keystroke is a tap, not a held switch; 150 ms reads as a short note.
const TAP_TICKS: u16 = 150;

/// Scheduler tick period in milliseconds.
const TICK_MS: u64 = 1;

/// Pacing for the transmit pump: 9600 baud, 10 bits on the wire per byte.
const BYTE_TIME: Duration = Duration::from_micros(1042);

/// Pump poll interval while the queue is empty.
const PUMP_IDLE: Duration = Duration::from_millis(5);

fn main() {
    println!("=== Octabox ===");
    println!("One-octave instrument, hosted build\n");

    // Create the communication channels
    // Need 2 ringbufs: one for tone commands, one for received bytes
    let (tone_tx, tone_rx) = create_tone_channel(TONE_RINGBUFFER_CAPACITY);
    let (mut serial_tx, mut serial_rx) = create_byte_channel(SERIAL_RINGBUFFER_CAPACITY);

    println!("Audio engine initialisation...");
    let _audio_engine = match AudioEngine::new(tone_rx) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };

    println!("Type keys 1-8 and commands, then Enter. Ctrl+C quits.\n");

    // The transmit queue stands in for the UART. From here on, stdout belongs
    // to the pump thread; host diagnostics go to stderr.
    let tx_queue = create_tx_queue();
    if let Ok(mut queue) = tx_queue.lock() {
        queue.enqueue_str("\r\nReady\r\nKeys 1-8, commands T S D < > U R P\r\n");
    }

    // Pump thread: one byte at a time from the queue to stdout, paced like a
    // serial line.
    let pump_queue = tx_queue.clone();
    thread::spawn(move || {
        let mut stdout = io::stdout();
        loop {
            let byte = if let Ok(mut queue) = pump_queue.lock() {
                queue.take()
            } else {
                None
            };
            match byte {
                Some(byte) => {
                    let _ = stdout.write_all(&[byte]);
                    let _ = stdout.flush();
                    thread::sleep(BYTE_TIME);
                }
                None => thread::sleep(PUMP_IDLE),
            }
        }
    });

    // Reader thread: raw stdin bytes into the serial ring. A full ring drops
    // the byte, like a UART with nobody reading.
    thread::spawn(move || {
        let stdin = io::stdin();
        for byte in stdin.lock().bytes() {
            match byte {
                Ok(byte) => {
                    let _ = serial_tx.try_push(byte);
                }
                Err(_) => break,
            }
        }
    });

    let console = Console::new(tx_queue.clone());
    let mut instrument = Instrument::new(console, GlyphLatch::new(), LampLatch::new(), tone_tx);

    // Remaining hold time per key, indexed by bit position.
    let mut taps = [0u16; 8];
    let started = Instant::now();
    let mut ticks: u64 = 0;

    loop {
        while let Some(byte) = serial_rx.try_pop() {
            match byte {
                b'1'..=b'8' => taps[(byte - b'1') as usize] = TAP_TICKS,
                b'\r' | b'\n' | b' ' => {}
                _ => instrument.handle_command(byte),
            }
        }

        let mut mask = 0u8;
        for (bit, remaining) in taps.iter_mut().enumerate() {
            if *remaining > 0 {
                mask |= 1 << bit;
                *remaining -= 1;
            }
        }

        instrument.tick(mask);

        ticks += 1;
        let next = started + Duration::from_millis(TICK_MS * ticks);
        let now = Instant::now();
        if next > now {
            thread::sleep(next - now);
        }
    }
}
