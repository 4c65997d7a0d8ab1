// Communication channels lock-free

use crate::messaging::command::ToneCommand;
use ringbuf::{HeapRb, traits::Split};

pub type ToneCommandProducer = ringbuf::HeapProd<ToneCommand>;
pub type ToneCommandConsumer = ringbuf::HeapCons<ToneCommand>;

pub fn create_tone_channel(capacity: usize) -> (ToneCommandProducer, ToneCommandConsumer) {
    let rb = HeapRb::<ToneCommand>::new(capacity);
    rb.split()
}

pub type ByteProducer = ringbuf::HeapProd<u8>;
pub type ByteConsumer = ringbuf::HeapCons<u8>;

pub fn create_byte_channel(capacity: usize) -> (ByteProducer, ByteConsumer) {
    let rb = HeapRb::<u8>::new(capacity);
    rb.split()
}
