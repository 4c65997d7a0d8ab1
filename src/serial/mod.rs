// Serial module - transmit queue, console formatting, command decoding

pub mod commands;
pub mod console;
pub mod queue;

pub use commands::{CommandAction, decode};
pub use console::Console;
pub use queue::{SharedTxQueue, TX_CAPACITY, TxQueue, create_tx_queue};
