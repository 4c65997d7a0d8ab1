// Input module - key port scanning

pub mod keys;

pub use keys::{KeyEvent, KeyScanner};
