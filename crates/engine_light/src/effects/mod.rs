//! Numeric effect helpers: flicker jitter and multi-nozzle compensation.

pub mod jitter;
pub mod compensation;

pub use jitter::{JitterBuffer, JitterSource, RandomJitter, JITTER_BUFFER_SIZE};
pub use compensation::compensate;
