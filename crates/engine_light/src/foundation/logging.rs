//! Logging utilities
//!
//! Everything in this crate logs through the `log` facade. Messages carry the
//! [`PREFIX`] tag so they can be picked out of a busy host log. The host (or a
//! demo binary) installs the actual logger once per process.

pub use log::{debug, info, warn, error, trace};

/// Tag prepended to every message emitted by this crate
pub const PREFIX: &str = "[EngineLight]";

/// Initialize the logging system from `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}

/// Install a test logger that writes through the test harness capture.
#[cfg(test)]
pub fn init_for_tests() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}
