//! Smoothed flicker signal
//!
//! Per-tick random values make the lights strobe. [`JitterBuffer`] keeps the
//! last few samples and hands out their mean, which wanders slowly inside
//! [0, 1) instead.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Number of samples averaged by a [`JitterBuffer`]
pub const JITTER_BUFFER_SIZE: usize = 5;

/// Supplier of raw values in [0, 1)
pub trait JitterSource {
    /// Next raw value, expected in [0, 1)
    fn next_unit(&mut self) -> f32;
}

impl<F: FnMut() -> f32> JitterSource for F {
    fn next_unit(&mut self) -> f32 {
        self()
    }
}

/// Uniform random source backed by a small, fast PRNG
#[derive(Debug, Clone)]
pub struct RandomJitter {
    rng: SmallRng,
}

impl RandomJitter {
    /// Seed from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic sequence for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomJitter {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl JitterSource for RandomJitter {
    fn next_unit(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }
}

/// Fixed-capacity circular buffer producing a rolling average of random values
pub struct JitterBuffer {
    slots: [f32; JITTER_BUFFER_SIZE],
    cursor: usize,
    source: Box<dyn JitterSource>,
}

impl JitterBuffer {
    /// Buffer fed by the given source, all slots zeroed
    pub fn new(source: impl JitterSource + 'static) -> Self {
        Self {
            slots: [0.0; JITTER_BUFFER_SIZE],
            cursor: 0,
            source: Box::new(source),
        }
    }

    /// Buffer fed by a seeded [`RandomJitter`]
    pub fn seeded(seed: u64) -> Self {
        Self::new(RandomJitter::seeded(seed))
    }

    /// Advance the cursor, overwrite the oldest slot and return the new mean.
    pub fn sample(&mut self) -> f32 {
        self.cursor = (self.cursor + 1) % JITTER_BUFFER_SIZE;
        // Out-of-range sources would push the mean outside [0, 1)
        self.slots[self.cursor] = self.source.next_unit().clamp(0.0, 1.0 - f32::EPSILON);
        self.peek()
    }

    /// Current mean without advancing
    pub fn peek(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let len = JITTER_BUFFER_SIZE as f32;
        self.slots.iter().sum::<f32>() / len
    }

    /// Zero every slot and rewind the cursor
    pub fn reset(&mut self) {
        self.slots = [0.0; JITTER_BUFFER_SIZE];
        self.cursor = 0;
    }

    /// Replace the value supplier, keeping the current slots
    pub fn set_source(&mut self, source: impl JitterSource + 'static) {
        self.source = Box::new(source);
    }
}

impl Default for JitterBuffer {
    fn default() -> Self {
        Self::new(RandomJitter::default())
    }
}

impl std::fmt::Debug for JitterBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JitterBuffer")
            .field("slots", &self.slots)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
