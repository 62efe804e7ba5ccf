//! Time management utilities

/// Default simulation step, 50 Hz
pub const DEFAULT_FIXED_DT: f32 = 0.02;

/// Upper bound on steps produced by a single frame
const MAX_STEPS_PER_FRAME: u32 = 10;

/// Fixed timestep accumulator
///
/// Turns variable frame times into a whole number of fixed simulation
/// steps. A host driver calls [`FixedTimestep::accumulate`] once per frame and
/// ticks its components that many times with [`FixedTimestep::dt`].
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    total_steps: u64,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_DT)
    }
}

impl FixedTimestep {
    /// Create an accumulator stepping at `dt` seconds
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            total_steps: 0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    ///
    /// Capped so a long stall cannot snowball into an ever growing backlog.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let due = (self.accumulator / self.dt) as u32;
        let steps = due.min(MAX_STEPS_PER_FRAME);
        if due > MAX_STEPS_PER_FRAME {
            // Drop the backlog instead of carrying it into later frames
            self.accumulator = 0.0;
        } else {
            self.accumulator -= steps as f32 * self.dt;
        }
        self.total_steps += u64::from(steps);
        steps
    }

    /// Interpolation alpha between the last two steps (0.0 to 1.0)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Number of steps produced since creation
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Simulated seconds covered by the steps produced so far
    #[allow(clippy::cast_precision_loss)]
    pub fn simulated_time(&self) -> f32 {
        self.total_steps as f32 * self.dt
    }
}
