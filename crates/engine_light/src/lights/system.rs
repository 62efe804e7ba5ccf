//! Per-tick exhaust light update
//!
//! Each tick the raw throttle is damped against the previous tick, turned
//! into an [`ExhaustState`], and every light pair gets a fresh parameter set:
//! visibility from the view and the previous intensities, brightness and
//! reach from the jittered throttle, and a culling mask that keeps exhaust
//! light off the distant scaled planet.
//!
//! The arithmetic lives in free functions so it can be checked without a
//! host; [`ExhaustLightSystem`] owns the state carried between ticks.

use crate::config::{
    EngineLightConfig, AREA_LIGHT_INTENSITY_MULTIPLIER, AREA_LIGHT_RANGE_MULTIPLIER,
    NOZZLE_LIGHT_INTENSITY_MULTIPLIER, NOZZLE_LIGHT_RANGE_MULTIPLIER, VISIBILITY_FLOOR,
};
use crate::effects::JitterBuffer;
use crate::error::HostError;
use crate::host::{LightSink, ViewContext};

use super::pair::LightPair;

/// Interior multipliers below this hide the lights in interior view entirely
const INTERIOR_HIDE_THRESHOLD: f32 = 0.1;

/// Logical light state, derived fresh every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustState {
    /// Throttle is effectively zero; lights are forced off
    Disabled,
    /// Lights follow the exhaust plume
    Exhaust,
}

impl ExhaustState {
    /// State for an already damped throttle
    pub fn from_throttle(throttle: f32) -> Self {
        if throttle > 0.0 {
            Self::Exhaust
        } else {
            Self::Disabled
        }
    }
}

/// Brightness and reach of one pair for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExhaustOutput {
    /// Nozzle (spot) light intensity
    pub nozzle_intensity: f32,
    /// Area (point) light intensity
    pub area_intensity: f32,
    /// Nozzle (spot) light range
    pub nozzle_range: f32,
    /// Area (point) light range
    pub area_range: f32,
}

/// Apply fade damping to `throttle` given last tick's value.
///
/// A sudden drop is replaced by `last * fade_coefficient`, so an engine
/// cutoff decays over several ticks instead of going dark at once.
pub fn damp_throttle(config: &EngineLightConfig, last: f32, throttle: f32) -> f32 {
    if config.fade_rule.is_sudden_drop(last, throttle, config.fade_coefficient) {
        last * config.fade_coefficient
    } else {
        throttle
    }
}

/// Whether a pair may be shown this tick.
///
/// The intensity floor is pair-wide: either light under it hides both.
pub fn pair_visible(previous_min_intensity: f32, interior: bool, map_view: bool, interior_multiplier: f32) -> bool {
    !(map_view
        || (interior && interior_multiplier < INTERIOR_HIDE_THRESHOLD)
        || previous_min_intensity < VISIBILITY_FLOOR)
}

/// Intensities and ranges for a jittered throttle.
///
/// Intensity grows with the square of throttle, range linearly.
pub fn exhaust_output(config: &EngineLightConfig, jittered_throttle: f32, multiplier: f32, interior: bool) -> ExhaustOutput {
    let intensity = config.light_intensity * (jittered_throttle * jittered_throttle) * multiplier;
    let range = config.light_range * jittered_throttle;
    let dimming = if interior { config.interior_multiplier } else { 1.0 };

    ExhaustOutput {
        nozzle_intensity: intensity * NOZZLE_LIGHT_INTENSITY_MULTIPLIER * dimming,
        area_intensity: intensity * AREA_LIGHT_INTENSITY_MULTIPLIER * dimming,
        nozzle_range: range * NOZZLE_LIGHT_RANGE_MULTIPLIER,
        area_range: range * AREA_LIGHT_RANGE_MULTIPLIER,
    }
}

/// State carried between ticks for one engine
#[derive(Debug)]
pub struct ExhaustLightSystem {
    config: EngineLightConfig,
    jitter: JitterBuffer,
    last_frame_throttle: f32,
    jittered_throttle: f32,
    multiplier: f32,
}

impl ExhaustLightSystem {
    /// System with the given tuning and flicker source
    pub fn new(config: EngineLightConfig, jitter: JitterBuffer) -> Self {
        Self {
            config,
            jitter,
            last_frame_throttle: 0.0,
            jittered_throttle: 0.0,
            multiplier: 1.0,
        }
    }

    /// Forget carried state and adopt a new multi-nozzle multiplier
    pub fn reset(&mut self, multiplier: f32) {
        self.jitter.reset();
        self.last_frame_throttle = 0.0;
        self.jittered_throttle = 0.0;
        self.multiplier = multiplier;
    }

    /// Tuning in use
    pub fn config(&self) -> &EngineLightConfig {
        &self.config
    }

    /// Flicker buffer
    pub fn jitter(&self) -> &JitterBuffer {
        &self.jitter
    }

    /// Flicker buffer, mutable
    pub fn jitter_mut(&mut self) -> &mut JitterBuffer {
        &mut self.jitter
    }

    /// Effective throttle of the last completed tick
    pub fn last_frame_throttle(&self) -> f32 {
        self.last_frame_throttle
    }

    /// Jittered throttle of the last pair updated
    pub fn jittered_throttle(&self) -> f32 {
        self.jittered_throttle
    }

    /// Multi-nozzle intensity multiplier
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Run one tick over `pairs`.
    ///
    /// On a host error the tick stops where it failed and the carried
    /// throttle is left untouched; pairs already written keep their new values.
    pub fn update<L: LightSink>(
        &mut self,
        pairs: &mut [LightPair<L>],
        raw_throttle: f32,
        view: &dyn ViewContext,
    ) -> Result<ExhaustState, HostError> {
        let interior = view.is_interior_view();
        let map_view = view.is_map_view();
        let scaled_layer = view.scaled_body_layer();

        let throttle = damp_throttle(&self.config, self.last_frame_throttle, raw_throttle.clamp(0.0, 1.0));
        let state = ExhaustState::from_throttle(throttle);

        for pair in pairs.iter_mut() {
            let visible = pair_visible(pair.min_intensity(), interior, map_view, self.config.interior_multiplier);

            let mut nozzle = *pair.nozzle.params();
            let mut area = *pair.area.params();

            match state {
                ExhaustState::Exhaust => {
                    nozzle.enabled = visible;
                    area.enabled = visible;

                    // Reasserted every tick in case something else recolored the lights
                    nozzle.color = self.config.exhaust_color();
                    area.color = self.config.exhaust_color();

                    self.jittered_throttle = throttle + self.jitter.sample() * self.config.jitter_multiplier;
                    let output = exhaust_output(&self.config, self.jittered_throttle, self.multiplier, interior);

                    nozzle.intensity = output.nozzle_intensity;
                    area.intensity = output.area_intensity;
                    nozzle.range = output.nozzle_range;
                    area.range = output.area_range;
                }
                ExhaustState::Disabled => {
                    nozzle.enabled = false;
                    area.enabled = false;
                }
            }

            // Keeps exhaust light off the scaled-down planet in the background
            if let Some(layer) = scaled_layer {
                nozzle.culling_mask = nozzle.culling_mask.without_layer(layer);
                area.culling_mask = area.culling_mask.without_layer(layer);
            }

            pair.nozzle.commit(nozzle)?;
            pair.area.commit(area)?;
        }

        self.last_frame_throttle = throttle;
        Ok(state)
    }
}
