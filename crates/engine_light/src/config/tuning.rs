//! Exhaust light tuning values

use serde::{Deserialize, Serialize};

use super::Config;
use crate::error::ConfigurationFault;
use crate::foundation::math::Color;

/// Range scale of the nozzle (spot) light
pub const NOZZLE_LIGHT_RANGE_MULTIPLIER: f32 = 0.75;
/// Range scale of the area (point) light
pub const AREA_LIGHT_RANGE_MULTIPLIER: f32 = 1.25;
/// Intensity scale of the nozzle (spot) light
pub const NOZZLE_LIGHT_INTENSITY_MULTIPLIER: f32 = 1.15;
/// Intensity scale of the area (point) light
pub const AREA_LIGHT_INTENSITY_MULTIPLIER: f32 = 1.0;

/// Spot angle of the nozzle light
pub const NOZZLE_SPOT_ANGLE_DEGREES: f32 = 120.0;
/// Fraction of the plume length the area light sits down the thrust axis
pub const AREA_LIGHT_PLUME_FRACTION: f32 = 0.25;

/// Intensity below which a light pair is hidden on the next tick
pub const VISIBILITY_FLOOR: f32 = 0.1;

/// How a sudden throttle drop is detected before fade damping kicks in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeRule {
    /// `(last - throttle) / last > 1 - fade`, the relative drop since last tick
    #[default]
    RelativeDrop,
    /// `last - throttle / last > 1 - fade`, division bound tighter than the subtraction
    Literal,
}

impl FadeRule {
    /// Whether the step from `last` to `throttle` counts as a sudden drop
    pub fn is_sudden_drop(self, last: f32, throttle: f32, fade_coefficient: f32) -> bool {
        if last <= 0.0 {
            return false;
        }

        let drop = match self {
            Self::RelativeDrop => (last - throttle) / last,
            Self::Literal => last - throttle / last,
        };
        drop > 1.0 - fade_coefficient
    }
}

/// Tuning for one engine's exhaust lights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineLightConfig {
    /// Base intensity of each nozzle's lights before multipliers
    pub light_intensity: f32,
    /// Light range at full throttle
    pub light_range: f32,
    /// Controls how far down the thrust axis the area light sits
    pub plume_length: f32,
    /// Exhaust tint as linear RGB
    pub exhaust_color: [f32; 3],
    /// Amplitude of the flicker added to throttle
    pub jitter_multiplier: f32,
    /// Intensity scale while the camera is inside the vehicle
    pub interior_multiplier: f32,
    /// Placement tweak along the thrust axis
    pub exhaust_offset_z: f32,
    /// Keep inside (0, 1); smaller fades out faster after a cutoff
    pub fade_coefficient: f32,
    /// Sudden-drop detection used by fade damping
    pub fade_rule: FadeRule,
    /// Hard shadows at full strength on the area light
    pub area_light_shadows: bool,
    /// Seconds of simulated time between diagnostic reports
    pub report_interval: f32,
}

impl Default for EngineLightConfig {
    fn default() -> Self {
        Self {
            light_intensity: 1.0,
            light_range: 30.0,
            plume_length: 20.0,
            exhaust_color: [1.0, 0.88, 0.68],
            jitter_multiplier: 0.1,
            interior_multiplier: 0.5,
            exhaust_offset_z: 0.0,
            fade_coefficient: 0.8,
            fade_rule: FadeRule::RelativeDrop,
            area_light_shadows: false,
            report_interval: 1.0,
        }
    }
}

impl Config for EngineLightConfig {}

impl EngineLightConfig {
    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigurationFault> {
        let non_negative = [
            ("light_intensity", self.light_intensity),
            ("light_range", self.light_range),
            ("plume_length", self.plume_length),
            ("jitter_multiplier", self.jitter_multiplier),
            ("interior_multiplier", self.interior_multiplier),
            ("exhaust_color.r", self.exhaust_color[0]),
            ("exhaust_color.g", self.exhaust_color[1]),
            ("exhaust_color.b", self.exhaust_color[2]),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be finite and non-negative, got {value}")));
            }
        }

        if !self.exhaust_offset_z.is_finite() {
            return Err(invalid(format!("exhaust_offset_z must be finite, got {}", self.exhaust_offset_z)));
        }

        // NaN fails both comparisons, so test for the valid interval
        if !(self.fade_coefficient > 0.0 && self.fade_coefficient < 1.0) {
            return Err(invalid(format!(
                "fade_coefficient must be inside (0, 1), got {}",
                self.fade_coefficient
            )));
        }

        if !(self.report_interval > 0.0) {
            return Err(invalid(format!("report_interval must be positive, got {}", self.report_interval)));
        }

        Ok(())
    }

    /// Exhaust tint as a color vector
    pub fn exhaust_color(&self) -> Color {
        Color::from(self.exhaust_color)
    }

    /// Builder pattern: set the base intensity
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.light_intensity = intensity;
        self
    }

    /// Builder pattern: set the full-throttle range
    pub fn with_range(mut self, range: f32) -> Self {
        self.light_range = range;
        self
    }

    /// Builder pattern: set the flicker amplitude
    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter_multiplier = jitter;
        self
    }

    /// Builder pattern: set the fade coefficient and rule
    pub fn with_fade(mut self, coefficient: f32, rule: FadeRule) -> Self {
        self.fade_coefficient = coefficient;
        self.fade_rule = rule;
        self
    }
}

fn invalid(message: String) -> ConfigurationFault {
    ConfigurationFault::InvalidConfig(message)
}
