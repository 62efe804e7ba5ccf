//! Light side of the host

use bitflags::bitflags;

use crate::error::HostError;
use crate::foundation::math::{Color, Transform};

bitflags! {
    /// Rendering layers a light affects
    ///
    /// Only a few layers have names; hosts may use any of the 32 bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CullingMask: u32 {
        /// Default scene layer
        const DEFAULT = 1 << 0;
        /// Transparent effects
        const TRANSPARENT_FX = 1 << 1;
        /// Scaled-down celestial bodies drawn far away
        const SCALED_SCENERY = 1 << 10;
        /// Nearby terrain
        const LOCAL_SCENERY = 1 << 15;
        /// Every layer
        const EVERYTHING = !0;
    }
}

impl CullingMask {
    /// Mask with only `layer` set, `None` for layers outside 0..32
    pub fn layer(layer: u8) -> Option<Self> {
        1u32.checked_shl(u32::from(layer)).map(Self::from_bits_retain)
    }

    /// Copy with `layer` cleared
    #[must_use]
    pub fn without_layer(self, layer: u8) -> Self {
        Self::layer(layer).map_or(self, |bit| self.difference(bit))
    }
}

impl Default for CullingMask {
    fn default() -> Self {
        Self::EVERYTHING
    }
}

/// Shape of a light emitter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Cone of light along local +Z
    Spot {
        /// Full cone angle in degrees
        angle_degrees: f32,
    },
    /// Omnidirectional
    Point,
}

/// Shadow casting of a light
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Shadows {
    /// No shadows
    #[default]
    None,
    /// Hard-edged shadows
    Hard {
        /// Shadow strength in 0.0..=1.0
        strength: f32,
    },
}

/// Everything a light sink can be told each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightParams {
    /// Whether the light renders at all
    pub enabled: bool,
    /// Brightness
    pub intensity: f32,
    /// Reach in world units
    pub range: f32,
    /// Linear RGB tint
    pub color: Color,
    /// Layers the light affects
    pub culling_mask: CullingMask,
}

impl LightParams {
    /// Dark, disabled light of the given color affecting every layer
    pub fn disabled(color: Color) -> Self {
        Self {
            enabled: false,
            intensity: 0.0,
            range: 0.0,
            color,
            culling_mask: CullingMask::EVERYTHING,
        }
    }
}

/// Request for a new light, parented to an engine frame
#[derive(Debug, Clone, PartialEq)]
pub struct LightDescriptor {
    /// Object name in the host scene
    pub name: &'static str,
    /// Emitter shape
    pub kind: LightKind,
    /// Placement in world space
    pub world: Transform,
    /// Placement relative to the parent engine frame
    pub local: Transform,
    /// Initial parameters
    pub params: LightParams,
    /// Shadow casting
    pub shadows: Shadows,
}

/// One host light emitter owned by this crate
pub trait LightSink {
    /// Write the full parameter set to the emitter
    fn apply(&mut self, params: &LightParams) -> Result<(), HostError>;
}

/// Allocates and frees light emitters
pub trait LightHost {
    /// Handle type for lights of this host
    type Light: LightSink;

    /// Create a light as described, parented to the engine frame
    fn spawn_light(&mut self, descriptor: &LightDescriptor) -> Result<Self::Light, HostError>;

    /// Give a light back to the host
    fn release_light(&mut self, light: Self::Light);
}
