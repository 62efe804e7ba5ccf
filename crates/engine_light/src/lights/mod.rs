//! Exhaust lights: the per-nozzle light pairs, the factory that builds
//! them and the per-tick system that drives them.

pub mod pair;
pub mod factory;
pub mod system;

pub use pair::{ExhaustLight, LightPair};
pub use factory::{NozzleLightFactory, AREA_LIGHT_NAME, NOZZLE_LIGHT_NAME};
pub use system::{
    ExhaustLightSystem, ExhaustOutput, ExhaustState, damp_throttle, exhaust_output, pair_visible,
};
