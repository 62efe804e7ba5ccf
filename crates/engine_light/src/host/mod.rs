//! Host collaborators
//!
//! The host simulation owns engines, lights and the camera. This crate only
//! sees them through the traits here:
//!
//! - [`EngineSource`]: throttle, max thrust, thrust transforms, engine frame
//! - [`LightHost`] / [`LightSink`]: spawning, updating and releasing lights
//! - [`ViewContext`]: simulation and camera state
//!
//! [`sim`] provides an in-memory host used by tests and the demo binary.

pub mod engine;
pub mod light;
pub mod view;
pub mod sim;

pub use engine::{EngineModule, EngineModuleSet, EngineSource, ThrustTransform};
pub use light::{CullingMask, LightDescriptor, LightHost, LightKind, LightParams, LightSink, Shadows};
pub use view::{CameraMode, ViewContext, ViewState};
