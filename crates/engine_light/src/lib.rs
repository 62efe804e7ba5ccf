//! # Engine Light
//!
//! Dynamic exhaust lighting for rocket engines in a host simulation.
//!
//! Every thrust nozzle of an engine gets a pair of lights: a spot light at
//! the nozzle and a point light further down the plume. Each simulation tick
//! the pair follows the engine throttle with a smoothed flicker, fades out
//! gradually after a cutoff, dims in interior views and hides in the map view.
//!
//! ## Features
//!
//! - **Host agnostic**: engines, lights and the camera are reached through traits
//! - **Multi-nozzle compensation**: clusters do not add up to an implausibly bright engine
//! - **Fade damping**: sudden cutoffs decay over several ticks
//! - **Configurable**: tuning loads from TOML or RON files
//! - **Headless host**: an in-memory host for tests and demos
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use engine_light::prelude::*;
//! use engine_light::host::sim::{SimEngine, SimulatedHost};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = SimEngine::new(215.0).with_nozzle_ring(2, 1.5);
//!     let lever = engine.lever();
//!     let engine = EngineModuleSet::new("LV-T45", vec![engine])?;
//!
//!     let mut host = SimulatedHost::new();
//!     let mut module: EngineLightModule<_, SimulatedHost> =
//!         EngineLightModule::new(EngineLightConfig::default()).with_engine(engine);
//!     module.initialize(&mut host)?;
//!
//!     lever.set(1.0);
//!     let status = module.tick(0.02, &ViewState::flight());
//!     assert_eq!(status, TickStatus::Updated(ExhaustState::Exhaust));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod effects;
pub mod host;
pub mod lights;

mod component;
mod error;

#[cfg(test)]
mod tests;

pub use component::{EngineLightModule, ExhaustReport, HostedComponent, TickStatus};
pub use error::{ConfigurationFault, EngineLightError, HostError, Result};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        EngineLightModule, ExhaustReport, HostedComponent, TickStatus,
        ConfigurationFault, EngineLightError, HostError,
        config::{Config, ConfigError, EngineLightConfig, FadeRule},
        effects::{compensate, JitterBuffer, JitterSource, RandomJitter},
        foundation::{
            math::{Color, Transform, Vec3},
            time::FixedTimestep,
        },
        host::{
            CameraMode, CullingMask, EngineModule, EngineModuleSet, EngineSource, LightHost,
            LightSink, ThrustTransform, ViewContext, ViewState,
        },
        lights::{ExhaustState, LightPair},
    };
}
