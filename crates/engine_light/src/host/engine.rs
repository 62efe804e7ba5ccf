//! Engine side of the host

use crate::error::ConfigurationFault;
use crate::foundation::math::{Transform, Vec3};

/// World-space position and thrust direction of one exhaust nozzle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrustTransform {
    /// Nozzle position in world space
    pub position: Vec3,
    /// Direction the exhaust leaves the nozzle, world space
    pub forward: Vec3,
}

impl ThrustTransform {
    /// Create a thrust transform
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }
}

/// What the light driver reads from an engine
pub trait EngineSource {
    /// Diagnostic name, usually the part name
    fn name(&self) -> &str;

    /// Current throttle in 0.0..=1.0, read fresh on every call
    fn throttle(&self) -> f32;

    /// Maximum thrust of the engine
    fn max_thrust(&self) -> f32;

    /// Maximum thrust counting only the parts of the engine that can fire right now
    fn active_max_thrust(&self) -> f32 {
        self.max_thrust()
    }

    /// Whether the engine is operational; reports are only logged while it is
    fn is_enabled(&self) -> bool;

    /// One entry per physical nozzle
    fn thrust_transforms(&self) -> Vec<ThrustTransform>;

    /// Reference frame lights are parented to
    fn frame(&self) -> Transform;
}

/// A single engine module on a part
///
/// Some parts carry several (multi-mode engines), each with its own throttle
/// and nozzles.
pub trait EngineModule {
    /// Current throttle of this module
    fn throttle(&self) -> f32;

    /// Maximum thrust of this module
    fn max_thrust(&self) -> f32;

    /// Whether the module is currently operational
    fn is_enabled(&self) -> bool;

    /// Nozzles belonging to this module
    fn thrust_transforms(&self) -> &[ThrustTransform];

    /// Module reference frame
    fn frame(&self) -> Transform;
}

/// All engine modules found on one part, presented as a single [`EngineSource`]
#[derive(Debug, Clone)]
pub struct EngineModuleSet<M> {
    part: String,
    modules: Vec<M>,
}

impl<M: EngineModule> EngineModuleSet<M> {
    /// Wrap the modules of `part`; a part without engine modules is a fault.
    pub fn new(part: impl Into<String>, modules: Vec<M>) -> Result<Self, ConfigurationFault> {
        let part = part.into();
        if modules.is_empty() {
            return Err(ConfigurationFault::NoEngineModules { part });
        }
        Ok(Self { part, modules })
    }

    /// The wrapped modules
    pub fn modules(&self) -> &[M] {
        &self.modules
    }

    /// Largest max thrust, optionally only over enabled modules
    ///
    /// Multi-mode engines with very different ratings report the larger
    /// mode unless `enabled_only` is set. Backs both
    /// [`EngineSource::max_thrust`] and [`EngineSource::active_max_thrust`].
    pub fn max_thrust_of(&self, enabled_only: bool) -> f32 {
        self.modules
            .iter()
            .filter(|module| !enabled_only || module.is_enabled())
            .map(EngineModule::max_thrust)
            .fold(0.0, f32::max)
    }
}

impl<M: EngineModule> EngineSource for EngineModuleSet<M> {
    fn name(&self) -> &str {
        &self.part
    }

    /// Greatest throttle of all modules
    fn throttle(&self) -> f32 {
        self.modules
            .iter()
            .map(EngineModule::throttle)
            .fold(0.0, f32::max)
    }

    fn max_thrust(&self) -> f32 {
        self.max_thrust_of(false)
    }

    fn active_max_thrust(&self) -> f32 {
        self.max_thrust_of(true)
    }

    /// Whether the primary module is enabled
    fn is_enabled(&self) -> bool {
        self.modules.first().is_some_and(EngineModule::is_enabled)
    }

    fn thrust_transforms(&self) -> Vec<ThrustTransform> {
        self.modules
            .iter()
            .flat_map(|module| module.thrust_transforms().iter().copied())
            .collect()
    }

    fn frame(&self) -> Transform {
        self.modules
            .first()
            .map_or_else(Transform::identity, EngineModule::frame)
    }
}
