//! Headless in-memory host
//!
//! Stands in for a real simulation: lights live in a slot map shared between
//! the host and the handles it gives out, engines expose a throttle lever
//! that can be moved while a module owns the engine. Single-threaded like the
//! hosts it imitates.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use super::engine::{EngineModule, ThrustTransform};
use super::light::{LightDescriptor, LightHost, LightKind, LightParams, LightSink, Shadows};
use crate::error::HostError;
use crate::foundation::math::{Transform, Vec3};

new_key_type! {
    /// Key of a light inside a [`SimulatedHost`]
    pub struct LightKey;
}

/// Host-side state of one simulated light
#[derive(Debug, Clone, PartialEq)]
pub struct SimLightRecord {
    /// Object name
    pub name: &'static str,
    /// Emitter shape
    pub kind: LightKind,
    /// World placement at spawn
    pub world: Transform,
    /// Placement relative to the engine frame
    pub local: Transform,
    /// Shadow casting
    pub shadows: Shadows,
    /// Last applied parameters
    pub params: LightParams,
    /// Number of `apply` calls received
    pub writes: u64,
}

type LightStore = Rc<RefCell<SlotMap<LightKey, SimLightRecord>>>;

/// Handle to a light in a [`SimulatedHost`]
#[derive(Debug)]
pub struct SimLight {
    key: LightKey,
    name: &'static str,
    store: LightStore,
}

impl SimLight {
    /// Key of this light in its host
    pub fn key(&self) -> LightKey {
        self.key
    }
}

impl LightSink for SimLight {
    fn apply(&mut self, params: &LightParams) -> Result<(), HostError> {
        let mut store = self.store.borrow_mut();
        let record = store
            .get_mut(self.key)
            .ok_or_else(|| HostError::LightReleased { name: self.name.to_string() })?;
        record.params = *params;
        record.writes += 1;
        Ok(())
    }
}

/// In-memory [`LightHost`]
#[derive(Debug, Default)]
pub struct SimulatedHost {
    store: LightStore,
    spawn_order: Vec<LightKey>,
    spawn_failure: Option<String>,
    spawn_budget: Option<usize>,
}

impl SimulatedHost {
    /// Empty host
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following spawn fail with `reason`
    pub fn fail_spawns(&mut self, reason: impl Into<String>) {
        self.spawn_failure = Some(reason.into());
    }

    /// Allow only `count` more spawns before failing
    pub fn limit_spawns(&mut self, count: usize) {
        self.spawn_budget = Some(count);
    }

    /// Lift any spawn failure or limit
    pub fn allow_spawns(&mut self) {
        self.spawn_failure = None;
        self.spawn_budget = None;
    }

    /// Number of live lights
    pub fn light_count(&self) -> usize {
        self.store.borrow().len()
    }

    /// Live lights in spawn order
    pub fn lights(&self) -> Vec<SimLightRecord> {
        let store = self.store.borrow();
        self.spawn_order
            .iter()
            .filter_map(|key| store.get(*key).cloned())
            .collect()
    }

    /// State of one light, `None` once released
    pub fn light(&self, key: LightKey) -> Option<SimLightRecord> {
        self.store.borrow().get(key).cloned()
    }

    /// Drop every light, as a host does when unloading a scene
    pub fn unload_scene(&mut self) {
        self.store.borrow_mut().clear();
        self.spawn_order.clear();
    }

    fn check_spawn(&mut self, name: &'static str) -> Result<(), HostError> {
        if let Some(reason) = &self.spawn_failure {
            return Err(HostError::SpawnFailed { name: name.to_string(), reason: reason.clone() });
        }
        if let Some(budget) = self.spawn_budget.as_mut() {
            if *budget == 0 {
                return Err(HostError::SpawnFailed { name: name.to_string(), reason: "light budget exhausted".to_string() });
            }
            *budget -= 1;
        }
        Ok(())
    }
}

impl LightHost for SimulatedHost {
    type Light = SimLight;

    fn spawn_light(&mut self, descriptor: &LightDescriptor) -> Result<SimLight, HostError> {
        self.check_spawn(descriptor.name)?;

        let key = self.store.borrow_mut().insert(SimLightRecord {
            name: descriptor.name,
            kind: descriptor.kind,
            world: descriptor.world,
            local: descriptor.local,
            shadows: descriptor.shadows,
            params: descriptor.params,
            writes: 0,
        });
        self.spawn_order.push(key);
        log::trace!("SimulatedHost: spawned {} as {:?}", descriptor.name, key);

        Ok(SimLight {
            key,
            name: descriptor.name,
            store: Rc::clone(&self.store),
        })
    }

    fn release_light(&mut self, light: SimLight) {
        self.store.borrow_mut().remove(light.key);
        self.spawn_order.retain(|key| *key != light.key);
    }
}

/// Shared throttle setting of a [`SimEngine`]
#[derive(Debug, Clone, Default)]
pub struct ThrottleLever(Rc<Cell<f32>>);

impl ThrottleLever {
    /// Move the lever
    pub fn set(&self, throttle: f32) {
        self.0.set(throttle);
    }

    /// Current position
    pub fn get(&self) -> f32 {
        self.0.get()
    }
}

/// Scripted engine module
#[derive(Debug, Clone)]
pub struct SimEngine {
    lever: ThrottleLever,
    max_thrust: f32,
    enabled: bool,
    nozzles: Vec<ThrustTransform>,
    frame: Transform,
}

impl SimEngine {
    /// Module with no nozzles, throttle at zero
    pub fn new(max_thrust: f32) -> Self {
        Self {
            lever: ThrottleLever::default(),
            max_thrust,
            enabled: true,
            nozzles: Vec::new(),
            frame: Transform::identity(),
        }
    }

    /// Builder pattern: add a nozzle
    pub fn with_nozzle(mut self, nozzle: ThrustTransform) -> Self {
        self.nozzles.push(nozzle);
        self
    }

    /// Builder pattern: add `count` downward nozzles spaced along X, centred on the frame
    #[allow(clippy::cast_precision_loss)]
    pub fn with_nozzle_ring(mut self, count: usize, spacing: f32) -> Self {
        let half = (count.saturating_sub(1)) as f32 * spacing * 0.5;
        for i in 0..count {
            let offset = Vec3::new(i as f32 * spacing - half, 0.0, 0.0);
            self.nozzles.push(ThrustTransform::new(
                self.frame.position + offset,
                self.frame.rotation * Vec3::new(0.0, -1.0, 0.0),
            ));
        }
        self
    }

    /// Builder pattern: set the module frame
    pub fn with_frame(mut self, frame: Transform) -> Self {
        self.frame = frame;
        self
    }

    /// Builder pattern: set whether the module is operational
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Lever controlling this module's throttle
    pub fn lever(&self) -> ThrottleLever {
        self.lever.clone()
    }
}

impl EngineModule for SimEngine {
    fn throttle(&self) -> f32 {
        self.lever.get()
    }

    fn max_thrust(&self) -> f32 {
        self.max_thrust
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn thrust_transforms(&self) -> &[ThrustTransform] {
        &self.nozzles
    }

    fn frame(&self) -> Transform {
        self.frame
    }
}
