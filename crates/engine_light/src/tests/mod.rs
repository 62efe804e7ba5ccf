//! Integration tests
//!
//! These drive [`crate::EngineLightModule`] against the in-memory host the
//! way a real host would: initialize once, then tick with a view.

mod exhaust_integration;

use crate::config::EngineLightConfig;
use crate::host::sim::{SimEngine, SimLightRecord, SimulatedHost, ThrottleLever};
use crate::host::EngineModuleSet;
use crate::EngineLightModule;

type TestModule = EngineLightModule<EngineModuleSet<SimEngine>, SimulatedHost>;

/// Module with `nozzles` downward nozzles and a flicker source stuck at zero
fn still_module(nozzles: usize, config: EngineLightConfig) -> (TestModule, ThrottleLever) {
    let engine = SimEngine::new(215.0).with_nozzle_ring(nozzles, 1.25);
    let lever = engine.lever();
    let engine = EngineModuleSet::new("LV-T45", vec![engine]).expect("one module");
    let module = TestModule::new(config).with_engine(engine).with_jitter_source(|| 0.0_f32);
    (module, lever)
}

/// Nozzle and area records of every pair, in spawn order
fn pairs(host: &SimulatedHost) -> Vec<(SimLightRecord, SimLightRecord)> {
    let lights = host.lights();
    lights
        .chunks(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}
