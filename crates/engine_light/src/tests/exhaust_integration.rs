//! Light values produced by ticking a module through a burn

use approx::assert_relative_eq;

use super::{pairs, still_module};
use crate::config::{EngineLightConfig, FadeRule};
use crate::effects::compensate;
use crate::foundation::logging;
use crate::host::sim::{SimEngine, SimulatedHost};
use crate::host::{CameraMode, CullingMask, EngineModuleSet, LightKind, ViewState};
use crate::lights::{ExhaustState, AREA_LIGHT_NAME, NOZZLE_LIGHT_NAME};
use crate::{EngineLightModule, HostedComponent, TickStatus};

const DT: f32 = 0.02;

#[test]
fn test_two_nozzles_full_throttle() {
    logging::init_for_tests();
    let mut host = SimulatedHost::new();
    let (mut module, lever) = still_module(2, EngineLightConfig::default());
    module.initialize(&mut host).unwrap();

    lever.set(1.0);
    let view = ViewState::flight();
    assert_eq!(module.tick(DT, &view), TickStatus::Updated(ExhaustState::Exhaust));
    assert_eq!(module.tick(DT, &view), TickStatus::Updated(ExhaustState::Exhaust));

    let pairs = pairs(&host);
    assert_eq!(pairs.len(), 2);
    for (nozzle, area) in pairs {
        assert_eq!(nozzle.name, NOZZLE_LIGHT_NAME);
        assert_eq!(area.name, AREA_LIGHT_NAME);
        assert!(matches!(nozzle.kind, LightKind::Spot { .. }));
        assert_eq!(area.kind, LightKind::Point);

        assert!(nozzle.params.enabled);
        assert!(area.params.enabled);
        assert_relative_eq!(nozzle.params.intensity, compensate(2) * 1.15, epsilon = 1e-6);
        assert_relative_eq!(area.params.intensity, compensate(2), epsilon = 1e-6);
        assert_relative_eq!(nozzle.params.range, 30.0 * 0.75, epsilon = 1e-5);
        assert_relative_eq!(area.params.range, 30.0 * 1.25, epsilon = 1e-5);
        assert_relative_eq!(nozzle.params.color, module.config().exhaust_color());
    }
}

#[test]
fn test_first_tick_is_hidden_by_the_floor() {
    let mut host = SimulatedHost::new();
    let (mut module, lever) = still_module(1, EngineLightConfig::default());
    module.initialize(&mut host).unwrap();

    lever.set(1.0);
    module.tick(DT, &ViewState::flight());

    // Spawned at zero intensity, so the first bright tick is still hidden
    let (nozzle, area) = pairs(&host).remove(0);
    assert!(!nozzle.params.enabled);
    assert!(!area.params.enabled);
    assert_relative_eq!(area.params.intensity, 1.0);
}

#[test]
fn test_floor_hides_whole_pair() {
    let mut host = SimulatedHost::new();
    // Area light lands just under the floor, nozzle light just over it
    let config = EngineLightConfig::default().with_intensity(0.095);
    let (mut module, lever) = still_module(1, config);
    module.initialize(&mut host).unwrap();

    lever.set(1.0);
    let view = ViewState::flight();
    module.tick(DT, &view);
    module.tick(DT, &view);

    let (nozzle, area) = pairs(&host).remove(0);
    assert!(nozzle.params.intensity >= 0.1);
    assert!(area.params.intensity < 0.1);
    assert!(!nozzle.params.enabled);
    assert!(!area.params.enabled);
}

#[test]
fn test_floor_releases_one_tick_after_recovery() {
    let mut host = SimulatedHost::new();
    let (mut module, lever) = still_module(1, EngineLightConfig::default());
    module.initialize(&mut host).unwrap();
    let view = ViewState::flight();

    lever.set(0.2);
    module.tick(DT, &view);
    module.tick(DT, &view);
    assert!(!pairs(&host)[0].0.params.enabled);

    lever.set(1.0);
    module.tick(DT, &view);
    assert!(!pairs(&host)[0].0.params.enabled);
    module.tick(DT, &view);
    assert!(pairs(&host)[0].0.params.enabled);
}

#[test]
fn test_cutoff_fades_then_hides() {
    let mut host = SimulatedHost::new();
    let (mut module, lever) = still_module(1, EngineLightConfig::default());
    module.initialize(&mut host).unwrap();
    let view = ViewState::flight();

    lever.set(1.0);
    module.tick(DT, &view);
    module.tick(DT, &view);

    lever.set(0.0);
    assert_eq!(module.tick(DT, &view), TickStatus::Updated(ExhaustState::Exhaust));
    assert_relative_eq!(module.system().last_frame_throttle(), 0.8);
    let (nozzle, _) = pairs(&host).remove(0);
    assert_relative_eq!(nozzle.params.intensity, 0.64 * 1.15, epsilon = 1e-6);
    assert!(nozzle.params.enabled);

    for _ in 0..10 {
        module.tick(DT, &view);
    }
    let (nozzle, area) = pairs(&host).remove(0);
    assert!(!nozzle.params.enabled);
    assert!(!area.params.enabled);
    assert!(module.system().last_frame_throttle() < 0.1);
}

#[test]
fn test_literal_rule_lets_small_throttle_cut_straight_off() {
    let mut host = SimulatedHost::new();
    let config = EngineLightConfig::default().with_fade(0.8, FadeRule::Literal);
    let (mut module, lever) = still_module(1, config);
    module.initialize(&mut host).unwrap();
    let view = ViewState::flight();

    lever.set(0.1);
    module.tick(DT, &view);
    let before = pairs(&host).remove(0);

    lever.set(0.0);
    assert_eq!(module.tick(DT, &view), TickStatus::Updated(ExhaustState::Disabled));

    // Disabled only turns the lights off, the rest stays as last written
    let (nozzle, area) = pairs(&host).remove(0);
    assert!(!nozzle.params.enabled);
    assert!(!area.params.enabled);
    assert_relative_eq!(nozzle.params.intensity, before.0.params.intensity);
    assert_relative_eq!(area.params.range, before.1.params.range);
}

#[test]
fn test_zero_throttle_from_start_is_disabled() {
    let mut host = SimulatedHost::new();
    let (mut module, _lever) = still_module(2, EngineLightConfig::default());
    module.initialize(&mut host).unwrap();

    assert_eq!(module.tick(DT, &ViewState::flight()), TickStatus::Updated(ExhaustState::Disabled));
    for (nozzle, area) in pairs(&host) {
        assert!(!nozzle.params.enabled);
        assert!(!area.params.enabled);
        assert_relative_eq!(nozzle.params.intensity, 0.0);
    }
}

#[test]
fn test_throttle_above_one_is_clamped() {
    let mut host = SimulatedHost::new();
    let (mut module, lever) = still_module(1, EngineLightConfig::default());
    module.initialize(&mut host).unwrap();

    lever.set(1.7);
    module.tick(DT, &ViewState::flight());
    assert_relative_eq!(module.system().last_frame_throttle(), 1.0);
    assert_relative_eq!(pairs(&host)[0].1.params.intensity, 1.0);
}

#[test]
fn test_interior_view_dims() {
    let mut host = SimulatedHost::new();
    let (mut module, lever) = still_module(1, EngineLightConfig::default());
    module.initialize(&mut host).unwrap();
    lever.set(1.0);

    let view = ViewState::flight().with_camera(CameraMode::Iva);
    module.tick(DT, &view);
    module.tick(DT, &view);

    let (nozzle, area) = pairs(&host).remove(0);
    assert!(nozzle.params.enabled);
    assert_relative_eq!(nozzle.params.intensity, 1.15 * 0.5, epsilon = 1e-6);
    assert_relative_eq!(area.params.intensity, 0.5);
}

#[test]
fn test_interior_view_hides_when_multiplier_is_tiny() {
    let mut host = SimulatedHost::new();
    let config = EngineLightConfig { interior_multiplier: 0.05, ..Default::default() };
    let (mut module, lever) = still_module(1, config);
    module.initialize(&mut host).unwrap();
    lever.set(1.0);

    let flight = ViewState::flight();
    module.tick(DT, &flight);
    module.tick(DT, &flight);
    assert!(pairs(&host)[0].0.params.enabled);

    module.tick(DT, &ViewState::flight().with_camera(CameraMode::Internal));
    assert!(!pairs(&host)[0].0.params.enabled);
}

#[test]
fn test_map_view_hides_but_keeps_updating() {
    let mut host = SimulatedHost::new();
    let (mut module, lever) = still_module(1, EngineLightConfig::default());
    module.initialize(&mut host).unwrap();

    let map = ViewState::flight().with_camera(CameraMode::Map);
    lever.set(1.0);
    module.tick(DT, &map);
    module.tick(DT, &map);

    let (nozzle, area) = pairs(&host).remove(0);
    assert!(!nozzle.params.enabled);
    assert!(!area.params.enabled);
    assert_relative_eq!(area.params.intensity, 1.0);

    // Leaving the map shows the lights straight away
    module.tick(DT, &ViewState::flight());
    assert!(pairs(&host)[0].0.params.enabled);
}

#[test]
fn test_culling_mask_drops_scaled_body_layer() {
    let mut host = SimulatedHost::new();
    let (mut module, lever) = still_module(1, EngineLightConfig::default());
    module.initialize(&mut host).unwrap();
    lever.set(1.0);

    module.tick(DT, &ViewState::flight());
    let (nozzle, area) = pairs(&host).remove(0);
    assert!(!nozzle.params.culling_mask.contains(CullingMask::SCALED_SCENERY));
    assert!(!area.params.culling_mask.contains(CullingMask::SCALED_SCENERY));
    assert!(nozzle.params.culling_mask.contains(CullingMask::LOCAL_SCENERY));

    // Cleared bits accumulate across views
    module.tick(DT, &ViewState::flight().with_scaled_body_layer(Some(15)));
    let (nozzle, _) = pairs(&host).remove(0);
    assert!(!nozzle.params.culling_mask.contains(CullingMask::LOCAL_SCENERY));
    assert!(nozzle.params.culling_mask.contains(CullingMask::DEFAULT));
}

#[test]
fn test_no_scaled_body_leaves_mask_alone() {
    let mut host = SimulatedHost::new();
    let (mut module, _lever) = still_module(1, EngineLightConfig::default());
    module.initialize(&mut host).unwrap();

    module.tick(DT, &ViewState::flight().with_scaled_body_layer(None));
    assert_eq!(pairs(&host)[0].0.params.culling_mask, CullingMask::EVERYTHING);
}

#[test]
fn test_jitter_is_sampled_per_pair() {
    let mut host = SimulatedHost::new();
    let (module, lever) = still_module(2, EngineLightConfig::default());
    let mut module = module.with_jitter_source(|| 0.5_f32);
    module.initialize(&mut host).unwrap();

    lever.set(0.5);
    module.tick(DT, &ViewState::flight());

    // One fresh 0.5 sample per pair: running means 0.1 then 0.2
    let pairs = pairs(&host);
    assert_relative_eq!(pairs[0].0.params.range, (0.5 + 0.1 * 0.1) * 30.0 * 0.75, epsilon = 1e-5);
    assert_relative_eq!(pairs[1].0.params.range, (0.5 + 0.2 * 0.1) * 30.0 * 0.75, epsilon = 1e-5);
    assert_relative_eq!(module.system().jittered_throttle(), 0.52, epsilon = 1e-6);
}

#[test]
fn test_multi_module_engine_uses_greatest_throttle() {
    let mut host = SimulatedHost::new();
    let dry = SimEngine::new(120.0).with_nozzle_ring(1, 0.0);
    let wet = SimEngine::new(180.0).with_nozzle_ring(1, 0.0);
    dry.lever().set(0.4);
    wet.lever().set(0.7);
    let engine = EngineModuleSet::new("RAPIER", vec![dry, wet]).unwrap();

    let mut module: EngineLightModule<_, SimulatedHost> = EngineLightModule::new(EngineLightConfig::default())
        .with_engine(engine)
        .with_jitter_source(|| 0.0_f32);
    assert_eq!(module.initialize(&mut host).unwrap(), 2);
    assert_relative_eq!(module.max_thrust(), 180.0);

    module.tick(DT, &ViewState::flight());
    assert_relative_eq!(module.system().last_frame_throttle(), 0.7);
    assert_relative_eq!(pairs(&host)[1].1.params.intensity, 0.49 * compensate(2), epsilon = 1e-6);
}
