//! Builds the light pair for one nozzle
//!
//! Both lights start where the nozzle is and look down the thrust axis. The
//! nozzle light is a wide spot nudged by the exhaust offset; the area light is
//! a point light a quarter of the plume further out.

use crate::config::{EngineLightConfig, AREA_LIGHT_PLUME_FRACTION, NOZZLE_SPOT_ANGLE_DEGREES};
use crate::error::HostError;
use crate::foundation::math::{Transform, Vec3};
use crate::host::{LightDescriptor, LightHost, LightKind, LightParams, Shadows, ThrustTransform};

use super::pair::{ExhaustLight, LightPair};

/// Host object name of nozzle lights
pub const NOZZLE_LIGHT_NAME: &str = "_EngineLight_Nozzle";
/// Host object name of area lights
pub const AREA_LIGHT_NAME: &str = "_EngineLight_Area";

/// Factory functions for nozzle light pairs
pub struct NozzleLightFactory;

impl NozzleLightFactory {
    /// Descriptor of the spot light sitting at the nozzle
    pub fn nozzle(engine_frame: &Transform, nozzle: &ThrustTransform, config: &EngineLightConfig) -> LightDescriptor {
        let world = Self::placement(nozzle, config.exhaust_offset_z);
        LightDescriptor {
            name: NOZZLE_LIGHT_NAME,
            kind: LightKind::Spot { angle_degrees: NOZZLE_SPOT_ANGLE_DEGREES },
            world,
            local: engine_frame.relative(&world),
            params: LightParams::disabled(config.exhaust_color()),
            shadows: Shadows::None,
        }
    }

    /// Descriptor of the point light further down the plume
    pub fn area(engine_frame: &Transform, nozzle: &ThrustTransform, config: &EngineLightConfig) -> LightDescriptor {
        let offset = config.exhaust_offset_z + config.plume_length * AREA_LIGHT_PLUME_FRACTION;
        let world = Self::placement(nozzle, offset);
        LightDescriptor {
            name: AREA_LIGHT_NAME,
            kind: LightKind::Point,
            world,
            local: engine_frame.relative(&world),
            params: LightParams::disabled(config.exhaust_color()),
            shadows: if config.area_light_shadows {
                Shadows::Hard { strength: 1.0 }
            } else {
                Shadows::None
            },
        }
    }

    /// Spawn both lights for `nozzle`
    ///
    /// If the second spawn fails the first light is released again, so the
    /// host is never left holding half a pair.
    pub fn build_pair<H: LightHost>(
        host: &mut H,
        engine_frame: &Transform,
        nozzle: &ThrustTransform,
        config: &EngineLightConfig,
    ) -> Result<LightPair<H::Light>, HostError> {
        let nozzle_desc = Self::nozzle(engine_frame, nozzle, config);
        let area_desc = Self::area(engine_frame, nozzle, config);

        let nozzle_light = host.spawn_light(&nozzle_desc)?;
        let area_light = match host.spawn_light(&area_desc) {
            Ok(light) => light,
            Err(err) => {
                host.release_light(nozzle_light);
                return Err(err);
            }
        };

        log::debug!(
            "{} nozzle light at {:?}, area light at {:?}",
            crate::foundation::logging::PREFIX,
            nozzle_desc.world.position,
            area_desc.world.position
        );

        Ok(LightPair {
            nozzle: ExhaustLight::new(nozzle_light, nozzle_desc.params),
            area: ExhaustLight::new(area_light, area_desc.params),
        })
    }

    fn placement(nozzle: &ThrustTransform, forward_offset: f32) -> Transform {
        Transform::looking_along(nozzle.position, nozzle.forward)
            .translated_local(Vec3::new(0.0, 0.0, forward_offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::sim::SimulatedHost;
    use crate::host::CullingMask;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn downward_nozzle() -> ThrustTransform {
        ThrustTransform::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn test_nozzle_light_is_wide_spot_at_offset() {
        let config = EngineLightConfig { exhaust_offset_z: 0.5, ..Default::default() };
        let desc = NozzleLightFactory::nozzle(&Transform::identity(), &downward_nozzle(), &config);

        assert_eq!(desc.name, NOZZLE_LIGHT_NAME);
        assert_eq!(desc.kind, LightKind::Spot { angle_degrees: 120.0 });
        assert_relative_eq!(desc.world.position, Vec3::new(0.0, 1.5, 0.0), epsilon = EPSILON);
        assert_relative_eq!(desc.world.forward(), Vec3::new(0.0, -1.0, 0.0), epsilon = EPSILON);
        assert!(!desc.params.enabled);
        assert_eq!(desc.params.culling_mask, CullingMask::EVERYTHING);
    }

    #[test]
    fn test_area_light_sits_quarter_plume_down() {
        let config = EngineLightConfig { exhaust_offset_z: 0.5, plume_length: 20.0, ..Default::default() };
        let desc = NozzleLightFactory::area(&Transform::identity(), &downward_nozzle(), &config);

        assert_eq!(desc.name, AREA_LIGHT_NAME);
        assert_eq!(desc.kind, LightKind::Point);
        // 2.0 - (0.5 + 20 * 0.25)
        assert_relative_eq!(desc.world.position, Vec3::new(0.0, -3.5, 0.0), epsilon = EPSILON);
        assert_eq!(desc.shadows, Shadows::None);
        assert!(!desc.params.enabled);
    }

    #[test]
    fn test_area_shadows_option() {
        let config = EngineLightConfig { area_light_shadows: true, ..Default::default() };
        let desc = NozzleLightFactory::area(&Transform::identity(), &downward_nozzle(), &config);
        assert_eq!(desc.shadows, Shadows::Hard { strength: 1.0 });
    }

    #[test]
    fn test_local_placement_is_relative_to_engine() {
        let frame = Transform::from_position(Vec3::new(10.0, 0.0, 0.0));
        let nozzle = ThrustTransform::new(Vec3::new(10.0, 2.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let desc = NozzleLightFactory::nozzle(&frame, &nozzle, &EngineLightConfig::default());

        assert_relative_eq!(desc.local.position, Vec3::new(0.0, 2.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(frame.combine(&desc.local).position, desc.world.position, epsilon = EPSILON);
    }

    #[test]
    fn test_build_pair_spawns_two_disabled_lights() {
        let mut host = SimulatedHost::new();
        let config = EngineLightConfig::default();
        let pair = NozzleLightFactory::build_pair(&mut host, &Transform::identity(), &downward_nozzle(), &config).unwrap();

        assert_eq!(host.light_count(), 2);
        assert!(!pair.is_enabled());
        assert_relative_eq!(pair.nozzle.params().color, config.exhaust_color());

        let names: Vec<_> = host.lights().iter().map(|r| r.name).collect();
        assert_eq!(names, vec![NOZZLE_LIGHT_NAME, AREA_LIGHT_NAME]);
    }

    #[test]
    fn test_failed_area_spawn_releases_nozzle_light() {
        let mut host = SimulatedHost::new();
        host.limit_spawns(1);

        let result = NozzleLightFactory::build_pair(
            &mut host,
            &Transform::identity(),
            &downward_nozzle(),
            &EngineLightConfig::default(),
        );

        assert!(matches!(result, Err(HostError::SpawnFailed { .. })));
        assert_eq!(host.light_count(), 0);
    }
}
