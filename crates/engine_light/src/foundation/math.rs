//! Math utilities and types
//!
//! Engine frames, thrust transforms and light placement all use these
//! nalgebra aliases. Coordinates are whatever the host uses; the only
//! convention assumed here is that an object's local forward axis is +Z.

pub use nalgebra::{Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Linear RGB color, components nominally in 0.0..=1.0
pub type Color = Vector3<f32>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create a transform at `position` whose local +Z axis points along `forward`.
    ///
    /// A zero-length `forward` keeps the identity rotation.
    pub fn looking_along(position: Vec3, forward: Vec3) -> Self {
        Self::from_position_rotation(position, look_rotation(forward))
    }

    /// World-space direction of the local +Z axis
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }

    /// Move by `offset` expressed in this transform's own axes (scale ignored).
    pub fn translate_local(&mut self, offset: Vec3) {
        self.position += self.rotation * offset;
    }

    /// Builder form of [`Transform::translate_local`]
    pub fn translated_local(mut self, offset: Vec3) -> Self {
        self.translate_local(offset);
        self
    }

    /// Combine this transform with another (`self` is the parent)
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            position: self.position + self.rotation * (self.scale.component_mul(&other.position)),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }

    /// Get the inverse transform
    ///
    /// A scale axis at (or within `f32::EPSILON` of) zero has no inverse; it
    /// maps to zero so the result collapses that axis instead of turning into
    /// inf/NaN.
    pub fn inverse(&self) -> Self {
        let inv_scale = self.scale.map(|s| if s.abs() > f32::EPSILON { s.recip() } else { 0.0 });
        let inv_rotation = self.rotation.inverse();
        let inv_position = inv_rotation * (-self.position).component_mul(&inv_scale);

        Self {
            position: inv_position,
            rotation: inv_rotation,
            scale: inv_scale,
        }
    }

    /// Express `world` relative to this transform, as a child parented to it would store it.
    pub fn relative(&self, world: &Self) -> Self {
        self.inverse().combine(world)
    }
}

/// Rotation mapping local +Z onto `forward`.
///
/// Uses world +Y as the up hint, falling back to +X when `forward` is
/// (anti)parallel to it.
pub fn look_rotation(forward: Vec3) -> Quat {
    let Some(dir) = forward.try_normalize(f32::EPSILON) else {
        return Quat::identity();
    };

    let up = if dir.dot(&Vec3::y()).abs() > 0.999 {
        Vec3::x()
    } else {
        Vec3::y()
    };

    Quat::face_towards(&dir, &up)
}
