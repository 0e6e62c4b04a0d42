//! Local-to-world placement of a tracked surface.

use glam::{Affine3A, Quat, Vec3};

/// Rigid transform (rotation + translation) mapping a surface's local frame
/// into world space.
///
/// Surfaces are planar in their local XY plane, so local +Z is the surface
/// up-vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Orientation of the local frame.
    pub rotation: Quat,
    /// Position of the local origin in world space.
    pub translation: Vec3,
}

impl Placement {
    /// The identity placement: local space equals world space.
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
    };

    /// Creates a placement from a rotation and a translation.
    ///
    /// The rotation is normalized so that callers can pass quaternions that
    /// accumulated drift from tracking updates.
    pub fn new(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation: rotation.normalize(),
            translation,
        }
    }

    /// Creates a translation-only placement.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            rotation: Quat::IDENTITY,
            translation,
        }
    }

    /// World-space up-vector of the surface (rotated local +Z).
    pub fn up_vector(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Transforms a local-space point into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.rotation * local + self.translation
    }

    /// Returns the placement as an affine matrix, e.g. for a model uniform.
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.rotation, self.translation)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_up_is_local_z() {
        assert_eq!(Placement::IDENTITY.up_vector(), Vec3::Z);
    }

    #[test]
    fn test_rotated_up_vector() {
        // Rotating +Z a quarter turn about X tips it onto -Y.
        let placement = Placement::new(Quat::from_rotation_x(FRAC_PI_2), Vec3::ZERO);
        let up = placement.up_vector();
        assert!((up - Vec3::NEG_Y).length() < 1e-6, "got {up}");
    }

    #[test]
    fn test_transform_point_applies_rotation_then_translation() {
        let placement = Placement::new(
            Quat::from_rotation_z(FRAC_PI_2),
            Vec3::new(10.0, 0.0, 0.0),
        );
        let world = placement.transform_point(Vec3::X);
        assert!((world - Vec3::new(10.0, 1.0, 0.0)).length() < 1e-6, "got {world}");
    }

    #[test]
    fn test_new_normalizes_rotation() {
        let placement = Placement::new(Quat::from_xyzw(0.0, 0.0, 0.0, 2.0), Vec3::ZERO);
        assert!((placement.rotation.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_affine_matches_transform_point() {
        let placement = Placement::new(Quat::from_rotation_y(0.3), Vec3::new(1.0, 2.0, 3.0));
        let p = Vec3::new(0.5, -0.25, 0.0);
        let via_affine = placement.to_affine().transform_point3(p);
        assert!((via_affine - placement.transform_point(p)).length() < 1e-5);
    }
}
