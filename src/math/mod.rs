pub mod constants;

pub use constants::*;

use glam::{Mat3, Vec3};

/// Vector helpers used by the portal geometry
pub trait PortalMath {
    /// Unit vector, or [`DEGENERATE_DIRECTION`] when the input has zero length
    fn direction_or_fallback(&self) -> Vec3;

    /// Unit vector pointing from `self` to `other`, with the same fallback
    fn direction_to(&self, other: &Self) -> Vec3;

    /// Euclidean distance between two points
    fn distance_to(&self, other: &Self) -> f32;
}

impl PortalMath for Vec3 {
    fn direction_or_fallback(&self) -> Vec3 {
        self.try_normalize().unwrap_or(DEGENERATE_DIRECTION)
    }

    fn direction_to(&self, other: &Self) -> Vec3 {
        (*other - *self).direction_or_fallback()
    }

    fn distance_to(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }
}

/// Rotation and orbit helpers for scripted motion
pub struct MathUtils;

impl MathUtils {
    /// Rotation of `angle` radians about an arbitrary (not necessarily unit) axis
    pub fn rotation(axis: Vec3, angle: f32) -> Mat3 {
        Mat3::from_axis_angle(axis.direction_or_fallback(), angle)
    }

    /// Arm vector of an orbit about `axis`, perpendicular to the axis, of length `arm_length`
    pub fn orbit_arm(axis: Vec3, arm_length: f32) -> Vec3 {
        let arm = axis
            .cross(ORBIT_REFERENCE_AXIS)
            .try_normalize()
            .unwrap_or_else(|| axis.direction_or_fallback().any_orthonormal_vector());
        arm * arm_length
    }

    /// Offset of an orbiting body from its parent after rotating the arm by `angle`
    pub fn orbit_offset(axis: Vec3, angle: f32, arm_length: f32) -> Vec3 {
        Self::rotation(axis, angle) * Self::orbit_arm(axis, arm_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_fallback() {
        assert_eq!(Vec3::ZERO.direction_or_fallback(), DEGENERATE_DIRECTION);

        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(p.direction_to(&p), DEGENERATE_DIRECTION);

        let dir = Vec3::ZERO.direction_to(&Vec3::new(0.0, 0.0, 5.0));
        assert!((dir - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_distance() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(4.0, 4.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_orbit_arm_is_perpendicular() {
        let axis = Vec3::new(0.3, 0.7, 0.0);
        let arm = MathUtils::orbit_arm(axis, 2.0);

        assert!((arm.length() - 2.0).abs() < 1e-5);
        assert!(arm.dot(axis).abs() < 1e-5);

        // The arm rotates about the axis, so its length is preserved
        let offset = MathUtils::orbit_offset(axis, 1.3, 2.0);
        assert!((offset.length() - 2.0).abs() < 1e-5);
        assert!(offset.dot(axis).abs() < 1e-5);
    }

    #[test]
    fn test_orbit_arm_parallel_to_reference() {
        // Axis parallel to the reference axis still yields a finite perpendicular arm
        let arm = MathUtils::orbit_arm(Vec3::Z, 1.5);
        assert!(arm.is_finite());
        assert!((arm.length() - 1.5).abs() < 1e-5);
        assert!(arm.dot(Vec3::Z).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_degenerate_axis() {
        let rot = MathUtils::rotation(Vec3::ZERO, 0.5);
        assert!(rot.is_finite());
        // Falls back to a rotation about +Y, which leaves +Y unchanged
        assert!((rot * Vec3::Y - Vec3::Y).length() < 1e-6);
    }
}
