//! Model rotation state

use cloudview_core::Transform3D;
use nalgebra::{Matrix4, Vector3};

/// Units of [`RotationState`] per degree
pub const SIXTEENTHS_PER_DEGREE: f32 = 16.0;

/// Three Euler angles in sixteenths of a degree.
///
/// The angles are unbounded accumulators; trigonometry makes them periodic.
/// They are applied as X, then Y, then Z, with no gimbal-lock handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationState {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl RotationState {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn from_array([x, y, z]: [i32; 3]) -> Self {
        Self { x, y, z }
    }

    /// Angles in degrees, `[x, y, z]`
    pub fn degrees(&self) -> [f32; 3] {
        [
            self.x as f32 / SIXTEENTHS_PER_DEGREE,
            self.y as f32 / SIXTEENTHS_PER_DEGREE,
            self.z as f32 / SIXTEENTHS_PER_DEGREE,
        ]
    }

    /// `Rx * Ry * Rz`: issued in the same order as three successive
    /// `glRotatef` calls about X, Y and Z.
    pub fn transform(&self) -> Transform3D {
        let [x, y, z] = self.degrees();
        Transform3D::rotation_degrees(&Vector3::x_axis(), x)
            * Transform3D::rotation_degrees(&Vector3::y_axis(), y)
            * Transform3D::rotation_degrees(&Vector3::z_axis(), z)
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        self.transform().matrix
    }

    pub(crate) fn add(&mut self, dx: i32, dy: i32, dz: i32) {
        self.x = self.x.wrapping_add(dx);
        self.y = self.y.wrapping_add(dy);
        self.z = self.z.wrapping_add(dz);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_degrees() {
        let rotation = RotationState::new(-1440, 8, 5760);
        assert_eq!(rotation.degrees(), [-90.0, 0.5, 360.0]);
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        assert!(RotationState::default().transform().is_identity(1e-6));
    }

    #[test]
    fn test_full_turn_matches_no_turn() {
        let turned = RotationState::new(360 * 16, -720 * 16, 360 * 16).matrix();
        assert_relative_eq!(turned, Matrix4::identity(), epsilon = 1e-5);
    }

    #[test]
    fn test_axis_order_is_x_then_y_then_z() {
        let rotation = RotationState::new(90 * 16, 0, 90 * 16);
        let p = rotation.transform().transform_point(&Point3::new(1.0, 0.0, 0.0));
        // Rz first takes +X to +Y, then Rx takes +Y to +Z
        assert_relative_eq!(p, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-6);

        let swapped = Transform3D::rotation_degrees(&Vector3::z_axis(), 90.0)
            * Transform3D::rotation_degrees(&Vector3::x_axis(), 90.0);
        let q = swapped.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((p - q).norm() > 0.5);
    }
}
