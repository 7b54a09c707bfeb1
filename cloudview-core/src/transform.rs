//! 3D transformation utilities

use nalgebra::{Matrix4, Point3, Unit, Vector3};
use serde::{Deserialize, Serialize};

/// A 4x4 homogeneous transformation.
///
/// Composition follows the fixed-function convention: `a.compose(b)` applies
/// `b` first, then `a`, so successive `compose` calls read in the same order
/// as successive `glRotatef`/`glMultMatrix` calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Rotation of `degrees` about `axis` through the origin
    pub fn rotation_degrees(axis: &Unit<Vector3<f32>>, degrees: f32) -> Self {
        Self {
            matrix: Matrix4::from_axis_angle(axis, degrees.to_radians()),
        }
    }

    /// Right-handed view transform of an eye looking at `target`
    pub fn look_at(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::look_at_rh(eye, target, up),
        }
    }

    /// Perspective projection with a vertical field of view in degrees.
    ///
    /// Produces OpenGL clip space (depth in `[-1, 1]`). Callers must ensure
    /// `aspect > 0` and `near != far`.
    pub fn perspective(fovy_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            matrix: Matrix4::new_perspective(aspect, fovy_degrees.to_radians(), near, far),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Compose this transformation with another; `other` is applied first
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Check if this is approximately the identity transformation
    pub fn is_identity(&self, epsilon: f32) -> bool {
        let identity = Matrix4::identity();
        (self.matrix - identity).norm() < epsilon
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f32>> for Transform3D {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_about_z() {
        let rot = Transform3D::rotation_degrees(&Vector3::z_axis(), 90.0);
        let p = rot.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_compose_applies_right_operand_first() {
        let rx = Transform3D::rotation_degrees(&Vector3::x_axis(), 90.0);
        let rz = Transform3D::rotation_degrees(&Vector3::z_axis(), 90.0);
        // z-rotation first: x -> y, then x-rotation: y -> z
        let p = (rx * rz).transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let view = Transform3D::look_at(
            &Point3::new(2.0, 0.0, 0.0),
            &Point3::origin(),
            &Vector3::new(0.0, -1.0, 0.0),
        );
        let eye = view.transform_point(&Point3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(eye, Point3::origin(), epsilon = 1e-6);
        // The target lies straight ahead, down the -Z axis of view space
        let target = view.transform_point(&Point3::origin());
        assert_relative_eq!(target, Point3::new(0.0, 0.0, -2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_identity() {
        assert!(Transform3D::default().is_identity(1e-6));
        assert!(!Transform3D::rotation_degrees(&Vector3::y_axis(), 1.0).is_identity(1e-6));
    }
}
