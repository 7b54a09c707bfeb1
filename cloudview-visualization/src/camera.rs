//! Fixed look-at camera and viewport projection

use crate::config::ViewerConfig;
use cloudview_core::Transform3D;
use nalgebra::{Matrix4, Point3, Vector3};

/// Size of the drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height, with each side clamped to at least one pixel so a
    /// collapsed window never yields a zero or infinite ratio.
    pub fn aspect_ratio(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    /// Whether either side is zero
    pub fn is_collapsed(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The viewer camera.
///
/// The extrinsics never change at runtime: the eye sits two units along +X
/// looking at the origin with an inverted Y up vector, so the first frame
/// shows the cloud from its right-hand side. All interaction rotates the
/// model instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Build the camera described by `config`
    pub fn from_config(config: &ViewerConfig) -> Self {
        let [ex, ey, ez] = config.camera_eye;
        let [ux, uy, uz] = config.camera_up;
        Self {
            position: Point3::new(ex, ey, ez),
            target: Point3::origin(),
            up: Vector3::new(ux, uy, uz),
            fov_degrees: config.fov_degrees,
            near: config.near,
            far: config.far,
        }
    }

    /// The world-to-eye transform
    pub fn view_transform(&self) -> Transform3D {
        Transform3D::look_at(&self.position, &self.target, &self.up)
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().matrix
    }

    /// Perspective projection for `viewport`
    pub fn projection_matrix(&self, viewport: Viewport) -> Matrix4<f32> {
        Transform3D::perspective(self.fov_degrees, viewport.aspect_ratio(), self.near, self.far).matrix
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}
