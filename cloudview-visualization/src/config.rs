//! Viewer configuration

use cloudview_core::{Error, Result, Rgba};
use cloudview_gpu::RenderConfig;
use cloudview_io::DelimitedOptions;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for the viewer window, camera, interaction and table layout.
///
/// Every field has a default, so a JSON override file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window_title: String,
    pub window_size: [u32; 2],
    /// Screen-space point size in pixels
    pub point_size: f32,
    pub background_color: Rgba,
    /// Vertical field of view
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_eye: [f32; 3],
    pub camera_up: [f32; 3],
    /// Starting rotation in sixteenths of a degree, `[x, y, z]`
    pub initial_rotation: [i32; 3],
    /// Rotation in sixteenths of a degree per pixel of pointer travel
    pub sensitivity: i32,
    pub enable_alpha_blending: bool,
    pub enable_depth_test: bool,
    pub table: DelimitedOptions,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_title: "3D Point Cloud Viewer".to_string(),
            window_size: [800, 600],
            point_size: 5.0,
            background_color: [0.0, 0.0, 0.0, 1.0],
            fov_degrees: 45.0,
            near: 0.1,
            far: 50.0,
            camera_eye: [2.0, 0.0, 0.0],
            camera_up: [0.0, -1.0, 0.0],
            initial_rotation: [-90 * 16, 0, 0],
            sensitivity: 8,
            enable_alpha_blending: true,
            enable_depth_test: false,
            table: DelimitedOptions::default(),
        }
    }
}

impl ViewerConfig {
    /// Load a configuration from a JSON file and validate it
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check that the projection and point parameters are usable
    pub fn validate(&self) -> Result<()> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(Error::Config(format!("fov_degrees must be in (0, 180), got {}", self.fov_degrees)));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(Error::Config(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        if !(self.point_size > 0.0) {
            return Err(Error::Config(format!("point_size must be positive, got {}", self.point_size)));
        }
        if self.camera_eye == [0.0; 3] {
            return Err(Error::Config("camera_eye must not coincide with the origin".to_string()));
        }
        let eye = Vector3::from(self.camera_eye);
        let up = Vector3::from(self.camera_up);
        if up.cross(&eye).norm() <= 1e-6 * up.norm() * eye.norm() {
            return Err(Error::Config(format!(
                "camera_up {:?} must be non-zero and not parallel to the view direction",
                self.camera_up
            )));
        }
        Ok(())
    }

    /// The subset of settings the GPU backend needs
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            enable_depth_test: self.enable_depth_test,
            enable_alpha_blending: self.enable_alpha_blending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudview_io::Delimiter;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_rotation, [-1440, 0, 0]);
        assert_eq!(config.table.delimiter, Some(Delimiter::Semicolon));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "point_size": 2.5, "table": {{ "delimiter": "comma" }} }}"#).unwrap();

        let config = ViewerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.point_size, 2.5);
        assert_eq!(config.table.delimiter, Some(Delimiter::Comma));
        assert!(config.table.skip_header);
        assert_eq!(config.fov_degrees, 45.0);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let config = ViewerConfig { near: 5.0, far: 1.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = ViewerConfig { point_size: 0.0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = ViewerConfig { camera_up: [0.0; 3], ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = ViewerConfig { camera_up: [-3.0, 0.0, 0.0], ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(ViewerConfig::from_json_file(file.path()), Err(Error::Config(_))));
    }
}
