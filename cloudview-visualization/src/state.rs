//! Everything the viewer holds between frames

use crate::buffer::PointBuffer;
use crate::camera::{Camera, Viewport};
use crate::config::ViewerConfig;
use crate::input::InputController;
use crate::rotation::RotationState;
use cloudview_core::NormalizedCloud;
use std::path::PathBuf;

/// Model, GPU buffer and interaction state of one viewport
#[derive(Debug)]
pub struct ViewerState {
    /// The normalized cloud currently on the GPU, if any
    pub cloud: Option<NormalizedCloud>,
    pub buffer: PointBuffer,
    pub rotation: RotationState,
    pub input: InputController,
    pub camera: Camera,
    pub viewport: Viewport,
    /// File the current cloud was read from
    pub source: Option<PathBuf>,
}

impl ViewerState {
    pub fn new(config: &ViewerConfig) -> Self {
        let [width, height] = config.window_size;
        Self {
            cloud: None,
            buffer: PointBuffer::new(),
            rotation: RotationState::from_array(config.initial_rotation),
            input: InputController::new(config.sensitivity),
            camera: Camera::from_config(config),
            viewport: Viewport::new(width, height),
            source: None,
        }
    }

    /// Number of points in the displayed cloud
    pub fn point_count(&self) -> usize {
        self.buffer.point_count()
    }

    pub fn has_points(&self) -> bool {
        !self.buffer.is_empty()
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}
