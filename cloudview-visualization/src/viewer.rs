//! The point cloud viewport

use crate::config::ViewerConfig;
use crate::input::PointerEvent;
use crate::render::{render_frame, FrameScheduler, RedrawReason};
use crate::rotation::RotationState;
use crate::state::ViewerState;
use crate::camera::Viewport;
use cloudview_core::{normalize_points, GraphicsBackend, PointCloud, Result};
use nalgebra::{Point3, Scalar};
use cloudview_io::DelimitedReader;
use std::path::Path;

/// Something that can draw itself and follow the size of its drawable area
pub trait Renderable {
    /// Draw one frame
    fn render(&mut self) -> Result<()>;

    /// Resize the drawable area in pixels
    fn resize(&mut self, width: u32, height: u32);
}

/// Receiver of pointer events from the host window
pub trait InputSink {
    /// Returns whether the event changed what is shown
    fn on_pointer(&mut self, event: PointerEvent) -> bool;
}

/// Result of a load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The chooser was cancelled; nothing changed
    NoSelection,
    Loaded { points: usize },
}

/// One viewport: the loaded cloud, its GPU buffer, the rotation and the
/// frame scheduler, drawn through a [`GraphicsBackend`].
pub struct Viewer<B: GraphicsBackend> {
    backend: B,
    state: ViewerState,
    config: ViewerConfig,
    scheduler: FrameScheduler,
}

impl<B: GraphicsBackend> Viewer<B> {
    /// Create an empty viewer sized to `config.window_size`
    pub fn new(backend: B, config: ViewerConfig) -> Self {
        let mut viewer = Self {
            backend,
            state: ViewerState::new(&config),
            config,
            scheduler: FrameScheduler::new(),
        };
        viewer.apply_viewport();
        viewer.scheduler.request(RedrawReason::InitialDisplay);
        viewer
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn rotation(&self) -> RotationState {
        self.state.rotation
    }

    /// Normalize `cloud` and replace the displayed points with it.
    ///
    /// A cloud that fails normalization leaves the viewer untouched. If the
    /// GPU buffer cannot be created the old buffer is already released, so
    /// the viewer is left empty. The rotation is kept either way.
    pub fn load_points<T>(&mut self, cloud: &PointCloud<Point3<T>>) -> Result<usize>
    where
        T: Scalar + Copy + Into<f64>,
    {
        let normalized = normalize_points(cloud)?;

        if let Err(e) = self.state.buffer.upload(&mut self.backend, &normalized) {
            log::error!("failed to upload point buffer: {}", e);
            self.state.cloud = None;
            self.state.source = None;
            self.scheduler.request(RedrawReason::DataLoaded);
            return Err(e);
        }

        let count = normalized.len();
        self.state.cloud = Some(normalized);
        self.state.source = None;
        self.scheduler.request(RedrawReason::DataLoaded);
        Ok(count)
    }

    /// Load the table at `path`, or do nothing when no file was chosen.
    ///
    /// Read and parse errors leave the current cloud on screen.
    pub fn load_file(&mut self, path: Option<&Path>) -> Result<LoadOutcome> {
        let Some(path) = path else {
            log::info!("no file selected");
            return Ok(LoadOutcome::NoSelection);
        };

        let cloud = DelimitedReader::read_point_cloud(path, &self.config.table)?;
        let points = self.load_points(&cloud)?;
        self.state.source = Some(path.to_path_buf());
        log::info!("displaying {} points from {}", points, path.display());
        Ok(LoadOutcome::Loaded { points })
    }

    /// Draw a frame only if one was requested since the last frame
    pub fn render_if_requested(&mut self) -> Result<bool> {
        if !self.scheduler.is_pending() {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    fn apply_viewport(&mut self) {
        let viewport = self.state.viewport;
        self.backend.set_viewport(viewport.width, viewport.height);
        let projection = self.state.camera.projection_matrix(viewport);
        self.backend.set_projection(&projection);
    }
}

impl<B: GraphicsBackend> Renderable for Viewer<B> {
    fn render(&mut self) -> Result<()> {
        let reason = self.scheduler.begin();
        let result = render_frame(&mut self.backend, &self.state, &self.config);
        self.scheduler.finish();

        let points = result?;
        log::trace!("frame {} ({:?}): {} points", self.scheduler.frames_rendered(), reason, points);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.state.viewport = Viewport::new(width, height);
        self.apply_viewport();
        log::debug!("viewport resized to {}x{}", width, height);
        self.scheduler.request(RedrawReason::Resize);
    }
}

impl<B: GraphicsBackend> InputSink for Viewer<B> {
    fn on_pointer(&mut self, event: PointerEvent) -> bool {
        let state = &mut self.state;
        let changed = state.input.handle(event, &mut state.rotation);
        if changed {
            self.scheduler.request(RedrawReason::Rotation);
        }
        changed
    }
}
