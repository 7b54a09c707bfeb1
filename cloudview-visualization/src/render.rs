//! On-demand frame scheduling and the per-frame draw sequence

use crate::axes::axis_vertices;
use crate::config::ViewerConfig;
use crate::state::ViewerState;
use cloudview_core::{GraphicsBackend, Result, Transform3D};

/// Whether a frame is currently being drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    Rendering,
}

/// What asked for a new frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawReason {
    InitialDisplay,
    Rotation,
    DataLoaded,
    Resize,
}

/// Tracks redraw requests between frames.
///
/// Frames are only produced on request; several requests made before the next
/// frame collapse into one.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<RedrawReason>,
    state: RenderState,
    frames_rendered: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a frame. The first reason since the last frame is kept.
    pub fn request(&mut self, reason: RedrawReason) {
        if self.pending.is_none() {
            log::trace!("redraw requested: {:?}", reason);
            self.pending = Some(reason);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<RedrawReason> {
        self.pending
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Enter `Rendering`, consuming the pending request
    pub fn begin(&mut self) -> Option<RedrawReason> {
        self.state = RenderState::Rendering;
        self.pending.take()
    }

    /// Return to `Idle` after the frame was presented
    pub fn finish(&mut self) {
        self.state = RenderState::Idle;
        self.frames_rendered += 1;
    }
}

/// Draw one frame of `state`. Returns the number of points drawn.
///
/// The model-view is the fixed camera followed by the X, Y, Z rotations, so
/// the reference axes turn together with the cloud. `end_frame` is issued even
/// when drawing the points fails.
pub fn render_frame<B: GraphicsBackend + ?Sized>(
    backend: &mut B,
    state: &ViewerState,
    config: &ViewerConfig,
) -> Result<usize> {
    backend.begin_frame(config.background_color)?;

    let model_view = Transform3D::identity()
        .compose(state.camera.view_transform())
        .compose(state.rotation.transform());
    backend.set_model_view(&model_view.matrix);

    let points = state.buffer.draw(backend, config.point_size);
    backend.draw_lines(&axis_vertices());
    backend.end_frame()?;

    Ok(if points? { state.buffer.point_count() } else { 0 })
}
