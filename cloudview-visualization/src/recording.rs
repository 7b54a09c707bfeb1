//! A [`GraphicsBackend`] that records calls instead of drawing
//!
//! Used to exercise the render loop and buffer management without a GPU.

use cloudview_core::{BufferHandle, ColoredVertex, Error, GraphicsBackend, Result, Rgba};
use nalgebra::Matrix4;
use std::collections::BTreeMap;

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    CreateBuffer { handle: BufferHandle, len: usize },
    ReleaseBuffer(BufferHandle),
    SetViewport { width: u32, height: u32 },
    SetProjection(Matrix4<f32>),
    BeginFrame(Rgba),
    SetModelView(Matrix4<f32>),
    BindBuffer(BufferHandle),
    DrawPoints { count: usize, point_size: f32 },
    UnbindBuffer,
    DrawLines(Vec<ColoredVertex>),
    EndFrame,
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<BackendCall>,
    /// Make every `create_vertex_buffer` fail
    pub fail_buffer_creation: bool,
    buffers: BTreeMap<u64, Vec<f32>>,
    next_id: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles that were created and not yet released
    pub fn live_buffers(&self) -> Vec<BufferHandle> {
        self.buffers.keys().map(|&id| BufferHandle(id)).collect()
    }

    /// Contents of a live buffer
    pub fn buffer_data(&self, handle: BufferHandle) -> Option<&[f32]> {
        self.buffers.get(&handle.0).map(Vec::as_slice)
    }

    /// Calls of each completed frame, `BeginFrame` through `EndFrame`
    pub fn frames(&self) -> Vec<&[BackendCall]> {
        let mut frames = Vec::new();
        let mut start = None;
        for (i, call) in self.calls.iter().enumerate() {
            match call {
                BackendCall::BeginFrame(_) => start = Some(i),
                BackendCall::EndFrame => {
                    if let Some(s) = start.take() {
                        frames.push(&self.calls[s..=i]);
                    }
                }
                _ => {}
            }
        }
        frames
    }

    /// The most recent projection, if any was set
    pub fn last_projection(&self) -> Option<&Matrix4<f32>> {
        self.calls.iter().rev().find_map(|call| match call {
            BackendCall::SetProjection(m) => Some(m),
            _ => None,
        })
    }
}

impl GraphicsBackend for RecordingBackend {
    fn create_vertex_buffer(&mut self, data: &[f32]) -> Result<BufferHandle> {
        if self.fail_buffer_creation {
            return Err(Error::Gpu("buffer creation disabled".to_string()));
        }
        self.next_id += 1;
        let handle = BufferHandle(self.next_id);
        self.buffers.insert(handle.0, data.to_vec());
        self.calls.push(BackendCall::CreateBuffer { handle, len: data.len() });
        Ok(handle)
    }

    fn release_vertex_buffer(&mut self, handle: BufferHandle) {
        self.buffers.remove(&handle.0);
        self.calls.push(BackendCall::ReleaseBuffer(handle));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.calls.push(BackendCall::SetViewport { width, height });
    }

    fn set_projection(&mut self, projection: &Matrix4<f32>) {
        self.calls.push(BackendCall::SetProjection(*projection));
    }

    fn begin_frame(&mut self, clear_color: Rgba) -> Result<()> {
        self.calls.push(BackendCall::BeginFrame(clear_color));
        Ok(())
    }

    fn set_model_view(&mut self, model_view: &Matrix4<f32>) {
        self.calls.push(BackendCall::SetModelView(*model_view));
    }

    fn bind_vertex_buffer(&mut self, handle: BufferHandle) -> Result<()> {
        if !self.buffers.contains_key(&handle.0) {
            return Err(Error::Gpu(format!("bind of released buffer {:?}", handle)));
        }
        self.calls.push(BackendCall::BindBuffer(handle));
        Ok(())
    }

    fn draw_points(&mut self, count: usize, point_size: f32) {
        self.calls.push(BackendCall::DrawPoints { count, point_size });
    }

    fn unbind_vertex_buffer(&mut self) {
        self.calls.push(BackendCall::UnbindBuffer);
    }

    fn draw_lines(&mut self, vertices: &[ColoredVertex]) {
        self.calls.push(BackendCall::DrawLines(vertices.to_vec()));
    }

    fn end_frame(&mut self) -> Result<()> {
        self.calls.push(BackendCall::EndFrame);
        Ok(())
    }
}
