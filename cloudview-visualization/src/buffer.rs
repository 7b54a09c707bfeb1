//! The single interleaved point buffer

use cloudview_core::{BufferHandle, GraphicsBackend, NormalizedCloud, Result};

/// Owner of the one vertex buffer holding the current cloud.
///
/// The buffer is only ever replaced whole: `upload` releases the previous
/// buffer before creating the new one, so a stale handle is never drawn.
#[derive(Debug, Default)]
pub struct PointBuffer {
    handle: Option<BufferHandle>,
    point_count: usize,
}

impl PointBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer contents with `cloud`, interleaved as
    /// `x y z r g b a` per point.
    ///
    /// If creation fails the previous buffer is already gone and the manager
    /// is left empty.
    pub fn upload<B: GraphicsBackend + ?Sized>(&mut self, backend: &mut B, cloud: &NormalizedCloud) -> Result<BufferHandle> {
        self.release(backend);

        let handle = backend.create_vertex_buffer(&cloud.interleaved())?;
        self.handle = Some(handle);
        self.point_count = cloud.len();
        log::debug!("uploaded {} points into {:?}", self.point_count, handle);
        Ok(handle)
    }

    /// Release the held buffer, if any
    pub fn release<B: GraphicsBackend + ?Sized>(&mut self, backend: &mut B) {
        if let Some(handle) = self.handle.take() {
            backend.release_vertex_buffer(handle);
        }
        self.point_count = 0;
    }

    pub fn handle(&self) -> Option<BufferHandle> {
        self.handle
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.handle.is_none() || self.point_count == 0
    }

    /// Draw every point, scoped by bind and unbind. Returns `false` without
    /// touching the backend when there is nothing to draw.
    pub fn draw<B: GraphicsBackend + ?Sized>(&self, backend: &mut B, point_size: f32) -> Result<bool> {
        let Some(handle) = self.handle.filter(|_| self.point_count > 0) else {
            return Ok(false);
        };

        backend.bind_vertex_buffer(handle)?;
        backend.draw_points(self.point_count, point_size);
        backend.unbind_vertex_buffer();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{BackendCall, RecordingBackend};
    use cloudview_core::{normalize_points, Point3f, PointCloud};

    fn sample() -> NormalizedCloud {
        let cloud: PointCloud<Point3f> = vec![
            Point3f::new(1.0, 2.0, 3.0),
            Point3f::new(-1.0, -2.0, -3.0),
            Point3f::new(0.5, 0.0, 1.0),
        ]
        .into_iter()
        .collect();
        normalize_points(&cloud).unwrap()
    }

    #[test]
    fn test_upload_interleaves_and_counts() {
        let mut backend = RecordingBackend::new();
        let mut buffer = PointBuffer::new();
        let cloud = sample();

        let handle = buffer.upload(&mut backend, &cloud).unwrap();
        assert_eq!(buffer.point_count(), 3);
        assert_eq!(backend.buffer_data(handle), Some(cloud.interleaved().as_slice()));
    }

    #[test]
    fn test_reupload_releases_old_buffer_first() {
        let mut backend = RecordingBackend::new();
        let mut buffer = PointBuffer::new();
        let first = buffer.upload(&mut backend, &sample()).unwrap();
        let second = buffer.upload(&mut backend, &sample()).unwrap();

        assert_ne!(first, second);
        assert_eq!(backend.live_buffers(), vec![second]);

        let release = backend.calls.iter().position(|c| *c == BackendCall::ReleaseBuffer(first)).unwrap();
        let create = backend
            .calls
            .iter()
            .position(|c| matches!(c, BackendCall::CreateBuffer { handle, .. } if *handle == second))
            .unwrap();
        assert!(release < create);
    }

    #[test]
    fn test_failed_upload_leaves_manager_empty() {
        let mut backend = RecordingBackend::new();
        let mut buffer = PointBuffer::new();
        buffer.upload(&mut backend, &sample()).unwrap();

        backend.fail_buffer_creation = true;
        assert!(buffer.upload(&mut backend, &sample()).is_err());
        assert!(buffer.is_empty());
        assert!(backend.live_buffers().is_empty());
    }

    #[test]
    fn test_draw_is_scoped_by_bind_and_unbind() {
        let mut backend = RecordingBackend::new();
        let mut buffer = PointBuffer::new();
        let handle = buffer.upload(&mut backend, &sample()).unwrap();
        backend.calls.clear();

        assert!(buffer.draw(&mut backend, 5.0).unwrap());
        assert_eq!(
            backend.calls,
            vec![
                BackendCall::BindBuffer(handle),
                BackendCall::DrawPoints { count: 3, point_size: 5.0 },
                BackendCall::UnbindBuffer,
            ]
        );
    }

    #[test]
    fn test_draw_without_buffer_is_skipped() {
        let mut backend = RecordingBackend::new();
        let buffer = PointBuffer::new();
        assert!(!buffer.draw(&mut backend, 5.0).unwrap());
        assert!(backend.calls.is_empty());
    }
}
