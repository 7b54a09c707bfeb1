//! Core traits for cloudview

use crate::{point::*, point_cloud::*, Result};
use nalgebra::Matrix4;

/// Trait for objects with a spatial extent
pub trait Drawable {
    /// Get the axis-aligned bounding box of the object as `(min, max)`
    fn bounding_box(&self) -> (Point3f, Point3f);
}

impl Drawable for PointCloud<Point3f> {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        let Some(first) = self.points.first() else {
            return (Point3f::origin(), Point3f::origin());
        };

        self.points.iter().fold((*first, *first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        })
    }
}

/// Opaque name of a vertex buffer owned by a [`GraphicsBackend`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// The minimal set of graphics capabilities the render loop needs.
///
/// A frame is always issued as `begin_frame`, any number of transform and
/// draw calls, then `end_frame`. Vertex buffers hold interleaved
/// `x, y, z, r, g, b, a` floats and are only drawn between a
/// `bind_vertex_buffer` / `unbind_vertex_buffer` pair.
pub trait GraphicsBackend {
    /// Upload an interleaved vertex buffer and return its handle
    fn create_vertex_buffer(&mut self, data: &[f32]) -> Result<BufferHandle>;

    /// Release a buffer. The handle must not be used afterwards.
    fn release_vertex_buffer(&mut self, handle: BufferHandle);

    /// Resize the drawable area in pixels
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Replace the projection transform
    fn set_projection(&mut self, projection: &Matrix4<f32>);

    /// Start a frame, clearing colour to `clear_color` and depth to far
    fn begin_frame(&mut self, clear_color: Rgba) -> Result<()>;

    /// Replace the model-view transform used by subsequent draws
    fn set_model_view(&mut self, model_view: &Matrix4<f32>);

    /// Make `handle` the source of subsequent `draw_points` calls
    fn bind_vertex_buffer(&mut self, handle: BufferHandle) -> Result<()>;

    /// Draw the first `count` vertices of the bound buffer as points
    /// `point_size` pixels wide
    fn draw_points(&mut self, count: usize, point_size: f32);

    /// Unbind the current vertex buffer
    fn unbind_vertex_buffer(&mut self);

    /// Draw independent line segments, two vertices per segment
    fn draw_lines(&mut self, vertices: &[ColoredVertex]);

    /// Finish the frame and present it
    fn end_frame(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let cloud = PointCloud::from_points(vec![
            Point3f::new(1.0, -2.0, 3.0),
            Point3f::new(-1.0, 5.0, 0.5),
            Point3f::new(0.0, 0.0, -4.0),
        ]);
        let (min, max) = cloud.bounding_box();
        assert_eq!(min, Point3f::new(-1.0, -2.0, -4.0));
        assert_eq!(max, Point3f::new(1.0, 5.0, 3.0));
    }

    #[test]
    fn test_bounding_box_empty() {
        let (min, max) = PointCloud3f::new().bounding_box();
        assert_eq!(min, Point3f::origin());
        assert_eq!(max, Point3f::origin());
    }
}
