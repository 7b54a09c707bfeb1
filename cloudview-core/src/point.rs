//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use bytemuck::{Pod, Zeroable};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D point in double precision, as read from input tables
pub type Point3d = Point3<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// An RGBA colour with channels in `[0, 1]`
pub type Rgba = [f32; 4];

/// Number of floats one interleaved vertex occupies (xyz + rgba)
pub const FLOATS_PER_VERTEX: usize = 7;

/// A position with its colour, laid out exactly as one interleaved
/// vertex: `x, y, z, r, g, b, a`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct ColoredVertex {
    pub position: [f32; 3],
    pub color: Rgba,
}

impl ColoredVertex {
    /// Create a vertex from a point and a colour
    pub fn new(position: &Point3f, color: Rgba) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            color,
        }
    }

    /// The vertex as its seven interleaved floats
    pub fn to_array(&self) -> [f32; FLOATS_PER_VERTEX] {
        let [x, y, z] = self.position;
        let [r, g, b, a] = self.color;
        [x, y, z, r, g, b, a]
    }
}

impl Default for ColoredVertex {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_seven_packed_floats() {
        assert_eq!(std::mem::size_of::<ColoredVertex>(), FLOATS_PER_VERTEX * std::mem::size_of::<f32>());

        let v = ColoredVertex::new(&Point3f::new(1.0, 2.0, 3.0), [0.5, 0.25, 0.1, 1.0]);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &v.to_array());
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.5, 0.25, 0.1, 1.0]);
    }
}
