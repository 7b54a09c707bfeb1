//! Fitting a raw point cloud into the `[-1, 1]` cube and deriving depth colours.
//!
//! Every axis is handled independently: the cloud is mean-centered, then each
//! axis is divided by its own largest absolute value. This stretches the cloud
//! to fill the cube and deliberately does not preserve the aspect ratio.
//!
//! Colours come from the normalized Z coordinate, remapped to `[0, 1]` over
//! the Z range of the cloud itself:
//!
//! ```text
//! z_norm = (z - z_min) / (z_max - z_min)
//! rgba   = (0.6 + 0.4 z_norm, 0.3 + 0.3 z_norm, 0.1, 1.0)
//! ```
//!
//! An axis with no spread (every value equal, including single-point clouds)
//! normalizes to 0, and a flat Z range gives `z_norm = 0` for every point.

use crate::{ColoredVertex, Drawable, Error, Point3f, PointCloud, Result, Rgba, FLOATS_PER_VERTEX};
use nalgebra::{Point3, Scalar};

/// A normalized cloud and its per-point colours, index-aligned
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCloud {
    pub points: PointCloud<Point3f>,
    pub colors: Vec<Rgba>,
}

impl NormalizedCloud {
    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cloud has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points and colours zipped into vertices
    pub fn vertices(&self) -> Vec<ColoredVertex> {
        self.points
            .iter()
            .zip(&self.colors)
            .map(|(p, c)| ColoredVertex::new(p, *c))
            .collect()
    }

    /// Row-major interleaved buffer contents, `x y z r g b a` per point
    pub fn interleaved(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.len() * FLOATS_PER_VERTEX);
        for vertex in self.vertices() {
            data.extend_from_slice(&vertex.to_array());
        }
        data
    }
}

/// Colour of a point at normalized depth `z_norm` in `[0, 1]`
pub fn depth_color(z_norm: f32) -> Rgba {
    [0.6 + 0.4 * z_norm, 0.3 + 0.3 * z_norm, 0.1, 1.0]
}

/// Mean-center and per-axis scale `cloud`, then colour it by depth.
///
/// Accepts single or double precision input; arithmetic runs in `f64` and
/// only the normalized result is narrowed to `f32`, so large coordinate
/// offsets keep their resolution and a constant axis centers to exactly zero.
///
/// Fails with [`Error::InvalidData`] for an empty cloud or any non-finite
/// coordinate.
pub fn normalize_points<T>(cloud: &PointCloud<Point3<T>>) -> Result<NormalizedCloud>
where
    T: Scalar + Copy + Into<f64>,
{
    if !cloud.is_finite() {
        return Err(Error::InvalidData("point cloud contains non-finite coordinates".to_string()));
    }
    let Some(centroid) = cloud.centroid() else {
        return Err(Error::InvalidData("point cloud has no points".to_string()));
    };
    let mean = [centroid.x, centroid.y, centroid.z];
    let coord = |p: &Point3<T>, axis: usize| -> f64 { p[axis].into() };

    let mut raw_max = [0.0f64; 3];
    let mut max_abs = [0.0f64; 3];
    for p in cloud.iter() {
        for axis in 0..3 {
            let v = coord(p, axis);
            raw_max[axis] = raw_max[axis].max(v.abs());
            max_abs[axis] = max_abs[axis].max((v - mean[axis]).abs());
        }
    }

    // Spread at the level of rounding noise counts as no spread at all.
    let scale: [Option<f64>; 3] = std::array::from_fn(|axis| {
        let tolerance = 16.0 * f64::EPSILON * raw_max[axis];
        (max_abs[axis] > tolerance).then_some(max_abs[axis])
    });

    let points: PointCloud<Point3f> = cloud
        .iter()
        .map(|p| {
            let c: [f32; 3] = std::array::from_fn(|axis| match scale[axis] {
                Some(s) => ((coord(p, axis) - mean[axis]) / s) as f32,
                None => 0.0,
            });
            Point3f::new(c[0], c[1], c[2])
        })
        .collect();

    let (min, max) = points.bounding_box();
    let z_range = max.z - min.z;
    let colors = points
        .iter()
        .map(|p| {
            let z_norm = if z_range > 0.0 { (p.z - min.z) / z_range } else { 0.0 };
            depth_color(z_norm)
        })
        .collect();

    log::debug!(
        "normalized {} points (degenerate axes: x={} y={} z={})",
        points.len(),
        scale[0].is_none(),
        scale[1].is_none(),
        scale[2].is_none()
    );

    Ok(NormalizedCloud { points, colors })
}
