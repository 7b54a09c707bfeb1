//! Point cloud container

use crate::point::*;
use nalgebra::{Point3, Scalar};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A generic, ordered point cloud container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud<T> {
    pub points: Vec<T>,
}

/// A point cloud with 3D points
pub type PointCloud3f = PointCloud<Point3f>;

/// A point cloud with double precision 3D points
pub type PointCloud3d = PointCloud<Point3d>;

impl<T> PointCloud<T> {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
        }
    }

    /// Create a new point cloud with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<T>) -> Self {
        Self { points }
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the cloud
    pub fn push(&mut self, point: T) {
        self.points.push(point);
    }

    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.points.iter()
    }
}

impl<T: Scalar + Copy + Into<f64>> PointCloud<Point3<T>> {
    /// Arithmetic mean of every axis in `f64`, or `None` for an empty cloud
    pub fn centroid(&self) -> Option<Point3d> {
        if self.is_empty() {
            return None;
        }
        let sum = self.points.iter().fold([0.0f64; 3], |mut acc, p| {
            for (axis, total) in acc.iter_mut().enumerate() {
                *total += p[axis].into();
            }
            acc
        });
        let n = self.len() as f64;
        Some(Point3d::new(sum[0] / n, sum[1] / n, sum[2] / n))
    }

    /// Whether every coordinate of every point is finite
    pub fn is_finite(&self) -> bool {
        self.points
            .iter()
            .all(|p| (0..3).all(|axis| Into::<f64>::into(p[axis]).is_finite()))
    }
}

impl<T> Default for PointCloud<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for PointCloud<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<T> IntoIterator for PointCloud<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PointCloud<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<T> FromIterator<T> for PointCloud<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_centroid() {
        let cloud = PointCloud::from_points(vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(2.0, 4.0, -6.0),
        ]);
        let c = cloud.centroid().unwrap();
        assert_relative_eq!(c, Point3d::new(1.0, 2.0, -3.0));
        assert!(PointCloud3f::new().centroid().is_none());
    }

    #[test]
    fn test_is_finite() {
        let mut cloud: PointCloud3f = vec![Point3f::new(1.0, 2.0, 3.0)].into_iter().collect();
        assert!(cloud.is_finite());
        cloud.push(Point3f::new(f32::NAN, 0.0, 0.0));
        assert!(!cloud.is_finite());
    }

    #[test]
    fn test_centroid_keeps_double_precision() {
        let cloud = PointCloud3d::from_points(vec![
            Point3d::new(500_000.01, 5_400_000.01, 0.0),
            Point3d::new(500_000.03, 5_400_000.03, 0.0),
        ]);
        let c = cloud.centroid().unwrap();
        assert_relative_eq!(c.x, 500_000.02, epsilon = 1e-9);
        assert_relative_eq!(c.y, 5_400_000.02, epsilon = 1e-8);
    }
}
