//! Core data structures and traits for cloudview
//!
//! This crate provides the fundamental types shared by the viewer crates:
//! points and point clouds, the normalization step that fits a raw cloud into
//! the unit cube, 4x4 transforms, and the `GraphicsBackend` capability the
//! render loop draws through.

pub mod point;
pub mod point_cloud;
pub mod normalize;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use normalize::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4};
