//! I/O operations for point clouds
//!
//! This crate reads point clouds stored as delimited text tables: one header
//! line followed by rows of at least three numeric columns (X, Y, Z).
//! Coordinates are kept in double precision; narrowing to `f32` happens only
//! after normalization.

pub mod delimited;
pub mod error;

pub use delimited::{Delimiter, DelimitedOptions, DelimitedReader};
pub use error::*;
