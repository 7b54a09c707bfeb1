//! Interactive point cloud viewer
//!
//! This crate turns a normalized point cloud into frames and pointer drags
//! into rotations:
//! - Fixed look-at camera and X/Y/Z Euler rotation model
//! - Pointer input controller
//! - Single interleaved GPU point buffer
//! - On-demand render loop drawing the cloud and reference axes
//! - winit window host with a native file chooser
//!
//! Everything except [`InteractiveViewer`] and the dialogs works against the
//! [`GraphicsBackend`](cloudview_core::GraphicsBackend) trait, so it can be
//! driven by [`RecordingBackend`] in tests.
//!
//! ```
//! use cloudview_core::{Point3f, PointCloud};
//! use cloudview_visualization::{Renderable, RecordingBackend, Viewer, ViewerConfig};
//!
//! let mut viewer = Viewer::new(RecordingBackend::new(), ViewerConfig::default());
//! let cloud = PointCloud::from_points(vec![Point3f::new(1.0, 2.0, 3.0), Point3f::new(-1.0, -2.0, -3.0)]);
//! assert_eq!(viewer.load_points(&cloud).unwrap(), 2);
//! viewer.render().unwrap();
//! ```

pub mod axes;
pub mod buffer;
pub mod camera;
pub mod config;
pub mod dialog;
pub mod input;
pub mod interactive_viewer;
pub mod recording;
pub mod render;
pub mod rotation;
pub mod state;
pub mod viewer;

pub use axes::*;
pub use buffer::*;
pub use camera::*;
pub use config::*;
pub use dialog::*;
pub use input::*;
pub use interactive_viewer::*;
pub use recording::*;
pub use render::*;
pub use rotation::*;
pub use state::*;
pub use viewer::*;
