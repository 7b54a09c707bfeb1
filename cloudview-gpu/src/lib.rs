//! # cloudview GPU
//!
//! wgpu implementation of the [`GraphicsBackend`](cloudview_core::GraphicsBackend)
//! capability used by the cloudview render loop.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cloudview_gpu::{RenderConfig, WgpuBackend};
//! use std::sync::Arc;
//! use winit::window::Window;
//!
//! async fn example(window: Arc<Window>) -> cloudview_core::Result<()> {
//!     let backend = WgpuBackend::new(window, RenderConfig::default()).await?;
//!     // hand the backend to a cloudview_visualization::Viewer
//!     # drop(backend);
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod renderer;
pub mod shaders;

// Re-export commonly used items
pub use device::GpuContext;
pub use renderer::{WgpuBackend, RenderConfig, DrawUniform, vertex_layout, opengl_to_wgpu_matrix};
