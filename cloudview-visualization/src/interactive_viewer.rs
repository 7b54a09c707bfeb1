//! Window host for the point cloud viewer
//!
//! Owns the winit window and event loop, forwards pointer and resize events
//! into a [`Viewer`] and draws a frame only when the viewer asks for one.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use cloudview_core::{Error, Result};
use cloudview_gpu::WgpuBackend;

use crate::axes::axis_legend;
use crate::config::ViewerConfig;
use crate::dialog::show_load_error;
use crate::input::{PointerButtons, PointerEvent};
use crate::viewer::{InputSink, Renderable, Viewer};

/// Top-level viewer window
pub struct InteractiveViewer {
    config: ViewerConfig,
    initial_file: Option<PathBuf>,
}

impl InteractiveViewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            initial_file: None,
        }
    }

    /// Table to load before the window is first drawn. `None` starts empty.
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.initial_file = path;
        self
    }

    /// Open the window and block until it is closed
    pub fn run(self) -> Result<()> {
        let [width, height] = self.config.window_size;
        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(self.config.window_title.clone())
                .with_inner_size(LogicalSize::new(width as f64, height as f64))
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let backend = pollster::block_on(WgpuBackend::new(window.clone(), self.config.render_config()))?;
        let mut viewer = Viewer::new(backend, self.config);
        let size = window.inner_size();
        viewer.resize(size.width, size.height);

        for line in axis_legend() {
            log::info!("legend {}", line);
        }

        load_into(&mut viewer, self.initial_file.as_deref());

        let mut buttons = PointerButtons::default();
        let mut cursor = PhysicalPosition::new(0.0, 0.0);

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Wait);

                match event {
                    Event::WindowEvent { event, .. } => match event {
                        WindowEvent::CloseRequested => {
                            target.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            viewer.resize(new_size.width, new_size.height);
                        }
                        WindowEvent::MouseInput { state, button, .. } => {
                            let pressed = state == ElementState::Pressed;
                            match button {
                                MouseButton::Left => buttons.primary = pressed,
                                MouseButton::Right => buttons.secondary = pressed,
                                _ => return,
                            }
                            if pressed {
                                viewer.on_pointer(PointerEvent::Pressed { x: cursor.x, y: cursor.y });
                            }
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            cursor = position;
                            viewer.on_pointer(PointerEvent::Moved {
                                x: position.x,
                                y: position.y,
                                buttons,
                            });
                        }
                        WindowEvent::DroppedFile(path) => {
                            load_into(&mut viewer, Some(path.as_path()));
                        }
                        WindowEvent::RedrawRequested => {
                            if let Err(e) = viewer.render() {
                                log::error!("render failed: {}", e);
                                target.exit();
                                return;
                            }
                            if viewer.backend_mut().take_redraw_needed() {
                                window.request_redraw();
                            }
                        }
                        _ => {}
                    },
                    Event::AboutToWait => {
                        if viewer.scheduler().is_pending() {
                            window.request_redraw();
                        }
                    }
                    _ => {}
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))?;

        Ok(())
    }
}

/// Load `path` into `viewer`, reporting failures without stopping the host
fn load_into(viewer: &mut Viewer<WgpuBackend>, path: Option<&Path>) {
    match viewer.load_file(path) {
        Ok(_) => {}
        Err(e) => {
            let message = match path {
                Some(p) => format!("{}: {}", p.display(), e),
                None => e.to_string(),
            };
            log::error!("failed to load point cloud: {}", message);
            show_load_error(&message);
        }
    }
}
