//! Renderer crate for the Mandelbrot viewer.
//!
//! The crate owns the window, the `wgpu` pipeline, and the feedback loop
//! between rendered frames and fractal coloring. The overall flow is:
//!
//! ```text
//!   CLI / mandelview
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ ViewerState ──▶ winit event loop ──▶ render_frame()
//!          ▲                │                                    │
//!          │          held keys ─▶ CameraState          depth samples
//!          │                                                    │
//!          │                                                    ▼
//!          └──────────────────────────── ColorRanges::from_samples
//! ```
//!
//! Each frame draws a full-screen quad with the fractal fragment shader,
//! which writes its normalized escape depth into the depth attachment. The
//! attachment is copied back to the host after the draw and its sample
//! distribution picks the color breakpoints for the *next* frame, so the
//! palette trails the image by exactly one frame.

mod camera;
mod compile;
mod gpu;
mod input;
mod ranges;
mod types;
mod window;

use anyhow::Result;

pub use camera::CameraState;
pub use input::{CameraCommand, InputState};
pub use ranges::ColorRanges;
pub use types::{
    RendererConfig, DEFAULT_MAX_ITERATIONS, SURFACE_HEIGHT, SURFACE_WIDTH, WINDOW_TITLE,
};

/// Owns a viewer configuration and turns it into a running window.
///
/// Everything interesting happens inside the window event loop; `Renderer`
/// just carries the configuration until the caller is ready to block on
/// [`run`].
///
/// [`run`]: Renderer::run
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the viewer window and drives the event loop until the user
    /// closes it or presses Escape.
    ///
    /// Blocks the calling thread for the lifetime of the window. Returns an
    /// error when the window or the GPU device cannot be initialized; shader
    /// problems are not fatal and degrade to fallback stages instead.
    pub fn run(&mut self) -> Result<()> {
        window::run(&self.config)
    }
}
