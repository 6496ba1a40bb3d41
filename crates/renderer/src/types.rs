use std::path::PathBuf;

/// Fixed surface width in pixels.
pub const SURFACE_WIDTH: u32 = 1080;
/// Fixed surface height in pixels.
pub const SURFACE_HEIGHT: u32 = 1080;
/// Title of the viewer window.
pub const WINDOW_TITLE: &str = "Mandelbrot";
/// Default iteration budget for the escape-time loop.
pub const DEFAULT_MAX_ITERATIONS: i32 = 500;

/// Runtime configuration assembled by the caller before [`crate::Renderer::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct RendererConfig {
    /// Path to the vertex shader source file.
    pub vertex_shader: PathBuf,
    /// Path to the fragment shader source file.
    pub fragment_shader: PathBuf,
    /// Iteration budget handed to the fragment stage.
    pub max_iterations: i32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            vertex_shader: PathBuf::from("shaders/shader.vert"),
            fragment_shader: PathBuf::from("shaders/shader.frag"),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_shipped_shaders() {
        let config = RendererConfig::default();
        assert_eq!(config.vertex_shader, PathBuf::from("shaders/shader.vert"));
        assert_eq!(config.fragment_shader, PathBuf::from("shaders/shader.frag"));
        assert_eq!(config.max_iterations, 500);
    }
}
