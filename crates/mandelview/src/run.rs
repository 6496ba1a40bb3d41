use anyhow::Result;
use renderer::{Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Default log filter: viewer crates at info, noisy GPU stacks at error.
const DEFAULT_LOG_FILTER: &str =
    "warn,mandelview=info,renderer=info,naga=error,wgpu=error,wgpu_core=error,wgpu_hal=error,winit=error";

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let config = RendererConfig {
        vertex_shader: cli.vertex_shader,
        fragment_shader: cli.fragment_shader,
        max_iterations: cli.max_iterations,
    };
    tracing::info!(
        vertex = %config.vertex_shader.display(),
        fragment = %config.fragment_shader.display(),
        max_iterations = config.max_iterations,
        "starting Mandelbrot viewer"
    );

    let mut renderer = Renderer::new(config);
    renderer.run()
}
