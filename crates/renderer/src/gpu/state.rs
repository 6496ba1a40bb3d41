use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, warn};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::camera::CameraState;
use crate::ranges::ColorRanges;
use crate::types::RendererConfig;

use super::capture::DepthCapture;
use super::context::GpuContext;
use super::geometry::QuadGeometry;
use super::program::UniformProgram;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.0,
    b: 0.2,
    a: 1.0,
};

pub(crate) struct GpuState {
    context: GpuContext,
    program: UniformProgram,
    quad: QuadGeometry,
    capture: DepthCapture,
    samples: Vec<f32>,
    last_fps_update: Instant,
    frames_since_last_update: u32,
}

impl GpuState {
    pub(crate) fn new(window: Arc<Window>, config: &RendererConfig) -> Result<Self> {
        let context = GpuContext::new(window)?;
        let mut program = UniformProgram::new(
            &context.device,
            context.config.format,
            &config.vertex_shader,
            &config.fragment_shader,
        );
        program.set_int("max_iterations", config.max_iterations);
        let quad = QuadGeometry::new(&context.device);
        let capture = DepthCapture::new(&context.device, context.size());

        Ok(Self {
            context,
            program,
            quad,
            capture,
            samples: Vec::new(),
            last_fps_update: Instant::now(),
            frames_since_last_update: 0,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size()
    }

    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.context.resize(new_size);
        self.capture = DepthCapture::new(&self.context.device, self.context.size());
    }

    /// Renders one frame and returns the captured depth samples, or `None`
    /// when the readback failed and the caller should keep its ranges.
    pub(crate) fn render_frame(
        &mut self,
        camera: &CameraState,
        ranges: ColorRanges,
    ) -> Result<Option<&[f32]>, wgpu::SurfaceError> {
        // Acquire the next frame texture early; under FIFO this is the call
        // that blocks until vsync.
        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.program.set_float("zoom", camera.zoom);
        self.program.set_float("center_x", camera.center_x);
        self.program.set_float("center_y", camera.center_y);
        self.program.set_vec4("color_ranges", ranges.to_array());
        self.program.flush(&self.context.queue);

        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("render encoder"),
                });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("fractal pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.capture.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.program.bind(&mut pass);
            self.quad.draw(&mut pass);
        }
        self.capture.encode_copy(&mut encoder);
        self.context.queue.submit(std::iter::once(encoder.finish()));

        let captured = match self.capture.read_into(&self.context.device, &mut self.samples) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "depth readback failed; keeping previous color ranges");
                false
            }
        };
        frame.present();

        self.log_render_stats(camera, ranges);

        Ok(captured.then_some(self.samples.as_slice()))
    }

    fn log_render_stats(&mut self, camera: &CameraState, ranges: ColorRanges) {
        self.frames_since_last_update += 1;
        let elapsed = self.last_fps_update.elapsed();
        if elapsed >= Duration::from_secs(1) {
            let fps = self.frames_since_last_update as f32 / elapsed.as_secs_f32();
            debug!(
                fps = fps.round(),
                zoom = camera.zoom,
                center_x = camera.center_x,
                center_y = camera.center_y,
                ?ranges,
                "render stats"
            );
            self.frames_since_last_update = 0;
            self.last_fps_update = Instant::now();
        }
    }
}
