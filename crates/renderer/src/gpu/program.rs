use std::path::Path;

use bytemuck::{Pod, Zeroable};
use wgpu::naga::ShaderStage;

use crate::compile;
use crate::gpu::geometry::QuadGeometry;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Host mirror of the `FractalView` uniform block (std140, set 0, binding 0).
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq)]
struct FractalUniforms {
    color_ranges: [f32; 4],
    zoom: f32,
    center_x: f32,
    center_y: f32,
    max_iterations: i32,
}

unsafe impl Zeroable for FractalUniforms {}
unsafe impl Pod for FractalUniforms {}

impl FractalUniforms {
    fn set_float(&mut self, name: &str, value: f32) -> bool {
        match name {
            "zoom" => self.zoom = value,
            "center_x" => self.center_x = value,
            "center_y" => self.center_y = value,
            _ => return false,
        }
        true
    }

    fn set_int(&mut self, name: &str, value: i32) -> bool {
        match name {
            "max_iterations" => self.max_iterations = value,
            _ => return false,
        }
        true
    }

    fn set_vec4(&mut self, name: &str, value: [f32; 4]) -> bool {
        match name {
            "color_ranges" => self.color_ranges = value,
            _ => return false,
        }
        true
    }
}

/// Render pipeline plus its uniform block, addressed through name-keyed
/// setters that silently ignore unknown names, the way GL uniform
/// locations behave.
pub(crate) struct UniformProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    uniforms: FractalUniforms,
}

impl UniformProgram {
    /// Builds the program from the two shader source files.
    ///
    /// Never fails: broken stages are logged and replaced by fallbacks.
    pub(crate) fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Self {
        let vertex_module = compile::load_shader_source(vertex_path)
            .and_then(|source| {
                compile::compile_stage(device, &source, ShaderStage::Vertex, "fractal vertex")
            })
            .unwrap_or_else(|| compile::fallback_stage(device, ShaderStage::Vertex));
        let fragment_module = compile::load_shader_source(fragment_path)
            .and_then(|source| {
                compile::compile_stage(device, &source, ShaderStage::Fragment, "fractal fragment")
            })
            .unwrap_or_else(|| compile::fallback_stage(device, ShaderStage::Fragment));

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fractal uniforms"),
            size: std::mem::size_of::<FractalUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform bind group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("fractal pipeline layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let candidate = create_pipeline(
            device,
            &pipeline_layout,
            surface_format,
            &vertex_module,
            &fragment_module,
        );
        let pipeline = match pollster::block_on(device.pop_error_scope()) {
            None => candidate,
            Some(err) => {
                tracing::error!(error = %err, "error linking shader program; using fallback stages");
                let vertex = compile::fallback_stage(device, ShaderStage::Vertex);
                let fragment = compile::fallback_stage(device, ShaderStage::Fragment);
                create_pipeline(device, &pipeline_layout, surface_format, &vertex, &fragment)
            }
        };

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            uniforms: FractalUniforms::zeroed(),
        }
    }

    pub(crate) fn set_float(&mut self, name: &str, value: f32) {
        if !self.uniforms.set_float(name, value) {
            tracing::trace!(name, "ignoring unknown float uniform");
        }
    }

    pub(crate) fn set_int(&mut self, name: &str, value: i32) {
        if !self.uniforms.set_int(name, value) {
            tracing::trace!(name, "ignoring unknown int uniform");
        }
    }

    /// Booleans ride the int slots, as they did under `glUniform1i`.
    #[allow(dead_code)]
    pub(crate) fn set_bool(&mut self, name: &str, value: bool) {
        self.set_int(name, i32::from(value));
    }

    pub(crate) fn set_vec4(&mut self, name: &str, value: [f32; 4]) {
        if !self.uniforms.set_vec4(name, value) {
            tracing::trace!(name, "ignoring unknown vec4 uniform");
        }
    }

    /// Uploads the current uniform block.
    pub(crate) fn flush(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
    }

    /// Makes the program current on the pass.
    pub(crate) fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
    }
}

/// Creates the render pipeline. Callers wanting the lenient link contract
/// wrap this in a validation error scope; the fallback rebuild calls it
/// directly because its stages are known-good.
fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    surface_format: wgpu::TextureFormat,
    vertex_module: &wgpu::ShaderModule,
    fragment_module: &wgpu::ShaderModule,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("fractal pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: vertex_module,
            entry_point: Some("main"),
            buffers: &[QuadGeometry::vertex_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: fragment_module,
            entry_point: Some("main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_setter_routes_by_name() {
        let mut uniforms = FractalUniforms::zeroed();
        assert!(uniforms.set_float("zoom", 0.5));
        assert!(uniforms.set_float("center_x", -0.25));
        assert!(uniforms.set_float("center_y", 0.75));
        assert_eq!(uniforms.zoom, 0.5);
        assert_eq!(uniforms.center_x, -0.25);
        assert_eq!(uniforms.center_y, 0.75);
    }

    #[test]
    fn unknown_names_are_rejected() {
        let mut uniforms = FractalUniforms::zeroed();
        assert!(!uniforms.set_float("opacity", 1.0));
        assert!(!uniforms.set_int("frame", 3));
        assert!(!uniforms.set_vec4("tint", [1.0; 4]));
        assert_eq!(uniforms, FractalUniforms::zeroed());
    }

    #[test]
    fn vec4_setter_routes_color_ranges() {
        let mut uniforms = FractalUniforms::zeroed();
        assert!(uniforms.set_vec4("color_ranges", [0.1, 0.2, 0.3, 0.4]));
        assert_eq!(uniforms.color_ranges, [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn int_setter_routes_iteration_budget() {
        let mut uniforms = FractalUniforms::zeroed();
        assert!(uniforms.set_int("max_iterations", 750));
        assert_eq!(uniforms.max_iterations, 750);
    }

    #[test]
    fn uniform_block_matches_std140_layout() {
        assert_eq!(std::mem::size_of::<FractalUniforms>(), 32);
        assert_eq!(std::mem::align_of::<FractalUniforms>(), 16);
        assert_eq!(std::mem::offset_of!(FractalUniforms, color_ranges), 0);
        assert_eq!(std::mem::offset_of!(FractalUniforms, zoom), 16);
        assert_eq!(std::mem::offset_of!(FractalUniforms, center_x), 20);
        assert_eq!(std::mem::offset_of!(FractalUniforms, center_y), 24);
        assert_eq!(std::mem::offset_of!(FractalUniforms, max_iterations), 28);
    }
}
