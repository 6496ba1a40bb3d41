use std::borrow::Cow;
use std::fs;
use std::path::Path;

use wgpu::naga::ShaderStage;

/// Reads a shader source file, treating failures as "no source".
///
/// An unreadable or empty file yields `None` after logging a diagnostic;
/// the stage is then skipped in favor of its fallback.
pub(crate) fn load_shader_source(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(source) => {
            if source.is_empty() {
                tracing::warn!(path = %path.display(), "shader source file is empty; skipping stage");
                None
            } else {
                Some(source)
            }
        }
        Err(err) => {
            tracing::error!(
                path = %path.display(),
                error = %err,
                "failed to open shader file; skipping stage"
            );
            None
        }
    }
}

/// Compiles one GLSL stage, capturing validation errors instead of panicking.
///
/// Returns `None` after logging the compiler diagnostic when the source does
/// not build; the caller falls back to the built-in stage.
pub(crate) fn compile_stage(
    device: &wgpu::Device,
    source: &str,
    stage: ShaderStage,
    label: &str,
) -> Option<wgpu::ShaderModule> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(source),
            stage,
            defines: &[],
        },
    });
    match pollster::block_on(device.pop_error_scope()) {
        None => Some(module),
        Some(err) => {
            tracing::error!(stage = label, error = %err, "error compiling shader stage; using fallback");
            None
        }
    }
}

/// Builds the known-good fallback module for a stage.
pub(crate) fn fallback_stage(device: &wgpu::Device, stage: ShaderStage) -> wgpu::ShaderModule {
    let (label, source) = match stage {
        ShaderStage::Vertex => ("fallback vertex", FALLBACK_VERTEX_GLSL),
        _ => ("fallback fragment", FALLBACK_FRAGMENT_GLSL),
    };
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(source),
            stage,
            defines: &[],
        },
    })
}

/// Pass-through quad vertex stage exporting the clip-space plane coordinate.
const FALLBACK_VERTEX_GLSL: &str = r"#version 450
layout(location = 0) in vec3 position;
layout(location = 0) out vec2 plane_coord;

void main() {
    plane_coord = position.xy;
    gl_Position = vec4(position, 1.0);
}
";

/// Solid magenta with zero escape depth, making a broken fragment stage
/// obvious while keeping the range estimator in its flat regime.
const FALLBACK_FRAGMENT_GLSL: &str = r"#version 450
layout(location = 0) out vec4 out_color;

void main() {
    gl_FragDepth = 0.0;
    out_color = vec4(1.0, 0.0, 1.0, 1.0);
}
";

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn missing_shader_file_yields_no_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.frag");
        assert!(load_shader_source(&path).is_none());
    }

    #[test]
    fn empty_shader_file_yields_no_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.frag");
        fs::File::create(&path).unwrap();
        assert!(load_shader_source(&path).is_none());
    }

    #[test]
    fn readable_shader_file_is_returned_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.vert");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "#version 450\nvoid main() {{}}\n").unwrap();
        assert_eq!(
            load_shader_source(&path).as_deref(),
            Some("#version 450\nvoid main() {}\n")
        );
    }
}
