use std::sync::mpsc;

use winit::dpi::PhysicalSize;

use crate::gpu::program::DEPTH_FORMAT;

const BYTES_PER_SAMPLE: u32 = std::mem::size_of::<f32>() as u32;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CaptureError {
    #[error("failed to map depth staging buffer: {0}")]
    Map(#[from] wgpu::BufferAsyncError),
    #[error("device poll failed while waiting for depth readback: {0}")]
    Poll(#[from] wgpu::PollError),
    #[error("depth readback channel closed before a result arrived")]
    ChannelClosed,
}

/// Depth attachment holding per-pixel escape depth, plus the persistent
/// staging buffer that carries it back to the host after every draw.
pub(crate) struct DepthCapture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    staging: wgpu::Buffer,
    size: PhysicalSize<u32>,
    padded_bytes_per_row: u32,
}

impl DepthCapture {
    pub(crate) fn new(device: &wgpu::Device, size: PhysicalSize<u32>) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("escape depth"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let padded_bytes_per_row = align_bytes_per_row(size.width * BYTES_PER_SAMPLE);
        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("depth staging"),
            size: u64::from(padded_bytes_per_row) * u64::from(size.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        Self {
            texture,
            view,
            staging,
            size,
            padded_bytes_per_row,
        }
    }

    /// Depth attachment view for the render pass.
    pub(crate) fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Records the depth-to-staging copy; must run after the render pass.
    pub(crate) fn encode_copy(&self, encoder: &mut wgpu::CommandEncoder) {
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::DepthOnly,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_bytes_per_row),
                    rows_per_image: Some(self.size.height),
                },
            },
            wgpu::Extent3d {
                width: self.size.width,
                height: self.size.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Blocks until the submitted copy completes, then de-pads the mapped
    /// rows into `samples` (cleared and overwritten in place each call).
    pub(crate) fn read_into(
        &self,
        device: &wgpu::Device,
        samples: &mut Vec<f32>,
    ) -> Result<(), CaptureError> {
        let slice = self.staging.slice(..);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        device.poll(wgpu::PollType::Wait)?;
        receiver.recv().map_err(|_| CaptureError::ChannelClosed)??;

        {
            let data = slice.get_mapped_range();
            depad_rows(
                &data,
                self.size.width,
                self.size.height,
                self.padded_bytes_per_row,
                samples,
            );
        }
        self.staging.unmap();
        Ok(())
    }
}

/// Rounds a tight row length up to wgpu's buffer-copy row alignment.
fn align_bytes_per_row(unpadded: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

fn depad_rows(
    data: &[u8],
    width: u32,
    height: u32,
    padded_bytes_per_row: u32,
    samples: &mut Vec<f32>,
) {
    let tight_row = (width * BYTES_PER_SAMPLE) as usize;
    samples.clear();
    samples.reserve(width as usize * height as usize);
    for row in 0..height as usize {
        let start = row * padded_bytes_per_row as usize;
        samples.extend_from_slice(bytemuck::cast_slice(&data[start..start + tight_row]));
    }
}
