use std::sync::Arc;

use anyhow::{anyhow, Result};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowBuilder};

use crate::camera::CameraState;
use crate::gpu::GpuState;
use crate::input::{CameraCommand, InputState};
use crate::ranges::ColorRanges;
use crate::types::{RendererConfig, SURFACE_HEIGHT, SURFACE_WIDTH, WINDOW_TITLE};

pub(crate) fn run(config: &RendererConfig) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;

    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(PhysicalSize::new(SURFACE_WIDTH, SURFACE_HEIGHT))
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create viewer window: {err}"))?;
    let window = Arc::new(window);

    let mut state = ViewerState::new(window.clone(), config)?;

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);
            match event {
                Event::WindowEvent { window_id, event } if window_id == state.window().id() => {
                    state.handle_window_event(event, elwt);
                }
                Event::AboutToWait => {
                    state.window().request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))?;

    Ok(())
}

struct ViewerState {
    window: Arc<Window>,
    gpu: GpuState,
    input: InputState,
    camera: CameraState,
    ranges: ColorRanges,
}

impl ViewerState {
    fn new(window: Arc<Window>, config: &RendererConfig) -> Result<Self> {
        let gpu = GpuState::new(window.clone(), config)?;
        Ok(Self {
            window,
            gpu,
            input: InputState::default(),
            camera: CameraState::default(),
            ranges: ColorRanges::STARTUP,
        })
    }

    fn window(&self) -> &Window {
        &self.window
    }

    fn handle_window_event(&mut self, event: WindowEvent, elwt: &EventLoopWindowTarget<()>) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                elwt.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key_event(&event);
            }
            WindowEvent::Resized(new_size) => {
                self.gpu.resize(new_size);
            }
            WindowEvent::ScaleFactorChanged {
                mut inner_size_writer,
                ..
            } => {
                let _ = inner_size_writer.request_inner_size(self.gpu.size());
            }
            WindowEvent::RedrawRequested => {
                self.redraw(elwt);
            }
            _ => {}
        }
    }

    fn handle_key_event(&mut self, event: &KeyEvent) {
        let code = match event.physical_key {
            PhysicalKey::Code(code) => code,
            PhysicalKey::Unidentified(_) => return,
        };
        if code == KeyCode::Escape {
            if event.state == ElementState::Pressed {
                self.input.request_exit();
            }
            return;
        }
        if let Some(command) = command_for_key(code) {
            self.input
                .set_command(command, event.state == ElementState::Pressed);
        }
    }

    /// One frame tick. The exit request is honored after the frame renders,
    /// so the tick that raises it still presents.
    fn redraw(&mut self, elwt: &EventLoopWindowTarget<()>) {
        self.input.apply(&mut self.camera);
        match self.gpu.render_frame(&self.camera, self.ranges) {
            Ok(Some(samples)) => {
                self.ranges = ColorRanges::from_samples(samples);
            }
            Ok(None) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.resize(self.gpu.size());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                eprintln!("surface out of memory; exiting viewer");
                elwt.exit();
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                eprintln!("surface timeout; retrying next frame");
            }
            Err(other) => {
                eprintln!("surface error: {other:?}; retrying next frame");
            }
        }
        if self.input.should_exit() {
            elwt.exit();
        }
    }
}

fn command_for_key(code: KeyCode) -> Option<CameraCommand> {
    match code {
        KeyCode::KeyW => Some(CameraCommand::PanUp),
        KeyCode::KeyS => Some(CameraCommand::PanDown),
        KeyCode::KeyA => Some(CameraCommand::PanLeft),
        KeyCode::KeyD => Some(CameraCommand::PanRight),
        KeyCode::ShiftLeft => Some(CameraCommand::ZoomIn),
        KeyCode::ControlLeft => Some(CameraCommand::ZoomOut),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys_map_to_camera_commands() {
        assert_eq!(command_for_key(KeyCode::KeyW), Some(CameraCommand::PanUp));
        assert_eq!(command_for_key(KeyCode::KeyS), Some(CameraCommand::PanDown));
        assert_eq!(command_for_key(KeyCode::KeyA), Some(CameraCommand::PanLeft));
        assert_eq!(command_for_key(KeyCode::KeyD), Some(CameraCommand::PanRight));
    }

    #[test]
    fn zoom_keys_map_to_camera_commands() {
        assert_eq!(
            command_for_key(KeyCode::ShiftLeft),
            Some(CameraCommand::ZoomIn)
        );
        assert_eq!(
            command_for_key(KeyCode::ControlLeft),
            Some(CameraCommand::ZoomOut)
        );
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(command_for_key(KeyCode::KeyQ), None);
        assert_eq!(command_for_key(KeyCode::Space), None);
        assert_eq!(command_for_key(KeyCode::ShiftRight), None);
    }
}
