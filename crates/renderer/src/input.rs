use crate::camera::CameraState;

/// Camera motions a key can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraCommand {
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
}

/// Pressed-state for the camera keys plus a latched exit request.
///
/// Every held command applies once per frame tick, in a fixed order, and
/// each camera step clamps on its own; opposing keys are not resolved
/// against each other. The exit request latches and is observed by the
/// frame loop at the end of the tick in which it was raised, so that frame
/// still renders.
#[derive(Debug, Default)]
pub struct InputState {
    pan_up: bool,
    pan_down: bool,
    pan_left: bool,
    pan_right: bool,
    zoom_in: bool,
    zoom_out: bool,
    exit_requested: bool,
}

impl InputState {
    pub fn set_command(&mut self, command: CameraCommand, pressed: bool) {
        match command {
            CameraCommand::PanUp => self.pan_up = pressed,
            CameraCommand::PanDown => self.pan_down = pressed,
            CameraCommand::PanLeft => self.pan_left = pressed,
            CameraCommand::PanRight => self.pan_right = pressed,
            CameraCommand::ZoomIn => self.zoom_in = pressed,
            CameraCommand::ZoomOut => self.zoom_out = pressed,
        }
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    /// Applies every held command to the camera for one frame tick.
    pub fn apply(&self, camera: &mut CameraState) {
        if self.pan_up {
            camera.pan_up();
        }
        if self.pan_down {
            camera.pan_down();
        }
        if self.pan_left {
            camera.pan_left();
        }
        if self.pan_right {
            camera.pan_right();
        }
        if self.zoom_in {
            camera.zoom_in();
        }
        if self.zoom_out {
            camera.zoom_out();
        }
    }
}
