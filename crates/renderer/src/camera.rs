//! Camera state for the fractal view.
//!
//! The camera is a center point plus a zoom factor, both fed to the fragment
//! stage as uniforms. Pan steps scale with the current zoom so that held keys
//! move the view at a constant apparent speed regardless of magnification.

const BASE_PAN_SPEED: f32 = 0.005;
const ZOOM_IN_FACTOR: f32 = 1.02;
const ZOOM_OUT_FACTOR: f32 = 0.98;
const MIN_ZOOM: f32 = 1e-5;
const MAX_ZOOM: f32 = 1.0;
const CENTER_LIMIT: f32 = 1.0;

/// View center and zoom, updated once per frame from held keys.
///
/// The center components stay inside `[-1, 1]`. Zooming in saturates at
/// `1.0` and zooming out at `1e-5`; the initial zoom of `4.0` sits above the
/// zoom-in saturation point, so the first zoom-in tick lands exactly on
/// `1.0` while zoom-out ticks walk down through the unclamped region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub center_x: f32,
    pub center_y: f32,
    pub zoom: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            zoom: 4.0,
        }
    }
}

impl CameraState {
    /// Pan step for the current zoom level.
    pub fn pan_speed(&self) -> f32 {
        BASE_PAN_SPEED * self.zoom
    }

    pub fn pan_up(&mut self) {
        self.center_y = (self.center_y + self.pan_speed()).min(CENTER_LIMIT);
    }

    pub fn pan_down(&mut self) {
        self.center_y = (self.center_y - self.pan_speed()).max(-CENTER_LIMIT);
    }

    pub fn pan_left(&mut self) {
        self.center_x = (self.center_x - self.pan_speed()).max(-CENTER_LIMIT);
    }

    pub fn pan_right(&mut self) {
        self.center_x = (self.center_x + self.pan_speed()).min(CENTER_LIMIT);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_IN_FACTOR).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom * ZOOM_OUT_FACTOR).max(MIN_ZOOM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_centered_at_wide_zoom() {
        let camera = CameraState::default();
        assert_eq!(camera.center_x, 0.0);
        assert_eq!(camera.center_y, 0.0);
        assert_eq!(camera.zoom, 4.0);
    }

    #[test]
    fn pan_speed_scales_with_zoom() {
        let mut camera = CameraState::default();
        camera.zoom = 1.0;
        let wide = camera.pan_speed();
        camera.zoom = 0.25;
        let near = camera.pan_speed();
        assert!((wide - 0.005).abs() < f32::EPSILON);
        assert!((near - wide * 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn center_never_leaves_unit_square() {
        let mut camera = CameraState::default();
        for _ in 0..2_000 {
            camera.pan_up();
            camera.pan_right();
        }
        assert_eq!(camera.center_x, 1.0);
        assert_eq!(camera.center_y, 1.0);
        for _ in 0..4_000 {
            camera.pan_down();
            camera.pan_left();
        }
        assert_eq!(camera.center_x, -1.0);
        assert_eq!(camera.center_y, -1.0);
    }

    #[test]
    fn first_zoom_in_tick_saturates_from_initial_view() {
        let mut camera = CameraState::default();
        camera.zoom_in();
        assert_eq!(camera.zoom, 1.0);
        camera.zoom_in();
        assert_eq!(camera.zoom, 1.0);
    }

    #[test]
    fn zoom_out_from_initial_view_stays_unclamped() {
        let mut camera = CameraState::default();
        camera.zoom_out();
        assert!((camera.zoom - 4.0 * 0.98).abs() < 1e-6);
    }

    #[test]
    fn zoom_out_saturates_at_floor() {
        let mut camera = CameraState::default();
        for _ in 0..2_000 {
            camera.zoom_out();
        }
        assert_eq!(camera.zoom, 1e-5);
        camera.zoom_out();
        assert_eq!(camera.zoom, 1e-5);
    }

    #[test]
    fn zoom_in_never_exceeds_ceiling() {
        let mut camera = CameraState {
            zoom: 0.5,
            ..CameraState::default()
        };
        for _ in 0..1_000 {
            camera.zoom_in();
            assert!(camera.zoom <= 1.0);
        }
        assert_eq!(camera.zoom, 1.0);
    }
}
