/// Auto-orbiting camera driven by an explicit per-frame update
use nalgebra::Point3;

use crate::config::*;
use crate::projection::Camera;

/// Camera position on the orbit at animation time `t`
pub fn orbit_position(t: f32) -> Point3<f32> {
    Point3::new(
        (t * ORBIT_SPEED).cos() * ORBIT_RADIUS,
        BOB_BASE_HEIGHT + (t * BOB_SPEED).sin() * BOB_AMPLITUDE,
        (t * ORBIT_SPEED).sin() * ORBIT_RADIUS,
    )
}

/// Everything the frame loop carries between ticks
#[derive(Debug, Clone)]
pub struct AnimationState {
    pub elapsed_time: f32,
    pub camera: Camera,
    pub is_running: bool,
}

impl AnimationState {
    pub fn new(camera: Camera) -> Self {
        let mut state = Self {
            elapsed_time: 0.0,
            camera,
            is_running: true,
        };
        state.apply();
        state
    }

    /// Advance by one frame step.
    pub fn tick(&mut self) {
        self.advance(FRAME_TIME_STEP);
    }

    /// Advance by `dt` animation time units and re-aim the camera.
    /// Does nothing once stopped.
    pub fn advance(&mut self, dt: f32) {
        if !self.is_running {
            return;
        }
        self.elapsed_time += dt;
        self.apply();
    }

    /// Advance by wall-clock seconds.
    pub fn advance_seconds(&mut self, seconds: f32) {
        self.advance(seconds * TIME_UNITS_PER_SECOND);
    }

    pub fn stop(&mut self) {
        self.is_running = false;
    }

    fn apply(&mut self) {
        self.camera
            .look_at(orbit_position(self.elapsed_time), Point3::from(CAMERA_TARGET));
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_start() {
        let p = orbit_position(0.0);
        assert_eq!(p, Point3::new(35.0, 15.0, 0.0));
    }

    #[test]
    fn test_orbit_keeps_radius() {
        for step in 0..100 {
            let p = orbit_position(step as f32 * 0.37);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - 35.0).abs() < 1e-3);
            assert!(p.y >= 10.0 - 1e-4 && p.y <= 20.0 + 1e-4);
        }
    }

    #[test]
    fn test_tick_advances_and_aims() {
        let mut state = AnimationState::default();
        state.tick();
        state.tick();
        assert!((state.elapsed_time - 0.02).abs() < 1e-6);
        assert_eq!(state.camera.position, orbit_position(state.elapsed_time));
        assert_eq!(state.camera.target, Point3::new(0.0, 15.0, 0.0));
    }

    #[test]
    fn test_stopped_state_is_frozen() {
        let mut state = AnimationState::default();
        state.advance_seconds(1.0);
        state.stop();
        let frozen = state.camera.position;
        state.tick();
        state.advance(5.0);
        assert!((state.elapsed_time - 0.6).abs() < 1e-6);
        assert_eq!(state.camera.position, frozen);
        assert!(!state.is_running);
    }
}
