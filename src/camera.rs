//! Orbit camera driven by pointer drags and wheel steps.
//!
//! The camera lives on a sphere around the origin and always looks at it.
//! Dragging changes yaw and pitch, the wheel changes the radius.

use tracing::trace;

use crate::config::CameraConfig;
use crate::{vec2, Num, Vec2, Vec3};

/// Spherical camera coordinates around the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub distance: Num,
    pub yaw: Num,
    pub pitch: Num,
}

impl CameraState {
    /// Cartesian eye position
    pub fn eye(&self) -> Vec3 {
        let Self {
            distance,
            yaw,
            pitch,
        } = *self;

        Vec3::new(
            distance * yaw.sin() * pitch.cos(),
            distance * pitch.sin(),
            distance * yaw.cos() * pitch.cos(),
        )
    }
}

/// What the renderer needs to place its camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

/// Normalized input from the window system
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: Num, y: Num },
    PointerMove { x: Num, y: Num },
    PointerUp,
    /// Browser convention: negative is "wheel up", which zooms in
    Wheel { delta_y: Num },
    Resize { width: u32, height: u32 },
}

/// Result of feeding an [`InputEvent`] to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Unchanged,
    PoseChanged,
    /// Not camera state; the renderer should update its projection
    Resize { width: u32, height: u32 },
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
enum Drag {
    #[default]
    Idle,
    Dragging {
        last: Vec2,
    },
}

#[derive(Debug, Clone)]
pub struct CameraController {
    config: CameraConfig,
    state: CameraState,
    drag: Drag,
    eye: Vec3,
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Self {
        let state = CameraState {
            // max/min rather than clamp: unvalidated bounds must not panic
            distance: config
                .initial_distance
                .max(config.min_distance)
                .min(config.max_distance),
            yaw: config.initial_yaw,
            pitch: config.initial_pitch,
        };

        let mut controller = Self {
            config,
            state,
            drag: Drag::Idle,
            eye: Vec3::ZERO,
        };
        controller.state.pitch = controller.limit_pitch(state.pitch);
        controller.recompute();

        controller
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, Drag::Dragging { .. })
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.eye,
            target: Vec3::ZERO,
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Response {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.pointer_down(x, y);
                Response::Unchanged
            }
            InputEvent::PointerMove { x, y } => {
                if self.pointer_move(x, y) {
                    Response::PoseChanged
                } else {
                    Response::Unchanged
                }
            }
            InputEvent::PointerUp => {
                self.pointer_up();
                Response::Unchanged
            }
            InputEvent::Wheel { delta_y } => {
                if self.wheel(delta_y) {
                    Response::PoseChanged
                } else {
                    Response::Unchanged
                }
            }
            InputEvent::Resize { width, height } => Response::Resize { width, height },
        }
    }

    pub fn pointer_down(&mut self, x: Num, y: Num) {
        trace!(x, y, "camera drag start");
        self.drag = Drag::Dragging { last: vec2(x, y) };
    }

    /// Rotates the camera while a drag is active. Returns whether the pose
    /// moved.
    pub fn pointer_move(&mut self, x: Num, y: Num) -> bool {
        let Drag::Dragging { last } = self.drag else {
            return false;
        };

        let position = vec2(x, y);
        let delta = position - last;
        self.drag = Drag::Dragging { last: position };

        if delta == Vec2::ZERO {
            return false;
        }

        self.state.yaw -= delta.x * self.config.sensitivity;
        self.state.pitch = self.limit_pitch(self.state.pitch + delta.y * self.config.sensitivity);
        self.recompute();

        true
    }

    pub fn pointer_up(&mut self) {
        if self.is_dragging() {
            trace!("camera drag end");
        }
        self.drag = Drag::Idle;
    }

    /// Zooms by `distance^zoom_exponent`, in whatever drag state. Negative
    /// `delta_y` moves closer. Returns whether the distance changed.
    pub fn wheel(&mut self, delta_y: Num) -> bool {
        let CameraConfig {
            min_distance,
            max_distance,
            zoom_exponent,
            ..
        } = self.config;

        let distance = self.state.distance;
        let step = distance.powf(zoom_exponent);

        let next = if delta_y < 0.0 {
            (distance - step).max(min_distance)
        } else if delta_y > 0.0 {
            (distance + step).min(max_distance)
        } else {
            distance
        };

        if next == distance {
            return false;
        }

        trace!(from = distance, to = next, "camera zoom");
        self.state.distance = next;
        self.recompute();

        true
    }

    fn limit_pitch(&self, pitch: Num) -> Num {
        if self.config.clamp_pitch {
            let limit = self.config.pitch_limit.abs();
            pitch.max(-limit).min(limit)
        } else {
            pitch
        }
    }

    fn recompute(&mut self) {
        self.eye = self.state.eye();
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::constants::FRAC_PI_2;

    fn dragged(from: (Num, Num), to: (Num, Num)) -> CameraController {
        let mut camera = CameraController::default();
        camera.pointer_down(from.0, from.1);
        camera.pointer_move(to.0, to.1);
        camera
    }

    #[test]
    fn starts_on_positive_z() {
        let camera = CameraController::default();
        let pose = camera.pose();

        assert!(pose.eye.distance(Vec3::new(0.0, 0.0, 8000.0)) < 1e-2);
        assert_eq!(pose.target, Vec3::ZERO);
    }

    #[test]
    fn one_wheel_up_step() {
        let mut camera = CameraController::default();

        assert!(camera.wheel(-1.0));

        // 8000 - 8000^0.6
        let expected = 8000.0 - Num::powf(8000.0, 0.6);
        assert!((camera.state().distance - expected).abs() < 1e-2);
        assert!((camera.state().distance - 7780.3).abs() < 0.1);
    }

    #[test]
    fn zoom_in_saturates_at_minimum() {
        let mut camera = CameraController::default();

        for _ in 0..1000 {
            camera.wheel(-1.0);
            assert!(camera.state().distance >= 15.0);
        }

        assert_eq!(camera.state().distance, 15.0);
        assert!(!camera.wheel(-1.0));
    }

    #[test]
    fn zoom_out_saturates_at_maximum() {
        let mut camera = CameraController::default();

        for _ in 0..1000 {
            camera.wheel(1.0);
            assert!(camera.state().distance <= 120_000.0);
        }

        assert_eq!(camera.state().distance, 120_000.0);
    }

    #[test]
    fn zero_wheel_delta_is_ignored() {
        let mut camera = CameraController::default();

        assert_eq!(camera.handle(InputEvent::Wheel { delta_y: 0.0 }), Response::Unchanged);
        assert_eq!(camera.state().distance, 8000.0);
    }

    #[test]
    fn zoom_works_mid_drag() {
        let mut camera = dragged((0.0, 0.0), (10.0, 0.0));

        assert!(camera.wheel(1.0));
        assert!(camera.is_dragging());
        assert!((camera.pose().eye.length() - camera.state().distance).abs() < 1e-1);
    }

    #[test]
    fn zero_drag_is_a_no_op() {
        let before = CameraController::default().state();
        let mut camera = CameraController::default();

        camera.pointer_down(50.0, 50.0);
        assert!(!camera.pointer_move(50.0, 50.0));

        assert_eq!(camera.state(), before);
    }

    #[test_case((10.0, 0.0), -0.1, 0.0; "right")]
    #[test_case((-10.0, 0.0), 0.1, 0.0; "left")]
    #[test_case((0.0, 10.0), 0.0, 0.1; "down")]
    #[test_case((0.0, -20.0), 0.0, -0.2; "up")]
    fn drag_rotates(delta: (Num, Num), yaw: Num, pitch: Num) {
        let camera = dragged((100.0, 100.0), (100.0 + delta.0, 100.0 + delta.1));

        assert!((camera.state().yaw - yaw).abs() < 1e-6);
        assert!((camera.state().pitch - pitch).abs() < 1e-6);
    }

    #[test]
    fn moves_are_measured_from_last_position() {
        let mut camera = CameraController::default();

        camera.pointer_down(0.0, 0.0);
        camera.pointer_move(10.0, 0.0);
        camera.pointer_move(30.0, 0.0);

        assert!((camera.state().yaw + 0.3).abs() < 1e-6);
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut camera = CameraController::default();

        assert_eq!(
            camera.handle(InputEvent::PointerMove { x: 40.0, y: 40.0 }),
            Response::Unchanged
        );

        camera.handle(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        camera.handle(InputEvent::PointerUp);

        assert!(!camera.pointer_move(40.0, 40.0));
        assert_eq!(camera.state().yaw, 0.0);
    }

    #[test]
    fn pitch_is_clamped_short_of_the_pole() {
        let camera = dragged((0.0, 0.0), (0.0, 10_000.0));

        assert!(camera.state().pitch < FRAC_PI_2);
        assert!(camera.pose().eye.y > 0.0);
        assert!(camera.pose().eye.y <= camera.state().distance);
    }

    #[test]
    fn unclamped_pitch_rolls_over() {
        let mut camera = CameraController::new(CameraConfig {
            clamp_pitch: false,
            ..Default::default()
        });

        camera.pointer_down(0.0, 0.0);
        camera.pointer_move(0.0, 200.0);

        assert!((camera.state().pitch - 2.0).abs() < 1e-6);
        // Past the pole the camera is behind the origin
        assert!(camera.pose().eye.z < 0.0);
    }

    #[test]
    fn eye_follows_spherical_formula() {
        let state = CameraState {
            distance: 100.0,
            yaw: FRAC_PI_2,
            pitch: 0.0,
        };

        assert!(state.eye().distance(Vec3::new(100.0, 0.0, 0.0)) < 1e-3);
    }

    #[test_case(200.0, 100.0; "inverted")]
    #[test_case(Num::NAN, 100.0; "nan minimum")]
    #[test_case(15.0, Num::NAN; "nan maximum")]
    fn odd_distance_bounds_do_not_panic(min_distance: Num, max_distance: Num) {
        let mut camera = CameraController::new(CameraConfig {
            min_distance,
            max_distance,
            ..Default::default()
        });

        camera.wheel(-1.0);
        camera.wheel(1.0);

        assert!(camera.state().distance.is_finite());
    }

    #[test]
    fn nan_pitch_limit_does_not_panic() {
        let mut camera = CameraController::new(CameraConfig {
            pitch_limit: Num::NAN,
            ..Default::default()
        });

        camera.pointer_down(0.0, 0.0);
        camera.pointer_move(0.0, 10.0);

        assert!(camera.state().pitch.is_finite());
    }

    #[test]
    fn resize_is_forwarded() {
        let mut camera = CameraController::default();
        let before = camera.state();

        let response = camera.handle(InputEvent::Resize {
            width: 800,
            height: 600,
        });

        assert_eq!(
            response,
            Response::Resize {
                width: 800,
                height: 600
            }
        );
        assert_eq!(camera.state(), before);
    }
}
