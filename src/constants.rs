use crate::Num;

#[cfg(not(feature = "f64"))]
pub use std::f32::consts::{FRAC_PI_2, PI};
#[cfg(feature = "f64")]
pub use std::f64::consts::{FRAC_PI_2, PI};

pub const TWO_PI: Num = 2.0 * PI;

pub const DEG_TO_RAD: Num = PI / 180.0;

/// Points sampled along an orbit curve when nothing else is configured
pub const DEFAULT_ORBIT_SEGMENTS: usize = 100;

/// Radians of yaw/pitch per pixel of pointer travel
pub const DEFAULT_SENSITIVITY: Num = 0.01;

/// Exponent of the nonlinear zoom step `distance^ZOOM_EXPONENT`
pub const DEFAULT_ZOOM_EXPONENT: Num = 0.6;

pub const DEFAULT_MIN_DISTANCE: Num = 15.0;
pub const DEFAULT_MAX_DISTANCE: Num = 120_000.0;
pub const DEFAULT_CAMERA_DISTANCE: Num = 8000.0;

/// Keeps the camera off the poles where the look-at basis degenerates
pub const POLE_MARGIN: Num = 0.001;

pub const DEFAULT_ORBIT_RADIUS_SCALE: Num = 1500.0;
pub const DEFAULT_PLANET_RADIUS_SCALE: Num = 0.01;
pub const DEFAULT_STAR_RADIUS: Num = 300.0;
pub const DEFAULT_SKY_RADIUS: Num = 1_000_000.0;
