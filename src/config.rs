use crate::constants::*;
use crate::error::ConfigError;
use crate::Num;

/// Scales and resolutions used when composing a scene
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct SceneConfig {
    /// Scene units per unit of planet semi-major axis
    pub orbit_radius_scale: Num,
    /// Scene units per km of body radius
    pub planet_radius_scale: Num,
    /// Scene units per unit of moon semi-major axis
    pub moon_orbit_scale: Num,
    /// The star is drawn at a fixed size, its catalog radius would swallow
    /// the inner planets
    pub star_radius: Num,
    pub star_light_intensity: Num,
    pub sky_radius: Num,
    pub sky_material: String,
    pub orbit_segments: usize,
    /// Convergence threshold for Kepler's equation, radians
    pub kepler_tolerance: Num,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            orbit_radius_scale: DEFAULT_ORBIT_RADIUS_SCALE,
            planet_radius_scale: DEFAULT_PLANET_RADIUS_SCALE,
            moon_orbit_scale: 1.0,
            star_radius: DEFAULT_STAR_RADIUS,
            star_light_intensity: 1.0,
            sky_radius: DEFAULT_SKY_RADIUS,
            sky_material: "res/sky/stars.jpg".to_owned(),
            orbit_segments: DEFAULT_ORBIT_SEGMENTS,
            kepler_tolerance: 1e-6,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct CameraConfig {
    pub initial_distance: Num,
    pub initial_yaw: Num,
    pub initial_pitch: Num,
    pub min_distance: Num,
    pub max_distance: Num,
    /// Radians per pixel of drag
    pub sensitivity: Num,
    pub zoom_exponent: Num,
    /// Keep |pitch| within `pitch_limit`. Off, the camera rolls over the
    /// poles and the view turns upside down.
    pub clamp_pitch: bool,
    pub pitch_limit: Num,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_distance: DEFAULT_CAMERA_DISTANCE,
            initial_yaw: 0.0,
            initial_pitch: 0.0,
            min_distance: DEFAULT_MIN_DISTANCE,
            max_distance: DEFAULT_MAX_DISTANCE,
            sensitivity: DEFAULT_SENSITIVITY,
            zoom_exponent: DEFAULT_ZOOM_EXPONENT,
            clamp_pitch: true,
            pitch_limit: FRAC_PI_2 - POLE_MARGIN,
        }
    }
}

impl CameraConfig {
    /// The controller tolerates any values, this rejects the ones that
    /// would leave it stuck or drifting
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("min_distance", self.min_distance)?;
        positive("max_distance", self.max_distance)?;

        if self.min_distance > self.max_distance {
            return Err(ConfigError::InvertedDistanceBounds {
                min: self.min_distance,
                max: self.max_distance,
            });
        }

        finite("initial_distance", self.initial_distance)?;
        finite("initial_yaw", self.initial_yaw)?;
        finite("initial_pitch", self.initial_pitch)?;
        finite("sensitivity", self.sensitivity)?;
        finite("zoom_exponent", self.zoom_exponent)?;
        finite("pitch_limit", self.pitch_limit)?;

        Ok(())
    }
}

fn positive(field: &'static str, value: Num) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn finite(field: &'static str, value: Num) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn default_camera_is_valid() {
        assert_eq!(CameraConfig::default().validate(), Ok(()));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let config = CameraConfig {
            min_distance: 200.0,
            max_distance: 100.0,
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedDistanceBounds {
                min: 200.0,
                max: 100.0
            })
        );
    }

    #[test]
    fn equal_bounds_pin_the_distance() {
        let config = CameraConfig {
            min_distance: 500.0,
            max_distance: 500.0,
            ..Default::default()
        };

        assert_eq!(config.validate(), Ok(()));
    }

    #[test_case(0.0 ; "zero")]
    #[test_case(-15.0 ; "negative")]
    #[test_case(Num::NAN ; "nan")]
    fn min_distance_must_be_positive(min_distance: Num) {
        let config = CameraConfig {
            min_distance,
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "min_distance",
                ..
            })
        ));
    }

    #[test]
    fn nan_pitch_limit_is_rejected() {
        let config = CameraConfig {
            pitch_limit: Num::NAN,
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite {
                field: "pitch_limit",
                ..
            })
        ));
    }
}
