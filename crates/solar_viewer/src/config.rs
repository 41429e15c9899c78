use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use serde::Deserialize;
use solar_system::{CameraConfig, Catalog, SceneConfig};

/// Overrides [`DEFAULT_CONFIG_PATH`]
pub const CONFIG_ENV: &str = "SOLAR_VIEWER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "solar_viewer.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub scene: SceneConfig,
    pub camera: CameraConfig,
    /// Simulated days per real second
    pub time_scale: f32,
    /// TOML file with a `[[bodies]]` array, replaces the built-in catalog
    pub catalog: Option<PathBuf>,
    pub show_orbits: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),
            camera: CameraConfig::default(),
            time_scale: 1.0,
            catalog: None,
            show_orbits: true,
        }
    }
}

impl ViewerConfig {
    pub fn load() -> color_eyre::Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        Self::from_path(&path)
    }

    /// A missing file means defaults, a malformed one is an error
    pub fn from_path(path: &Path) -> color_eyre::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

        Self::parse(&contents).wrap_err_with(|| format!("Invalid config in {}", path.display()))
    }

    pub fn parse(contents: &str) -> color_eyre::Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.camera.validate().wrap_err("Invalid [camera] table")?;

        Ok(config)
    }

    pub fn catalog(&self) -> color_eyre::Result<Catalog> {
        let Some(path) = &self.catalog else {
            return Ok(Catalog::solar_system());
        };

        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read catalog {}", path.display()))?;

        toml::from_str(&contents).wrap_err_with(|| format!("Invalid catalog in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use solar_system::BodyKind;

    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: ViewerConfig = toml::from_str("").unwrap();

        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config: ViewerConfig = toml::from_str(
            r#"
            time_scale = 30.0

            [scene]
            orbit_segments = 256

            [camera]
            clamp_pitch = false
            "#,
        )
        .unwrap();

        assert_eq!(config.time_scale, 30.0);
        assert_eq!(config.scene.orbit_segments, 256);
        assert_eq!(config.scene.orbit_radius_scale, 1500.0);
        assert!(!config.camera.clamp_pitch);
        assert_eq!(config.camera.initial_distance, 8000.0);
    }

    #[test]
    fn malformed_file_is_rejected() {
        assert!(toml::from_str::<ViewerConfig>("time_scale = \"fast\"").is_err());
    }

    #[test]
    fn inverted_camera_bounds_are_rejected() {
        let result = ViewerConfig::parse(
            r#"
            [camera]
            min_distance = 200.0
            max_distance = 100.0
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn parse_accepts_partial_camera_table() {
        let config = ViewerConfig::parse("[camera]\nmax_distance = 20000.0").unwrap();

        assert_eq!(config.camera.max_distance, 20000.0);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = ViewerConfig::from_path(Path::new("does/not/exist.toml")).unwrap();

        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn catalog_from_toml() {
        let catalog: Catalog = toml::from_str(
            r#"
            [[bodies]]
            name = "Sol"
            kind = "star"
            radius = 1000.0
            material = "res/sol.jpg"
            shading = "emissive"

            [[bodies]]
            name = "Terra"
            parent = "Sol"
            kind = "planet"
            radius = 10.0
            material = "res/terra.jpg"
            orbit = { period = 100.0, semi_major_axis = 1.0, eccentricity = 0.1 }
            rotation = { period = 1.0, inclination = 20.0 }
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.bodies[1].kind, BodyKind::Planet);
        assert_eq!(catalog.bodies[1].orbit.inclination, 0.0);
        assert!(catalog.tree().is_ok());
    }
}
