use thiserror::Error;

use crate::Num;

pub type Result<T, E = SceneError> = std::result::Result<T, E>;

/// Orbital elements that do not describe a closed orbit
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum OrbitError {
    #[error("semi-major axis must be positive, got {0}")]
    NonPositiveSemiMajorAxis(Num),

    #[error("eccentricity must lie in [0, 1), got {0}")]
    EccentricityOutOfRange(Num),

    #[error("orbit scale must be positive and finite, got {0}")]
    NonPositiveScale(Num),
}

/// Settings that would leave the camera or scene without a sane range
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: Num },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: Num },

    #[error("min_distance ({min}) exceeds max_distance ({max})")]
    InvertedDistanceBounds { min: Num, max: Num },
}

/// Failures while composing a scene from a catalog.
///
/// All of them are raised before any node is handed to a renderer, and each
/// names the body that caused it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("invalid orbit parameters for {body}: {source}")]
    InvalidOrbitParameters {
        body: String,
        #[source]
        source: OrbitError,
    },

    #[error("{body} orbits {parent}, which is not in the catalog")]
    MissingParent { body: String, parent: String },

    #[error("duplicate body name: {name}")]
    DuplicateName { name: String },

    #[error("catalog must contain exactly one star, found {found}")]
    StarCount { found: usize },

    #[error("{body} is neither a planet of the star nor a moon of a planet")]
    UnreachableBody { body: String },
}

impl SceneError {
    /// Name of the body the error is about
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::InvalidOrbitParameters { body, .. }
            | Self::MissingParent { body, .. }
            | Self::UnreachableBody { body } => Some(body),
            Self::DuplicateName { name } => Some(name),
            Self::StarCount { .. } => None,
        }
    }
}
