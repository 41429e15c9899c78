//! Orbital geometry and scene composition for an interactive solar system.
//!
//! The crate turns a declarative [`Catalog`] of celestial bodies into a
//! [`Scene`]: a transform hierarchy of star, planets, moons, rings and orbit
//! curves, plus one [`SceneHandle`] per body for per-frame animation. The
//! [`CameraController`] maps pointer and wheel input onto a spherical camera
//! pose around the origin. Drawing is left to a renderer implementing the
//! traits in [`render`].

pub mod camera;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod orbit;
pub mod render;
pub mod scene;
pub mod utils;

#[cfg(not(feature = "f64"))]
pub type Num = f32;
#[cfg(not(feature = "f64"))]
pub use glam::{vec2, vec3, Mat4, Quat, Vec2, Vec3};

#[cfg(feature = "f64")]
pub type Num = f64;
#[cfg(feature = "f64")]
pub use glam::{dvec2 as vec2, dvec3 as vec3, DMat4 as Mat4, DQuat as Quat, DVec2 as Vec2, DVec3 as Vec3};

pub use camera::{CameraController, CameraPose, CameraState, InputEvent, Response};
pub use catalog::{BodyKind, Catalog, CelestialBody, OrbitalElements, Ring, Rotation, Shading};
pub use config::{CameraConfig, SceneConfig};
pub use constants::{PI, TWO_PI};
pub use error::{ConfigError, OrbitError, Result, SceneError};
pub use orbit::{EllipseParams, EllipsePoints, OrbitCurve};
pub use render::{Primitive, PrimitiveFactory, TransformSink};
pub use scene::{HandleId, Node, NodeId, Scene, SceneGraph, SceneHandle};
