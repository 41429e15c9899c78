//! Seams towards the renderer.
//!
//! The core never draws. A composed [`Scene`](crate::Scene) describes each
//! node as a [`Primitive`] and hands it to a [`PrimitiveFactory`] once, then
//! pushes local transforms into a [`TransformSink`] every frame.

use crate::catalog::Shading;
use crate::scene::{Node, NodeId};
use crate::{Num, Quat, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Transform only, nothing to draw
    Pivot,
    Sphere {
        radius: Num,
        material: String,
        shading: Shading,
    },
    PointLight {
        intensity: Num,
    },
    /// Flat annulus in the local XY plane
    Ring {
        inner_radius: Num,
        outer_radius: Num,
        material: String,
    },
    /// Closed polyline; the last point repeats the first
    OrbitLine { points: Vec<Vec3> },
    /// Inward-facing, unlit sphere around everything
    Sky { radius: Num, material: String },
}

/// Creates renderer-side objects for scene nodes.
///
/// Called once per node, parents before children, so `node.parent` has always
/// been created already.
pub trait PrimitiveFactory {
    fn create(&mut self, id: NodeId, node: &Node);
}

/// Receives the local transform of every node, relative to its parent
pub trait TransformSink {
    fn set_transform(&mut self, id: NodeId, translation: Vec3, rotation: Quat);
}
