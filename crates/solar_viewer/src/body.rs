use bevy::prelude::*;
use solar_system::{CameraController, NodeId, Scene};

/// The composed scene, advanced by the clock every frame
#[derive(Resource)]
pub struct Solar(pub Scene);

#[derive(Resource)]
pub struct OrbitCamera(pub CameraController);

/// Entity spawned for each scene node, indexed by [`NodeId::index`]
#[derive(Resource, Default)]
pub struct NodeEntities(pub Vec<Entity>);

impl NodeEntities {
    pub fn get(&self, id: NodeId) -> Option<Entity> {
        self.0.get(id.index()).copied()
    }
}

#[derive(Debug, Clone, Copy, Component)]
pub struct SceneNode(pub NodeId);

/// Orbit curve in the parent's frame, drawn with gizmos
#[derive(Debug, Clone, Component)]
pub struct OrbitPath(pub Vec<Vec3>);

#[derive(Debug, Clone, Copy, Component)]
pub struct Sky;
