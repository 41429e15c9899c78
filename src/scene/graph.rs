use crate::render::Primitive;
use crate::{Mat4, Quat, Vec3};

/// Index of a node in a [`SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub primitive: Primitive,

    // Local transform, relative to the parent
    pub translation: Vec3,
    pub rotation: Quat,

    world: Mat4,
}

impl Node {
    pub fn local(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    /// World transform as of the last propagation
    pub fn world(&self) -> Mat4 {
        self.world
    }

    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }
}

/// Arena of transform nodes.
///
/// Nodes are only ever appended and a parent must exist before its child, so
/// index order is always a valid parent-first order.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add(
        &mut self,
        name: impl Into<String>,
        primitive: Primitive,
        parent: Option<NodeId>,
        translation: Vec3,
        rotation: Quat,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());

        let mut node = Node {
            name: name.into(),
            parent,
            children: Vec::new(),
            primitive,
            translation,
            rotation,
            world: Mat4::IDENTITY,
        };
        node.world = self.parent_world(parent) * node.local();

        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        self.nodes.push(node);

        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.nodes[id.0].world_position()
    }

    /// Recomputes world transforms of `root` and everything below it.
    ///
    /// The parent of `root` must already be up to date.
    pub fn propagate(&mut self, root: NodeId) {
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            let parent_world = self.parent_world(self.nodes[id.0].parent);

            let node = &mut self.nodes[id.0];
            node.world = parent_world * node.local();

            stack.extend(node.children.iter().copied());
        }
    }

    fn parent_world(&self, parent: Option<NodeId>) -> Mat4 {
        parent.map_or(Mat4::IDENTITY, |p| self.nodes[p.0].world)
    }
}
