// graph.rs - Transform node tree
//
// One node type for every rig: a local frame (position, rotation, scale)
// with an optional mesh and a list of children. Nodes live in an arena and
// are addressed by index; parents are always created before children, so
// a forward pass over the arena visits parents first.

use glam::{Affine3A, Quat, Vec3};
use serde::Serialize;

use super::ResourceId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn at(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Mesh {
    pub geometry: ResourceId,
    pub material: ResourceId,
}

#[derive(Clone, Debug, Serialize)]
pub struct Node {
    pub name: &'static str,
    pub parent: Option<NodeId>,
    pub local: Transform,
    pub mesh: Option<Mesh>,
    pub children: Vec<NodeId>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, parent: Option<NodeId>, name: &'static str, local: Transform, mesh: Option<Mesh>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { name, parent, local, mesh, children: Vec::new() });
        if let Some(p) = parent {
            self.nodes[p.0 as usize].children.push(id);
        }
        id
    }

    /// Empty frame with no geometry.
    pub fn group(&mut self, parent: Option<NodeId>, name: &'static str, local: Transform) -> NodeId {
        self.insert(parent, name, local, None)
    }

    pub fn mesh(&mut self, parent: Option<NodeId>, name: &'static str, local: Transform, mesh: Mesh) -> NodeId {
        self.insert(parent, name, local, Some(mesh))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn local(&self, id: NodeId) -> &Transform {
        &self.nodes[id.0 as usize].local
    }

    pub fn local_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0 as usize].local
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Compose local frames from the root down to `id`.
    pub fn world(&self, id: NodeId) -> Affine3A {
        let node = self.node(id);
        let local = node.local.affine();
        match node.parent {
            Some(p) => self.world(p) * local,
            None => local,
        }
    }

    /// World rotation of `id`, ignoring scale.
    pub fn world_rotation(&self, id: NodeId) -> Quat {
        let node = self.node(id);
        let local = node.local.rotation;
        match node.parent {
            Some(p) => self.world_rotation(p) * local,
            None => local,
        }
    }

    /// Number of nodes in the subtree rooted at `id`, itself included.
    pub fn subtree_len(&self, id: NodeId) -> usize {
        1 + self
            .node(id)
            .children
            .iter()
            .map(|&c| self.subtree_len(c))
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn child_frames_compose_with_parent() {
        let mut g = SceneGraph::new();
        let root = g.group(None, "root", Transform::at(Vec3::new(1.0, 0.0, 0.0)));
        let joint = g.group(
            Some(root),
            "joint",
            Transform::at(Vec3::new(0.0, 2.0, 0.0)).with_rotation(Quat::from_rotation_z(FRAC_PI_2)),
        );
        let tip = g.group(Some(joint), "tip", Transform::at(Vec3::new(1.0, 0.0, 0.0)));

        let p = g.world(tip).transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(1.0, 3.0, 0.0), 1e-5), "{p:?}");

        // Rotating the parent carries the descendant.
        g.local_mut(joint).rotation = Quat::IDENTITY;
        let p = g.world(tip).transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(2.0, 2.0, 0.0), 1e-5), "{p:?}");
    }

    #[test]
    fn children_are_tracked() {
        let mut g = SceneGraph::new();
        let root = g.group(None, "root", Transform::IDENTITY);
        let a = g.group(Some(root), "a", Transform::IDENTITY);
        g.group(Some(a), "b", Transform::IDENTITY);
        g.group(Some(root), "c", Transform::IDENTITY);
        assert_eq!(g.node(root).children.len(), 2);
        assert_eq!(g.subtree_len(root), 4);
        assert_eq!(g.subtree_len(a), 2);
    }
}
