// scene/ - One-time scene construction
//
// Builds the fixed scene graph: lights, creature rigs, the bat flock, vine
// tubes and the sprite materials for the drift pools. Nothing here runs
// per frame; sim/ mutates the graph afterwards.

mod bat;
mod creature;
mod geometry;
mod graph;
mod lights;
mod vine;

pub use bat::BatRig;
pub use creature::{CreatureRig, LimbRig, PLACEMENTS, Placement, Stance};
pub use geometry::*;
pub use graph::*;
pub use lights::*;

use glam::Vec3;
use rand::Rng;
use serde::Serialize;

use crate::config::SceneConfig;
use crate::error::{MireError, MireResult};

const MIST_OPACITY: f32 = 0.6;
const CLOUD_OPACITY: f32 = 0.35;

/// Adds nodes and their resources in one step.
pub struct Builder<'a> {
    graph: &'a mut SceneGraph,
    res: &'a mut ResourceTable,
}

impl<'a> Builder<'a> {
    pub fn new(graph: &'a mut SceneGraph, res: &'a mut ResourceTable) -> Self {
        Self { graph, res }
    }

    pub fn group(&mut self, parent: Option<NodeId>, name: &'static str, local: Transform) -> NodeId {
        self.graph.group(parent, name, local)
    }

    /// Mesh node with its own geometry.
    pub fn part(&mut self, parent: NodeId, name: &'static str, local: Transform, geometry: Geometry, material: ResourceId) -> NodeId {
        let geometry = self.res.geometry(geometry);
        self.shared(parent, name, local, geometry, material)
    }

    pub fn part_root(&mut self, name: &'static str, local: Transform, geometry: Geometry, material: ResourceId) -> NodeId {
        let geometry = self.res.geometry(geometry);
        self.graph.mesh(None, name, local, Mesh { geometry, material })
    }

    /// Mesh node reusing an existing geometry.
    pub fn shared(&mut self, parent: NodeId, name: &'static str, local: Transform, geometry: ResourceId, material: ResourceId) -> NodeId {
        self.graph.mesh(Some(parent), name, local, Mesh { geometry, material })
    }
}

pub struct Scene {
    pub graph: SceneGraph,
    pub resources: ResourceTable,
    pub lights: LightRig,
    pub atmosphere: Atmosphere,
    pub creatures: Vec<CreatureRig>,
    pub bats: Vec<BatRig>,
    pub vines: Vec<NodeId>,
    pub mist_material: ResourceId,
    pub cloud_material: ResourceId,
}

impl Scene {
    pub fn build<R: Rng>(cfg: &SceneConfig, rng: &mut R) -> Self {
        let mut graph = SceneGraph::new();
        let mut resources = ResourceTable::new();
        let mut b = Builder::new(&mut graph, &mut resources);

        // Soft bluish-grey puff shared by both sprite layers.
        let puff = b.res.texture(Texture::RadialGradient {
            size: 128,
            stops: vec![(0.0, [50, 60, 70, 51]), (0.5, [30, 35, 40, 13]), (1.0, [0, 0, 0, 0])],
        });
        let mist_material = b.res.material(Material::Sprite { texture: puff, opacity: MIST_OPACITY });
        let cloud_material = b.res.material(Material::Sprite { texture: puff, opacity: CLOUD_OPACITY });
        b.res.geometry(Geometry::Sprite);

        let creatures = PLACEMENTS
            .iter()
            .map(|&place| creature::build_creature(&mut b, place, rng))
            .collect();

        let kit = bat::BatKit::new(&mut b);
        let bats = (0..cfg.flock.count)
            .map(|_| {
                let scale = 0.5 + rng.r#gen::<f32>() * 0.8;
                kit.build(&mut b, scale)
            })
            .collect();

        let vine_mat = vine::vine_material(&mut b);
        let vines = vine::VINES
            .iter()
            .map(|&v| vine::build_vine(&mut b, vine_mat, v, rng))
            .collect();

        tracing::debug!(nodes = graph.len(), resources = resources.len(), "scene built");

        Self {
            graph,
            resources,
            lights: LightRig::default(),
            atmosphere: Atmosphere::default(),
            creatures,
            bats,
            vines,
            mist_material,
            cloud_material,
        }
    }

    /// Everything the page needs to allocate its own objects once.
    pub fn describe(&self, sprite_layers: &[(ResourceId, usize)]) -> MireResult<String> {
        #[derive(Serialize)]
        struct Layer {
            material: ResourceId,
            count: usize,
        }
        #[derive(Serialize)]
        struct Description<'a> {
            atmosphere: &'a Atmosphere,
            lights: &'a LightRig,
            resources: &'a ResourceTable,
            nodes: &'a [Node],
            sprites: Vec<Layer>,
        }

        let desc = Description {
            atmosphere: &self.atmosphere,
            lights: &self.lights,
            resources: &self.resources,
            nodes: self.graph.nodes(),
            sprites: sprite_layers
                .iter()
                .map(|&(material, count)| Layer { material, count })
                .collect(),
        };
        serde_json::to_string(&desc).map_err(|e| MireError::config(e.to_string()))
    }

    /// World-space position of a node's origin.
    pub fn origin(&self, id: NodeId) -> Vec3 {
        self.graph.world(id).translation.into()
    }
}
