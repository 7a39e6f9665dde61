// render.rs - Encode animated state to an output buffer
//
// The page owns the real GPU objects. Each frame is flattened into one f32
// buffer it reads through `ptr`/`len`:
//
//   header   camera position (3), target (3)
//            fov, aspect, near, far (4)
//            pulse intensity, pulse x, flash intensity (3)
//   nodes    position (3), rotation xyzw (4), scale (3) per scene node
//   sprites  x, y, z, scale, rotation per sprite, mist then clouds
//
// Node order matches the scene description, so indices line up.

use crate::error::{MireError, MireResult};
use crate::scene::{ResourceTable, SceneGraph};
use crate::sim::{DriftPool, LightLevels};
use crate::world::{CameraPose, Projection};

pub const HEADER_LEN: usize = 13;
pub const NODE_STRIDE: usize = 10;
pub const SPRITE_STRIDE: usize = 5;

/// Everything a renderer needs for one draw.
pub struct Frame<'a> {
    pub camera: &'a CameraPose,
    pub projection: &'a Projection,
    pub lights: LightLevels,
    pub graph: &'a SceneGraph,
    pub layers: [&'a DriftPool; 2],
}

/// Drawing surface. Acquired once at mount; `release` runs once at
/// teardown with every resource created during setup.
pub trait Renderer {
    fn size(&self) -> (u32, u32);
    fn resize(&mut self, width: u32, height: u32);
    fn draw(&mut self, frame: &Frame);
    fn release(&mut self, resources: &ResourceTable);
}

pub struct Encoder {
    out: Vec<f32>,
    released: Vec<u32>,
    w: u32,
    h: u32,
    draws: u64,
}

impl Encoder {
    /// Fails on a zero-sized surface.
    pub fn acquire(w: u32, h: u32) -> MireResult<Self> {
        if w == 0 || h == 0 {
            return Err(MireError::surface(format!("zero-sized surface {w}x{h}")));
        }
        Ok(Self {
            out: Vec::new(),
            released: Vec::new(),
            w,
            h,
            draws: 0,
        })
    }

    pub fn ptr(&self) -> *const f32 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn output(&self) -> &[f32] {
        &self.out
    }

    /// Resource ids handed back at teardown, for the page to dispose.
    pub fn released(&self) -> &[u32] {
        &self.released
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    fn encode_header(&mut self, f: &Frame) {
        let (c, p, l) = (f.camera, f.projection, f.lights);
        self.out.extend_from_slice(&c.position.to_array());
        self.out.extend_from_slice(&c.target.to_array());
        self.out.extend_from_slice(&[p.fov_deg, p.aspect, p.near, p.far]);
        self.out.extend_from_slice(&[l.pulse, l.pulse_x, l.flash]);
    }

    fn encode_nodes(&mut self, graph: &SceneGraph) {
        for node in graph.nodes() {
            let t = &node.local;
            self.out.extend_from_slice(&t.position.to_array());
            self.out.extend_from_slice(&t.rotation.to_array());
            self.out.extend_from_slice(&t.scale.to_array());
        }
    }

    fn encode_sprites(&mut self, pool: &DriftPool) {
        for i in 0..pool.len() {
            self.out
                .extend_from_slice(&[pool.x[i], pool.y[i], pool.z[i], pool.scale[i], pool.rotation[i]]);
        }
    }
}

impl Renderer for Encoder {
    fn size(&self) -> (u32, u32) {
        (self.w, self.h)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.w = width;
        self.h = height;
    }

    fn draw(&mut self, frame: &Frame) {
        self.out.clear();
        self.encode_header(frame);
        self.encode_nodes(frame.graph);
        for pool in frame.layers {
            self.encode_sprites(pool);
        }
        self.draws += 1;
    }

    fn release(&mut self, resources: &ResourceTable) {
        self.released.extend(resources.ids().map(|id| id.0));
        self.out.clear();
        tracing::debug!(count = resources.len(), "resources released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::sim::Animator;

    #[test]
    fn zero_sized_surface_is_refused() {
        assert!(matches!(Encoder::acquire(0, 600), Err(MireError::Surface(_))));
        assert!(Encoder::acquire(800, 600).is_ok());
    }

    #[test]
    fn frame_layout_matches_strides() {
        let cfg = SceneConfig::default();
        let anim = Animator::new(cfg.clone(), 3, 0.0);
        let camera = CameraPose::at(0.0, &cfg.camera);
        let projection = Projection::new(&cfg.camera, 800, 400);
        let mut enc = Encoder::acquire(800, 400).unwrap();
        enc.draw(&Frame {
            camera: &camera,
            projection: &projection,
            lights: anim.lights(),
            graph: &anim.scene().graph,
            layers: anim.layers(),
        });

        let nodes = anim.scene().graph.len();
        let sprites = anim.layers()[0].len() + anim.layers()[1].len();
        assert_eq!(enc.len(), HEADER_LEN + nodes * NODE_STRIDE + sprites * SPRITE_STRIDE);
        assert_eq!(&enc.output()[..3], &camera.position.to_array());
        assert_eq!(enc.output()[7], 2.0);
        assert_eq!(enc.draws(), 1);
    }

    #[test]
    fn release_reports_every_resource() {
        let anim = Animator::new(SceneConfig::default(), 3, 0.0);
        let mut enc = Encoder::acquire(10, 10).unwrap();
        enc.release(&anim.scene().resources);
        assert_eq!(enc.released().len(), anim.scene().resources.len());
        assert!(enc.is_empty());
    }
}
