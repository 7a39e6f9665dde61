// bat.rs - Small flying creatures

use glam::Vec3;

use super::{Builder, Geometry, Material, NodeId, Transform};

const BODY: u32 = 0x333333;
const WING: u32 = 0x1a1a1a;

/// Wing outline in the XY plane, root at the origin.
const WING_OUTLINE: [[f32; 2]; 5] = [[0.0, 0.0], [0.6, 0.3], [1.2, 0.0], [0.8, -0.4], [0.0, 0.0]];

#[derive(Clone, Copy, Debug)]
pub struct BatRig {
    pub root: NodeId,
    pub left_wing: NodeId,
    pub right_wing: NodeId,
}

pub struct BatKit {
    body: super::ResourceId,
    body_mat: super::ResourceId,
    wing: super::ResourceId,
    wing_mat: super::ResourceId,
}

impl BatKit {
    /// Geometry and materials shared by the whole flock.
    pub fn new(b: &mut Builder<'_>) -> Self {
        Self {
            body: b.res.geometry(Geometry::Sphere { radius: 0.15 }),
            body_mat: b.res.material(Material::standard(BODY, 1.0, 0.0)),
            wing: b.res.geometry(Geometry::Outline { points: WING_OUTLINE.to_vec() }),
            wing_mat: b.res.material(Material::Standard {
                color: WING,
                roughness: 1.0,
                metalness: 0.0,
                emissive: 0,
                emissive_intensity: 0.0,
                double_sided: true,
            }),
        }
    }

    pub fn build(&self, b: &mut Builder<'_>, scale: f32) -> BatRig {
        let root = b.group(None, "bat", Transform::IDENTITY.with_scale(Vec3::splat(scale)));
        b.shared(root, "bat_body", Transform::IDENTITY, self.body, self.body_mat);
        // Left wing is the right one mirrored in x.
        let left_wing = b.shared(
            root,
            "left_wing",
            Transform::at(Vec3::X * -0.1).with_scale(Vec3::new(-1.0, 1.0, 1.0)),
            self.wing,
            self.wing_mat,
        );
        let right_wing = b.shared(root, "right_wing", Transform::at(Vec3::X * 0.1), self.wing, self.wing_mat);
        BatRig { root, left_wing, right_wing }
    }
}
