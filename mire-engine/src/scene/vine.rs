// vine.rs - Static tube meshes along jittered spline paths

use glam::Vec3;
use rand::Rng;

use super::{Builder, Geometry, Material, NodeId, ResourceId, Transform};
use crate::world::catmull_rom;

const VINE: u32 = 0x444444;
const TUBE_RADIUS: f32 = 0.3;
const TUBE_RADIAL: u32 = 8;

/// (radius, control points, depth offset) of each vine cluster along the path.
pub const VINES: [(f32, usize, f32); 3] = [(5.0, 60, 5.0), (7.0, 60, -30.0), (4.0, 40, -60.0)];

pub fn vine_material(b: &mut Builder<'_>) -> ResourceId {
    b.res.material(Material::standard(VINE, 0.8, 0.2))
}

/// Control points spiral around the path, two units apart in depth.
pub fn vine_path<R: Rng>(radius: f32, count: usize, offset_z: f32, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let i = i as f32;
            Vec3::new(
                (i * 0.5).sin() * radius + (rng.r#gen::<f32>() - 0.5) * 2.0,
                (i * 0.3).cos() * radius + (rng.r#gen::<f32>() - 0.5) * 2.0,
                -i * 2.0 + offset_z,
            )
        })
        .collect()
}

pub fn build_vine<R: Rng>(
    b: &mut Builder<'_>,
    material: ResourceId,
    (radius, count, offset_z): (f32, usize, f32),
    rng: &mut R,
) -> NodeId {
    let control = vine_path(radius, count, offset_z, rng);
    let path = catmull_rom(&control, count * 2);
    b.part_root(
        "vine",
        Transform::IDENTITY,
        Geometry::Tube { path, radius: TUBE_RADIUS, radial: TUBE_RADIAL },
        material,
    )
}
