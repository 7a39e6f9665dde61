// creature.rs - Articulated creature rigs
//
// Every joint is its own frame so one rotation per joint per frame moves
// the whole chain below it. Offsets are in creature units and multiplied
// by the rig scale.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, PI, TAU};

use glam::{Quat, Vec3};
use rand::Rng;

use super::{Builder, Geometry, Material, NodeId, ResourceId, Transform};
use crate::world::euler;

const SKIN: u32 = 0x887777;
const FLESH: u32 = 0x660000;
const TEETH: u32 = 0xdddddd;
const MAW: u32 = 0x110000;

const PETALS: usize = 5;
const TEETH_PER_PETAL: usize = 7;
const CLAWS: usize = 4;
const TOES: usize = 3;
const RIBS: usize = 4;
const SPIKES: usize = 3;

/// How the arms are posed every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stance {
    /// Arms bent up, ready to strike; head scans side to side.
    Stalking,
    /// Arms spread wide; head tilts and sways.
    Threat,
}

#[derive(Clone, Copy, Debug)]
pub struct LimbRig {
    pub root: NodeId,
    pub upper: NodeId,
    pub lower: NodeId,
    pub hand: NodeId,
}

#[derive(Clone, Debug)]
pub struct CreatureRig {
    pub root: NodeId,
    pub spine: NodeId,
    pub chest: NodeId,
    pub head: NodeId,
    /// Flap frame of each face petal; rotating about x opens the face.
    pub petals: Vec<NodeId>,
    pub left_arm: LimbRig,
    pub right_arm: LimbRig,
    pub stance: Stance,
    /// Root frame as placed at setup.
    pub base: Transform,
}

/// Placement of one creature in the scene.
#[derive(Clone, Copy, Debug)]
pub struct Placement {
    pub scale: f32,
    pub position: Vec3,
    pub yaw: f32,
    pub stance: Stance,
}

pub const PLACEMENTS: [Placement; 2] = [
    // Closer, staring.
    Placement {
        scale: 1.8,
        position: Vec3::new(-3.5, -4.0, -15.0),
        yaw: 0.4,
        stance: Stance::Stalking,
    },
    // Farther, looming.
    Placement {
        scale: 2.5,
        position: Vec3::new(5.0, -6.0, -50.0),
        yaw: -0.3,
        stance: Stance::Threat,
    },
];

struct Palette {
    skin: ResourceId,
    flesh: ResourceId,
    teeth: ResourceId,
    maw: ResourceId,
}

impl Palette {
    fn new(b: &mut Builder<'_>) -> Self {
        Self {
            // Wet skin, light enough to read against the fog.
            skin: b.res.material(Material::standard(SKIN, 0.4, 0.1)),
            flesh: b.res.material(Material::Standard {
                color: FLESH,
                roughness: 0.2,
                metalness: 0.0,
                emissive: 0x220000,
                emissive_intensity: 0.2,
                double_sided: true,
            }),
            teeth: b.res.material(Material::standard(TEETH, 0.3, 0.1)),
            maw: b.res.material(Material::standard(MAW, 0.1, 0.0)),
        }
    }
}

pub fn build_creature<R: Rng>(b: &mut Builder<'_>, place: Placement, rng: &mut R) -> CreatureRig {
    let s = place.scale;
    let pal = Palette::new(b);

    let base = Transform::at(place.position).with_rotation(Quat::from_rotation_y(place.yaw));
    let root = b.group(None, "creature", base);

    b.part(root, "pelvis", Transform::at(Vec3::Y * 1.8 * s), Geometry::Dodecahedron { radius: 0.35 * s }, pal.skin);

    // Spine and ribcage
    let spine = b.group(Some(root), "spine", Transform::at(Vec3::Y * 2.2 * s));
    b.part(
        spine,
        "backbone",
        Transform::at(Vec3::Y * 0.5 * s),
        Geometry::Cylinder { top: 0.12 * s, bottom: 0.15 * s, height: 1.2 * s, radial: 8 },
        pal.skin,
    );
    for i in 0..RIBS {
        let radius = (0.28 - i as f32 * 0.02) * s;
        b.part(
            spine,
            "rib",
            // Open at the front.
            Transform::at(Vec3::Y * (0.3 + i as f32 * 0.2) * s).with_rotation(euler(FRAC_PI_2, 0.0, PI / 1.35)),
            Geometry::Torus { radius, tube: 0.04 * s, radial: 8, tubular: 16, arc: PI * 1.5 },
            pal.skin,
        );
    }

    let chest = b.part(
        root,
        "chest",
        Transform::at(Vec3::new(0.0, 2.9 * s, 0.15 * s)).with_rotation(euler(-0.2, 0.0, 0.0)),
        Geometry::Cuboid { width: 0.25 * s, height: 0.4 * s, depth: 0.1 * s },
        pal.skin,
    );

    let spike = b.res.geometry(Geometry::Cone { radius: 0.05 * s, height: 0.3 * s, radial: 4 });
    for i in 0..SPIKES {
        b.shared(
            root,
            "back_spike",
            Transform::at(Vec3::new(0.0, (2.6 + i as f32 * 0.3) * s, -0.2 * s)).with_rotation(euler(-FRAC_PI_4, 0.0, 0.0)),
            spike,
            pal.skin,
        );
    }

    let head = b.group(Some(root), "head", Transform::at(Vec3::Y * 3.5 * s));
    b.part(
        head,
        "neck",
        Transform::at(Vec3::Y * -0.2 * s),
        Geometry::Cylinder { top: 0.14 * s, bottom: 0.16 * s, height: 0.4 * s, radial: 8 },
        pal.skin,
    );
    let petals = (0..PETALS).map(|i| build_petal(b, head, i, s, &pal, rng)).collect();
    b.part(head, "maw", Transform::IDENTITY, Geometry::Sphere { radius: 0.14 * s }, pal.maw);

    let left_arm = build_arm(b, root, -1.0, s, &pal);
    let right_arm = build_arm(b, root, 1.0, s, &pal);
    build_leg(b, root, -1.0, s, &pal);
    build_leg(b, root, 1.0, s, &pal);

    CreatureRig {
        root,
        spine,
        chest,
        head,
        petals,
        left_arm,
        right_arm,
        stance: place.stance,
        base,
    }
}

fn build_petal<R: Rng>(b: &mut Builder<'_>, head: NodeId, i: usize, s: f32, pal: &Palette, rng: &mut R) -> NodeId {
    let angle = i as f32 / PETALS as f32 * TAU;
    let socket = b.group(Some(head), "petal_socket", Transform::IDENTITY.with_rotation(Quat::from_rotation_z(angle)));
    let flap = b.group(Some(socket), "petal", Transform::IDENTITY);

    // Pivot at the base, flattened into a blade.
    let blade_geo = b.res.shifted(
        Geometry::Cone { radius: 0.18 * s, height: 0.95 * s, radial: 5 },
        Vec3::Y * 0.45 * s,
    );
    let blade = b.shared(
        flap,
        "petal_blade",
        Transform::IDENTITY.with_scale(Vec3::new(1.0, 1.0, 0.15)),
        blade_geo,
        pal.flesh,
    );
    b.part(
        blade,
        "petal_bump",
        Transform::at(Vec3::new(0.0, 0.4 * s, -0.05 * s)),
        Geometry::Cuboid { width: 0.1 * s, height: 0.4 * s, depth: 0.05 * s },
        pal.skin,
    );

    for t in 0..TEETH_PER_PETAL {
        let size = (0.02 + rng.r#gen::<f32>() * 0.015) * s;
        let x = (rng.r#gen::<f32>() - 0.5) * 0.05 * s;
        b.part(
            blade,
            "tooth",
            Transform::at(Vec3::new(x, (0.15 + t as f32 * 0.12) * s, 0.04 * s)).with_rotation(euler(FRAC_PI_3, 0.0, 0.0)),
            Geometry::Cone { radius: size, height: size * 4.0, radial: 3 },
            pal.teeth,
        );
    }
    flap
}

/// `dir` is -1 for the left side and +1 for the right.
fn build_arm(b: &mut Builder<'_>, root: NodeId, dir: f32, s: f32, pal: &Palette) -> LimbRig {
    let limb = b.group(Some(root), "arm", Transform::at(Vec3::new(dir * 0.45 * s, 3.2 * s, 0.0)));

    let shoulder = b.part(limb, "shoulder", Transform::IDENTITY, Geometry::Sphere { radius: 0.18 * s }, pal.skin);
    b.part(
        shoulder,
        "shoulder_spike",
        Transform::at(Vec3::Y * 0.1 * s).with_rotation(euler(0.0, 0.0, dir * -0.5)),
        Geometry::Cone { radius: 0.04 * s, height: 0.2 * s, radial: 4 },
        pal.skin,
    );

    let upper = b.group(Some(limb), "upper_arm", Transform::IDENTITY.with_rotation(euler(0.0, 0.0, dir * 0.3)));
    let upper_geo = b.res.shifted(
        Geometry::Cylinder { top: 0.1 * s, bottom: 0.08 * s, height: 1.2 * s, radial: 6 },
        Vec3::Y * -0.6 * s,
    );
    let upper_mesh = b.shared(upper, "upper_arm_mesh", Transform::IDENTITY, upper_geo, pal.skin);
    b.part(
        upper_mesh,
        "bicep",
        Transform::at(Vec3::new(0.0, -0.5 * s, 0.02 * s)).with_scale(Vec3::new(1.0, 1.5, 1.0)),
        Geometry::Sphere { radius: 0.12 * s },
        pal.skin,
    );

    let lower = b.group(
        Some(upper),
        "elbow",
        Transform::at(Vec3::Y * -1.2 * s).with_rotation(euler(-0.5, 0.0, dir * 0.2)),
    );
    let elbow = b.part(lower, "elbow_joint", Transform::IDENTITY, Geometry::Sphere { radius: 0.11 * s }, pal.skin);
    b.part(
        elbow,
        "elbow_spike",
        Transform::at(Vec3::Z * -0.1 * s).with_rotation(euler(-FRAC_PI_2, 0.0, 0.0)),
        Geometry::Cone { radius: 0.03 * s, height: 0.15 * s, radial: 4 },
        pal.skin,
    );
    let forearm_geo = b.res.shifted(
        Geometry::Cylinder { top: 0.09 * s, bottom: 0.06 * s, height: 1.5 * s, radial: 6 },
        Vec3::Y * -0.75 * s,
    );
    b.shared(lower, "forearm", Transform::IDENTITY, forearm_geo, pal.skin);

    let hand = b.group(Some(lower), "hand", Transform::at(Vec3::Y * -1.5 * s));
    b.part(
        hand,
        "palm",
        Transform::IDENTITY,
        Geometry::Cuboid { width: 0.15 * s, height: 0.15 * s, depth: 0.05 * s },
        pal.skin,
    );
    for k in 0..CLAWS {
        let spread = k as f32 - 1.5;
        let finger = b.group(
            Some(hand),
            "finger",
            Transform::at(Vec3::new(spread * 0.08 * s, -0.05 * s, 0.0)).with_rotation(euler(0.0, 0.0, spread * -0.3)),
        );
        b.part(
            finger,
            "phalanx",
            Transform::at(Vec3::Y * -0.1 * s),
            Geometry::Cylinder { top: 0.015 * s, bottom: 0.012 * s, height: 0.2 * s, radial: 8 },
            pal.skin,
        );
        b.part(
            finger,
            "claw",
            Transform::at(Vec3::Y * -0.35 * s),
            Geometry::Cone { radius: 0.012 * s, height: 0.3 * s, radial: 8 },
            pal.teeth,
        );
    }

    LimbRig { root: limb, upper, lower, hand }
}

fn build_leg(b: &mut Builder<'_>, root: NodeId, dir: f32, s: f32, pal: &Palette) -> NodeId {
    let leg = b.group(Some(root), "leg", Transform::at(Vec3::new(dir * 0.25 * s, 1.8 * s, 0.0)));

    // Forward knee.
    let thigh = b.part(
        leg,
        "thigh",
        Transform::at(Vec3::Y * -0.5 * s).with_rotation(euler(-0.4, 0.0, dir * -0.15)),
        Geometry::Cylinder { top: 0.18 * s, bottom: 0.14 * s, height: 1.1 * s, radial: 8 },
        pal.skin,
    );
    b.part(
        thigh,
        "quad",
        Transform::at(Vec3::new(0.0, -0.4 * s, 0.05 * s)).with_scale(Vec3::new(1.0, 1.6, 1.0)),
        Geometry::Sphere { radius: 0.16 * s },
        pal.skin,
    );
    b.part(thigh, "knee", Transform::at(Vec3::Y * -0.55 * s), Geometry::Sphere { radius: 0.14 * s }, pal.skin);

    // Backward hock.
    let shin = b.part(
        thigh,
        "shin",
        Transform::at(Vec3::new(0.0, -0.6 * s, 0.2 * s)).with_rotation(euler(0.8, 0.0, 0.0)),
        Geometry::Cylinder { top: 0.13 * s, bottom: 0.09 * s, height: 1.2 * s, radial: 8 },
        pal.skin,
    );
    b.part(shin, "hock", Transform::at(Vec3::Y * -0.6 * s), Geometry::Sphere { radius: 0.11 * s }, pal.skin);

    let foot = b.part(
        shin,
        "foot",
        Transform::at(Vec3::new(0.0, -0.4 * s, -0.1 * s)).with_rotation(euler(-0.4, 0.0, 0.0)),
        Geometry::Cylinder { top: 0.1 * s, bottom: 0.08 * s, height: 0.9 * s, radial: 8 },
        pal.skin,
    );
    for t in 0..TOES {
        b.part(
            foot,
            "toe",
            Transform::at(Vec3::new((t as f32 - 1.0) * 0.15 * s, -0.45 * s, 0.1 * s)).with_rotation(euler(-0.5, 0.0, 0.0)),
            Geometry::Cone { radius: 0.04 * s, height: 0.3 * s, radial: 8 },
            pal.teeth,
        );
    }
    leg
}
