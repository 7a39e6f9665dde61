// flock.rs - Bats orbiting ahead of the camera

use glam::{Quat, Vec3};
use rand::Rng;

use crate::config::FlockConfig;
use crate::scene::{BatRig, SceneGraph};
use crate::world::face_towards;

/// Per-bat orbit parameters, one row per rig.
#[derive(Clone, Copy, Debug)]
pub struct Orbit {
    pub speed: f32,
    pub phase: f32,
    pub radius: f32,
}

impl Orbit {
    /// Loop parameter at time `t`.
    pub fn param(&self, t: f32) -> f32 {
        t * self.speed * 0.2 + self.phase
    }

    /// Point on a Lissajous-like loop around the trailing anchor.
    pub fn point(&self, u: f32, anchor_z: f32) -> Vec3 {
        let r = self.radius;
        Vec3::new(u.sin() * r, (u * 1.5).cos() * r * 0.6 + 2.0, anchor_z + (u * 2.0).sin() * 5.0)
    }
}

pub struct Flock {
    rigs: Vec<BatRig>,
    orbits: Vec<Orbit>,
}

impl Flock {
    pub fn new<R: Rng>(rigs: Vec<BatRig>, cfg: &FlockConfig, rng: &mut R) -> Self {
        let orbits = rigs
            .iter()
            .map(|_| Orbit {
                speed: cfg.min_speed + rng.r#gen::<f32>() * (cfg.max_speed - cfg.min_speed),
                phase: rng.r#gen::<f32>() * std::f32::consts::TAU,
                radius: cfg.min_radius + rng.r#gen::<f32>() * (cfg.max_radius - cfg.min_radius),
            })
            .collect();
        Self { rigs, orbits }
    }

    pub fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    pub fn rigs(&self) -> &[BatRig] {
        &self.rigs
    }

    /// Wing angle for the right wing; the left mirrors it.
    pub fn flap(t: f32, cfg: &FlockConfig) -> f32 {
        -((t * cfg.flap_rate).sin() * cfg.flap_amp + cfg.flap_bias)
    }

    pub fn update(&self, graph: &mut SceneGraph, t: f32, camera_z: f32, cfg: &FlockConfig) {
        let right = Flock::flap(t, cfg);
        let left_rot = Quat::from_rotation_z(-right);
        let right_rot = Quat::from_rotation_z(right);

        for (i, (rig, orbit)) in self.rigs.iter().zip(&self.orbits).enumerate() {
            graph.local_mut(rig.left_wing).rotation = left_rot;
            graph.local_mut(rig.right_wing).rotation = right_rot;

            let u = orbit.param(t);
            let anchor = camera_z - cfg.trail - i as f32 * cfg.spacing;
            let here = orbit.point(u, anchor);
            // Aim one step further along the same loop.
            let ahead = orbit.point(u + cfg.lead, anchor);

            let root = graph.local_mut(rig.root);
            root.position = here;
            root.rotation = face_towards(ahead - here, Vec3::Y);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::scene::Transform;

    #[test]
    fn orbit_anchor_trails_the_camera() {
        let orbit = Orbit { speed: 1.0, phase: 0.0, radius: 4.0 };
        let p = orbit.point(0.0, -20.0);
        assert_eq!(p, Vec3::new(0.0, 4.0 * 0.6 + 2.0, -20.0));
    }

    #[test]
    fn bats_face_along_their_orbit() {
        let cfg = FlockConfig::default();
        let mut graph = SceneGraph::new();
        let rigs = (0..3)
            .map(|_| {
                let root = graph.group(None, "bat", Transform::IDENTITY);
                BatRig {
                    root,
                    left_wing: graph.group(Some(root), "bat_wing_l", Transform::IDENTITY),
                    right_wing: graph.group(Some(root), "bat_wing_r", Transform::IDENTITY),
                }
            })
            .collect();
        let flock = Flock::new(rigs, &cfg, &mut ChaCha8Rng::seed_from_u64(9));

        let (t, camera_z) = (3.7, -20.0);
        flock.update(&mut graph, t, camera_z, &cfg);

        for (i, (rig, orbit)) in flock.rigs().iter().zip(flock.orbits()).enumerate() {
            let u = orbit.param(t);
            let anchor = camera_z - cfg.trail - i as f32 * cfg.spacing;
            let here = orbit.point(u, anchor);
            let heading = (orbit.point(u + cfg.lead, anchor) - here).normalize();

            let local = graph.local(rig.root);
            assert!(local.position.abs_diff_eq(here, 1e-5));
            let facing = local.rotation * Vec3::Z;
            assert!(facing.dot(heading) > 0.9999, "{facing:?} vs {heading:?}");
        }
    }

    #[test]
    fn flap_stays_on_one_side_of_the_bias() {
        let cfg = FlockConfig::default();
        for i in 0..100 {
            let a = Flock::flap(i as f32 * 0.013, &cfg);
            assert!(a <= cfg.flap_amp - cfg.flap_bias + 1e-6);
            assert!(a >= -(cfg.flap_amp + cfg.flap_bias) - 1e-6);
        }
    }
}
