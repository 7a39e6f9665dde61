// creature.rs - Per-frame creature poses
//
// Joint angles are pure functions of time and alert level; the only state
// carried between frames is each creature's head-tracking weight.

use std::f32::consts::{FRAC_PI_3, FRAC_PI_6};

use glam::{Quat, Vec3};

use crate::config::{AlertConfig, CreatureConfig};
use crate::scene::{CreatureRig, SceneGraph, Stance};
use crate::world::{euler, face_towards, lerp};

/// Oscillators shared by every creature in a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rhythm {
    /// Face opening in [0, 1].
    pub open: f32,
    pub breath: f32,
    pub reach: f32,
    pub hunt: f32,
    pub twitch: f32,
}

impl Rhythm {
    pub fn at(t: f32, cfg: &CreatureConfig) -> Self {
        Self {
            open: ((t * cfg.open_rate).sin() + 1.0) * 0.5,
            breath: (t * cfg.breath_rate).sin() * cfg.breath_amp,
            reach: (t * cfg.reach_rate).sin() * cfg.reach_amp,
            hunt: (t * cfg.hunt_rate).cos() * cfg.hunt_amp,
            twitch: (t * cfg.twitch_rate).sin() * cfg.twitch_amp,
        }
    }

    /// Petal flap angle, between π/6 (closed) and π/2 (open).
    pub fn petal_angle(&self) -> f32 {
        FRAC_PI_6 + self.open * FRAC_PI_3
    }

    pub fn chest_scale(&self) -> Vec3 {
        Vec3::splat(1.0 + self.breath)
    }
}

/// Euler angles (x, y, z) for an arm's upper and lower joints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmPose {
    pub upper: Vec3,
    pub lower: Vec3,
}

/// `side` is -1 for the left arm, +1 for the right; signs mirror so the
/// pair moves symmetrically.
pub fn arm_pose(stance: Stance, r: &Rhythm, side: f32) -> ArmPose {
    // Elbow keeps the outward bend it was built with.
    let elbow_z = side * 0.2;
    match stance {
        Stance::Stalking => ArmPose {
            upper: Vec3::new(-side * r.hunt, 0.0, side * (0.4 - r.reach - r.twitch)),
            // Bent up, ready to strike; the right arm sits a little lower.
            lower: Vec3::new(-1.1 + side * 0.1 - side * r.reach, 0.0, elbow_z),
        },
        Stance::Threat => ArmPose {
            upper: Vec3::new(0.0, 0.0, side * (0.8 - r.hunt)),
            lower: Vec3::new(-0.5 + r.twitch, 0.0, elbow_z),
        },
    }
}

/// Slow predatory head scan used while the visitor keeps moving.
pub fn idle_head(stance: Stance, t: f32) -> Quat {
    match stance {
        Stance::Stalking => euler((t * 0.2).sin() * 0.2 + 0.1, (t * 0.4).sin() * 0.4, 0.0),
        Stance::Threat => euler(0.0, -0.2 + (t * 0.3).sin() * 0.3, (t * 0.8).sin() * 0.1),
    }
}

/// Forward lean about x at a given alert level.
pub fn lean(alert: f32, cfg: &AlertConfig) -> f32 {
    lerp(cfg.idle_lean, cfg.alert_lean, alert)
}

/// Depth gained toward the camera at a given alert level.
pub fn creep(alert: f32, cfg: &AlertConfig) -> f32 {
    lerp(0.0, cfg.creep, alert)
}

/// Signed z offset that moves a creature at `base_z` toward a camera at
/// `camera_z`. Stops `standoff` short of the camera's depth and never crosses it.
pub fn creep_toward(alert: f32, base_z: f32, camera_z: f32, cfg: &AlertConfig) -> f32 {
    let gap = camera_z - base_z;
    let room = (gap.abs() - cfg.standoff).max(0.0);
    gap.signum() * creep(alert, cfg).min(room)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Tracking {
    /// Blend from idle scan (0) to facing the camera (1).
    pub weight: f32,
}

impl Tracking {
    /// Close a fraction of the gap toward the alert level while engaged,
    /// toward zero otherwise. Never jumps.
    pub fn step(&mut self, alert: f32, cfg: &AlertConfig) -> f32 {
        let target = if alert > cfg.engage { alert } else { 0.0 };
        self.weight += (target - self.weight) * cfg.head_blend;
        self.weight
    }
}

/// Write one frame of pose into a creature's joints.
pub fn pose(
    graph: &mut SceneGraph,
    rig: &CreatureRig,
    tracking: &mut Tracking,
    r: &Rhythm,
    t: f32,
    alert: f32,
    camera: Vec3,
    cfg: &AlertConfig,
) {
    let angle = r.petal_angle();
    for &petal in &rig.petals {
        graph.local_mut(petal).rotation = Quat::from_rotation_x(angle);
    }
    graph.local_mut(rig.chest).scale = r.chest_scale();

    for (limb, side) in [(&rig.left_arm, -1.0), (&rig.right_arm, 1.0)] {
        let p = arm_pose(rig.stance, r, side);
        graph.local_mut(limb.upper).rotation = euler(p.upper.x, p.upper.y, p.upper.z);
        graph.local_mut(limb.lower).rotation = euler(p.lower.x, p.lower.y, p.lower.z);
    }

    // Body first, so the head sees this frame's root when aiming.
    let root = graph.local_mut(rig.root);
    root.position = rig.base.position + Vec3::Z * creep_toward(alert, rig.base.position.z, camera.z, cfg);
    root.rotation = rig.base.rotation * Quat::from_rotation_x(lean(alert, cfg));

    let idle = idle_head(rig.stance, t);
    let weight = tracking.step(alert, cfg);
    let head = if weight > f32::EPSILON {
        let parent = graph.world_rotation(rig.root);
        let from = Vec3::from(graph.world(rig.head).translation);
        let local_dir = parent.inverse() * (camera - from);
        idle.slerp(face_towards(local_dir, Vec3::Y), weight)
    } else {
        idle
    };
    graph.local_mut(rig.head).rotation = head;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn petals_swing_between_bounds() {
        let cfg = CreatureConfig::default();
        for i in 0..500 {
            let a = Rhythm::at(i as f32 * 0.02, &cfg).petal_angle();
            assert!(a >= FRAC_PI_6 - 1e-6 && a <= FRAC_PI_6 + FRAC_PI_3 + 1e-6);
        }
    }

    #[test]
    fn arms_mirror_left_and_right() {
        let r = Rhythm::at(1.7, &CreatureConfig::default());
        for stance in [Stance::Stalking, Stance::Threat] {
            let l = arm_pose(stance, &r, -1.0);
            let rr = arm_pose(stance, &r, 1.0);
            assert!((l.upper.z + rr.upper.z).abs() < 1e-6);
            assert!((l.upper.x + rr.upper.x).abs() < 1e-6);
            assert_eq!(l.lower.z, -rr.lower.z);
        }
    }

    #[test]
    fn stalking_left_arm_matches_the_tuned_curve() {
        let r = Rhythm { open: 0.0, breath: 0.0, reach: 0.1, hunt: 0.05, twitch: 0.01 };
        let l = arm_pose(Stance::Stalking, &r, -1.0);
        assert!((l.upper.z - (-0.4 + 0.1 + 0.01)).abs() < 1e-6);
        assert!((l.upper.x - 0.05).abs() < 1e-6);
        assert!((l.lower.x - (-1.2 + 0.1)).abs() < 1e-6);
        let rr = arm_pose(Stance::Stalking, &r, 1.0);
        assert!((rr.lower.x - (-1.0 - 0.1)).abs() < 1e-6);
    }

    #[test]
    fn lean_and_creep_follow_alert() {
        let cfg = AlertConfig::default();
        assert_eq!(lean(0.0, &cfg), cfg.idle_lean);
        assert_eq!(lean(1.0, &cfg), cfg.alert_lean);
        assert_eq!(creep(0.0, &cfg), 0.0);
        assert_eq!(creep(1.0, &cfg), cfg.creep);
        assert!(creep(0.5, &cfg) < creep(0.6, &cfg));
    }

    #[test]
    fn creep_heads_for_the_camera_from_either_side() {
        let cfg = AlertConfig::default();
        // Camera in front of the creature.
        assert_eq!(creep_toward(1.0, -15.0, 5.0, &cfg), cfg.creep);
        // Camera already past it.
        assert_eq!(creep_toward(1.0, -15.0, -42.5, &cfg), -cfg.creep);
        assert_eq!(creep_toward(0.0, -15.0, -42.5, &cfg), 0.0);
        assert!(creep_toward(0.5, -50.0, 5.0, &cfg) > 0.0);
    }

    #[test]
    fn creep_stops_short_of_the_camera_depth() {
        let cfg = AlertConfig::default();
        for camera_z in [-20.0, -17.0, -15.0, -13.0, -10.0] {
            for alert in [0.25, 0.5, 1.0] {
                let z = -15.0 + creep_toward(alert, -15.0, camera_z, &cfg);
                let before = (camera_z + 15.0_f32).abs();
                let after = (camera_z - z).abs();
                assert!(after <= before + 1e-6);
                assert!(after >= cfg.standoff.min(before) - 1e-6, "{camera_z} {alert}");
                assert!((camera_z - z) * (camera_z + 15.0) >= 0.0);
            }
        }
        assert_eq!(creep_toward(1.0, -15.0, -17.0, &cfg), 0.0);
        assert_eq!(creep_toward(1.0, -15.0, -20.0, &cfg), -2.0);
    }

    #[test]
    fn tracking_blends_in_and_relaxes_without_jumps() {
        let cfg = AlertConfig::default();
        let mut tr = Tracking::default();
        assert_eq!(tr.step(0.005, &cfg), 0.0);

        let mut last = 0.0;
        for _ in 0..100 {
            let w = tr.step(1.0, &cfg);
            assert!(w > last && w - last <= cfg.head_blend + 1e-6);
            last = w;
        }
        assert!(last > 0.99);

        let w = tr.step(0.0, &cfg);
        assert!(w < last && last - w <= cfg.head_blend + 1e-6);
    }
}
