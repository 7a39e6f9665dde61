// sim/ - Per-frame scene animation
//
// Everything the animator owns lives here, mutated only from `update`.
// Per-object state sits in flat tables next to the rig handles built by
// scene/. Each frame costs O(pool sizes + joints).

mod alert;
mod audio;
mod creature;
mod drift;
mod flock;
mod light;

pub use alert::AlertFactor;
pub use audio::{AmbienceLatch, AudioCommand, CuePool};
pub use creature::{ArmPose, Rhythm, Tracking, arm_pose, creep, creep_toward, idle_head, lean};
pub use drift::DriftPool;
pub use flock::{Flock, Orbit};
pub use light::{LightLevels, Storm, heartbeat};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::SceneConfig;
use crate::error::MireResult;
use crate::scene::Scene;
use crate::world::CameraPose;

pub struct Animator {
    cfg: SceneConfig,
    scene: Scene,

    // Entities
    mist: DriftPool,
    clouds: DriftPool,
    flock: Flock,
    tracking: Vec<Tracking>,

    // Behaviour
    alert: AlertFactor,
    storm: Storm,
    cues: CuePool,
    last_progress: f32,
    lights: LightLevels,

    // Output
    audio: Vec<AudioCommand>,

    rng: ChaCha8Rng,
}

impl Animator {
    /// Build the scene once. `progress` is the scroll position at mount.
    pub fn new(cfg: SceneConfig, seed: u64, progress: f32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut scene = Scene::build(&cfg, &mut rng);
        let mist = DriftPool::new(&cfg.mist, &mut rng);
        let clouds = DriftPool::new(&cfg.clouds, &mut rng);
        let flock = Flock::new(std::mem::take(&mut scene.bats), &cfg.flock, &mut rng);
        let tracking = vec![Tracking::default(); scene.creatures.len()];
        let lights = LightLevels {
            pulse: scene.lights.pulse.intensity,
            pulse_x: scene.lights.pulse.position.x,
            flash: scene.lights.flash.intensity,
        };

        Self {
            cues: CuePool::new(cfg.audio.growl_voices),
            cfg,
            scene,
            mist,
            clouds,
            flock,
            tracking,
            alert: AlertFactor::default(),
            storm: Storm::default(),
            last_progress: progress,
            lights,
            audio: Vec::new(),
            rng,
        }
    }

    pub fn update(&mut self, t: f32, progress: f32, camera: &CameraPose) {
        let delta = progress - self.last_progress;
        self.last_progress = progress;
        let alert = self.alert.step(delta, &self.cfg.alert);

        // 1. Lights
        let lc = &self.cfg.light;
        self.lights.pulse = heartbeat(t, lc) + light::flicker(&mut self.rng, lc);
        self.lights.pulse_x = t.sin() * lc.wobble;
        self.lights.flash = self.storm.step(&mut self.rng, lc);

        // 2. Fog and clouds
        let cz = camera.position.z;
        self.mist.update(t, cz, &mut self.rng);
        self.clouds.update(t, cz, &mut self.rng);

        // 3. Creatures
        let rhythm = Rhythm::at(t, &self.cfg.creature);
        for (rig, tracking) in self.scene.creatures.iter().zip(self.tracking.iter_mut()) {
            creature::pose(
                &mut self.scene.graph,
                rig,
                tracking,
                &rhythm,
                t,
                alert,
                camera.position,
                &self.cfg.alert,
            );
        }

        // 4. Bats
        self.flock.update(&mut self.scene.graph, t, cz, &self.cfg.flock);

        // 5. Growls, with a visible jolt on the pulse light
        if self.rng.r#gen::<f32>() < self.cfg.audio.growl_chance {
            if let Some(cmd) = self.cues.try_play(&mut self.rng, &self.cfg.audio) {
                tracing::trace!(?cmd, "growl");
                self.lights.pulse = self.cfg.light.growl_spike;
                self.audio.push(cmd);
            }
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &SceneConfig {
        &self.cfg
    }

    pub fn alert(&self) -> f32 {
        self.alert.value()
    }

    pub fn tracking(&self) -> &[Tracking] {
        &self.tracking
    }

    pub fn lights(&self) -> LightLevels {
        self.lights
    }

    pub fn layers(&self) -> [&DriftPool; 2] {
        [&self.mist, &self.clouds]
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn cues(&self) -> &CuePool {
        &self.cues
    }

    pub fn push_audio(&mut self, cmd: AudioCommand) {
        self.audio.push(cmd);
    }

    pub fn drain_audio(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.audio)
    }

    pub fn cue_finished(&mut self, index: usize) {
        self.cues.finish(index);
    }

    pub fn silence(&mut self) {
        self.cues.silence();
    }

    pub fn describe(&self) -> MireResult<String> {
        self.scene.describe(&[
            (self.scene.mist_material, self.mist.len()),
            (self.scene.cloud_material, self.clouds.len()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AudioConfig;
    use crate::scene::PLACEMENTS;

    fn animator(cfg: SceneConfig) -> Animator {
        Animator::new(cfg, 42, 0.0)
    }

    #[test]
    fn starts_calm_at_initial_poses() {
        let a = animator(SceneConfig::default());
        assert_eq!(a.alert(), 0.0);
        for (rig, place) in a.scene().creatures.iter().zip(PLACEMENTS.iter()) {
            assert_eq!(a.scene().graph.local(rig.root).position, place.position);
        }
        assert_eq!(a.layers()[0].len() + a.layers()[1].len(), 130);
    }

    #[test]
    fn scrolling_resets_alert() {
        let mut a = animator(SceneConfig::default());
        let cam = CameraPose::at(0.0, &a.config().camera);
        for f in 0..50 {
            a.update(f as f32 / 60.0, 0.0, &cam);
        }
        let idle = a.alert();
        assert!(idle > 0.2);
        a.update(1.0, 0.1, &cam);
        assert!(a.alert() < idle);
    }

    #[test]
    fn growl_spikes_the_pulse_light() {
        let cfg = SceneConfig {
            audio: AudioConfig { growl_chance: 1.0, ..AudioConfig::default() },
            ..SceneConfig::default()
        };
        let mut a = animator(cfg);
        let cam = CameraPose::at(0.0, &a.config().camera);
        a.update(0.5, 0.0, &cam);
        assert_eq!(a.lights().pulse, a.config().light.growl_spike);
        assert!(matches!(a.drain_audio().as_slice(), [AudioCommand::PlayCue { .. }]));

        // The pool is busy, so the next frame stays quiet.
        a.update(0.6, 0.0, &cam);
        assert!(a.drain_audio().is_empty());
        assert_eq!(a.cues().playing(), 1);
    }

    #[test]
    fn bats_trail_the_camera() {
        let mut a = animator(SceneConfig::default());
        let cam = CameraPose::at(0.5, &a.config().camera);
        a.update(2.0, 0.5, &cam);
        let cfg = &a.config().flock;
        for (i, rig) in a.flock().rigs().iter().enumerate() {
            let z = a.scene().graph.local(rig.root).position.z;
            let anchor = cam.position.z - cfg.trail - i as f32 * cfg.spacing;
            assert!((z - anchor).abs() <= 5.0 + 1e-4);
        }
    }

    #[test]
    fn idle_creatures_close_in_on_the_camera() {
        let mut a = Animator::new(SceneConfig::default(), 1, 0.5);
        let cam = CameraPose::at(0.5, &a.config().camera);
        let distances = |a: &Animator| -> Vec<f32> {
            let scene = a.scene();
            scene.creatures.iter().map(|rig| scene.origin(rig.root).distance(cam.position)).collect()
        };
        let before = distances(&a);
        for f in 0..400 {
            a.update(f as f32 / 60.0, 0.0, &cam);
        }
        assert_eq!(a.alert(), 1.0);
        let after = distances(&a);
        let creatures = a.scene().creatures.iter().zip(PLACEMENTS.iter());
        for ((rig, place), (d0, d1)) in creatures.zip(before.iter().zip(&after)) {
            assert!(d1 < d0, "creature at z {} moved from {d0} to {d1}", place.position.z);
            let z = a.scene().origin(rig.root).z;
            // Still on the same side of the camera.
            assert!((cam.position.z - z) * (cam.position.z - place.position.z) > 0.0);
        }
    }

    #[test]
    fn same_seed_same_frames() {
        let cfg = SceneConfig::default();
        let mut a = Animator::new(cfg.clone(), 7, 0.0);
        let mut b = Animator::new(cfg, 7, 0.0);
        let cam = CameraPose::at(0.2, &a.config().camera);
        for f in 0..120 {
            let t = f as f32 / 60.0;
            a.update(t, 0.2, &cam);
            b.update(t, 0.2, &cam);
        }
        assert_eq!(a.layers()[0].z, b.layers()[0].z);
        assert_eq!(a.lights(), b.lights());
    }
}
