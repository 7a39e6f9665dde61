// drift.rs - Recycled fog and cloud sprites
//
// Structure-of-Arrays layout, fixed size. Sprites drift toward the camera
// and are thrown back ahead of it once they pass, so the fog never ends and
// never grows.

use rand::Rng;

use crate::config::DriftConfig;

pub struct DriftPool {
    // Position
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,

    // Motion
    pub speed: Vec<f32>,
    pub sway_speed: Vec<f32>,
    pub sway_phase: Vec<f32>,
    pub spin: Vec<f32>,

    // Appearance
    pub scale: Vec<f32>,
    pub rotation: Vec<f32>,

    cfg: DriftConfig,
}

impl DriftPool {
    pub fn new<R: Rng>(cfg: &DriftConfig, rng: &mut R) -> Self {
        let n = cfg.count;
        let mut pool = Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            z: Vec::with_capacity(n),
            speed: Vec::with_capacity(n),
            sway_speed: Vec::with_capacity(n),
            sway_phase: Vec::with_capacity(n),
            spin: Vec::with_capacity(n),
            scale: Vec::with_capacity(n),
            rotation: Vec::with_capacity(n),
            cfg: cfg.clone(),
        };
        for _ in 0..n {
            pool.x.push(centered(rng) * cfg.spread_x);
            // Mostly low, some higher.
            pool.y.push(centered(rng) * cfg.spread_y + cfg.center_y);
            pool.z.push(centered(rng) * cfg.spread_z + cfg.center_z);
            pool.speed.push(cfg.min_speed + rng.r#gen::<f32>() * (cfg.max_speed - cfg.min_speed));
            pool.sway_speed.push(0.1 + rng.r#gen::<f32>() * 0.2);
            pool.sway_phase.push(rng.r#gen::<f32>() * std::f32::consts::TAU);
            pool.spin.push(centered(rng) * 2.0 * cfg.spin);
            pool.scale.push(cfg.min_scale + rng.r#gen::<f32>() * (cfg.max_scale - cfg.min_scale));
            pool.rotation.push(rng.r#gen::<f32>() * std::f32::consts::TAU);
        }
        pool
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Recycle threshold for the given camera depth.
    pub fn limit(&self, camera_z: f32) -> f32 {
        camera_z + self.cfg.margin
    }

    /// Advance every sprite; returns how many were recycled.
    pub fn update<R: Rng>(&mut self, t: f32, camera_z: f32, rng: &mut R) -> usize {
        let limit = self.limit(camera_z);
        let far = camera_z - self.cfg.respawn_depth;
        let mut recycled = 0;

        for i in 0..self.len() {
            self.z[i] += self.speed[i];
            self.x[i] += (t * self.sway_speed[i] + self.sway_phase[i]).sin() * self.cfg.sway;
            self.rotation[i] += self.spin[i];

            if self.z[i] > limit {
                self.z[i] = far;
                self.x[i] = centered(rng) * self.cfg.spread_x;
                recycled += 1;
            }
        }
        recycled
    }
}

#[inline]
fn centered<R: Rng>(rng: &mut R) -> f32 {
    rng.r#gen::<f32>() - 0.5
}
