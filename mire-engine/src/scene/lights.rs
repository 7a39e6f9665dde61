// lights.rs - Lighting rig and atmosphere

use glam::Vec3;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    Ambient,
    Directional,
    Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Light {
    pub kind: LightKind,
    pub color: u32,
    pub intensity: f32,
    pub position: Vec3,
    /// Falloff distance for point lights; zero means unlimited.
    pub range: f32,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct LightRig {
    pub ambient: Light,
    pub moon: Light,
    /// Red heartbeat light over the path.
    pub pulse: Light,
    /// Hidden emitter, dark until thunder.
    pub flash: Light,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: Light {
                kind: LightKind::Ambient,
                color: 0x4a5a6a,
                intensity: 2.5,
                position: Vec3::ZERO,
                range: 0.0,
            },
            moon: Light {
                kind: LightKind::Directional,
                color: 0x8899ff,
                intensity: 1.5,
                position: Vec3::new(10.0, 20.0, 10.0),
                range: 0.0,
            },
            pulse: Light {
                kind: LightKind::Point,
                color: 0xff0033,
                intensity: 2.0,
                position: Vec3::new(0.0, 15.0, -10.0),
                range: 100.0,
            },
            flash: Light {
                kind: LightKind::Point,
                color: 0xccd6ff,
                intensity: 0.0,
                position: Vec3::new(0.0, 30.0, -40.0),
                range: 200.0,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Atmosphere {
    pub background: u32,
    pub fog_color: u32,
    /// Exponential fog density.
    pub fog_density: f32,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            background: 0x0a0a12,
            fog_color: 0x0a0a12,
            fog_density: 0.012,
        }
    }
}
