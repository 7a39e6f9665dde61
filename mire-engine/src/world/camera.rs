// camera.rs - Scroll-driven camera pose
//
// Depth is affine in scroll progress; lateral and vertical drift are small
// sinusoids. The target always sits a fixed distance further down the path.

use glam::Vec3;

use crate::config::CameraConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn at(progress: f32, cfg: &CameraConfig) -> Self {
        let p = progress.clamp(0.0, 1.0);
        let z = cfg.start_z - p * cfg.travel;
        let x = (p * cfg.drift_x_freq).sin() * cfg.drift_x_amp;
        let y = (p * cfg.drift_y_freq).cos() * cfg.drift_y_amp;
        Self {
            position: Vec3::new(x, y, z),
            target: Vec3::new(0.0, 0.0, z - cfg.look_ahead),
        }
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}

/// Perspective parameters; aspect follows the surface size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(cfg: &CameraConfig, width: u32, height: u32) -> Self {
        let mut proj = Self {
            fov_deg: cfg.fov_deg,
            aspect: 1.0,
            near: cfg.near,
            far: cfg.far,
        };
        proj.resize(width, height);
        proj
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}
