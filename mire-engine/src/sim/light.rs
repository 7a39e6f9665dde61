// light.rs - Pulse light and thunder flashes

use rand::Rng;

use crate::config::LightConfig;

/// Light values submitted with each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LightLevels {
    pub pulse: f32,
    pub pulse_x: f32,
    pub flash: f32,
}

/// exp(sin) peaks sharply and flattens out in the trough.
pub fn heartbeat(t: f32, cfg: &LightConfig) -> f32 {
    ((t * cfg.heartbeat_rate).sin().exp() - 0.367) * cfg.heartbeat_gain + 1.0
}

pub fn flicker<R: Rng>(rng: &mut R, cfg: &LightConfig) -> f32 {
    if rng.r#gen::<f32>() < cfg.flicker_chance {
        rng.r#gen::<f32>() * cfg.flicker_max
    } else {
        0.0
    }
}

/// Thunder countdown. While non-zero the hidden emitter is saturated.
#[derive(Clone, Copy, Debug, Default)]
pub struct Storm {
    countdown: u32,
}

impl Storm {
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn step<R: Rng>(&mut self, rng: &mut R, cfg: &LightConfig) -> f32 {
        if self.countdown == 0 && rng.r#gen::<f32>() < cfg.thunder_chance {
            let max = cfg.thunder_max_frames.max(cfg.thunder_min_frames);
            self.countdown = rng.gen_range(cfg.thunder_min_frames..=max).max(1);
            tracing::trace!(frames = self.countdown, "thunder");
        }
        if self.countdown > 0 {
            self.countdown -= 1;
            cfg.thunder_intensity
        } else {
            0.0
        }
    }
}
