// audio.rs - Ambience latch and growl voices
//
// Playback belongs to the host. The engine decides what should play and
// queues commands; the host reports when a one-shot has ended.

use rand::Rng;
use serde::Serialize;

use crate::config::AudioConfig;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum AudioCommand {
    StartAmbience,
    StopAmbience,
    PlayCue { index: usize, rate: f32 },
}

/// Fires once, on the first interaction after it is armed.
#[derive(Clone, Copy, Debug, Default)]
pub struct AmbienceLatch {
    armed: bool,
}

impl AmbienceLatch {
    pub fn armed() -> Self {
        Self { armed: true }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn fire(&mut self) -> Option<AudioCommand> {
        std::mem::take(&mut self.armed).then_some(AudioCommand::StartAmbience)
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

/// One-shot voices; at most one of the pool plays at a time.
#[derive(Clone, Debug)]
pub struct CuePool {
    playing: Vec<bool>,
}

impl CuePool {
    pub fn new(voices: usize) -> Self {
        Self { playing: vec![false; voices] }
    }

    pub fn is_busy(&self) -> bool {
        self.playing.iter().any(|&p| p)
    }

    pub fn playing(&self) -> usize {
        self.playing.iter().filter(|&&p| p).count()
    }

    pub fn try_play<R: Rng>(&mut self, rng: &mut R, cfg: &AudioConfig) -> Option<AudioCommand> {
        if self.playing.is_empty() || self.is_busy() {
            return None;
        }
        let index = rng.gen_range(0..self.playing.len());
        let rate = cfg.min_rate + rng.r#gen::<f32>() * (cfg.max_rate - cfg.min_rate);
        self.playing[index] = true;
        Some(AudioCommand::PlayCue { index, rate })
    }

    pub fn finish(&mut self, index: usize) {
        if let Some(p) = self.playing.get_mut(index) {
            *p = false;
        }
    }

    pub fn silence(&mut self) {
        self.playing.fill(false);
    }
}
