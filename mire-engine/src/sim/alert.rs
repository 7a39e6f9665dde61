// alert.rs - Idle-visitor integrator
//
// Rises slowly while the page sits still and drops quickly once the visitor
// scrolls again. Always within [0, 1].

use crate::config::AlertConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AlertFactor(f32);

impl AlertFactor {
    pub fn value(self) -> f32 {
        self.0
    }

    /// Advance one frame given this frame's scroll delta.
    pub fn step(&mut self, scroll_delta: f32, cfg: &AlertConfig) -> f32 {
        let next = if scroll_delta.abs() < cfg.idle_delta {
            self.0 + cfg.rise
        } else {
            self.0 - cfg.fall
        };
        self.0 = next.clamp(0.0, 1.0);
        self.0
    }

    pub fn engaged(self, cfg: &AlertConfig) -> bool {
        self.0 > cfg.engage
    }

    /// Frames of stillness needed to go from zero to full alert.
    pub fn frames_to_full(cfg: &AlertConfig) -> u32 {
        (1.0 / cfg.rise).ceil() as u32 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rises_while_idle_and_saturates() {
        let cfg = AlertConfig::default();
        let mut a = AlertFactor::default();
        let mut last = 0.0;
        for _ in 0..AlertFactor::frames_to_full(&cfg) {
            let v = a.step(0.0, &cfg);
            assert!(v >= last);
            last = v;
        }
        assert_eq!(a.value(), 1.0);
        a.step(0.0, &cfg);
        assert_eq!(a.value(), 1.0);
    }

    #[test]
    fn falls_faster_than_it_rises() {
        let cfg = AlertConfig::default();
        let mut a = AlertFactor(0.5);
        let before = a.value();
        a.step(0.01, &cfg);
        assert!(a.value() < before);
        assert!((before - a.value()) > cfg.rise);
    }

    #[test]
    fn never_negative() {
        let cfg = AlertConfig::default();
        let mut a = AlertFactor::default();
        for _ in 0..10 {
            a.step(-0.2, &cfg);
        }
        assert_eq!(a.value(), 0.0);
        assert!(!a.engaged(&cfg));
    }
}
