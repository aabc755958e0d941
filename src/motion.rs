//! Motion gate: decides whether the hand is in transit.

use std::collections::VecDeque;

use glam::Vec3;

use crate::config::MotionConfig;

/// Ring buffer of recent hand centers in scene units.
///
/// The moving flag is only recomputed once the window is full; until then it
/// keeps whatever it last said (initially stationary).
#[derive(Debug, Clone)]
pub struct MotionGate {
    window: usize,
    threshold: f32,
    history: VecDeque<Vec3>,
    moving: bool,
}

impl MotionGate {
    pub fn new(cfg: &MotionConfig) -> Self {
        Self {
            window: cfg.window,
            threshold: cfg.threshold,
            history: VecDeque::with_capacity(cfg.window + 1),
            moving: false,
        }
    }

    pub fn update(&mut self, center: Vec3) {
        self.history.push_back(center);
        while self.history.len() > self.window {
            self.history.pop_front();
        }

        if self.history.len() < self.window {
            return;
        }
        if let (Some(oldest), Some(newest)) = (self.history.front(), self.history.back()) {
            self.moving = oldest.distance(*newest) > self.threshold;
        }
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.moving = false;
    }
}

impl Default for MotionGate {
    fn default() -> Self {
        Self::new(&MotionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_centers_are_stationary() {
        let mut gate = MotionGate::default();
        for _ in 0..10 {
            gate.update(Vec3::ZERO);
        }
        assert_eq!(gate.len(), 10);
        assert!(!gate.is_moving());
    }

    #[test]
    fn linear_sweep_is_moving() {
        let mut gate = MotionGate::default();
        for i in 0..10 {
            gate.update(Vec3::new(i as f32 / 9.0, 0.0, 0.0));
        }
        assert!(gate.is_moving());
    }

    #[test]
    fn flag_holds_until_window_is_full() {
        let mut gate = MotionGate::default();
        gate.update(Vec3::ZERO);
        gate.update(Vec3::new(5.0, 0.0, 0.0));
        assert!(!gate.is_moving(), "not saturated yet");

        for _ in 0..8 {
            gate.update(Vec3::new(5.0, 0.0, 0.0));
        }
        assert!(gate.is_moving());

        gate.reset();
        assert!(gate.is_empty());
        assert!(!gate.is_moving());

        // saturate moving, then a partial refill keeps the old verdict
        for i in 0..10 {
            gate.update(Vec3::new(i as f32, 0.0, 0.0));
        }
        assert!(gate.is_moving());
        gate.update(Vec3::new(9.0, 0.0, 0.0));
        assert_eq!(gate.len(), 10);
        assert!(gate.is_moving(), "1..9 still spans 8 units");
    }

    #[test]
    fn settles_after_hand_stops() {
        let mut gate = MotionGate::default();
        for i in 0..10 {
            gate.update(Vec3::new(i as f32, 0.0, 0.0));
        }
        assert!(gate.is_moving());
        for _ in 0..10 {
            gate.update(Vec3::new(9.0, 0.2, 0.0));
        }
        assert!(!gate.is_moving());
    }

    #[test]
    fn threshold_is_strict() {
        let mut gate = MotionGate::default();
        for i in 0..10 {
            let x = if i == 9 { 0.5 } else { 0.0 };
            gate.update(Vec3::new(x, 0.0, 0.0));
        }
        assert!(!gate.is_moving());
    }
}
