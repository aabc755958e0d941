//! Fingertip trail: a short, time-windowed polyline in scene units.

use std::collections::VecDeque;

use glam::Vec3;
use serde::Serialize;

use crate::config::TrailConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailPoint {
    pub position: Vec3,
    pub timestamp_ms: u64,
}

#[derive(Debug, Clone)]
pub struct TrailRecorder {
    cfg: TrailConfig,
    points: VecDeque<TrailPoint>,
    last_position: Option<Vec3>,
}

impl TrailRecorder {
    pub fn new(cfg: TrailConfig) -> Self {
        Self {
            points: VecDeque::with_capacity(cfg.max_points + 1),
            cfg,
            last_position: None,
        }
    }

    /// Append `position` if it moved far enough from the last recorded point,
    /// then prune by length and by age. Returns whether a point was added.
    pub fn record(&mut self, position: Vec3, now_ms: u64) -> bool {
        if let Some(last) = self.last_position {
            if position.distance(last) <= self.cfg.min_spacing {
                return false;
            }
        }

        self.points.push_back(TrailPoint {
            position,
            timestamp_ms: now_ms,
        });
        self.last_position = Some(position);

        while self.points.len() > self.cfg.max_points {
            self.points.pop_front();
        }
        let max_age = self.cfg.max_age_ms;
        self.points
            .retain(|p| now_ms.saturating_sub(p.timestamp_ms) < max_age);
        true
    }

    pub fn snapshot(&self) -> Vec<TrailPoint> {
        self.points.iter().copied().collect()
    }

    pub fn points(&self) -> &VecDeque<TrailPoint> {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.last_position = None;
    }
}

impl Default for TrailRecorder {
    fn default() -> Self {
        Self::new(TrailConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(i: usize) -> Vec3 {
        Vec3::new(i as f32 * 0.1, 0.0, 0.0)
    }

    #[test]
    fn spacing_gate_drops_jitter() {
        let mut t = TrailRecorder::default();
        assert!(t.record(Vec3::ZERO, 0));
        assert!(!t.record(Vec3::new(0.01, 0.0, 0.0), 16));
        assert!(!t.record(Vec3::new(0.02, 0.0, 0.0), 32));
        assert!(t.record(Vec3::new(0.03, 0.0, 0.0), 48));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn spacing_is_measured_from_last_recorded_point() {
        let mut t = TrailRecorder::default();
        t.record(Vec3::ZERO, 0);
        // creeping in 0.015 steps never passes the gate relative to the
        // previous sample, but does relative to the last recorded one
        t.record(Vec3::new(0.015, 0.0, 0.0), 1);
        t.record(Vec3::new(0.03, 0.0, 0.0), 2);
        assert_eq!(t.len(), 2);
        let pts = t.snapshot();
        for w in pts.windows(2) {
            assert!(w[0].position.distance(w[1].position) >= 0.02);
        }
    }

    #[test]
    fn length_is_capped() {
        let mut t = TrailRecorder::default();
        for i in 0..100 {
            t.record(step(i), i as u64);
            assert!(t.len() <= 30);
        }
        assert_eq!(t.len(), 30);
        assert_eq!(t.snapshot()[0].position, step(70));
    }

    #[test]
    fn old_points_expire_on_append() {
        let mut t = TrailRecorder::default();
        t.record(step(0), 0);
        t.record(step(1), 1000);
        t.record(step(2), 2999);
        assert_eq!(t.len(), 3);

        t.record(step(3), 3000);
        let pts = t.snapshot();
        assert_eq!(pts.len(), 3);
        assert!(pts.iter().all(|p| 3000 - p.timestamp_ms < 3000));

        t.record(step(4), 10_000);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn clear_resets_spacing_reference() {
        let mut t = TrailRecorder::default();
        t.record(Vec3::ZERO, 0);
        t.clear();
        assert!(t.is_empty());
        assert!(t.record(Vec3::new(0.001, 0.0, 0.0), 1));
    }

    #[test]
    fn snapshot_is_detached() {
        let mut t = TrailRecorder::default();
        t.record(step(0), 0);
        let snap = t.snapshot();
        t.record(step(1), 1);
        assert_eq!(snap.len(), 1);
        assert_eq!(t.len(), 2);
    }
}
