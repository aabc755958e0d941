//! Arc-length parameterization of the fingertip trail.

use glam::Vec3;

use super::particle::TrailSlot;
use crate::trail::TrailPoint;
use crate::tween::Easing;

/// Trail polyline with cumulative segment lengths.
#[derive(Debug, Clone)]
pub struct ArcPath {
    points: Vec<Vec3>,
    /// `cumulative[k]` is the arc length from the first point to point `k`.
    cumulative: Vec<f32>,
}

impl ArcPath {
    /// Needs at least two points to have a segment.
    pub fn new(trail: &[TrailPoint]) -> Option<Self> {
        if trail.len() < 2 {
            return None;
        }
        let points: Vec<Vec3> = trail.iter().map(|p| p.position).collect();
        let mut cumulative = Vec::with_capacity(points.len());
        let mut acc = 0.0;
        cumulative.push(acc);
        for w in points.windows(2) {
            acc += w[0].distance(w[1]);
            cumulative.push(acc);
        }
        Some(Self { points, cumulative })
    }

    pub fn total_length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// First segment whose far end reaches `distance`.
    pub fn locate(&self, distance: f32) -> TrailSlot {
        let last = self.segment_count() - 1;
        let segment = (0..=last)
            .find(|&j| self.cumulative[j + 1] >= distance)
            .unwrap_or(last);
        TrailSlot { segment, distance }
    }

    pub fn point_at(&self, slot: TrailSlot) -> Vec3 {
        let j = slot.segment.min(self.segment_count() - 1);
        let (a, b) = (self.points[j], self.points[j + 1]);
        let seg_len = self.cumulative[j + 1] - self.cumulative[j];
        if seg_len <= f32::EPSILON {
            return a;
        }
        let t = ((slot.distance - self.cumulative[j]) / seg_len).clamp(0.0, 1.0);
        a.lerp(b, t)
    }

    pub fn tangent(&self, slot: TrailSlot) -> Vec3 {
        let j = slot.segment.min(self.segment_count() - 1);
        self.points[j + 1] - self.points[j]
    }

    /// Slot for particle `index` of `count`: eased so early indices bunch near
    /// the trail start and later ones stretch toward its end.
    pub fn slot_for(&self, index: usize, count: usize) -> TrailSlot {
        let linear = if count > 1 {
            index as f32 / (count - 1) as f32
        } else {
            0.0
        };
        self.locate(Easing::InOutCubic.apply(linear) * self.total_length())
    }
}
