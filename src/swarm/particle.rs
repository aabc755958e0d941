use glam::{Quat, Vec3};
use rand::Rng;
use serde::Serialize;

use crate::tween::Easing;

/// Model-space axis the renderer treats as the agent's nose.
pub const FORWARD_AXIS: Vec3 = Vec3::NEG_Y;

/// Where on the trail a particle is parked: segment index plus arc length
/// from the trail start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSlot {
    pub segment: usize,
    pub distance: f32,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec3,
    /// Position when the last state transition began.
    pub start_position: Vec3,
    /// Static target for the current formation, relative to the anchor.
    pub target_position: Vec3,
    pub rotation_speed: f32,
    pub scale: f32,
    pub trail_slot: Option<TrailSlot>,
    pub trail_follow_speed: f32,
    pub trail_progress: f32,
    pub track_random_speed: f32,
    pub orientation: Quat,
}

impl Particle {
    /// Fresh particle with its per-agent speeds drawn from `rng`.
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        Self {
            position: Vec3::ZERO,
            start_position: Vec3::ZERO,
            target_position: Vec3::ZERO,
            rotation_speed: (rng.r#gen::<f32>() - 0.5) * 4.0,
            scale: rng.gen_range(0.8..1.2),
            trail_slot: None,
            trail_follow_speed: rng.gen_range(0.15..0.35),
            trail_progress: 0.0,
            track_random_speed: rng.gen_range(0.02..0.10),
            orientation: Quat::IDENTITY,
        }
    }

    /// Eased (slow-then-fast) trail progress.
    pub fn eased_progress(&self) -> f32 {
        Easing::InQuad.apply(self.trail_progress)
    }
}

/// Per-agent output handed to the renderer each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticlePose {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: f32,
}

/// Rotation taking [`FORWARD_AXIS`] onto `dir`, or `None` for a degenerate
/// direction.
pub fn aim(dir: Vec3) -> Option<Quat> {
    if dir.length_squared() <= 1e-8 {
        return None;
    }
    Some(Quat::from_rotation_arc(FORWARD_AXIS, dir.normalize()))
}
