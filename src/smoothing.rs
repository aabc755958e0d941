//! Exponential smoothing of the palm anchor and hand roll.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use crate::landmarks::{Joint, LandmarkFrame};

/// Smoothed anchor in normalized image space plus roll in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingState {
    pub center: Vec2,
    pub rotation: f32,
}

impl Default for SmoothingState {
    fn default() -> Self {
        Self {
            center: Vec2::new(0.5, 0.5),
            rotation: 0.0,
        }
    }
}

/// Raw roll of the hand: angle of the thumb-MCP → pinky-MCP line.
pub fn hand_roll(frame: &LandmarkFrame) -> f32 {
    let a = frame[Joint::ThumbMcp];
    let b = frame[Joint::PinkyMcp];
    (b.y - a.y).atan2(b.x - a.x)
}

/// Wrap an angle difference into `[-π, π]`.
pub fn wrap_angle(mut d: f32) -> f32 {
    while d > PI {
        d -= TAU;
    }
    while d < -PI {
        d += TAU;
    }
    d
}

/// Pull `state` toward this frame's palm center and roll by `factor`.
pub fn smooth(state: SmoothingState, frame: &LandmarkFrame, factor: f32) -> SmoothingState {
    let palm = frame[Joint::MiddleMcp].truncate();
    let center = state.center + (palm - state.center) * factor;
    let diff = wrap_angle(hand_roll(frame) - state.rotation);
    SmoothingState {
        center,
        rotation: state.rotation + diff * factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{open_hand, translated};
    use glam::Vec3;

    #[test]
    fn converges_on_palm_center() {
        let frame = translated(&open_hand(), Vec3::new(0.2, -0.1, 0.0));
        let target = frame[Joint::MiddleMcp].truncate();
        let mut s = SmoothingState::default();
        let first = smooth(s, &frame, 0.15);
        assert!((first.center.x - (0.5 + (target.x - 0.5) * 0.15)).abs() < 1e-6);
        for _ in 0..200 {
            s = smooth(s, &frame, 0.15);
        }
        assert!(s.center.distance(target) < 1e-4);
        assert!((s.rotation - hand_roll(&frame)).abs() < 1e-4);
    }

    #[test]
    fn roll_takes_the_short_way_round() {
        assert!((wrap_angle(1.5 * TAU + 0.1) - (0.5 * TAU + 0.1 - TAU)).abs() < 1e-5);
        assert!((wrap_angle(-PI - 0.2) - (PI - 0.2)).abs() < 1e-5);

        let state = SmoothingState {
            center: Vec2::new(0.5, 0.5),
            rotation: PI - 0.05,
        };
        // raw roll just past -π is 0.1 rad away, not ~2π
        let mut frame = open_hand();
        frame.set(Joint::ThumbMcp, Vec3::new(0.6, 0.5, 0.0));
        frame.set(Joint::PinkyMcp, Vec3::new(0.4, 0.5 - 0.01, 0.0));
        let raw = hand_roll(&frame);
        assert!(raw < -PI + 0.1);
        let next = smooth(state, &frame, 0.5);
        assert!(next.rotation > state.rotation);
    }
}
