//! Full per-tick flow: hand tracking feeding the swarm.

use glam::Vec3;
use log::info;
use rand::rngs::StdRng;

use crate::config::Profile;
use crate::gestures::GestureState;
use crate::landmarks::LandmarkFrame;
use crate::swarm::{ParticlePose, ReleaseFollowInfo, SwarmController, SwarmState};
use crate::tracker::HandTracker;

/// What one tick produced. Poses borrow the swarm's buffer.
#[derive(Debug)]
pub struct TickOutput<'a> {
    pub poses: &'a [ParticlePose],
    pub gesture: GestureState,
    /// Gesture differs from the previous tick.
    pub changed: bool,
    pub moving: bool,
    pub swarm_state: SwarmState,
    pub following: bool,
    pub trail_len: usize,
    pub anchor: Vec3,
    pub rotation: f32,
}

pub struct Session {
    tracker: HandTracker,
    swarm: SwarmController,
    gesture: GestureState,
}

impl Session {
    pub fn new(profile: &Profile) -> Self {
        Self::from_parts(HandTracker::new(profile), SwarmController::new(profile.swarm.clone()))
    }

    pub fn with_rng(profile: &Profile, rng: StdRng) -> Self {
        Self::from_parts(
            HandTracker::new(profile),
            SwarmController::with_rng(profile.swarm.clone(), rng),
        )
    }

    fn from_parts(tracker: HandTracker, swarm: SwarmController) -> Self {
        Self {
            tracker,
            swarm,
            gesture: GestureState::None,
        }
    }

    pub fn tracker(&self) -> &HandTracker {
        &self.tracker
    }

    pub fn swarm(&self) -> &SwarmController {
        &self.swarm
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn release_follow_info(&self, now_ms: u64) -> ReleaseFollowInfo {
        self.swarm.release_follow_info(now_ms)
    }

    pub fn tick(&mut self, frame: Option<&LandmarkFrame>, now_ms: u64, dt: f32) -> TickOutput<'_> {
        let summary = self.tracker.process(frame, now_ms);

        let changed = summary.gesture != self.gesture;
        if changed {
            info!(
                "gesture {} -> {}",
                self.gesture.as_str(),
                summary.gesture.as_str()
            );
            if !summary.gesture.is_track() {
                self.tracker.clear_trail();
            }
            if let Some(state) = summary.gesture.swarm_state() {
                self.swarm.set_state(state, now_ms);
            }
            self.gesture = summary.gesture;
        }

        if let Some(a) = summary.anchor {
            self.swarm.set_anchor(a.extend(0.0));
        }
        if let Some(tip) = summary.fingertip {
            self.swarm.update_tracking_point(tip.x, tip.y);
        }

        let trail = self.tracker.trail().snapshot();
        self.swarm.update_trail(&trail, now_ms);

        let swarm_state = self.swarm.state();
        let following = self.swarm.is_following_trail();
        let anchor = self.swarm.anchor();
        let poses = self.swarm.advance(now_ms, dt);

        TickOutput {
            poses,
            gesture: summary.gesture,
            changed,
            moving: summary.moving,
            swarm_state,
            following,
            trail_len: trail.len(),
            anchor,
            rotation: summary.rotation,
        }
    }
}
