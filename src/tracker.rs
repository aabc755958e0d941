//! Per-frame hand tracking: motion gate, classification, trail and anchor.

use glam::{Vec2, Vec3};
use log::trace;

use crate::config::{Profile, SceneConfig};
use crate::gestures::{GestureClassifier, GestureState};
use crate::landmarks::{Joint, LandmarkFrame};
use crate::motion::MotionGate;
use crate::smoothing::{self, SmoothingState};
use crate::trail::TrailRecorder;

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub timestamp_ms: u64,
    pub gesture: GestureState,
    pub moving: bool,
    /// Smoothed palm center in scene units; `None` when no hand is visible.
    pub anchor: Option<Vec2>,
    /// Smoothed hand roll in radians.
    pub rotation: f32,
    /// Middle fingertip in scene units while in a tracking pose.
    pub fingertip: Option<Vec3>,
    pub trail_len: usize,
}

#[derive(Debug)]
pub struct HandTracker {
    classifier: GestureClassifier,
    gate: MotionGate,
    trail: TrailRecorder,
    smoothing: SmoothingState,
    scene: SceneConfig,
}

impl HandTracker {
    pub fn new(profile: &Profile) -> Self {
        Self {
            classifier: GestureClassifier::new(profile.classifier.clone()),
            gate: MotionGate::new(&profile.motion),
            trail: TrailRecorder::new(profile.trail.clone()),
            smoothing: SmoothingState::default(),
            scene: profile.scene.clone(),
        }
    }

    pub fn trail(&self) -> &TrailRecorder {
        &self.trail
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    pub fn smoothing(&self) -> SmoothingState {
        self.smoothing
    }

    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    /// Run one tracking tick. With no hand the gate, anchor and trail keep
    /// their previous contents.
    pub fn process(&mut self, frame: Option<&LandmarkFrame>, now_ms: u64) -> FrameSummary {
        let mut anchor = None;
        if let Some(lm) = frame {
            self.gate.update(self.scene.to_scene(lm[Joint::MiddleMcp]));
            self.smoothing = smoothing::smooth(self.smoothing, lm, self.scene.anchor_smoothing);
            anchor = Some(self.scene.to_scene_plane(self.smoothing.center));
        }

        let moving = self.gate.is_moving();
        let gesture = self.classifier.classify(frame, moving);

        let fingertip = frame.filter(|_| gesture.is_track()).map(|lm| {
            let tip = self.scene.to_scene(lm[Joint::MiddleTip]);
            self.trail.record(tip, now_ms);
            tip
        });

        trace!(
            "frame t={now_ms} gesture={} moving={moving} trail={}",
            gesture.as_str(),
            self.trail.len()
        );

        FrameSummary {
            timestamp_ms: now_ms,
            gesture,
            moving,
            anchor,
            rotation: self.smoothing.rotation,
            fingertip,
            trail_len: self.trail.len(),
        }
    }
}
