use glam::Vec3;

use crate::config::ClassifierThresholds;
use crate::landmarks::{Finger, Joint, LandmarkFrame};
use crate::swarm::SwarmState;

/// Pointing direction of the tracking pose, in image terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackDirection {
    Up,
    Down,
    Left,
    Right,
    /// Toward the camera.
    Forward,
    Backward,
}

impl TrackDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    #[default]
    None,
    /// Fist.
    Fold,
    /// Open hand.
    Release,
    /// Index and middle extended together; `None` when the direction is
    /// indeterminate or refinement is off.
    Track(Option<TrackDirection>),
}

impl GestureState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Fold => "fold",
            Self::Release => "release",
            Self::Track(None) => "track",
            Self::Track(Some(TrackDirection::Up)) => "track_up",
            Self::Track(Some(TrackDirection::Down)) => "track_down",
            Self::Track(Some(TrackDirection::Left)) => "track_left",
            Self::Track(Some(TrackDirection::Right)) => "track_right",
            Self::Track(Some(TrackDirection::Forward)) => "track_forward",
            Self::Track(Some(TrackDirection::Backward)) => "track_backward",
        }
    }

    /// Whether the fingertip trail should be recorded for this state.
    pub fn is_track(&self) -> bool {
        matches!(self, Self::Track(_))
    }

    /// Swarm formation this gesture asks for; `None` leaves the swarm as is.
    pub fn swarm_state(&self) -> Option<SwarmState> {
        match self {
            Self::None => None,
            Self::Fold => Some(SwarmState::Contracted),
            Self::Release => Some(SwarmState::Scattered),
            Self::Track(_) => Some(SwarmState::Tracking),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GestureClassifier {
    th: ClassifierThresholds,
}

impl GestureClassifier {
    pub fn new(th: ClassifierThresholds) -> Self {
        Self { th }
    }

    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.th
    }

    /// Classify one frame. Fist and open hand are only considered while the
    /// hand is stationary; fist wins over open hand.
    pub fn classify(&self, frame: Option<&LandmarkFrame>, moving: bool) -> GestureState {
        let Some(lm) = frame else {
            return GestureState::None;
        };

        if !moving {
            if self.is_folded(lm) {
                return GestureState::Fold;
            }
            if self.is_released(lm) {
                return GestureState::Release;
            }
        }

        if self.is_track_pose(lm) {
            let direction = if self.th.directional {
                self.direction(lm)
            } else {
                None
            };
            return GestureState::Track(direction);
        }

        GestureState::None
    }

    fn finger_folded(&self, lm: &LandmarkFrame, finger: Finger) -> bool {
        let tip = lm[finger.tip()];
        let base = lm[finger.mcp()];
        match finger {
            Finger::Thumb => tip.x > base.x,
            _ => tip.y > base.y + self.th.fold_margin,
        }
    }

    fn finger_open(&self, lm: &LandmarkFrame, finger: Finger) -> bool {
        let tip = lm[finger.tip()];
        let base = lm[finger.mcp()];
        match finger {
            Finger::Thumb => tip.x < base.x,
            _ => tip.y < base.y - self.th.fold_margin,
        }
    }

    fn is_folded(&self, lm: &LandmarkFrame) -> bool {
        let folded = Finger::ALL
            .iter()
            .filter(|f| self.finger_folded(lm, **f))
            .count();
        folded >= self.th.min_folded
    }

    fn is_released(&self, lm: &LandmarkFrame) -> bool {
        let open = Finger::ALL
            .iter()
            .filter(|f| self.finger_open(lm, **f))
            .count();
        open >= self.th.min_open
    }

    fn extended(&self, lm: &LandmarkFrame, finger: Finger) -> bool {
        let tip = lm[finger.tip()];
        let above_pip = tip.y < lm[finger.pip()].y - self.th.extend_margin;
        let long_enough = tip.truncate().distance(lm[finger.mcp()].truncate()) > self.th.min_finger_length;
        above_pip && long_enough
    }

    fn curled(&self, lm: &LandmarkFrame, finger: Finger) -> bool {
        lm[finger.tip()].y > lm[finger.pip()].y + self.th.curl_margin
    }

    fn is_track_pose(&self, lm: &LandmarkFrame) -> bool {
        let thumb_folded = lm[Joint::ThumbTip].x > lm[Joint::ThumbMcp].x;
        let together = lm[Joint::IndexTip].distance(lm[Joint::MiddleTip]) < self.th.closeness;

        thumb_folded
            && self.extended(lm, Finger::Index)
            && self.extended(lm, Finger::Middle)
            && together
            && self.curled(lm, Finger::Ring)
            && self.curled(lm, Finger::Pinky)
    }

    fn direction(&self, lm: &LandmarkFrame) -> Option<TrackDirection> {
        pointing_direction(lm[Joint::MiddleTip] - lm[Joint::MiddlePip], &self.th)
    }
}

/// Dominant axis of a pointing vector, checked depth first, then vertical,
/// then horizontal. Short vectors are indeterminate.
pub fn pointing_direction(v: Vec3, th: &ClassifierThresholds) -> Option<TrackDirection> {
    let len = v.length();
    if len < th.direction_min_length {
        return None;
    }
    let n = v / len;

    if n.z.abs() > th.depth_axis {
        return Some(if n.z < 0.0 {
            TrackDirection::Forward
        } else {
            TrackDirection::Backward
        });
    }
    if n.y.abs() > th.vertical_axis {
        return Some(if n.y < 0.0 {
            TrackDirection::Up
        } else {
            TrackDirection::Down
        });
    }
    if n.x.abs() > th.horizontal_axis {
        return Some(if n.x < 0.0 {
            TrackDirection::Left
        } else {
            TrackDirection::Right
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{fist, open_hand, pointing_up, track_hand};

    fn strict() -> GestureClassifier {
        GestureClassifier::new(ClassifierThresholds::strict())
    }

    #[test]
    fn no_hand_is_none() {
        assert_eq!(strict().classify(None, false), GestureState::None);
    }

    #[test]
    fn fist_folds_when_still() {
        assert_eq!(strict().classify(Some(&fist()), false), GestureState::Fold);
    }

    #[test]
    fn open_hand_releases_when_still() {
        assert_eq!(
            strict().classify(Some(&open_hand()), false),
            GestureState::Release
        );
    }

    #[test]
    fn moving_hand_never_folds_or_releases() {
        let c = strict();
        for frame in [fist(), open_hand(), pointing_up()] {
            let g = c.classify(Some(&frame), true);
            assert_ne!(g, GestureState::Fold);
            assert_ne!(g, GestureState::Release);
        }
    }

    #[test]
    fn classify_is_idempotent() {
        let c = strict();
        for frame in [fist(), open_hand(), pointing_up()] {
            for moving in [false, true] {
                let a = c.classify(Some(&frame), moving);
                let b = c.classify(Some(&frame), moving);
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn three_of_five_is_not_enough() {
        // curled ring/pinky and a tucked thumb: three folded, two open
        let c = strict();
        let g = c.classify(Some(&pointing_up()), false);
        assert!(g.is_track(), "got {g:?}");
    }

    #[test]
    fn tracking_pose_reports_direction() {
        let c = strict();
        let cases = [
            (Vec3::new(0.0, -0.1, 0.0), Some(TrackDirection::Up)),
            (Vec3::new(0.0, -0.05, -0.2), Some(TrackDirection::Forward)),
            (Vec3::new(0.0, -0.05, 0.2), Some(TrackDirection::Backward)),
            (Vec3::new(-0.1, -0.04, 0.0), Some(TrackDirection::Left)),
            (Vec3::new(0.1, -0.04, 0.0), Some(TrackDirection::Right)),
            (Vec3::new(0.0, -0.025, 0.0), None),
        ];
        for (dir, expected) in cases {
            let frame = track_hand(dir, 0.01);
            assert_eq!(
                c.classify(Some(&frame), false),
                GestureState::Track(expected),
                "dir {dir:?}"
            );
        }
    }

    #[test]
    fn tracking_pose_is_allowed_while_moving() {
        assert_eq!(
            strict().classify(Some(&pointing_up()), true),
            GestureState::Track(Some(TrackDirection::Up))
        );
    }

    #[test]
    fn refinement_can_be_disabled() {
        let th = ClassifierThresholds {
            directional: false,
            ..ClassifierThresholds::strict()
        };
        let c = GestureClassifier::new(th);
        assert_eq!(
            c.classify(Some(&pointing_up()), false),
            GestureState::Track(None)
        );
    }

    #[test]
    fn relaxed_profile_accepts_wider_gap() {
        let frame = track_hand(Vec3::new(0.0, -0.1, 0.0), 0.09);
        assert_eq!(strict().classify(Some(&frame), false), GestureState::None);

        let relaxed = GestureClassifier::new(ClassifierThresholds::relaxed());
        assert!(relaxed.classify(Some(&frame), false).is_track());
    }

    #[test]
    fn direction_priority_is_depth_vertical_horizontal() {
        let th = ClassifierThresholds::strict();
        // all three components large: depth wins
        let v = Vec3::new(0.6, -0.6, -0.5);
        assert_eq!(pointing_direction(v, &th), Some(TrackDirection::Forward));
        // vertical beats horizontal
        let v = Vec3::new(0.6, 0.7, 0.0);
        assert_eq!(pointing_direction(v, &th), Some(TrackDirection::Down));
        assert_eq!(pointing_direction(Vec3::new(0.01, 0.0, 0.0), &th), None);
    }

    #[test]
    fn gesture_maps_to_swarm_state() {
        assert_eq!(GestureState::None.swarm_state(), None);
        assert_eq!(GestureState::Fold.swarm_state(), Some(SwarmState::Contracted));
        assert_eq!(
            GestureState::Release.swarm_state(),
            Some(SwarmState::Scattered)
        );
        assert_eq!(
            GestureState::Track(Some(TrackDirection::Left)).swarm_state(),
            Some(SwarmState::Tracking)
        );
        assert_eq!(
            GestureState::Track(Some(TrackDirection::Left)).as_str(),
            "track_left"
        );
    }
}
