//! Synthetic hands shared by the unit tests.

use glam::Vec3;

use crate::landmarks::{Joint, LandmarkFrame, LANDMARK_COUNT};

fn p(x: f32, y: f32) -> Vec3 {
    Vec3::new(x, y, 0.0)
}

/// Wrist and MCP row shared by every pose.
fn palm() -> LandmarkFrame {
    let mut f = LandmarkFrame::new([Vec3::ZERO; LANDMARK_COUNT]);
    f.set(Joint::Wrist, p(0.5, 0.8));
    f.set(Joint::ThumbCmc, p(0.44, 0.75));
    f.set(Joint::ThumbMcp, p(0.42, 0.7));
    f.set(Joint::IndexMcp, p(0.45, 0.6));
    f.set(Joint::MiddleMcp, p(0.5, 0.58));
    f.set(Joint::RingMcp, p(0.55, 0.6));
    f.set(Joint::PinkyMcp, p(0.6, 0.62));
    f
}

/// Every fingertip past its base: thumb tucked right, fingertips below MCPs.
pub fn fist() -> LandmarkFrame {
    let mut f = palm();
    f.set(Joint::ThumbIp, p(0.45, 0.68));
    f.set(Joint::ThumbTip, p(0.48, 0.68));
    for (mcp, pip, dip, tip) in [
        (0.45, Joint::IndexPip, Joint::IndexDip, Joint::IndexTip),
        (0.5, Joint::MiddlePip, Joint::MiddleDip, Joint::MiddleTip),
        (0.55, Joint::RingPip, Joint::RingDip, Joint::RingTip),
        (0.6, Joint::PinkyPip, Joint::PinkyDip, Joint::PinkyTip),
    ] {
        f.set(pip, p(mcp, 0.55));
        f.set(dip, p(mcp, 0.62));
        f.set(tip, p(mcp, 0.68));
    }
    f
}

/// Every fingertip on the open side of its base.
pub fn open_hand() -> LandmarkFrame {
    let mut f = palm();
    f.set(Joint::ThumbIp, p(0.38, 0.65));
    f.set(Joint::ThumbTip, p(0.35, 0.6));
    for (x, base_y, pip, dip, tip) in [
        (0.45, 0.6, Joint::IndexPip, Joint::IndexDip, Joint::IndexTip),
        (0.5, 0.58, Joint::MiddlePip, Joint::MiddleDip, Joint::MiddleTip),
        (0.55, 0.6, Joint::RingPip, Joint::RingDip, Joint::RingTip),
        (0.6, 0.62, Joint::PinkyPip, Joint::PinkyDip, Joint::PinkyTip),
    ] {
        f.set(pip, p(x, base_y - 0.08));
        f.set(dip, p(x, base_y - 0.14));
        f.set(tip, p(x, base_y - 0.2));
    }
    f
}

/// Index and middle extended side by side, the rest curled.
///
/// `middle_dir` is the vector from the middle PIP (0.5, 0.48, 0) to its tip;
/// the index tip sits `index_gap` to the right of and 0.01 below the middle
/// tip. Keep `middle_dir.y < -0.02` or the fingers stop counting as extended.
pub fn track_hand(middle_dir: Vec3, index_gap: f32) -> LandmarkFrame {
    let mut f = palm();
    f.set(Joint::ThumbIp, p(0.45, 0.68));
    f.set(Joint::ThumbTip, p(0.48, 0.68));

    let middle_pip = p(0.5, 0.48);
    let middle_tip = middle_pip + middle_dir;
    f.set(Joint::MiddlePip, middle_pip);
    f.set(Joint::MiddleDip, middle_pip + middle_dir * 0.5);
    f.set(Joint::MiddleTip, middle_tip);

    let index_tip = middle_tip + Vec3::new(index_gap, 0.01, 0.0);
    f.set(Joint::IndexPip, p(0.46, 0.5));
    f.set(Joint::IndexDip, (p(0.46, 0.5) + index_tip) * 0.5);
    f.set(Joint::IndexTip, index_tip);

    f.set(Joint::RingPip, p(0.55, 0.55));
    f.set(Joint::RingDip, p(0.55, 0.6));
    f.set(Joint::RingTip, p(0.55, 0.63));
    f.set(Joint::PinkyPip, p(0.6, 0.57));
    f.set(Joint::PinkyDip, p(0.6, 0.62));
    f.set(Joint::PinkyTip, p(0.6, 0.65));
    f
}

/// Tracking pose pointing straight up.
pub fn pointing_up() -> LandmarkFrame {
    track_hand(Vec3::new(0.0, -0.1, 0.0), 0.01)
}

/// Shift every joint by `d` in normalized units.
pub fn translated(frame: &LandmarkFrame, d: Vec3) -> LandmarkFrame {
    let mut pts = *frame.points();
    for q in pts.iter_mut() {
        *q += d;
    }
    LandmarkFrame::new(pts)
}
