//! Hand landmark frames and typed joint access.

use std::ops::Index;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;
use crate::error::{Error, Result};

pub const LANDMARK_COUNT: usize = 21;

/// Joint indices of the 21-point hand model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Joint {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn tip(self) -> Joint {
        match self {
            Finger::Thumb => Joint::ThumbTip,
            Finger::Index => Joint::IndexTip,
            Finger::Middle => Joint::MiddleTip,
            Finger::Ring => Joint::RingTip,
            Finger::Pinky => Joint::PinkyTip,
        }
    }

    /// Middle joint of the finger (the IP joint for the thumb).
    pub fn pip(self) -> Joint {
        match self {
            Finger::Thumb => Joint::ThumbIp,
            Finger::Index => Joint::IndexPip,
            Finger::Middle => Joint::MiddlePip,
            Finger::Ring => Joint::RingPip,
            Finger::Pinky => Joint::PinkyPip,
        }
    }

    pub fn mcp(self) -> Joint {
        match self {
            Finger::Thumb => Joint::ThumbMcp,
            Finger::Index => Joint::IndexMcp,
            Finger::Middle => Joint::MiddleMcp,
            Finger::Ring => Joint::RingMcp,
            Finger::Pinky => Joint::PinkyMcp,
        }
    }
}

/// One detected hand: 21 points in normalized image space.
///
/// `x` and `y` are in `[0, 1]` with `y` growing downward; `z` is relative
/// depth, smaller meaning closer to the camera. Building a frame from any
/// other number of points fails, so downstream code can index freely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f32; 3]>", into = "Vec<[f32; 3]>")]
pub struct LandmarkFrame {
    points: [Vec3; LANDMARK_COUNT],
}

impl LandmarkFrame {
    pub fn new(points: [Vec3; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    pub fn from_slice(points: &[Vec3]) -> Result<Self> {
        let points: [Vec3; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| Error::LandmarkCount(points.len()))?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Vec3; LANDMARK_COUNT] {
        &self.points
    }

    pub fn set(&mut self, joint: Joint, p: Vec3) {
        self.points[joint as usize] = p;
    }
}

impl Index<Joint> for LandmarkFrame {
    type Output = Vec3;

    fn index(&self, joint: Joint) -> &Vec3 {
        &self.points[joint as usize]
    }
}

impl TryFrom<Vec<[f32; 3]>> for LandmarkFrame {
    type Error = Error;

    fn try_from(raw: Vec<[f32; 3]>) -> Result<Self> {
        let points: Vec<Vec3> = raw.into_iter().map(Vec3::from_array).collect();
        Self::from_slice(&points)
    }
}

impl From<LandmarkFrame> for Vec<[f32; 3]> {
    fn from(frame: LandmarkFrame) -> Self {
        frame.points.iter().map(|p| p.to_array()).collect()
    }
}

impl SceneConfig {
    /// Normalized image point → scene units (x right, y up, z scaled depth).
    pub fn to_scene(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            (p.x - 0.5) * self.scale_x,
            -(p.y - 0.5) * self.scale_y,
            p.z * self.scale_z,
        )
    }

    /// Same mapping restricted to the image plane.
    pub fn to_scene_plane(&self, p: Vec2) -> Vec2 {
        Vec2::new((p.x - 0.5) * self.scale_x, -(p.y - 0.5) * self.scale_y)
    }
}
