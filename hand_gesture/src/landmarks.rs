//! The 21-point hand skeleton.
//!
//! Coordinates are unit-normalised image space: `x` grows to the right, `y`
//! grows *downward*, both nominally in `[0, 1]`.  `z` is whatever depth the
//! pose estimator reports and is ignored by the classifier.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::Gesture;

// ════════════════════════════════════════════════════════════════════════════
// Skeleton indices
// ════════════════════════════════════════════════════════════════════════════

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:      usize = 0;
pub const THUMB_CMC:  usize = 1;
pub const THUMB_MCP:  usize = 2;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_MCP:  usize = 5;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_DIP:  usize = 7;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP:   usize = 13;
pub const RING_PIP:   usize = 14;
pub const RING_DIP:   usize = 15;
pub const RING_TIP:   usize = 16;
pub const PINKY_MCP:  usize = 17;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_DIP:  usize = 19;
pub const PINKY_TIP:  usize = 20;

/// The four long fingers as `(pip, tip)` index pairs: index, middle, ring, pinky.
pub const FINGERS: [(usize, usize); 4] = [
    (INDEX_PIP,  INDEX_TIP),
    (MIDDLE_PIP, MIDDLE_TIP),
    (RING_PIP,   RING_TIP),
    (PINKY_PIP,  PINKY_TIP),
];

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One skeleton point as reported by the pose estimator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Landmark { x, y, z: 0.0 }
    }

    pub fn xy(&self) -> Vec2 { Vec2::new(self.x, self.y) }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSet — validated input
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LandmarkError {
    #[error("expected 21 landmarks, found {found}")]
    WrongCount { found: usize },

    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// Exactly 21 finite landmarks in skeleton order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkSet([Landmark; LANDMARK_COUNT]);

impl LandmarkSet {
    pub fn new(points: &[Landmark]) -> Result<Self, LandmarkError> {
        let arr: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| LandmarkError::WrongCount { found: points.len() })?;
        if let Some(index) = arr.iter().position(|l| !l.is_finite()) {
            return Err(LandmarkError::NonFinite { index });
        }
        Ok(LandmarkSet(arr))
    }

    pub fn get(&self, index: usize) -> Landmark { self.0[index] }

    /// Vertical image coordinate of one landmark.
    pub fn y(&self, index: usize) -> f32 { self.0[index].y }

    pub fn centroid(&self) -> Vec2 {
        let sum = self.0.iter().fold(Vec2::ZERO, |acc, l| acc + l.xy());
        sum / LANDMARK_COUNT as f32
    }

    pub fn as_slice(&self) -> &[Landmark] { &self.0 }
}

// ════════════════════════════════════════════════════════════════════════════
// Synthetic posed hands
// ════════════════════════════════════════════════════════════════════════════
//
// An upright right hand roughly 0.2 image units tall, wrist at the bottom.
// Offsets are relative to the requested centre; negative dy is "up".

/// (mcp, pip, dip, tip) offsets for an extended finger.
const EXTENDED: [[(f32, f32); 4]; 4] = [
    [(-0.030,  0.000), (-0.035, -0.040), (-0.037, -0.070), (-0.040, -0.100)],
    [( 0.000, -0.005), ( 0.000, -0.050), ( 0.000, -0.080), ( 0.000, -0.110)],
    [( 0.025,  0.000), ( 0.030, -0.040), ( 0.032, -0.065), ( 0.035, -0.090)],
    [( 0.050,  0.010), ( 0.055, -0.020), ( 0.058, -0.040), ( 0.060, -0.060)],
];

/// Same fingers folded into the palm: tips end up below their PIP joints.
const CURLED: [[(f32, f32); 4]; 4] = [
    [(-0.030,  0.000), (-0.035, -0.040), (-0.030, -0.020), (-0.030, -0.010)],
    [( 0.000, -0.005), ( 0.000, -0.050), ( 0.005, -0.030), ( 0.005, -0.015)],
    [( 0.025,  0.000), ( 0.030, -0.040), ( 0.030, -0.020), ( 0.028, -0.010)],
    [( 0.050,  0.010), ( 0.055, -0.020), ( 0.052, -0.005), ( 0.050,  0.002)],
];

const WRIST_OFFSET: (f32, f32) = (0.0, 0.100);

#[derive(Clone, Copy)]
enum Thumb { Spread, Tucked, Up, Down }

/// (cmc, mcp, ip, tip) offsets per thumb pose.
fn thumb_offsets(thumb: Thumb) -> [(f32, f32); 4] {
    match thumb {
        Thumb::Spread => [(-0.030, 0.070), (-0.060, 0.040), (-0.080, 0.010), (-0.100, -0.020)],
        Thumb::Tucked => [(-0.030, 0.070), (-0.060, 0.050), (-0.070, 0.040), (-0.080,  0.030)],
        Thumb::Up     => [(-0.030, 0.070), (-0.060, 0.030), (-0.070, -0.030), (-0.070, -0.090)],
        Thumb::Down   => [(-0.030, 0.070), (-0.060, 0.030), (-0.070, 0.080), (-0.070,  0.130)],
    }
}

/// Build a canonical upright hand in image space that classifies as `pose`
/// under the default thresholds.
///
/// Used by the simulated capture source and by tests; real input comes from
/// the pose estimator.
pub fn posed_hand(pose: Gesture, centre: Vec2) -> [Landmark; LANDMARK_COUNT] {
    // extended flags for index, middle, ring, pinky
    let (fingers, thumb) = match pose {
        Gesture::Open       => ([true,  true,  true,  true ], Thumb::Spread),
        Gesture::Pinch      => ([true,  true,  true,  true ], Thumb::Spread),
        Gesture::Closed     => ([false, false, false, false], Thumb::Tucked),
        Gesture::ThumbsUp   => ([false, false, false, false], Thumb::Up),
        Gesture::ThumbsDown => ([false, false, false, false], Thumb::Down),
        Gesture::Pointing   => ([true,  false, false, false], Thumb::Tucked),
        Gesture::Victory    => ([true,  true,  false, false], Thumb::Tucked),
    };

    let at = |(dx, dy): (f32, f32)| Landmark::new(centre.x + dx, centre.y + dy);

    let mut out = [Landmark::default(); LANDMARK_COUNT];
    out[WRIST] = at(WRIST_OFFSET);
    for (j, off) in thumb_offsets(thumb).into_iter().enumerate() {
        out[THUMB_CMC + j] = at(off);
    }
    for (f, extended) in fingers.into_iter().enumerate() {
        let joints = if extended { EXTENDED[f] } else { CURLED[f] };
        for (j, off) in joints.into_iter().enumerate() {
            out[INDEX_MCP + 4 * f + j] = at(off);
        }
    }

    if pose == Gesture::Pinch {
        // Bring the thumb tip onto the index tip.
        let tip = out[INDEX_TIP];
        out[THUMB_TIP] = Landmark::new(tip.x + 0.010, tip.y + 0.010);
    }
    out
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
