//! Gesture classification — a fixed-priority decision tree over one hand's
//! landmarks.
//!
//! The order of the checks is the contract: a pinched fist is a `pinch`, not
//! a `closed`, and a fist with the thumb clearly raised is a `thumbs_up`.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::landmarks::{
    Landmark, LandmarkSet, FINGERS, INDEX_TIP, MIDDLE_PIP, THUMB_MCP, THUMB_TIP,
};

// ════════════════════════════════════════════════════════════════════════════
// Gesture
// ════════════════════════════════════════════════════════════════════════════

/// The discrete pose of a single hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// Fallback: fingers spread, or anything not matched below.
    #[default]
    Open,
    /// All four fingers curled, thumb tucked.
    Closed,
    /// Thumb tip touching the index tip.
    Pinch,
    /// Index extended, the rest curled.
    Pointing,
    /// Index and middle extended, ring and pinky curled.
    Victory,
    ThumbsUp,
    ThumbsDown,
}

impl Gesture {
    pub const ALL: [Gesture; 7] = [
        Gesture::Open,
        Gesture::Closed,
        Gesture::Pinch,
        Gesture::Pointing,
        Gesture::Victory,
        Gesture::ThumbsUp,
        Gesture::ThumbsDown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::Open       => "open",
            Gesture::Closed     => "closed",
            Gesture::Pinch      => "pinch",
            Gesture::Pointing   => "pointing",
            Gesture::Victory    => "victory",
            Gesture::ThumbsUp   => "thumbs_up",
            Gesture::ThumbsDown => "thumbs_down",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown gesture label {0:?}")]
pub struct ParseGestureError(pub String);

impl FromStr for Gesture {
    type Err = ParseGestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gesture::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ParseGestureError(s.to_string()))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ClassifierConfig
// ════════════════════════════════════════════════════════════════════════════

/// Tuned thresholds, all in unit-normalised image space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Thumb-tip ↔ index-tip distance below which the hand is pinching.
    pub pinch_threshold: f32,
    /// How far below the middle PIP the thumb tip must hang for `thumbs_down`.
    pub thumb_margin: f32,
    /// A finger counts as curled once its tip is this far below its PIP joint.
    pub curl_margin: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            pinch_threshold: 0.05,
            thumb_margin:    0.05,
            curl_margin:     0.0,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Classification
// ════════════════════════════════════════════════════════════════════════════

/// Everything the classifier derives from one hand.  The caller assigns the
/// hand id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    /// Landmark centroid mapped to `[-1, 1]²`, y pointing up.
    pub position: Vec2,
    pub gesture: Gesture,
    /// Thumb-tip ↔ index-tip distance in image units.
    pub pinch_distance: f32,
}

impl Classification {
    /// Result reported for input that cannot be classified.
    pub const FAIL_CLOSED: Classification = Classification {
        position:       Vec2::ZERO,
        gesture:        Gesture::Open,
        pinch_distance: 0.0,
    };
}

/// Classify one hand.
///
/// Never fails: a landmark list with the wrong length or a non-finite
/// coordinate yields [`Classification::FAIL_CLOSED`].
pub fn classify(landmarks: &[Landmark], config: &ClassifierConfig) -> Classification {
    match LandmarkSet::new(landmarks) {
        Ok(set) => classify_set(&set, config),
        Err(e) => {
            debug!("unclassifiable hand: {}", e);
            Classification::FAIL_CLOSED
        }
    }
}

/// Classify an already validated landmark set.
pub fn classify_set(set: &LandmarkSet, config: &ClassifierConfig) -> Classification {
    let centroid = set.centroid();
    let position = Vec2::new((centroid.x - 0.5) * 2.0, -(centroid.y - 0.5) * 2.0)
        .clamp(Vec2::NEG_ONE, Vec2::ONE);

    let pinch_distance = set.get(THUMB_TIP).xy().distance(set.get(INDEX_TIP).xy());

    Classification {
        position,
        gesture: decide(set, pinch_distance, config),
        pinch_distance,
    }
}

fn decide(set: &LandmarkSet, pinch_distance: f32, config: &ClassifierConfig) -> Gesture {
    if pinch_distance < config.pinch_threshold {
        return Gesture::Pinch;
    }

    // Image y grows downward, so a curled tip sits numerically below its PIP.
    let curled = FINGERS.map(|(pip, tip)| set.y(tip) > set.y(pip) + config.curl_margin);
    let [index, middle, ring, pinky] = curled;

    if curled.iter().all(|&c| c) {
        let thumb_tip  = set.y(THUMB_TIP);
        let thumb_mcp  = set.y(THUMB_MCP);
        let middle_pip = set.y(MIDDLE_PIP);

        let thumb_high = thumb_tip < thumb_mcp;
        let thumb_low  = thumb_tip > thumb_mcp;

        return if thumb_high && thumb_tip < middle_pip {
            Gesture::ThumbsUp
        } else if thumb_low && thumb_tip > middle_pip + config.thumb_margin {
            Gesture::ThumbsDown
        } else {
            Gesture::Closed
        };
    }

    if !index && !middle && ring && pinky {
        Gesture::Victory
    } else if !index && middle && ring && pinky {
        Gesture::Pointing
    } else {
        Gesture::Open
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
