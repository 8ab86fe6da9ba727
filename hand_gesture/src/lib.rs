//! # hand_gesture
//!
//! Turns a hand's 21 image-space landmarks into a discrete [`Gesture`], a
//! screen-space position and a continuous pinch distance, and publishes the
//! per-frame result as a [`HandState`] snapshot.
//!
//! The classifier is a pure function: nothing is remembered between frames,
//! and hand identity is simply the detection order within one frame.
//!
//! ## Gesture priority
//!
//! | Order | Gesture | Condition |
//! |---|---|---|
//! | 1 | `pinch` | thumb tip ↔ index tip < `pinch_threshold` |
//! | 2 | `thumbs_up` | four fingers curled, thumb tip above its MCP and above middle PIP |
//! | 3 | `thumbs_down` | four fingers curled, thumb tip below its MCP and `thumb_margin` below middle PIP |
//! | 4 | `closed` | four fingers curled, neither thumb condition |
//! | 5 | `victory` | index + middle extended, ring + pinky curled |
//! | 6 | `pointing` | index extended, middle + ring + pinky curled |
//! | 7 | `open` | anything else |
//!
//! ## Quick start
//!
//! ```rust
//! use glam::Vec2;
//! use hand_gesture::{classify, posed_hand, ClassifierConfig, Gesture};
//!
//! let landmarks = posed_hand(Gesture::Victory, Vec2::new(0.5, 0.5));
//! let c = classify(&landmarks, &ClassifierConfig::default());
//! assert_eq!(c.gesture, Gesture::Victory);
//! ```

pub mod classifier;
pub mod hand_state;
pub mod landmarks;

pub use classifier::{classify, Classification, ClassifierConfig, Gesture, ParseGestureError};
pub use hand_state::{Hand, HandState, HandStateSlot, LandmarkBatch};
pub use landmarks::{posed_hand, Landmark, LandmarkError, LandmarkSet, LANDMARK_COUNT};
