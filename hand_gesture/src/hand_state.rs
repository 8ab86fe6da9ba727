//! Per-frame hand snapshot and the single-slot channel that carries it from
//! the capture side to the simulation.
//!
//! A snapshot is rebuilt from scratch on every capture callback.  Publishing
//! replaces the previous snapshot wholesale; readers always see the most
//! recent complete one.  There is no queue: only the latest state matters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::classifier::{classify, ClassifierConfig, Gesture};
use crate::landmarks::Landmark;

/// Landmark lists for every hand detected in one capture callback, in
/// detection order.
pub type LandmarkBatch = Vec<Vec<Landmark>>;

// ════════════════════════════════════════════════════════════════════════════
// Hand / HandState
// ════════════════════════════════════════════════════════════════════════════

/// One classified hand.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hand {
    /// Detection order within this frame.  Not a tracked identity: with two
    /// hands the ids may swap between frames.
    pub id: usize,
    /// `[-1, 1]²`, y up.  Serialised as `{"x": .., "y": ..}`.
    #[serde(with = "xy")]
    pub position: Vec2,
    pub gesture: Gesture,
    pub pinch_distance: f32,
}

/// `Vec2` as an `{x, y}` object rather than glam's `[x, y]`.
mod xy {
    use glam::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Xy {
        x: f32,
        y: f32,
    }

    pub fn serialize<S: Serializer>(v: &Vec2, s: S) -> Result<S::Ok, S::Error> {
        Xy { x: v.x, y: v.y }.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec2, D::Error> {
        let Xy { x, y } = Xy::deserialize(d)?;
        Ok(Vec2::new(x, y))
    }
}

/// Every hand present in one capture frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HandState {
    pub hands: Vec<Hand>,
}

impl HandState {
    /// The explicit "no hands present" snapshot.
    pub fn empty() -> Self { HandState { hands: Vec::new() } }

    pub fn new(hands: Vec<Hand>) -> Self { HandState { hands } }

    /// Classify each landmark list independently; ids follow batch order.
    pub fn classify_batch(batch: &[Vec<Landmark>], config: &ClassifierConfig) -> Self {
        let hands = batch
            .iter()
            .enumerate()
            .map(|(id, landmarks)| {
                let c = classify(landmarks, config);
                Hand {
                    id,
                    position:       c.position,
                    gesture:        c.gesture,
                    pinch_distance: c.pinch_distance,
                }
            })
            .collect();
        HandState { hands }
    }

    pub fn is_empty(&self) -> bool { self.hands.is_empty() }

    pub fn len(&self) -> usize { self.hands.len() }

    pub fn iter(&self) -> impl Iterator<Item = &Hand> { self.hands.iter() }

    /// True if any hand currently shows `gesture`.
    pub fn any(&self, gesture: Gesture) -> bool {
        self.hands.iter().any(|h| h.gesture == gesture)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandStateSlot — single-slot overwrite channel
// ════════════════════════════════════════════════════════════════════════════

/// Shared latest-value cell.  One writer (the classification task), any
/// number of readers (the simulation tick, overlays).
///
/// The lock only ever guards an `Arc` swap or clone, so neither side waits on
/// the other's computation.
#[derive(Debug, Default)]
pub struct HandStateSlot {
    current:    Mutex<Arc<HandState>>,
    generation: AtomicU64,
}

impl HandStateSlot {
    pub fn new() -> Self { HandStateSlot::default() }

    /// Replace the current snapshot.
    pub fn publish(&self, state: HandState) {
        let next = Arc::new(state);
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = next;
        self.generation.fetch_add(1, Ordering::Release);
    }

    /// Publish [`HandState::empty`].
    pub fn clear(&self) { self.publish(HandState::empty()); }

    /// The most recent complete snapshot.
    pub fn latest(&self) -> Arc<HandState> {
        Arc::clone(&self.current.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Number of snapshots published so far.
    pub fn generation(&self) -> u64 { self.generation.load(Ordering::Acquire) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
