//! Landmark capture — from LeapMotion hardware or a keyboard/mouse simulator.
//!
//! The public interface is a [`LandmarkBatch`] per capture frame, delivered
//! over an `mpsc` channel.  An empty batch means "no hands in view".
//! Consumers don't need to know whether batches came from real hardware or
//! the simulator.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use glam::Vec2;
use hand_gesture::{posed_hand, Gesture, LandmarkBatch};
use log::{debug, info};

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver landmark batches over a channel.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<LandmarkBatch>);
}

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<LandmarkBatch> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource — keyboard/mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer moved, in unit image coordinates (y down).
    Pointer(Vec2),
    /// Set the pose of hand 0 (primary) or hand 1 (mirrored second hand).
    Pose { hand: usize, gesture: Gesture },
    /// Show or hide the mirrored second hand.
    ToggleSecondHand,
    /// Hands leave the frame until the pointer moves again.
    Clear,
    Quit,
}

/// Synthetic hands driven by [`SimInput`] events (from the visualizer's
/// window).  Every input produces one capture frame.
pub struct SimLandmarkSource {
    pub rx: Receiver<SimInput>,
    hands:  SimHands,
}

impl SimLandmarkSource {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimLandmarkSource { rx, hands: SimHands::default() }
    }
}

/// State of the simulated hands.  Split out of the source so the
/// input → batch mapping can be exercised without threads.
#[derive(Clone, Debug, PartialEq)]
pub struct SimHands {
    pub pointer: Vec2,
    pub poses:   [Gesture; 2],
    pub second:  bool,
    pub visible: bool,
}

impl Default for SimHands {
    fn default() -> Self {
        SimHands {
            pointer: Vec2::new(0.5, 0.5),
            poses:   [Gesture::Open, Gesture::Open],
            second:  false,
            visible: false,
        }
    }
}

impl SimHands {
    /// Apply one input.  Returns false on `Quit`.
    pub fn apply(&mut self, input: SimInput) -> bool {
        match input {
            SimInput::Pointer(p) => {
                self.pointer = p.clamp(Vec2::ZERO, Vec2::ONE);
                self.visible = true;
            }
            SimInput::Pose { hand, gesture } => {
                if let Some(slot) = self.poses.get_mut(hand) {
                    *slot = gesture;
                }
                self.visible = true;
            }
            SimInput::ToggleSecondHand => self.second = !self.second,
            SimInput::Clear            => self.visible = false,
            SimInput::Quit             => return false,
        }
        true
    }

    /// The capture frame for the current state.
    pub fn batch(&self) -> LandmarkBatch {
        if !self.visible {
            return Vec::new();
        }
        let mut batch = vec![posed_hand(self.poses[0], self.pointer).to_vec()];
        if self.second {
            let mirrored = Vec2::new(1.0 - self.pointer.x, self.pointer.y);
            batch.push(posed_hand(self.poses[1], mirrored).to_vec());
        }
        batch
    }
}

impl LandmarkSource for SimLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<LandmarkBatch>) {
        let SimLandmarkSource { rx, mut hands } = *self;
        info!("simulated capture started");
        for input in rx {
            if !hands.apply(input) {
                debug!("simulated capture: quit");
                return;
            }
            if tx.send(hands.batch()).is_err() { return; }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapLandmarkSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Landmark source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Each tracking frame, every hand's joints are projected onto the 21-point
/// skeleton in unit image space: Leap x (mm, right) maps to image x, Leap y
/// (mm, up from the device) maps to image y flipped.
#[cfg(feature = "leap")]
pub struct LeapLandmarkSource;

#[cfg(feature = "leap")]
mod leap {
    use super::*;
    use hand_gesture::{Landmark, LANDMARK_COUNT};
    use leaprs::*;
    use log::error;

    // Tracking volume mapped onto the unit image (mm).
    const HALF_WIDTH_MM:  f32   = 200.0;
    const CENTRE_Y_MM:    f32   = 250.0;
    const HALF_HEIGHT_MM: f32   = 150.0;
    const MAX_HANDS:      usize = 2;

    fn project(x: f32, y: f32, z: f32) -> Landmark {
        Landmark {
            x: 0.5 + x / (2.0 * HALF_WIDTH_MM),
            y: 0.5 - (y - CENTRE_Y_MM) / (2.0 * HALF_HEIGHT_MM),
            z: z / (2.0 * HALF_WIDTH_MM),
        }
    }

    macro_rules! joint {
        ($v:expr) => {{
            let v = $v;
            project(v.x, v.y, v.z)
        }};
    }

    /// Thumb: CMC, MCP, IP, TIP.  Leap's thumb metacarpal has zero length,
    /// so the chain starts at the proximal bone.
    /// Fingers: MCP, PIP, DIP, TIP.
    fn skeleton(hand: &Hand) -> Option<Vec<Landmark>> {
        let digits: Vec<_> = hand.digits().collect();
        if digits.len() < 5 { return None; }

        let mut out = Vec::with_capacity(LANDMARK_COUNT);
        let index_base = joint!(digits[1].metacarpal().prev_joint());
        let pinky_base = joint!(digits[4].metacarpal().prev_joint());
        out.push(Landmark {
            x: (index_base.x + pinky_base.x) * 0.5,
            y: (index_base.y + pinky_base.y) * 0.5,
            z: (index_base.z + pinky_base.z) * 0.5,
        });

        let thumb = &digits[0];
        out.push(joint!(thumb.proximal().prev_joint()));
        out.push(joint!(thumb.intermediate().prev_joint()));
        out.push(joint!(thumb.distal().prev_joint()));
        out.push(joint!(thumb.distal().next_joint()));

        for digit in &digits[1..5] {
            out.push(joint!(digit.proximal().prev_joint()));
            out.push(joint!(digit.intermediate().prev_joint()));
            out.push(joint!(digit.distal().prev_joint()));
            out.push(joint!(digit.distal().next_joint()));
        }
        Some(out)
    }

    impl LandmarkSource for LeapLandmarkSource {
        fn run(self: Box<Self>, tx: Sender<LandmarkBatch>) {
            let mut connection = match Connection::create(ConnectionConfig::default()) {
                Ok(c)  => c,
                Err(e) => { error!("LeapC connection failed: {e:?}"); return; }
            };
            if let Err(e) = connection.open() {
                error!("failed to open LeapMotion device: {e:?}");
                return;
            }
            info!("LeapMotion capture started");

            loop {
                let msg = match connection.poll(100) {
                    Ok(m)  => m,
                    Err(_) => continue,
                };
                if let Event::Tracking(frame) = msg.event() {
                    let batch: LandmarkBatch = frame
                        .hands()
                        .take(MAX_HANDS)
                        .filter_map(|h| skeleton(&h))
                        .collect();
                    if tx.send(batch).is_err() { return; }
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::{classify, ClassifierConfig, LANDMARK_COUNT};

    #[test]
    fn hidden_until_first_input() {
        let hands = SimHands::default();
        assert!(hands.batch().is_empty());
    }

    #[test]
    fn pointer_shows_one_hand() {
        let mut hands = SimHands::default();
        assert!(hands.apply(SimInput::Pointer(Vec2::new(0.25, 0.75))));
        let batch = hands.batch();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].len(), LANDMARK_COUNT);
    }

    #[test]
    fn pose_keys_reach_the_classifier() {
        let mut hands = SimHands::default();
        hands.apply(SimInput::Pointer(Vec2::new(0.5, 0.5)));
        for g in Gesture::ALL {
            hands.apply(SimInput::Pose { hand: 0, gesture: g });
            let batch = hands.batch();
            assert_eq!(classify(&batch[0], &ClassifierConfig::default()).gesture, g);
        }
    }

    #[test]
    fn second_hand_is_mirrored() {
        let mut hands = SimHands::default();
        hands.apply(SimInput::Pointer(Vec2::new(0.3, 0.5)));
        hands.apply(SimInput::ToggleSecondHand);
        hands.apply(SimInput::Pose { hand: 1, gesture: Gesture::Closed });
        let batch = hands.batch();
        assert_eq!(batch.len(), 2);
        let cfg = ClassifierConfig::default();
        let a = classify(&batch[0], &cfg);
        let b = classify(&batch[1], &cfg);
        assert!(a.position.x < 0.0 && b.position.x > 0.0);
        assert_eq!(b.gesture, Gesture::Closed);
    }

    #[test]
    fn clear_empties_the_frame() {
        let mut hands = SimHands::default();
        hands.apply(SimInput::Pointer(Vec2::new(0.5, 0.5)));
        hands.apply(SimInput::Clear);
        assert!(hands.batch().is_empty());
        assert!(!hands.apply(SimInput::Quit));
    }

    #[test]
    fn out_of_range_pose_slot_is_ignored() {
        let mut hands = SimHands::default();
        hands.apply(SimInput::Pose { hand: 5, gesture: Gesture::Pinch });
        assert_eq!(hands.poses, [Gesture::Open, Gesture::Open]);
    }

    #[test]
    fn sim_source_emits_one_batch_per_input() {
        let (tx, rx) = mpsc::channel();
        let batches = spawn_landmark_source(SimLandmarkSource::new(rx));
        tx.send(SimInput::Pointer(Vec2::new(0.5, 0.5))).unwrap();
        tx.send(SimInput::Clear).unwrap();
        tx.send(SimInput::Quit).unwrap();
        let got: Vec<LandmarkBatch> = batches.iter().collect();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].len(), 1);
        assert!(got[1].is_empty());
    }
}
