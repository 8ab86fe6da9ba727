//! The classification task.
//!
//! Runs on its own thread, woken by each capture frame.  It classifies the
//! newest batch and publishes the result into the shared [`HandStateSlot`].
//! Batches that queued up while it was busy are skipped: only the latest
//! frame matters.

use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use hand_gesture::{ClassifierConfig, HandState, HandStateSlot, LandmarkBatch};
use log::{debug, trace};

/// Spawn the classifier.  The thread exits when the capture side hangs up.
pub fn spawn_classifier(
    rx:     Receiver<LandmarkBatch>,
    slot:   Arc<HandStateSlot>,
    config: ClassifierConfig,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(first) = rx.recv() {
            let (batch, skipped) = newest(first, &rx);
            if skipped > 0 {
                trace!("classifier skipped {skipped} stale frame(s)");
            }
            slot.publish(HandState::classify_batch(&batch, &config));
        }
        debug!("capture closed; classifier stopping");
    })
}

/// Drain whatever is already queued and keep the last batch.
fn newest(first: LandmarkBatch, rx: &Receiver<LandmarkBatch>) -> (LandmarkBatch, usize) {
    rx.try_iter().fold((first, 0), |(_, n), b| (b, n + 1))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
