//! Capture → classify → simulate, without a window.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec2;
use hand_gesture::{ClassifierConfig, Gesture, HandStateSlot};
use leap_particles::app::{AppConfig, AppState};
use leap_particles::capture::spawn_classifier;
use leap_particles::source::{spawn_landmark_source, SimInput, SimLandmarkSource};
use particle_field::EngineConfig;

fn wait_for(slot: &HandStateSlot, generation: u64) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while slot.generation() < generation {
        assert!(Instant::now() < deadline, "classifier never published generation {generation}");
        std::thread::yield_now();
    }
}

#[test]
fn simulated_thumbs_up_zooms_the_camera() {
    let (sim_tx, sim_rx) = mpsc::channel();
    let landmarks = spawn_landmark_source(SimLandmarkSource::new(sim_rx));
    let slot = Arc::new(HandStateSlot::new());
    let classifier = spawn_classifier(landmarks, Arc::clone(&slot), ClassifierConfig::default());

    sim_tx.send(SimInput::Pointer(Vec2::new(0.5, 0.5))).unwrap();
    sim_tx.send(SimInput::Pose { hand: 0, gesture: Gesture::ThumbsUp }).unwrap();
    sim_tx.send(SimInput::Quit).unwrap();
    classifier.join().unwrap();
    assert!(slot.generation() >= 1);

    let hands = slot.latest();
    assert_eq!(hands.len(), 1);
    assert_eq!(hands.hands[0].gesture, Gesture::ThumbsUp);

    let cfg = AppConfig {
        engine: EngineConfig { particle_count: 32, seed: Some(8), ..Default::default() },
        ..Default::default()
    };
    let mut app = AppState::new(cfg, 16.0 / 9.0).unwrap();
    for _ in 0..60 {
        app.tick(&hands, 1.0 / 60.0);
    }
    assert!(app.camera().z() < 8.0);
    assert!(app.engine().positions().iter().all(|p| p.is_finite()));
}

#[test]
fn clearing_publishes_an_empty_state() {
    let (sim_tx, sim_rx) = mpsc::channel();
    let landmarks = spawn_landmark_source(SimLandmarkSource::new(sim_rx));
    let slot = Arc::new(HandStateSlot::new());
    let _classifier = spawn_classifier(landmarks, Arc::clone(&slot), ClassifierConfig::default());

    sim_tx.send(SimInput::Pointer(Vec2::new(0.4, 0.4))).unwrap();
    wait_for(&slot, 1);
    assert_eq!(slot.latest().len(), 1);

    sim_tx.send(SimInput::Clear).unwrap();
    wait_for(&slot, 2);
    assert!(slot.latest().is_empty());
}
