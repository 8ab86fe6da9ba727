//! Top-level application state and loop.
//!
//! `AppState` owns the `ParticleEngine` and the `CameraZoom`.  Each frame it
//! reads the latest `HandState`, moves the camera, re-derives the engine's
//! viewport from it and steps the simulation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use hand_gesture::{ClassifierConfig, HandState, HandStateSlot};
use log::{debug, info};
use particle_field::{EngineConfig, EngineError, ParticleEngine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{CameraZoom, ZoomConfig};
use crate::capture::spawn_classifier;
use crate::source::{spawn_landmark_source, SimInput};
#[cfg(not(feature = "leap"))]
use crate::source::SimLandmarkSource;
#[cfg(feature = "leap")]
use crate::source::LeapLandmarkSource;
use crate::visualizer::{UiCommand, Visualizer, ASPECT};

// ════════════════════════════════════════════════════════════════════════════
// AppError
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum AppError {
    #[error("reading config {path}: {source}")]
    ReadConfig { path: PathBuf, source: std::io::Error },

    #[error("parsing config {path}: {source}")]
    ParseConfig { path: PathBuf, source: serde_json::Error },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("window: {0}")]
    Window(String),
}

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.  Every section is optional in a
/// JSON config file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine:     EngineConfig,
    pub classifier: ClassifierConfig,
    pub zoom:       ZoomConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path)
            .map_err(|source| AppError::ReadConfig { path: path.to_path_buf(), source })?;
        serde_json::from_str(&text)
            .map_err(|source| AppError::ParseConfig { path: path.to_path_buf(), source })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    engine: ParticleEngine,
    camera: CameraZoom,
    aspect: f32,
    frames: u64,
    pub status: String,
}

impl AppState {
    pub fn new(cfg: AppConfig, aspect: f32) -> Result<Self, AppError> {
        let camera = CameraZoom::new(cfg.zoom);
        let engine_cfg = EngineConfig { viewport: camera.viewport(aspect), ..cfg.engine };
        let engine = ParticleEngine::new(engine_cfg)?;
        let status = format!("Ready — {} particles, shape {}", engine.len(), engine.shape());
        Ok(AppState { engine, camera, aspect, frames: 0, status })
    }

    // ── process one UiCommand ────────────────────────────────────────────

    pub fn handle_command(&mut self, command: UiCommand) {
        match command {
            UiCommand::NextShape => {
                let next = self.engine.shape().next();
                self.engine.set_shape(next);
                info!("shape -> {next}");
            }
            UiCommand::SwapColors => {
                let (a, b) = self.engine.color_pair();
                self.engine.set_colors(b, a);
                debug!("colours swapped: {b} / {a}");
            }
        }
    }

    // ── Per-frame tick ────────────────────────────────────────────────────

    pub fn tick(&mut self, hands: &HandState, dt: f32) {
        let dt = self.engine.sanitize_dt(dt);
        self.camera.update(hands, dt);
        self.engine.set_viewport(self.camera.viewport(self.aspect));
        self.engine.step(hands, dt);
        self.frames += 1;

        let gestures: Vec<&str> = hands.iter().map(|h| h.gesture.as_str()).collect();
        self.status = format!(
            "{}  {} particles  z {:.1}  hands {} {}",
            self.engine.shape(),
            self.engine.len(),
            self.camera.z(),
            hands.len(),
            gestures.join(" "),
        );
        if self.frames % 600 == 0 {
            debug!("frame {}: {:?}", self.frames, self.engine.stats());
        }
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn engine(&self) -> &ParticleEngine { &self.engine }
    pub fn camera(&self) -> &CameraZoom     { &self.camera }
    pub fn status(&self) -> &str            { &self.status }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It wires the landmark
/// source (simulation by default, hardware with `--features leap`) to the
/// classifier thread, opens the visualizer and drives the simulation at the
/// window's refresh rate (~60 fps).
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    // ── Capture → classify pipeline ──────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();

    #[cfg(not(feature = "leap"))]
    let landmark_rx = spawn_landmark_source(SimLandmarkSource::new(sim_rx));
    #[cfg(feature = "leap")]
    let landmark_rx = {
        drop(sim_rx);
        spawn_landmark_source(LeapLandmarkSource)
    };

    let slot = Arc::new(HandStateSlot::new());
    let _classifier = spawn_classifier(landmark_rx, Arc::clone(&slot), cfg.classifier.clone());

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(sim_tx).map_err(|e| AppError::Window(e.to_string()))?;

    // ── App state ─────────────────────────────────────────────────────────
    let mut app = AppState::new(cfg, ASPECT)?;
    info!("{}", app.status());

    // ── Main loop ─────────────────────────────────────────────────────────
    let mut commands = Vec::new();
    let mut last = Instant::now();
    while vis.is_open() {
        // 1. Poll window input
        if !vis.poll_input(&mut commands) { break; }
        for command in commands.drain(..) {
            app.handle_command(command);
        }

        // 2. Latest classified hands
        let hands = slot.latest();

        // 3. Per-frame logic
        let now = Instant::now();
        app.tick(&hands, now.duration_since(last).as_secs_f32());
        last = now;

        // 4. Render
        vis.render(app.engine(), &hands, app.camera(), app.status());
    }

    info!("window closed after {} steps", app.engine().stats().steps);
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use hand_gesture::{Gesture, Hand};
    use point_shapes::ShapeKind;
    use pretty_assertions::assert_eq;

    const DT: f32 = 1.0 / 60.0;

    fn make_app() -> AppState {
        let cfg = AppConfig {
            engine: EngineConfig { particle_count: 64, seed: Some(3), ..Default::default() },
            ..Default::default()
        };
        AppState::new(cfg, 16.0 / 9.0).unwrap()
    }

    fn thumbs(gesture: Gesture) -> HandState {
        HandState::new(vec![Hand { id: 0, position: Vec2::ZERO, gesture, pinch_distance: 0.2 }])
    }

    #[test]
    fn next_shape_applies_on_tick() {
        let mut app = make_app();
        assert_eq!(app.engine().shape(), ShapeKind::Cloud);
        app.handle_command(UiCommand::NextShape);
        app.tick(&HandState::empty(), DT);
        assert_eq!(app.engine().shape(), ShapeKind::Cloud.next());
    }

    #[test]
    fn swap_colors_round_trips() {
        let mut app = make_app();
        let (a, b) = app.engine().color_pair();
        app.handle_command(UiCommand::SwapColors);
        app.tick(&HandState::empty(), DT);
        assert_eq!(app.engine().color_pair(), (b, a));
    }

    #[test]
    fn thumbs_up_zooms_and_shrinks_viewport() {
        let mut app = make_app();
        let before = app.engine().viewport();
        for _ in 0..30 {
            app.tick(&thumbs(Gesture::ThumbsUp), DT);
        }
        assert!(app.camera().z() < 8.0);
        assert!(app.engine().viewport().half_height < before.half_height);
    }

    #[test]
    fn status_names_hands() {
        let mut app = make_app();
        app.tick(&thumbs(Gesture::Victory), DT);
        assert!(app.status().contains("hands 1 victory"), "{}", app.status());
    }

    #[test]
    fn config_file_sections_are_optional() {
        let cfg: AppConfig = serde_json::from_str(
            r#"{ "engine": { "particle_count": 100 }, "zoom": { "min_z": 3.0 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.engine.particle_count, 100);
        assert_eq!(cfg.zoom.min_z, 3.0);
        assert_eq!(cfg.zoom.max_z, 20.0);
        assert_eq!(cfg.classifier, ClassifierConfig::default());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/leap_particles.json")).unwrap_err();
        assert!(matches!(err, AppError::ReadConfig { .. }));
    }

    #[test]
    fn invalid_engine_config_is_rejected() {
        let cfg = AppConfig {
            engine: EngineConfig { damping: 2.0, ..Default::default() },
            ..Default::default()
        };
        assert!(matches!(AppState::new(cfg, 1.0), Err(AppError::Engine(_))));
    }
}
