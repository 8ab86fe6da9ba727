//! particle_field — a spring-relaxed particle system that morphs between
//! procedural shapes and reacts to classified hands.
//!
//! | Module    | Role                                                      |
//! |-----------|-----------------------------------------------------------|
//! | `config`  | `EngineConfig`, `Rgb` colours, `Viewport` mapping         |
//! | `engine`  | `ParticleEngine`: integration, deferred inputs, colouring |
//! | `forces`  | per-gesture force law and glow                            |
//! | `error`   | `EngineError`, `ColorError`                               |
//!
//! ```no_run
//! use hand_gesture::HandState;
//! use particle_field::{EngineConfig, ParticleEngine};
//!
//! let mut engine = ParticleEngine::new(EngineConfig::default()).unwrap();
//! engine.step(&HandState::empty(), 1.0 / 60.0);
//! assert_eq!(engine.positions().len(), 8000);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod forces;

pub use config::{EngineConfig, Rgb, Viewport};
pub use engine::{EngineStats, ParticleEngine};
pub use error::{ColorError, EngineError};
pub use forces::WorldHand;
