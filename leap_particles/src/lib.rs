//! # leap_particles
//!
//! A particle field that morphs between procedural shapes and reacts to hand
//! gestures, captured from a LeapMotion controller or simulated with the
//! keyboard and mouse.
//!
//! ## Pipeline
//!
//! ```text
//! capture thread ──LandmarkBatch──▶ classifier thread ──▶ HandStateSlot
//!                                                            │ latest()
//!                      window loop: camera zoom ◀────────────┤
//!                                   ParticleEngine::step ◀───┘
//!                                   render
//! ```
//!
//! ## Gesture → effect mapping
//!
//! | Gesture | Effect on nearby particles / camera |
//! |---|---|
//! | `pinch` | Attract toward the hand |
//! | `closed` | Swirl around the hand |
//! | `open`, `pointing`, `victory` | Gentle repulsion |
//! | `thumbs_up` | Repulsion; camera moves in |
//! | `thumbs_down` | Repulsion; camera moves out |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the mouse moves a synthetic hand and
//!   number keys pick its pose.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via LeapC.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Action |
//! |---|---|
//! | mouse | Move the hand |
//! | `1`–`7` | Pose: open, closed, pinch, pointing, victory, thumbs up, thumbs down |
//! | `Shift`+`1`–`7` | Pose of the second hand |
//! | `H` | Show/hide a mirrored second hand |
//! | `C` | Hands leave the frame |
//! | `Space` / `N` | Next shape |
//! | `X` | Swap the two gradient colours |
//! | `Q` / `Esc` | Quit |

pub mod app;
pub mod camera;
pub mod capture;
pub mod raster;
pub mod source;
pub mod visualizer;
