//! The particle simulation.
//!
//! Every particle is a damped spring toward its target point, plus whatever
//! the hands in the current [`HandState`] add.  Per frame, for each particle:
//!
//! ```text
//! t  = target + drift(elapsed, i)
//! v += (t - p) · spring_gain · dt
//! v += Σ hand_force(p, hand)            (see forces.rs)
//! v *= damping
//! p += v
//! c  = gradient(p.x) · glow(p, hands)
//! ```
//!
//! Shape, colour and viewport changes requested between frames are applied
//! at the start of the next [`ParticleEngine::step`], so a frame never sees a
//! half-applied change.

use std::f32::consts::TAU;

use glam::{EulerRot, Quat, Vec2, Vec3};
use hand_gesture::HandState;
use log::{debug, info, warn};
use point_shapes::{generate_into, ShapeKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{EngineConfig, Rgb, Viewport};
use crate::error::EngineError;
use crate::forces::{self, WorldHand};

/// Running counters, for logs and overlays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub steps:         u64,
    /// Particles put back on their target after going non-finite.
    pub resets:        u64,
    /// Times the target set was resampled.
    pub regenerations: u64,
}

/// Inputs that may change between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FrameInputs {
    shape:    ShapeKind,
    color_a:  Rgb,
    color_b:  Rgb,
    viewport: Viewport,
}

pub struct ParticleEngine {
    config:     EngineConfig,
    positions:  Vec<Vec3>,
    velocities: Vec<Vec3>,
    targets:    Vec<Vec3>,
    colors:     Vec<Vec3>,
    active:     FrameInputs,
    pending:    FrameInputs,
    elapsed:    f32,
    /// Presentation spin (about y, about z), radians.
    spin:       Vec2,
    rng:        StdRng,
    stats:      EngineStats,
    /// Reused per frame so stepping never allocates.
    hands:      Vec<WorldHand>,
}

impl ParticleEngine {
    /// Scatter `particle_count` particles through the spawn cube and sample
    /// targets from the configured shape.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_os_rng(),
        };
        let n = config.particle_count;
        let extent = config.spawn_extent;
        let positions: Vec<Vec3> = (0..n)
            .map(|_| {
                Vec3::new(
                    (rng.random::<f32>() - 0.5) * extent,
                    (rng.random::<f32>() - 0.5) * extent,
                    (rng.random::<f32>() - 0.5) * extent,
                )
            })
            .collect();
        let mut targets = vec![Vec3::ZERO; n];
        generate_into(config.shape, &mut targets, &mut rng);

        info!("particle engine: {} particles, shape {}", n, config.shape);
        Ok(Self::assemble(config, positions, targets, rng))
    }

    /// Start from explicit positions and targets, velocities zero.  The
    /// particle count is taken from `positions`.
    pub fn with_particles(
        mut config: EngineConfig,
        positions:  Vec<Vec3>,
        targets:    Vec<Vec3>,
    ) -> Result<Self, EngineError> {
        if positions.len() != targets.len() {
            return Err(EngineError::LengthMismatch {
                positions: positions.len(),
                targets:   targets.len(),
            });
        }
        config.particle_count = positions.len();
        config.validate()?;
        for (index, (p, t)) in positions.iter().zip(&targets).enumerate() {
            if !p.is_finite() {
                return Err(EngineError::NonFinite { index, field: "position" });
            }
            if !t.is_finite() {
                return Err(EngineError::NonFinite { index, field: "target" });
            }
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_os_rng(),
        };
        Ok(Self::assemble(config, positions, targets, rng))
    }

    fn assemble(config: EngineConfig, positions: Vec<Vec3>, targets: Vec<Vec3>, rng: StdRng) -> Self {
        let n = positions.len();
        let inputs = FrameInputs {
            shape:    config.shape,
            color_a:  config.color_a,
            color_b:  config.color_b,
            viewport: config.viewport,
        };
        let mut engine = ParticleEngine {
            config,
            positions,
            velocities: vec![Vec3::ZERO; n],
            targets,
            colors:     vec![Vec3::ZERO; n],
            active:     inputs,
            pending:    inputs,
            elapsed:    0.0,
            spin:       Vec2::ZERO,
            rng,
            stats:      EngineStats::default(),
            hands:      Vec::with_capacity(2),
        };
        engine.recolor();
        engine
    }

    // ── deferred inputs ──────────────────────────────────────────────────

    /// Request a new target shape; takes effect on the next step.
    pub fn set_shape(&mut self, shape: ShapeKind) { self.pending.shape = shape; }

    /// Request new gradient endpoints; take effect on the next step.
    /// Non-finite channels are refused and the previous request stands.
    pub fn set_colors(&mut self, a: Rgb, b: Rgb) {
        if !(a.is_finite() && b.is_finite()) {
            warn!("ignoring non-finite colours {:?} / {:?}", a, b);
            return;
        }
        self.pending.color_a = a;
        self.pending.color_b = b;
    }

    /// Non-finite extents are refused like non-finite colours.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if !viewport.is_finite() {
            warn!("ignoring non-finite viewport {viewport:?}");
            return;
        }
        self.pending.viewport = viewport;
    }

    fn apply_pending(&mut self) {
        if self.pending == self.active {
            return;
        }
        if self.pending.shape != self.active.shape {
            debug!("shape {} -> {}", self.active.shape, self.pending.shape);
            generate_into(self.pending.shape, &mut self.targets, &mut self.rng);
            self.stats.regenerations += 1;
        }
        self.active = self.pending;
    }

    // ── stepping ─────────────────────────────────────────────────────────

    /// Clamp `dt` into `[0, max_frame_time]`; non-finite becomes zero.
    pub fn sanitize_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 { dt.min(self.config.max_frame_time) } else { 0.0 }
    }

    /// Advance one frame.
    pub fn step(&mut self, hand_state: &HandState, dt: f32) {
        let dt = self.sanitize_dt(dt);
        self.apply_pending();
        self.elapsed += dt;

        let viewport = self.active.viewport;
        self.hands.clear();
        self.hands.extend(
            hand_state
                .iter()
                .filter(|h| h.position.is_finite())
                .map(|h| WorldHand { position: viewport.to_world(h.position), gesture: h.gesture }),
        );

        let cfg = &self.config;
        let hands = &self.hands;
        let time = self.elapsed;
        let (a, b) = (self.active.color_a.to_vec3(), self.active.color_b.to_vec3());
        let mut resets = 0u64;

        let particles = self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(self.targets.iter())
            .zip(self.colors.iter_mut())
            .enumerate();

        for (i, (((p, v), target), color)) in particles {
            let fi = i as f32;
            let drift = Vec3::new(
                (time * 0.5 + fi).sin() * cfg.drift_amplitude,
                (time * 0.3 + fi * 0.5).cos() * cfg.drift_amplitude,
                0.0,
            );
            let t = *target + drift;

            let mut vel = *v + (t - *p) * (cfg.spring_gain * dt);
            for hand in hands {
                vel += forces::hand_force(*p, hand, dt, cfg);
            }
            vel = (vel * cfg.damping).clamp_length_max(cfg.max_speed);
            let mut pos = *p + vel;

            if !pos.is_finite() || !vel.is_finite() {
                pos = *target;
                vel = Vec3::ZERO;
                resets += 1;
            }
            *p = pos;
            *v = vel;
            *color = forces::shade(pos, hands, a, b, cfg);
        }

        if resets > 0 {
            warn!("reset {resets} non-finite particle(s) to their targets");
            self.stats.resets += resets;
        }
        // wrapped so long sessions keep full f32 precision
        let spin = self.spin + self.config.rotation_rate * dt;
        self.spin = Vec2::new(spin.x.rem_euclid(TAU), spin.y.rem_euclid(TAU));
        self.stats.steps += 1;
    }

    /// Recompute colours against the active palette with no hands present.
    fn recolor(&mut self) {
        let (a, b) = (self.active.color_a.to_vec3(), self.active.color_b.to_vec3());
        for (p, c) in self.positions.iter().zip(self.colors.iter_mut()) {
            *c = forces::shade(*p, &[], a, b, &self.config);
        }
    }

    // ── read-only views ──────────────────────────────────────────────────

    pub fn len(&self) -> usize { self.positions.len() }
    pub fn is_empty(&self) -> bool { self.positions.is_empty() }
    pub fn positions(&self) -> &[Vec3] { &self.positions }
    pub fn velocities(&self) -> &[Vec3] { &self.velocities }
    pub fn targets(&self) -> &[Vec3] { &self.targets }
    pub fn colors(&self) -> &[Vec3] { &self.colors }
    pub fn shape(&self) -> ShapeKind { self.active.shape }
    pub fn color_pair(&self) -> (Rgb, Rgb) { (self.active.color_a, self.active.color_b) }
    pub fn viewport(&self) -> Viewport { self.active.viewport }
    pub fn elapsed(&self) -> f32 { self.elapsed }
    pub fn stats(&self) -> EngineStats { self.stats }
    pub fn config(&self) -> &EngineConfig { &self.config }

    /// Presentation rotation of the whole field.  Physics runs unrotated.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, 0.0, self.spin.x, self.spin.y)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
