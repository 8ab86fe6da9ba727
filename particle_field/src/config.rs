//! Engine configuration: tuned constants, colours and the viewport mapping.

use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3};
use point_shapes::ShapeKind;
use serde::{Deserialize, Serialize};

use crate::error::{ColorError, EngineError};

// ════════════════════════════════════════════════════════════════════════════
// Rgb
// ════════════════════════════════════════════════════════════════════════════

/// Linear RGB, channels nominally in `[0, 1]`.  Serialised as `"#rrggbb"`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self { Rgb { r, g, b } }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColorError::Malformed(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ColorError::Malformed(s.to_string()))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }

    pub fn to_vec3(self) -> Vec3 { Vec3::new(self.r, self.g, self.b) }

    pub fn is_finite(self) -> bool { self.to_vec3().is_finite() }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Rgb::from_hex(s) }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;
    fn try_from(s: String) -> Result<Self, Self::Error> { Rgb::from_hex(&s) }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self { c.to_hex() }
}

// ════════════════════════════════════════════════════════════════════════════
// Viewport
// ════════════════════════════════════════════════════════════════════════════

/// Half extents of the visible world-space rectangle at z = 0.  Hand
/// positions in `[-1, 1]²` are scaled by these to land in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub half_width:  f32,
    pub half_height: f32,
}

impl Viewport {
    pub const fn new(half_width: f32, half_height: f32) -> Self {
        Viewport { half_width, half_height }
    }

    /// Visible extent of the z = 0 plane for a perspective camera at
    /// `distance` with vertical field of view `fov_deg`.
    pub fn from_camera(fov_deg: f32, distance: f32, aspect: f32) -> Self {
        let half_height = distance * (fov_deg.to_radians() * 0.5).tan();
        Viewport { half_width: half_height * aspect, half_height }
    }

    /// Map a hand position to the world, on the z = 0 plane.
    pub fn to_world(&self, position: Vec2) -> Vec3 {
        Vec3::new(position.x * self.half_width, position.y * self.half_height, 0.0)
    }

    pub fn is_finite(&self) -> bool { self.half_width.is_finite() && self.half_height.is_finite() }
}

impl Default for Viewport {
    /// A 16:9 camera eight units back with a 60° field of view.
    fn default() -> Self { Viewport::from_camera(60.0, 8.0, 16.0 / 9.0) }
}

// ════════════════════════════════════════════════════════════════════════════
// EngineConfig
// ════════════════════════════════════════════════════════════════════════════

/// Everything the engine needs at construction.  The `shape`, colours and
/// viewport are only the starting values; they can be changed at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of particles, fixed for the engine's lifetime.
    pub particle_count: usize,
    pub shape:          ShapeKind,
    pub color_a:        Rgb,
    pub color_b:        Rgb,
    pub viewport:       Viewport,
    /// Seed for start positions and shape sampling; `None` draws from the OS.
    pub seed:           Option<u64>,

    // ── integrator ───────────────────────────────────────────────────────
    /// Spring acceleration per unit displacement per second.
    pub spring_gain:     f32,
    /// Velocity multiplier applied every frame.
    pub damping:         f32,
    /// Amplitude of the per-particle sinusoidal drift added to the target.
    pub drift_amplitude: f32,
    /// Side of the cube particles are scattered in at start-up.
    pub spawn_extent:    f32,
    /// Frame times above this are clamped.
    pub max_frame_time:  f32,
    /// Velocity magnitude cap, in units per frame.
    pub max_speed:       f32,

    // ── hand interaction ─────────────────────────────────────────────────
    /// Particles farther than this from a hand are unaffected by it.
    pub interaction_radius: f32,
    pub force_gain:         f32,
    pub pinch_gain:         f32,
    pub swirl_gain:         f32,
    pub repel_gain:         f32,

    // ── colouring ────────────────────────────────────────────────────────
    /// Spatial frequency of the colour mix along x.
    pub color_frequency: f32,
    /// Particles closer than this to a hand glow.
    pub glow_radius:     f32,

    /// Presentation spin about y and z, radians per second.
    pub rotation_rate: Vec2,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            particle_count: 8000,
            shape:          ShapeKind::Cloud,
            color_a:        Rgb::new(1.0, 0.0, 1.0 / 3.0),   // #ff0055
            color_b:        Rgb::new(0.0, 1.0 / 3.0, 1.0),   // #0055ff
            viewport:       Viewport::default(),
            seed:           None,

            spring_gain:     2.0,
            damping:         0.90,
            drift_amplitude: 0.1,
            spawn_extent:    20.0,
            max_frame_time:  0.1,
            max_speed:       50.0,

            interaction_radius: 4.0,
            force_gain:         20.0,
            pinch_gain:         2.0,
            swirl_gain:         2.0,
            repel_gain:         0.5,

            color_frequency: 0.2,
            glow_radius:     2.5,

            rotation_rate: Vec2::new(0.1, 0.05),
        }
    }
}

impl EngineConfig {
    /// Reject configurations the integrator cannot run stably.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.particle_count == 0 {
            return Err(EngineError::NoParticles);
        }
        let finite = [
            ("spring_gain",        self.spring_gain),
            ("damping",            self.damping),
            ("drift_amplitude",    self.drift_amplitude),
            ("spawn_extent",       self.spawn_extent),
            ("max_frame_time",     self.max_frame_time),
            ("max_speed",          self.max_speed),
            ("interaction_radius", self.interaction_radius),
            ("force_gain",         self.force_gain),
            ("pinch_gain",         self.pinch_gain),
            ("swirl_gain",         self.swirl_gain),
            ("repel_gain",         self.repel_gain),
            ("color_frequency",    self.color_frequency),
            ("glow_radius",        self.glow_radius),
            ("viewport.half_width",  self.viewport.half_width),
            ("viewport.half_height", self.viewport.half_height),
            ("rotation_rate.y",    self.rotation_rate.x),
            ("rotation_rate.z",    self.rotation_rate.y),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(EngineError::InvalidParameter { name, value });
            }
        }
        if !(0.0..1.0).contains(&self.damping) {
            return Err(EngineError::InvalidParameter { name: "damping", value: self.damping });
        }
        if self.max_frame_time <= 0.0 {
            return Err(EngineError::InvalidParameter {
                name: "max_frame_time",
                value: self.max_frame_time,
            });
        }
        if self.max_speed <= 0.0 {
            return Err(EngineError::InvalidParameter { name: "max_speed", value: self.max_speed });
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
