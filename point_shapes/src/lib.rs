//! # point_shapes
//!
//! Procedural target shapes for the particle field.  Each [`ShapeKind`] is a
//! sampling law: every call draws a fresh i.i.d. point cloud from the same
//! distribution, so two calls with the same kind and count give the same
//! silhouette but different points.
//!
//! All shapes are centred near the origin at a comparable scale (radius 6–8)
//! so that switching between them at runtime reads as a morph.
//!
//! | kind | law |
//! |---|---|
//! | `cloud` | uniform in a cube of side 12 |
//! | `sphere` | uniform in the ball of radius 6 |
//! | `galaxy` | √-biased radius ≤ 8, three logarithmic spiral arms, thin band |
//! | `heart` | parametric heart curve, √-biased radial fill, depth ±1 |
//! | `ring` | annulus 6–8 in the XZ plane, thin band |
//! | `dna` | two counter-phase helices of radius 2, height 12 |
//! | `torusKnot` | (2,3) torus knot over three turns, random tube offset |
//! | `pyramid` | four-sided, apex up, height 8 |
//! | `origin` | every point at the origin |
//!
//! ```rust
//! use point_shapes::{generate, ShapeKind};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let pts = generate(ShapeKind::Sphere, 100, &mut rng);
//! assert!(pts.iter().all(|p| p.length() <= 6.0 + 1e-4));
//! ```

use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// ShapeKind
// ════════════════════════════════════════════════════════════════════════════

/// A named target shape.
///
/// Serialised by name; deserialising an unknown name yields
/// [`ShapeKind::Origin`] rather than an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeKind {
    #[default]
    Cloud,
    Sphere,
    Galaxy,
    Heart,
    Ring,
    Dna,
    TorusKnot,
    Pyramid,
    /// Degenerate cloud: every point at the origin.  What an unknown name
    /// resolves to.
    Origin,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("unknown shape kind {0:?} (expected one of: {names})", names = ShapeKind::names().join(", "))]
    UnknownKind(String),
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Cloud,
        ShapeKind::Sphere,
        ShapeKind::Galaxy,
        ShapeKind::Heart,
        ShapeKind::Ring,
        ShapeKind::Dna,
        ShapeKind::TorusKnot,
        ShapeKind::Pyramid,
        ShapeKind::Origin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Cloud     => "cloud",
            ShapeKind::Sphere    => "sphere",
            ShapeKind::Galaxy    => "galaxy",
            ShapeKind::Heart     => "heart",
            ShapeKind::Ring      => "ring",
            ShapeKind::Dna       => "dna",
            ShapeKind::TorusKnot => "torusKnot",
            ShapeKind::Pyramid   => "pyramid",
            ShapeKind::Origin    => "origin",
        }
    }

    pub fn names() -> Vec<&'static str> {
        ShapeKind::ALL.iter().map(|k| k.name()).collect()
    }

    /// Lenient lookup: unknown names fall back to [`ShapeKind::Origin`].
    pub fn from_name(name: &str) -> ShapeKind {
        name.parse().unwrap_or_else(|e: ShapeError| {
            warn!("{}; collapsing to the origin", e);
            ShapeKind::Origin
        })
    }

    /// The kind after this one, wrapping around.  Used for cycling at runtime.
    pub fn next(self) -> ShapeKind {
        let i = ShapeKind::ALL.iter().position(|&k| k == self).unwrap_or(0);
        ShapeKind::ALL[(i + 1) % ShapeKind::ALL.len()]
    }

    /// Draw one point from this shape's distribution.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Vec3 {
        match self {
            ShapeKind::Cloud     => cloud(rng),
            ShapeKind::Sphere    => sphere(rng),
            ShapeKind::Galaxy    => galaxy(rng),
            ShapeKind::Heart     => heart(rng),
            ShapeKind::Ring      => ring(rng),
            ShapeKind::Dna       => dna(rng),
            ShapeKind::TorusKnot => torus_knot(rng),
            ShapeKind::Pyramid   => pyramid(rng),
            ShapeKind::Origin    => Vec3::ZERO,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    /// Strict lookup.  Accepts the canonical names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ShapeError::UnknownKind(s.to_string()))
    }
}

impl From<String> for ShapeKind {
    fn from(s: String) -> Self { ShapeKind::from_name(&s) }
}

impl From<ShapeKind> for String {
    fn from(k: ShapeKind) -> Self { k.name().to_string() }
}

// ════════════════════════════════════════════════════════════════════════════
// Generation
// ════════════════════════════════════════════════════════════════════════════

/// `count` fresh points of `kind`.
pub fn generate<R: Rng + ?Sized>(kind: ShapeKind, count: usize, rng: &mut R) -> Vec<Vec3> {
    (0..count).map(|_| kind.sample(rng)).collect()
}

/// Overwrite `out` with fresh points of `kind`, reusing its storage.
pub fn generate_into<R: Rng + ?Sized>(kind: ShapeKind, out: &mut [Vec3], rng: &mut R) {
    for p in out.iter_mut() {
        *p = kind.sample(rng);
    }
}

/// Look `name` up leniently and generate.  Unknown names give `count`
/// points at the origin.
pub fn generate_named<R: Rng + ?Sized>(name: &str, count: usize, rng: &mut R) -> Vec<Vec3> {
    generate(ShapeKind::from_name(name), count, rng)
}

// ════════════════════════════════════════════════════════════════════════════
// Sampling laws
// ════════════════════════════════════════════════════════════════════════════

/// Uniform in `[-0.5, 0.5)`.
fn centred<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>() - 0.5
}

fn cloud<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let x = centred(rng) * 12.0;
    let y = centred(rng) * 12.0;
    let z = centred(rng) * 12.0;
    Vec3::new(x, y, z)
}

fn sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let r     = 6.0 * rng.random::<f32>().cbrt();
    let theta = rng.random::<f32>() * TAU;
    let phi   = (2.0 * rng.random::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

fn galaxy<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let r     = rng.random::<f32>().sqrt() * 8.0;
    let spin  = r * 2.5;
    let angle = rng.random::<f32>() * TAU;
    let arm   = (rng.random::<f32>() * 3.0).floor() * (TAU / 3.0);

    let a = angle + spin + arm;
    let y = centred(rng) * (r * 0.2);
    Vec3::new(r * a.cos(), y, r * a.sin())
}

fn heart<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    const SCALE: f32 = 0.3;
    let t = rng.random::<f32>() * TAU;
    let r = rng.random::<f32>().sqrt();

    // x = 16 sin³t,  y = 13 cos t − 5 cos 2t − 2 cos 3t − cos 4t
    let xt = 16.0 * t.sin().powi(3);
    let yt = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();

    let z = centred(rng) * 2.0;
    Vec3::new(xt * SCALE * r, yt * SCALE * r, z)
}

fn ring<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let r     = 6.0 + rng.random::<f32>() * 2.0;
    let theta = rng.random::<f32>() * TAU;
    let y     = centred(rng) * 0.5;
    Vec3::new(r * theta.cos(), y, r * theta.sin())
}

fn dna<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    const RADIUS: f32 = 2.0;
    let h     = centred(rng) * 12.0;
    let angle = h * 2.5;
    // Second strand runs half a turn out of phase.
    let phase = if rng.random::<f32>() > 0.5 { PI } else { 0.0 };

    let a = angle + phase;
    let jx = centred(rng) * 0.5;
    let jz = centred(rng) * 0.5;
    Vec3::new(RADIUS * a.cos() + jx, h, RADIUS * a.sin() + jz)
}

fn torus_knot<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    const P: f32 = 2.0;
    const Q: f32 = 3.0;
    let t    = rng.random::<f32>() * TAU * 3.0;
    let tube = 0.8 + centred(rng) * 0.5;

    let r = 3.0 + (Q * t / P).cos() * 1.5;
    Vec3::new(
        r * t.cos() * tube,
        r * t.sin() * tube,
        (Q * t / P).sin() * 1.5 * tube,
    )
}

fn pyramid<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let h = rng.random::<f32>() * 8.0 - 4.0;
    // Half-width 4 at the base (h = −4) shrinking to 0 at the apex (h = 4).
    let rel = (h + 4.0) / 8.0;
    let w   = 4.0 * (1.0 - rel);
    let x = centred(rng) * 2.0 * w;
    let z = centred(rng) * 2.0 * w;
    Vec3::new(x, h, z)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
