//! Per-particle force and colour laws.
//!
//! | gesture            | effect within the interaction radius          |
//! |--------------------|-----------------------------------------------|
//! | `pinch`            | pull toward the hand                          |
//! | `closed`           | swirl about the hand, in the xy plane         |
//! | anything else      | gentle push away from the hand                |
//!
//! Force magnitude falls off linearly: `(radius - dist) · force_gain · dt`,
//! then scaled by the gesture's gain.

use glam::Vec3;
use hand_gesture::Gesture;

use crate::config::EngineConfig;

/// Below this distance the direction to the hand is undefined and treated
/// as zero.
pub const DIST_EPSILON: f32 = 1e-6;

/// Glow intensity at distance `d < glow_radius` is `GLOW_BASE + (GLOW_REACH - d)`.
pub const GLOW_BASE:  f32 = 2.0;
pub const GLOW_REACH: f32 = 3.0;

/// A hand already mapped into world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldHand {
    pub position: Vec3,
    pub gesture:  Gesture,
}

/// Velocity change one hand applies to one particle this frame.
pub fn hand_force(particle: Vec3, hand: &WorldHand, dt: f32, cfg: &EngineConfig) -> Vec3 {
    let to_hand = hand.position - particle;
    let dist = to_hand.length();
    if !(dist < cfg.interaction_radius) {
        return Vec3::ZERO;
    }
    let dir = if dist > DIST_EPSILON { to_hand / dist } else { Vec3::ZERO };
    let force = (cfg.interaction_radius - dist) * cfg.force_gain * dt;

    match hand.gesture {
        Gesture::Pinch  => dir * (force * cfg.pinch_gain),
        Gesture::Closed => Vec3::new(-dir.y, dir.x, 0.0) * (force * cfg.swirl_gain),
        _               => -dir * (force * cfg.repel_gain),
    }
}

/// Base gradient colour at `x`: `mix · a + (1 - mix) · b`.
pub fn gradient(x: f32, a: Vec3, b: Vec3, frequency: f32) -> Vec3 {
    let mix = ((x * frequency).sin() + 1.0) * 0.5;
    a * mix + b * (1.0 - mix)
}

/// Brightness multiplier: 1 away from every hand, boosted near the closest.
pub fn glow(particle: Vec3, hands: &[WorldHand], glow_radius: f32) -> f32 {
    hands
        .iter()
        .map(|h| h.position.distance(particle))
        .filter(|&d| d < glow_radius)
        .map(|d| GLOW_BASE + (GLOW_REACH - d))
        .fold(1.0, f32::max)
}

/// Final particle colour.
pub fn shade(particle: Vec3, hands: &[WorldHand], a: Vec3, b: Vec3, cfg: &EngineConfig) -> Vec3 {
    gradient(particle.x, a, b, cfg.color_frequency) * glow(particle, hands, cfg.glow_radius)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn at_origin(gesture: Gesture) -> WorldHand {
        WorldHand { position: Vec3::ZERO, gesture }
    }

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn outside_radius_is_inert() {
        let cfg = EngineConfig::default();
        for g in Gesture::ALL {
            assert_eq!(hand_force(Vec3::new(4.0, 0.0, 0.0), &at_origin(g), DT, &cfg), Vec3::ZERO);
            assert_eq!(hand_force(Vec3::new(0.0, 9.0, 0.0), &at_origin(g), DT, &cfg), Vec3::ZERO);
        }
    }

    #[test]
    fn pinch_pulls_toward_hand() {
        let cfg = EngineConfig::default();
        let f = hand_force(Vec3::new(3.0, 0.0, 0.0), &at_origin(Gesture::Pinch), DT, &cfg);
        // (4 - 3) · 20 · dt · 2
        assert!((f.x + 40.0 * DT).abs() < 1e-5);
        assert_eq!(f.y, 0.0);
        assert_eq!(f.z, 0.0);
    }

    #[test]
    fn closed_swirls_perpendicular() {
        let cfg = EngineConfig::default();
        let p = Vec3::new(1.0, 0.0, 0.0);
        let f = hand_force(p, &at_origin(Gesture::Closed), DT, &cfg);
        assert!(f.x.abs() < 1e-6);
        // dir = (-1, 0) so the swirl is (0, -1) · 3 · 20 · dt · 2
        assert!((f.y + 120.0 * DT).abs() < 1e-4);
        assert!(f.dot(p).abs() < 1e-6);
    }

    #[test]
    fn other_gestures_repel() {
        let cfg = EngineConfig::default();
        for g in [Gesture::Open, Gesture::Pointing, Gesture::Victory, Gesture::ThumbsUp, Gesture::ThumbsDown] {
            let f = hand_force(Vec3::new(0.0, 2.0, 0.0), &at_origin(g), DT, &cfg);
            // (4 - 2) · 20 · dt · 0.5
            assert!((f.y - 20.0 * DT).abs() < 1e-5, "{g}: {f:?}");
        }
    }

    #[test]
    fn coincident_particle_gets_no_force() {
        let cfg = EngineConfig::default();
        for g in Gesture::ALL {
            let f = hand_force(Vec3::ZERO, &at_origin(g), DT, &cfg);
            assert_eq!(f, Vec3::ZERO);
        }
    }

    #[test]
    fn non_finite_hand_is_inert() {
        let cfg = EngineConfig::default();
        let hand = WorldHand { position: Vec3::splat(f32::NAN), gesture: Gesture::Pinch };
        assert_eq!(hand_force(Vec3::ONE, &hand, DT, &cfg), Vec3::ZERO);
    }

    #[test]
    fn gradient_endpoints() {
        let a = Vec3::X;
        let b = Vec3::Z;
        // sin(0) = 0 so mix = 0.5
        assert_eq!(gradient(0.0, a, b, 0.2), Vec3::new(0.5, 0.0, 0.5));
        // sin(π/2) = 1 so mix = 1
        let x = std::f32::consts::FRAC_PI_2 / 0.2;
        assert!((gradient(x, a, b, 0.2) - a).length() < 1e-5);
    }

    #[test]
    fn glow_takes_the_brightest_hand() {
        let hands = [
            WorldHand { position: Vec3::new(2.0, 0.0, 0.0), gesture: Gesture::Open },
            WorldHand { position: Vec3::new(0.5, 0.0, 0.0), gesture: Gesture::Open },
        ];
        let g = glow(Vec3::ZERO, &hands, 2.5);
        // nearest at 0.5 → 2 + 2.5
        assert!((g - 4.5).abs() < 1e-6);
        assert_eq!(glow(Vec3::new(10.0, 0.0, 0.0), &hands, 2.5), 1.0);
        assert_eq!(glow(Vec3::ZERO, &[], 2.5), 1.0);
    }
}
