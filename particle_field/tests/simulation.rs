//! Whole-engine behaviour over many frames: convergence, determinism and the
//! capture → classify → simulate path.

use glam::{Vec2, Vec3};
use hand_gesture::{posed_hand, ClassifierConfig, Gesture, Hand, HandState, HandStateSlot};
use particle_field::{EngineConfig, ParticleEngine, Viewport};
use point_shapes::ShapeKind;
use pretty_assertions::assert_eq;

const DT: f32 = 1.0 / 60.0;

fn seeded(n: usize, shape: ShapeKind, seed: u64) -> EngineConfig {
    EngineConfig { particle_count: n, shape, seed: Some(seed), ..Default::default() }
}

#[test]
fn settles_onto_targets_without_hands() {
    let mut engine = ParticleEngine::new(seeded(1000, ShapeKind::Galaxy, 11)).unwrap();
    let hands = HandState::empty();
    for _ in 0..10_000 {
        engine.step(&hands, DT);
    }
    // residual is the drift, amplitude 0.1 per axis
    let worst = engine
        .positions()
        .iter()
        .zip(engine.targets())
        .map(|(p, t)| p.distance(*t))
        .fold(0.0f32, f32::max);
    assert!(worst < 0.25, "worst distance {worst}");
    assert!(engine.velocities().iter().all(|v| v.length() < 0.05));
    assert_eq!(engine.stats().resets, 0);
}

#[test]
fn same_seed_same_trajectory() {
    let script = |engine: &mut ParticleEngine| {
        let pinch = HandState::new(vec![Hand {
            id: 0, position: Vec2::new(0.2, -0.1), gesture: Gesture::Pinch, pinch_distance: 0.01,
        }]);
        for frame in 0..300 {
            if frame == 100 {
                engine.set_shape(ShapeKind::Dna);
            }
            let hands = if frame % 50 < 25 { pinch.clone() } else { HandState::empty() };
            engine.step(&hands, DT);
        }
    };
    let mut a = ParticleEngine::new(seeded(400, ShapeKind::Heart, 99)).unwrap();
    let mut b = ParticleEngine::new(seeded(400, ShapeKind::Heart, 99)).unwrap();
    script(&mut a);
    script(&mut b);
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.colors(), b.colors());
    assert_eq!(a.targets(), b.targets());
}

#[test]
fn shape_switch_retargets_and_converges() {
    let mut engine = ParticleEngine::new(seeded(500, ShapeKind::Sphere, 5)).unwrap();
    let hands = HandState::empty();
    for _ in 0..600 {
        engine.step(&hands, DT);
    }
    engine.set_shape(ShapeKind::Ring);
    for _ in 0..1200 {
        engine.step(&hands, DT);
    }
    assert_eq!(engine.shape(), ShapeKind::Ring);
    // ring targets are a flat annulus, |y| ≤ 0.25
    assert!(engine.targets().iter().all(|t| t.y.abs() <= 0.25));
    let worst = engine
        .positions()
        .iter()
        .zip(engine.targets())
        .map(|(p, t)| p.distance(*t))
        .fold(0.0f32, f32::max);
    assert!(worst < 0.25, "worst distance {worst}");
}

#[test]
fn pinch_drags_a_particle_through_the_whole_path() {
    // One pinching hand at screen centre and a particle five units right of
    // it.  The interaction radius is widened so the particle is in reach.
    let config = EngineConfig {
        viewport:           Viewport::new(5.0, 5.0),
        interaction_radius: 6.0,
        ..seeded(1, ShapeKind::Cloud, 1)
    };
    let start = vec![Vec3::new(5.0, 0.0, 0.0)];
    let target = vec![Vec3::ZERO];

    let slot = HandStateSlot::new();
    let landmarks = posed_hand(Gesture::Pinch, Vec2::new(0.5, 0.5));
    slot.publish(HandState::classify_batch(&[landmarks.to_vec()], &ClassifierConfig::default()));
    let state = slot.latest();
    assert_eq!(state.hands[0].gesture, Gesture::Pinch);
    assert!(state.hands[0].position.length() < 0.15);

    let mut free = ParticleEngine::with_particles(config.clone(), start.clone(), target.clone()).unwrap();
    let mut held = ParticleEngine::with_particles(config, start, target).unwrap();
    free.step(&HandState::empty(), DT);
    held.step(&state, DT);

    let (fv, hv) = (free.velocities()[0], held.velocities()[0]);
    assert!(hv.x < fv.x, "pinch should add pull toward the hand: {hv:?} vs {fv:?}");
    assert!(held.positions()[0].x < free.positions()[0].x);
}

#[test]
fn closed_fist_orbits_instead_of_collapsing() {
    let config = EngineConfig {
        viewport:        Viewport::new(5.0, 5.0),
        drift_amplitude: 0.0,
        ..seeded(1, ShapeKind::Cloud, 1)
    };
    let mut engine =
        ParticleEngine::with_particles(config, vec![Vec3::new(2.0, 0.0, 0.0)], vec![Vec3::new(2.0, 0.0, 0.0)])
            .unwrap();
    let fist = HandState::new(vec![Hand {
        id: 0, position: Vec2::ZERO, gesture: Gesture::Closed, pinch_distance: 0.3,
    }]);
    engine.step(&fist, DT);
    let v = engine.velocities()[0];
    assert!(v.x.abs() < 1e-6);
    assert!(v.y.abs() > 0.1);
    assert_eq!(v.z, 0.0);
}

#[test]
fn two_hands_forces_add() {
    let config = EngineConfig {
        viewport:        Viewport::new(5.0, 5.0),
        drift_amplitude: 0.0,
        ..seeded(1, ShapeKind::Cloud, 1)
    };
    let open = |x: f32| Hand { id: 0, position: Vec2::new(x, 0.0), gesture: Gesture::Open, pinch_distance: 0.2 };
    let mut left = ParticleEngine::with_particles(config.clone(), vec![Vec3::ZERO], vec![Vec3::ZERO]).unwrap();
    let mut both = ParticleEngine::with_particles(config, vec![Vec3::ZERO], vec![Vec3::ZERO]).unwrap();

    left.step(&HandState::new(vec![open(-0.2)]), DT);
    both.step(&HandState::new(vec![open(-0.2), open(0.2)]), DT);
    // a hand either side at equal distance cancels
    assert!(left.velocities()[0].x > 0.0);
    assert!(both.velocities()[0].length() < 1e-6);
}

#[test]
fn hostile_frame_times_stay_finite() {
    let mut engine = ParticleEngine::new(seeded(200, ShapeKind::TorusKnot, 3)).unwrap();
    let pinch = HandState::new(vec![Hand {
        id: 0, position: Vec2::new(0.0, 0.0), gesture: Gesture::Pinch, pinch_distance: 0.0,
    }]);
    for dt in [f32::NAN, f32::INFINITY, -1.0, 0.0, 1e6, DT] {
        engine.step(&pinch, dt);
    }
    assert!(engine.positions().iter().all(|p| p.is_finite()));
    assert!(engine.colors().iter().all(|c| c.is_finite()));
    // only the 1e6 (clamped) and the last frame advanced time
    assert!((engine.elapsed() - (0.1 + DT)).abs() < 1e-5);
}
