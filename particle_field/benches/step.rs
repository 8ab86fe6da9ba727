use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::Vec2;
use hand_gesture::{Gesture, Hand, HandState};
use particle_field::{EngineConfig, ParticleEngine};
use point_shapes::ShapeKind;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

fn engine(count: usize) -> ParticleEngine {
    let config = EngineConfig { particle_count: count, seed: Some(1), ..Default::default() };
    ParticleEngine::new(config).unwrap()
}

fn two_hands() -> HandState {
    HandState::new(vec![
        Hand { id: 0, position: Vec2::new(-0.3, 0.1), gesture: Gesture::Pinch,  pinch_distance: 0.01 },
        Hand { id: 1, position: Vec2::new(0.4, -0.2), gesture: Gesture::Closed, pinch_distance: 0.2 },
    ])
}

fn step_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    for count in [1000usize, 8000] {
        group.bench_with_input(BenchmarkId::new("no_hands", count), &count, |b, &n| {
            let mut e = engine(n);
            let hands = HandState::empty();
            b.iter(|| e.step(black_box(&hands), black_box(1.0 / 60.0)))
        });
        group.bench_with_input(BenchmarkId::new("two_hands", count), &count, |b, &n| {
            let mut e = engine(n);
            let hands = two_hands();
            b.iter(|| e.step(black_box(&hands), black_box(1.0 / 60.0)))
        });
    }
    group.finish();
}

fn generate_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    for kind in [ShapeKind::Sphere, ShapeKind::Galaxy, ShapeKind::TorusKnot] {
        c.bench_function(&format!("generate_{kind}_8000"), |b| {
            b.iter(|| black_box(point_shapes::generate(kind, 8000, &mut rng)))
        });
    }
}

criterion_group!(benches, step_benchmark, generate_benchmark);
criterion_main!(benches);
