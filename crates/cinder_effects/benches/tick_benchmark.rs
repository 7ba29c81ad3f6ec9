//! # Effects Tick Benchmark
//!
//! Measures one full frame of the effects pipeline:
//! 1. A particle pass over a busy pool (rocket explosions, sparks, snow)
//! 2. A mark pass over a full mark ring
//! 3. Mark creation on a full ring (eviction path)

#![allow(missing_docs)]

use cinder_effects::emitters::area::{spawn_area, ParticleArea};
use cinder_effects::emitters::beam::{tracer_sparks, TracerSparks};
use cinder_effects::emitters::lfx;
use cinder_effects::interfaces::testing::{FloorWorld, OpenWorld, RecordingRenderer};
use cinder_effects::{EffectsConfig, EffectsContext, ImpactMark, ViewState};
use cinder_shared::math::Vec3;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const FRAME_MS: i32 = 16;

#[allow(clippy::cast_precision_loss)]
fn busy_context(renderer: &mut RecordingRenderer) -> EffectsContext {
    let mut ctx = EffectsContext::new(EffectsConfig::default(), renderer).unwrap();
    ctx.reset(0);

    if let Ok(Some(area)) = ParticleArea::parse("1 0 0 256 0 0 0 400 1 1") {
        spawn_area(&mut ctx.spawner(0), &area);
    }
    for i in 0..8 {
        let origin = Vec3::new(i as f32 * 48.0, 0.0, 4.0);
        lfx::rocket_explosion(&mut ctx.spawner(0), renderer, origin, Vec3::Z);
    }
    let sparks = TracerSparks {
        origin: Vec3::new(0.0, 0.0, 64.0),
        dir: Vec3::Z,
        count: 400,
        speed: 250.0,
        duration: 60_000,
        bounce: true,
    };
    tracer_sparks(&mut ctx.spawner(0), &sparks);
    ctx
}

fn bench_particle_pass(c: &mut Criterion) {
    let mut renderer = RecordingRenderer::new();
    let mut ctx = busy_context(&mut renderer);
    let view = ViewState::from_angles(Vec3::new(-200.0, 0.0, 64.0), [0.0, 0.0, 0.0]);
    let world = FloorWorld::new(0.0);
    let mut now = 0;

    c.bench_function("add_particles_busy_pool", |b| {
        b.iter(|| {
            // Refill every 100 frames so the pool stays busy.
            now += 1;
            if now > 100 {
                ctx = busy_context(&mut renderer);
                now = 1;
            }
            renderer.clear_frame();
            let stats = ctx.add_particles(now * FRAME_MS, &view, &mut renderer, &world);
            black_box(stats)
        });
    });
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn full_marks(renderer: &mut RecordingRenderer) -> (EffectsContext, ImpactMark) {
    let mut ctx = EffectsContext::new(EffectsConfig::default(), renderer).unwrap();
    let mark = ImpactMark {
        shader: ctx.media().burn_mark,
        origin: Vec3::ZERO,
        dir: Vec3::Z,
        orientation: 0.0,
        color: [1.0; 4],
        alpha_fade: true,
        radius: 16.0,
        temporary: false,
    };
    let capacity = ctx.config().mark_capacity;
    for t in 0..capacity as i32 {
        ctx.impact_mark(t, &mark, &OpenWorld, renderer);
    }
    (ctx, mark)
}

fn bench_mark_pass(c: &mut Criterion) {
    let mut renderer = RecordingRenderer::new();
    let (mut ctx, _) = full_marks(&mut renderer);

    c.bench_function("add_marks_full_ring", |b| {
        b.iter(|| {
            renderer.clear_frame();
            black_box(ctx.add_marks(9_500, &mut renderer))
        });
    });
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn bench_mark_eviction(c: &mut Criterion) {
    let mut renderer = RecordingRenderer::new();
    let (mut ctx, mark) = full_marks(&mut renderer);
    let mut now = ctx.config().mark_capacity as i32;

    c.bench_function("impact_mark_on_full_ring", |b| {
        b.iter(|| {
            now += 1;
            black_box(ctx.impact_mark(now, &mark, &OpenWorld, &mut renderer))
        });
    });
}

criterion_group!(benches, bench_particle_pass, bench_mark_pass, bench_mark_eviction);
criterion_main!(benches);
