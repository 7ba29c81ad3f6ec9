//! # Slot Pool Benchmark
//!
//! Measures the two exhaustion policies under effect-like churn:
//! 1. `FixedPool` fill, retain pass and refill (particle frame)
//! 2. `RingPool` allocation on a full ring (mark eviction)

#![allow(missing_docs)]

use cinder_core::{FixedPool, RingPool};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const PARTICLES: usize = 2048;
const MARKS: usize = 1024;

#[derive(Default, Clone, Copy)]
struct Payload {
    birth: i32,
    life: i32,
    data: [f32; 12],
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn bench_fixed_pool_frame(c: &mut Criterion) {
    let mut pool: FixedPool<Payload> = FixedPool::new(PARTICLES);
    let mut now = 0;

    c.bench_function("fixed_pool_fill_retain_2048", |b| {
        b.iter(|| {
            now += 16;
            while let Some(h) = pool.allocate() {
                if let Some(p) = pool.get_mut(h) {
                    p.birth = now;
                    p.life = (h.index() as i32 % 7) * 16;
                }
            }
            let released = pool.retain_active(|_, p| p.birth + p.life > now);
            black_box(released)
        });
    });
}

fn bench_ring_eviction(c: &mut Criterion) {
    let mut ring: RingPool<Payload> = RingPool::new(MARKS);
    let mut now = 0;
    for _ in 0..MARKS {
        let alloc = ring.allocate_evicting(|p| p.birth);
        if let Some(p) = ring.get_mut(alloc.handle) {
            p.birth = now;
        }
        now += 1;
    }

    c.bench_function("ring_pool_allocate_full_1024", |b| {
        b.iter(|| {
            let alloc = ring.allocate_evicting(|p| p.birth);
            if let Some(p) = ring.get_mut(alloc.handle) {
                p.birth = now;
            }
            now += 1;
            black_box(alloc.evicted)
        });
    });
}

criterion_group!(benches, bench_fixed_pool_frame, bench_ring_eviction);
criterion_main!(benches);
