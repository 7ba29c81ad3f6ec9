//! Screen-facing explosion billboards.

use cinder_shared::math::Vec3;

use crate::particle::ParticleKind;

use super::Spawner;

/// One explosion sprite that grows from `size_start` to `size_end` over
/// `duration` ms at full alpha, then expires. Returns `false` if the pool is
/// full.
pub fn explosion(
    spawner: &mut Spawner<'_>,
    origin: Vec3,
    velocity: Vec3,
    duration: i32,
    (size_start, size_end): (f32, f32),
) -> bool {
    let shader = spawner.media().explosion;
    let duration = duration.max(1);

    spawner.spawn(|p, rng| {
        p.kind = ParticleKind::Sprite;
        p.shader = shader;
        p.end_time = p.spawn_time + duration;
        p.width = size_start;
        p.height = size_start;
        p.end_width = size_end;
        p.end_height = size_end;
        p.roll = rng.random() * 179.0;
        p.start_position = origin;
        p.velocity = velocity;
    })
}
