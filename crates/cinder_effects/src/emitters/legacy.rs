//! Single-particle smoke presets with emissive fade.
//!
//! Each call spawns one rotating puff that darkens as it fades over the
//! second half of its life.

use cinder_shared::constants::PARTICLE_GRAVITY;
use cinder_shared::math::Vec3;

use crate::interfaces::ShaderHandle;
use crate::particle::{Particle, ParticleKind, Smoke, SmokeTint};
use crate::random::EffectRng;

use super::Spawner;

/// Shared parameters of the legacy presets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Burst {
    /// Emission point.
    pub origin: Vec3,
    /// Direction, scaled per preset.
    pub velocity: Vec3,
    /// Lifetime in milliseconds.
    pub duration: i32,
    /// Horizontal origin jitter on x.
    pub spread_x: f32,
    /// Horizontal origin jitter on y.
    pub spread_y: f32,
    /// Speed multiplier.
    pub speed: f32,
}

fn emissive(
    p: &mut Particle,
    burst: &Burst,
    shader: ShaderHandle,
    (size, end_size): (f32, f32),
    rng: &mut EffectRng,
) {
    p.kind = ParticleKind::Smoke(Smoke {
        tint: SmokeTint::EmissiveFade,
        impact: false,
    });
    p.shader = shader;
    p.end_time = p.spawn_time + burst.duration;
    p.fade_start_time = p.spawn_time + burst.duration / 2;
    p.rotate = true;
    p.width = size;
    p.height = size;
    p.end_width = end_size;
    p.end_height = end_size;
    p.start_position = burst.origin
        + Vec3::new(rng.crandom() * burst.spread_x, rng.crandom() * burst.spread_y, 0.0);
}

/// A spurt of blood sized by `damage`.
pub fn blood_spurt(spawner: &mut Spawner<'_>, burst: &Burst, damage: f32) -> bool {
    let shader = spawner.media().blood;
    spawner.spawn(|p, rng| {
        emissive(p, burst, shader, (8.0 * damage, 4.0), rng);
        p.start_position = burst.origin;
        p.alpha_velocity = 0.8;
        p.velocity = Vec3::from_fn(|axis| {
            rng.crandom() * 824.0 * burst.velocity.axis(axis) * burst.speed
        });
        p.acceleration = Vec3::new(0.0, 0.0, -PARTICLE_GRAVITY * 3.0);
    })
}

/// A soft puff that grows to 1.8 times `size`.
pub fn puff(spawner: &mut Spawner<'_>, burst: &Burst, size: f32) -> bool {
    let shader = spawner.media().puff;
    spawner.spawn(|p, rng| {
        emissive(p, burst, shader, (size, size * 1.8), rng);
        p.alpha = 0.8;
        p.alpha_velocity = 0.8;
        p.velocity = burst.velocity * burst.speed + Vec3::from_fn(|_| rng.crandom() * 44.0);
        p.roll = rng.crandom() * 256.0 - 128.0;
        p.acceleration = Vec3::splat(-2.0);
    })
}

/// A violent puff that grows to six times `size`.
pub fn blast(spawner: &mut Spawner<'_>, burst: &Burst, size: f32) -> bool {
    let shader = spawner.media().blast;
    spawner.spawn(|p, rng| {
        emissive(p, burst, shader, (size, size * 6.0), rng);
        p.alpha_velocity = 0.72;
        p.velocity = burst.velocity * burst.speed + Vec3::from_fn(|_| rng.crandom() * 84.0);
        p.roll = rng.crandom() * 256.0 - 128.0;
        p.acceleration = Vec3::splat(-2.0);
    })
}

/// A bright spark thrown mostly upward, for explosions.
pub fn explosion_sparks(spawner: &mut Spawner<'_>, burst: &Burst) -> bool {
    let shader = spawner.media().spark;
    spawner.spawn(|p, rng| {
        emissive(p, burst, shader, (9.0, 32.0), rng);
        p.alpha = 0.8;
        let kick = Vec3::new(
            rng.crandom() * 524.0,
            rng.crandom() * 524.0,
            (120.0 + rng.crandom() * 780.0) * burst.speed,
        );
        p.velocity = burst.velocity * 15.0 + kick;
    })
}

/// A water splash thrown hard upward and pulled back down.
pub fn splash(spawner: &mut Spawner<'_>, burst: &Burst) -> bool {
    let shader = spawner.media().splash;
    spawner.spawn(|p, rng| {
        emissive(p, burst, shader, (4.0, 2.0), rng);
        p.alpha = 0.9;
        let v = burst.velocity;
        p.velocity = Vec3::new(
            v.x * 44.0 + rng.crandom() * 4.0,
            v.y * 44.0 + rng.crandom() * 4.0,
            v.z * 872.0 + (20.0 + rng.crandom() * 10.0) * burst.speed,
        );
        p.acceleration = Vec3::new(
            rng.crandom() * 3.0,
            rng.crandom() * 3.0,
            -PARTICLE_GRAVITY * 4.2,
        );
    })
}
