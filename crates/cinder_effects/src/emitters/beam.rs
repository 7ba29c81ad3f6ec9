//! Velocity-stretched tracer sparks.

use cinder_shared::constants::PARTICLE_GRAVITY;
use cinder_shared::math::Vec3;

use crate::particle::{CollisionBehavior, ParticleKind};

use super::Spawner;

/// Spark colour: hot yellow-white.
pub const TRACER_COLOR: [f32; 4] = [1.0, 0.85, 0.45, 1.0];

/// Sparks thrown off an impact point along `dir`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TracerSparks {
    /// Impact point.
    pub origin: Vec3,
    /// Surface normal or ricochet direction.
    pub dir: Vec3,
    /// Number of sparks.
    pub count: u32,
    /// Launch speed.
    pub speed: f32,
    /// Lifetime in milliseconds.
    pub duration: i32,
    /// Let sparks skip off the world.
    pub bounce: bool,
}

/// Spawns the sparks. Their beam brightness falls off with the square of
/// the remaining fade. Returns how many were spawned.
pub fn tracer_sparks(spawner: &mut Spawner<'_>, sparks: &TracerSparks) -> usize {
    let shader = spawner.media().spark;
    let dir = sparks.dir.normalize().unwrap_or(Vec3::Z);

    spawner.burst(sparks.count as usize, |_, p, rng| {
        p.kind = ParticleKind::Spark;
        p.shader = shader;
        p.end_time = p.spawn_time + sparks.duration;
        p.fade_start_time = p.spawn_time;
        p.width = 0.5;
        p.height = 0.5;
        p.end_width = 0.25;
        p.end_height = 0.25;
        p.set_flat_color(TRACER_COLOR);

        p.start_position = sparks.origin;
        let scatter = Vec3::from_fn(|_| rng.crandom() * sparks.speed * 0.35);
        p.velocity = dir * (sparks.speed * (0.5 + rng.random())) + scatter;
        p.acceleration = Vec3::new(0.0, 0.0, -PARTICLE_GRAVITY);
        p.collision = if sparks.bounce {
            CollisionBehavior::Bounce(0.5)
        } else {
            CollisionBehavior::None
        };
    })
}
