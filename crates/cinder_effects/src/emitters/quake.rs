//! Palette-coloured point effects.

use cinder_shared::constants::PARTICLE_GRAVITY;
use cinder_shared::math::Vec3;
use cinder_shared::palette::ColorRamp;

use crate::particle::{ParticleKind, QuakeSprite, RampState};

use super::Spawner;

/// Particles in a ramp explosion.
pub const EXPLOSION_PARTICLES: usize = 512;

/// Lifetime of a ramp explosion particle.
pub const EXPLOSION_LIFETIME: i32 = 500;

/// A small puff of palette dots drifting along `dir`. Each dot picks a
/// random shade from the eight-entry palette row containing `color`.
#[allow(clippy::cast_possible_truncation)]
pub fn run_effect(spawner: &mut Spawner<'_>, origin: Vec3, dir: Vec3, color: u8, count: usize) -> usize {
    let shader = spawner.media().white;
    let row = color & !7;

    spawner.burst(count, |_, p, rng| {
        p.end_time = p.spawn_time + (100.0 * rng.random() * 5.0) as i32;
        p.fade_start_time = p.end_time;
        p.alpha_velocity = 1.0;
        p.width = 0.5;
        p.height = 0.5;
        p.end_width = 0.5;
        p.end_height = 0.5;
        p.shader = shader;
        p.kind = ParticleKind::Quake(QuakeSprite {
            palette_index: row + rng.below(8) as u8,
            ramp: None,
        });

        p.start_position = Vec3::from_fn(|axis| origin.axis(axis) + rng.crandom() * 8.0 - 4.0);
        p.velocity = dir * 15.0;
        p.acceleration = Vec3::new(0.0, 0.0, -PARTICLE_GRAVITY / 2.0);
    })
}

/// A 512-dot explosion whose colour runs down the hot ramp.
#[allow(clippy::cast_precision_loss)]
pub fn explosion(spawner: &mut Spawner<'_>, origin: Vec3) -> usize {
    let shader = spawner.media().white;
    let ramp = ColorRamp::Hot;

    spawner.burst(EXPLOSION_PARTICLES, |_, p, rng| {
        p.end_time = p.spawn_time + EXPLOSION_LIFETIME;
        p.fade_start_time = p.end_time;
        p.alpha_velocity = 1.0;
        p.width = 0.5;
        p.height = 0.5;
        p.end_width = 0.5;
        p.end_height = 0.5;
        p.shader = shader;
        p.kind = ParticleKind::Quake(QuakeSprite {
            palette_index: ramp.steps()[0],
            ramp: Some(RampState {
                ramp,
                position: rng.below(4) as f32,
            }),
        });

        p.start_position =
            Vec3::from_fn(|axis| origin.axis(axis) + rng.below(32) as f32 - 16.0);
        p.velocity = Vec3::from_fn(|_| rng.below(512) as f32 - 256.0);
        p.acceleration = p.velocity * 4.0;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaHandles;
    use crate::particle::Particle;
    use crate::random::EffectRng;
    use cinder_core::FixedPool;

    fn run(capacity: usize, f: impl FnOnce(&mut Spawner<'_>) -> usize) -> (usize, Vec<Particle>) {
        let media = MediaHandles::default();
        let mut pool = FixedPool::new(capacity);
        let mut rng = EffectRng::new(21);
        let mut dropped = 0;
        let mut spawner = Spawner::new(&mut pool, &mut rng, &media, 1000, &mut dropped);
        let spawned = f(&mut spawner);
        (spawned, pool.iter().map(|(_, p)| *p).collect())
    }

    #[test]
    fn test_run_effect_palette_row() {
        let (spawned, particles) = run(64, |s| run_effect(s, Vec3::ZERO, Vec3::X, 0x6d, 20));
        assert_eq!(spawned, 20);
        for p in particles {
            let ParticleKind::Quake(sprite) = p.kind else {
                panic!("wrong kind {:?}", p.kind);
            };
            assert_eq!(sprite.palette_index & !7, 0x68);
            assert!(sprite.ramp.is_none());
            assert!((1000..=1500).contains(&p.end_time));
            assert_eq!(p.acceleration.z, -PARTICLE_GRAVITY / 2.0);
            assert_eq!(p.velocity, Vec3::new(15.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_explosion_ramps() {
        let (spawned, particles) = run(1024, |s| explosion(s, Vec3::ZERO));
        assert_eq!(spawned, EXPLOSION_PARTICLES);
        for p in particles {
            let ParticleKind::Quake(QuakeSprite { ramp: Some(state), .. }) = p.kind else {
                panic!("expected ramping sprite");
            };
            assert!(state.position < 4.0);
            assert_eq!(p.end_time, 1500);
            assert!(p.start_position.x >= -16.0 && p.start_position.x < 16.0);
            assert!(p.velocity.x >= -256.0 && p.velocity.x < 256.0);
            assert_eq!(p.acceleration, p.velocity * 4.0);
        }
    }

    #[test]
    fn test_explosion_truncated_by_small_pool() {
        let (spawned, particles) = run(100, |s| explosion(s, Vec3::ZERO));
        assert_eq!(spawned, 100);
        assert_eq!(particles.len(), 100);
    }
}
