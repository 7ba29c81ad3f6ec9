//! # Emitter Presets
//!
//! Named recipes that fill particles in. Presets only ever go through
//! [`Spawner::spawn`]; they never see the pool's lists. When the pool runs
//! dry a preset simply stops, and the dropped request is counted in the
//! next [`FrameStats`](crate::FrameStats).
//!
//! | Module | Family |
//! |---|---|
//! | [`lfx`] | colour-cycling smoke, shockwaves, sparks and blood |
//! | [`legacy`] | rotating smoke puffs with emissive fade |
//! | [`beam`] | velocity-stretched tracer sparks |
//! | [`sprite`] | animated explosion billboards |
//! | [`quake`] | palette dots and ramp explosions |
//! | [`weather`] | snow and bubbles |
//! | [`area`] | particle-area records from the server |

pub mod area;
pub mod beam;
pub mod legacy;
pub mod lfx;
pub mod quake;
pub mod sprite;
pub mod weather;

use cinder_core::FixedPool;

use crate::media::MediaHandles;
use crate::particle::Particle;
use crate::random::EffectRng;

/// Borrowed view of the context that presets spawn through.
pub struct Spawner<'a> {
    pool: &'a mut FixedPool<Particle>,
    rng: &'a mut EffectRng,
    media: &'a MediaHandles,
    now: i32,
    dropped: &'a mut usize,
}

impl<'a> Spawner<'a> {
    /// Creates a spawner. `dropped` is incremented for every request the
    /// pool could not satisfy.
    pub fn new(
        pool: &'a mut FixedPool<Particle>,
        rng: &'a mut EffectRng,
        media: &'a MediaHandles,
        now: i32,
        dropped: &'a mut usize,
    ) -> Self {
        Self {
            pool,
            rng,
            media,
            now,
            dropped,
        }
    }

    /// Render clock the particles are stamped with.
    #[must_use]
    pub fn now(&self) -> i32 {
        self.now
    }

    /// Registered shaders.
    #[must_use]
    pub fn media(&self) -> &MediaHandles {
        self.media
    }

    /// Jitter source.
    pub fn rng(&mut self) -> &mut EffectRng {
        &mut *self.rng
    }

    /// Allocates one particle and lets `init` fill it in.
    ///
    /// Before `init` runs, every time field is set to now and alpha to 1.
    /// Afterwards the current and previous positions are set to
    /// `start_position`. Returns `false` if the pool is exhausted.
    pub fn spawn(&mut self, init: impl FnOnce(&mut Particle, &mut EffectRng)) -> bool {
        let Some(handle) = self.pool.allocate() else {
            *self.dropped += 1;
            tracing::trace!("Particle pool exhausted, spawn dropped");
            return false;
        };
        let Some(p) = self.pool.get_mut(handle) else {
            return false;
        };

        p.spawn_time = self.now;
        p.start_time = self.now;
        p.end_time = self.now;
        p.fade_start_time = self.now;
        p.alpha = 1.0;

        init(p, &mut *self.rng);

        p.position = p.start_position;
        p.stretch_origin = p.start_position;
        true
    }

    /// Spawns up to `count` particles, stopping at the first failure.
    /// `init` also receives the particle's index within the burst. Returns
    /// how many were spawned.
    pub fn burst(
        &mut self,
        count: usize,
        mut init: impl FnMut(usize, &mut Particle, &mut EffectRng),
    ) -> usize {
        for i in 0..count {
            if !self.spawn(|p, rng| init(i, p, rng)) {
                return i;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinder_shared::math::Vec3;

    #[test]
    fn test_spawn_stamps_times_and_positions() {
        let mut pool = FixedPool::new(4);
        let mut rng = EffectRng::new(1);
        let media = MediaHandles::default();
        let mut dropped = 0;
        let mut spawner = Spawner::new(&mut pool, &mut rng, &media, 500, &mut dropped);

        assert!(spawner.spawn(|p, _| p.start_position = Vec3::new(1.0, 2.0, 3.0)));

        let (_, p) = pool.iter().next().unwrap();
        assert_eq!(p.spawn_time, 500);
        assert_eq!(p.start_time, 500);
        assert_eq!(p.alpha, 1.0);
        assert_eq!(p.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(p.stretch_origin, p.position);
    }

    #[test]
    fn test_burst_stops_at_exhaustion() {
        let mut pool = FixedPool::new(3);
        let mut rng = EffectRng::new(1);
        let media = MediaHandles::default();
        let mut dropped = 0;
        let mut spawner = Spawner::new(&mut pool, &mut rng, &media, 0, &mut dropped);

        assert_eq!(spawner.burst(10, |_, _, _| {}), 3);
        assert_eq!(dropped, 1);
        assert_eq!(pool.free_count(), 0);
    }
}
