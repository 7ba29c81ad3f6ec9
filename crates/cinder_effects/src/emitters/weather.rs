//! Snow and bubbles looping inside a vertical band.

use cinder_shared::math::Vec3;

use crate::particle::integrate::TURBULENCE_DRIFT;
use crate::particle::{Particle, ParticleKind, Weather, WeatherStyle};
use crate::random::EffectRng;

use super::Spawner;

/// Fall speed of snow.
pub const SNOW_FALL_SPEED: f32 = 50.0;

/// Rise speed of bubbles.
pub const BUBBLE_RISE_SPEED: f32 = 50.0;

/// Where and how a weather particle lives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeatherVolume {
    /// Centre of the area; its z is one end of the band.
    pub origin: Vec3,
    /// Its z is the other end of the band.
    pub origin2: Vec3,
    /// Horizontal half-extent around `origin`.
    pub range: f32,
    /// Re-randomise horizontal drift on every wrap.
    pub turbulent: bool,
    /// Area id for [`snow_link`](crate::EffectsContext::snow_link).
    pub snow_id: i32,
}

fn place(p: &mut Particle, volume: &WeatherVolume, style: WeatherStyle, rng: &mut EffectRng) {
    let weather = Weather {
        style,
        turbulent: volume.turbulent,
        band_start: volume.origin.z,
        band_end: volume.origin2.z,
        linked: true,
        snow_id: volume.snow_id,
    };
    let (min, max) = weather.band();
    p.kind = ParticleKind::Weather(weather);
    p.start_position = Vec3::new(
        volume.origin.x + rng.crandom() * volume.range,
        volume.origin.y + rng.crandom() * volume.range,
        min + rng.random() * (max - min),
    );
    if volume.turbulent {
        p.velocity.x = rng.crandom() * TURBULENCE_DRIFT;
        p.velocity.y = rng.crandom() * TURBULENCE_DRIFT;
    }
}

/// One snow flake.
pub fn snow(spawner: &mut Spawner<'_>, volume: &WeatherVolume) -> bool {
    let shader = spawner.media().snow_flake;
    spawner.spawn(|p, rng| {
        place(p, volume, WeatherStyle::Snow, rng);
        p.shader = shader;
        p.alpha = 0.4;
        p.width = 1.0;
        p.height = 1.0;
        p.end_width = 1.0;
        p.end_height = 1.0;
        p.velocity.z = -SNOW_FALL_SPEED;
    })
}

/// One bubble.
pub fn bubble(spawner: &mut Spawner<'_>, volume: &WeatherVolume) -> bool {
    let shader = spawner.media().water_bubble;
    spawner.spawn(|p, rng| {
        place(p, volume, WeatherStyle::Bubble, rng);
        p.shader = shader;
        p.alpha = 0.4;
        let size = 1.0 + rng.crandom() * 0.5;
        p.width = size;
        p.height = size;
        p.end_width = size;
        p.end_height = size;
        p.velocity.z = BUBBLE_RISE_SPEED + rng.crandom() * 10.0;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaHandles;
    use cinder_core::FixedPool;

    fn volume(turbulent: bool) -> WeatherVolume {
        WeatherVolume {
            origin: Vec3::new(100.0, 100.0, 256.0),
            origin2: Vec3::new(100.0, 100.0, 0.0),
            range: 64.0,
            turbulent,
            snow_id: 3,
        }
    }

    #[test]
    fn test_snow_placed_inside_volume() {
        let media = MediaHandles::default();
        let mut pool = FixedPool::new(64);
        let mut rng = EffectRng::new(2);
        let mut dropped = 0;
        let mut spawner = Spawner::new(&mut pool, &mut rng, &media, 0, &mut dropped);
        for _ in 0..32 {
            assert!(snow(&mut spawner, &volume(false)));
        }

        for (_, p) in pool.iter() {
            let ParticleKind::Weather(weather) = p.kind else {
                panic!("expected weather");
            };
            assert!(weather.linked);
            assert_eq!(weather.snow_id, 3);
            assert_eq!(weather.band(), (0.0, 256.0));
            assert!((0.0..=256.0).contains(&p.position.z));
            assert!((p.position.x - 100.0).abs() <= 64.0);
            assert_eq!(p.velocity, Vec3::new(0.0, 0.0, -SNOW_FALL_SPEED));
            assert!(p.alpha > 0.0);
        }
    }

    #[test]
    fn test_turbulent_bubbles_drift_and_rise() {
        let media = MediaHandles::default();
        let mut pool = FixedPool::new(64);
        let mut rng = EffectRng::new(4);
        let mut dropped = 0;
        let mut spawner = Spawner::new(&mut pool, &mut rng, &media, 0, &mut dropped);
        for _ in 0..16 {
            assert!(bubble(&mut spawner, &volume(true)));
        }

        assert!(pool.iter().any(|(_, p)| p.velocity.x != 0.0));
        for (_, p) in pool.iter() {
            assert!(p.velocity.z >= BUBBLE_RISE_SPEED - 10.0);
            assert!(p.velocity.x.abs() <= TURBULENCE_DRIFT);
            assert!(p.width >= 0.5 && p.width <= 1.5);
        }
    }
}
