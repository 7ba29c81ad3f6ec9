//! Particle-area records.
//!
//! The server describes snow and bubble areas as whitespace-separated text:
//!
//! ```text
//! type  ox oy oz  ex ey ez  count  turbulence  snow_id
//! ```
//!
//! `type` picks the horizontal range and whether the area snows
//! (`type < 4`) or bubbles.

use std::str::FromStr;

use cinder_shared::math::Vec3;

use crate::error::{EffectsError, EffectsResult};
use crate::particle::WeatherStyle;

use super::weather::{bubble, snow, WeatherVolume};
use super::Spawner;

/// Horizontal range for each area type.
pub const AREA_RANGES: [f32; 8] = [256.0, 128.0, 64.0, 32.0, 8.0, 16.0, 32.0, 64.0];

/// A parsed particle area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleArea {
    /// Raw area type.
    pub area_type: i32,
    /// One corner; its z is one end of the band.
    pub origin: Vec3,
    /// Other corner; its z is the other end of the band.
    pub origin2: Vec3,
    /// Particles to spawn.
    pub count: u32,
    /// Turbulent drift.
    pub turbulent: bool,
    /// Link id.
    pub snow_id: i32,
}

/// Horizontal range for an area type; unknown types get zero.
#[must_use]
pub fn range_for_type(area_type: i32) -> f32 {
    usize::try_from(area_type)
        .ok()
        .and_then(|i| AREA_RANGES.get(i).copied())
        .unwrap_or(0.0)
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl Tokens<'_> {
    fn next<T: FromStr>(&mut self, field: &'static str) -> EffectsResult<T> {
        let token = self.inner.next().ok_or_else(|| EffectsError::MalformedArea {
            field,
            reason: "missing".to_string(),
        })?;
        token.parse().map_err(|_| EffectsError::MalformedArea {
            field,
            reason: format!("{token:?} is not a number"),
        })
    }

    fn vec3(&mut self, field: &'static str) -> EffectsResult<Vec3> {
        Ok(Vec3::new(self.next(field)?, self.next(field)?, self.next(field)?))
    }
}

impl ParticleArea {
    /// Parses an area record. An empty record means "no area" and yields
    /// `Ok(None)`. Trailing tokens are ignored.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn parse(text: &str) -> EffectsResult<Option<Self>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let mut tokens = Tokens {
            inner: text.split_whitespace(),
        };
        let area_type: i32 = tokens.next("type")?;
        let origin = tokens.vec3("origin")?;
        let origin2 = tokens.vec3("origin2")?;
        let count: i32 = tokens.next("count")?;
        let turbulence: i32 = tokens.next("turbulence")?;
        let snow_id: i32 = tokens.next("snow_id")?;

        if !(0..AREA_RANGES.len() as i32).contains(&area_type) {
            tracing::warn!("Unknown particle area type {}, using range 0", area_type);
        }

        Ok(Some(Self {
            area_type,
            origin,
            origin2,
            count: count.max(0) as u32,
            turbulent: turbulence != 0,
            snow_id,
        }))
    }

    /// Horizontal range of the area.
    #[must_use]
    pub fn range(&self) -> f32 {
        range_for_type(self.area_type)
    }

    /// Snow for types below 4, bubbles otherwise.
    #[must_use]
    pub fn style(&self) -> WeatherStyle {
        if self.area_type < 4 {
            WeatherStyle::Snow
        } else {
            WeatherStyle::Bubble
        }
    }

    /// The volume each particle is placed in.
    #[must_use]
    pub fn volume(&self) -> WeatherVolume {
        WeatherVolume {
            origin: self.origin,
            origin2: self.origin2,
            range: self.range(),
            turbulent: self.turbulent,
            snow_id: self.snow_id,
        }
    }
}

/// Spawns every particle of an area, stopping early if the pool fills.
/// Returns how many were spawned.
pub fn spawn_area(spawner: &mut Spawner<'_>, area: &ParticleArea) -> usize {
    let volume = area.volume();
    let style = area.style();

    let mut spawned = 0;
    for _ in 0..area.count {
        let ok = match style {
            WeatherStyle::Snow => snow(spawner, &volume),
            WeatherStyle::Bubble => bubble(spawner, &volume),
        };
        if !ok {
            break;
        }
        spawned += 1;
    }

    tracing::debug!(
        "Spawned {}/{} particles for area {} ({:?})",
        spawned,
        area.count,
        area.snow_id,
        style
    );
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaHandles;
    use crate::particle::{Particle, ParticleKind};
    use crate::random::EffectRng;
    use cinder_core::FixedPool;

    #[test]
    fn test_parse_full_record() {
        let area = ParticleArea::parse("1 0 0 256  10 20 0  50 1 7").unwrap().unwrap();
        assert_eq!(area.area_type, 1);
        assert_eq!(area.origin, Vec3::new(0.0, 0.0, 256.0));
        assert_eq!(area.origin2, Vec3::new(10.0, 20.0, 0.0));
        assert_eq!(area.count, 50);
        assert!(area.turbulent);
        assert_eq!(area.snow_id, 7);
        assert_eq!(area.range(), 128.0);
        assert_eq!(area.style(), WeatherStyle::Snow);
    }

    #[test]
    fn test_parse_empty_is_none() {
        assert_eq!(ParticleArea::parse(""), Ok(None));
        assert_eq!(ParticleArea::parse("   "), Ok(None));
    }

    #[test]
    fn test_parse_errors_name_field() {
        assert_eq!(
            ParticleArea::parse("4 0 0 0 0 0 0 10 0"),
            Err(EffectsError::MalformedArea {
                field: "snow_id",
                reason: "missing".to_string(),
            })
        );
        match ParticleArea::parse("2 0 0 x 0 0 0 10 0 1") {
            Err(EffectsError::MalformedArea { field, .. }) => assert_eq!(field, "origin"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_range_table() {
        let ranges: Vec<f32> = (0..8).map(range_for_type).collect();
        assert_eq!(ranges, AREA_RANGES.to_vec());
        assert_eq!(range_for_type(8), 0.0);
        assert_eq!(range_for_type(-1), 0.0);
    }

    #[test]
    fn test_unknown_type_still_parses() {
        let area = ParticleArea::parse("9 0 0 0 0 0 64 3 0 0").unwrap().unwrap();
        assert_eq!(area.range(), 0.0);
        assert_eq!(area.style(), WeatherStyle::Bubble);
    }

    #[test]
    fn test_spawn_area_uses_style() {
        let area = ParticleArea::parse("5 0 0 0 0 0 64 12 0 2").unwrap().unwrap();
        let media = MediaHandles::default();
        let mut pool: FixedPool<Particle> = FixedPool::new(8);
        let mut rng = EffectRng::new(0);
        let mut dropped = 0;
        let mut spawner = Spawner::new(&mut pool, &mut rng, &media, 0, &mut dropped);

        assert_eq!(spawn_area(&mut spawner, &area), 8);
        assert_eq!(dropped, 1);
        for (_, p) in pool.iter() {
            let ParticleKind::Weather(weather) = p.kind else {
                panic!("expected weather");
            };
            assert_eq!(weather.style, WeatherStyle::Bubble);
            assert_eq!(weather.snow_id, 2);
            assert!(p.position.x.abs() <= 16.0);
        }
    }
}
