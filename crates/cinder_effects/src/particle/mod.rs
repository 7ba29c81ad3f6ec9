//! # Particles
//!
//! A particle is plain data living in a [`FixedPool`](cinder_core::FixedPool)
//! slot. Presets fill it in, the integrator advances it in closed form, and
//! the geometry builder turns it into one or two polygons per frame.
//!
//! ## Variants
//!
//! | Kind | Drawn as | Expires at `end_time` |
//! |---|---|---|
//! | `Sprite` | camera-facing quad, optional roll | yes |
//! | `Weather` | snow triangle / bubble quad | no |
//! | `Smoke` | rolling quad with tint and fade | yes |
//! | `Lfx` | 5-stop colour cycle: smoke, shock or spark | yes |
//! | `Spark` | velocity-stretched beam | yes |
//! | `Quake` | palette-coloured dot, optional ramp | yes |

pub mod geometry;
pub mod integrate;

use cinder_shared::math::Vec3;
use cinder_shared::palette::ColorRamp;

use crate::interfaces::ShaderHandle;

/// Tint applied to smoke puffs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SmokeTint {
    /// Plain white.
    #[default]
    White,
    /// Dark blood red.
    BloodRed,
    /// Grey that darkens with distance.
    Grey75,
    /// White that fades to black along with the alpha ramp.
    EmissiveFade,
}

/// Smoke parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Smoke {
    /// Colour rule.
    pub tint: SmokeTint,
    /// Impact puffs use the global rolling basis instead of their own roll
    /// and are culled by distance.
    pub impact: bool,
}

/// Which billboard an LFX particle draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LfxStyle {
    /// Camera-facing puff, optionally rolled.
    #[default]
    Smoke,
    /// Quad lying across the particle's `direction` (shockwave rings).
    Shock,
    /// Streak along the motion since last frame plus a faint glow.
    Spark,
}

/// Snow or bubble.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WeatherStyle {
    /// Falling flake, drawn as a triangle.
    #[default]
    Snow,
    /// Rising bubble, drawn as a quad.
    Bubble,
}

/// Weather parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Weather {
    /// Snow or bubble.
    pub style: WeatherStyle,
    /// Re-randomise horizontal drift whenever the particle wraps.
    pub turbulent: bool,
    /// One end of the vertical band.
    pub band_start: f32,
    /// Other end of the vertical band.
    pub band_end: f32,
    /// Visibility link. Unlinked particles simulate but do not draw.
    pub linked: bool,
    /// Area id used by [`snow_link`](crate::EffectsContext::snow_link).
    pub snow_id: i32,
}

impl Weather {
    /// `(min, max)` of the band regardless of the order it was given in.
    #[must_use]
    pub fn band(&self) -> (f32, f32) {
        (
            self.band_start.min(self.band_end),
            self.band_start.max(self.band_end),
        )
    }
}

/// Palette ramp progress of a ramping palette sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RampState {
    /// Ramp table.
    pub ramp: ColorRamp,
    /// Position in steps; the sprite dies when this reaches the end.
    pub position: f32,
}

/// Palette sprite parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuakeSprite {
    /// Palette index used when not ramping.
    pub palette_index: u8,
    /// Active colour ramp, if any.
    pub ramp: Option<RampState>,
}

/// Closed set of particle kinds, each with its own draw rule.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ParticleKind {
    /// Plain camera-facing sprite.
    #[default]
    Sprite,
    /// Snow or bubble looping in a vertical band.
    Weather(Weather),
    /// Tinted rolling smoke.
    Smoke(Smoke),
    /// Colour-cycling LFX particle.
    Lfx(LfxStyle),
    /// Velocity-stretched beam.
    Spark,
    /// Palette sprite.
    Quake(QuakeSprite),
}

impl ParticleKind {
    /// True for kinds that are released once `now > end_time`. The rest
    /// live until their alpha runs out or they are removed.
    #[must_use]
    pub const fn expires_at_end_time(&self) -> bool {
        matches!(
            self,
            Self::Sprite | Self::Smoke(_) | Self::Lfx(_) | Self::Spark | Self::Quake(_)
        )
    }
}

/// What happens when a particle's motion crosses world geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CollisionBehavior {
    /// Pass straight through.
    #[default]
    None,
    /// Reflect with this coefficient (1.0 keeps the normal speed).
    Bounce(f32),
    /// Leave a blood mark at the impact and die.
    ConvertToDecal,
}

impl CollisionBehavior {
    /// True if the integrator has to trace this particle.
    #[must_use]
    pub fn traces(&self) -> bool {
        match *self {
            Self::None => false,
            Self::Bounce(coefficient) => coefficient > 0.0,
            Self::ConvertToDecal => true,
        }
    }
}

/// One simulated particle.
///
/// Times are render-clock milliseconds. `start_time`/`start_position`/
/// `velocity` describe the kinematic baseline and move forward whenever
/// motion is changed in place (bounce, weather wrap); `spawn_time` never
/// moves and drives size, alpha and colour interpolation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    /// Time the particle was created.
    pub spawn_time: i32,
    /// Time of the kinematic baseline.
    pub start_time: i32,
    /// End of life for kinds that expire.
    pub end_time: i32,
    /// Time the fade ramp starts.
    pub fade_start_time: i32,

    /// Position at `start_time`.
    pub start_position: Vec3,
    /// Position this frame.
    pub position: Vec3,
    /// Velocity at `start_time`.
    pub velocity: Vec3,
    /// Constant acceleration term of the closed-form motion.
    pub acceleration: Vec3,
    /// Exponential damping rate of the velocity term (per second).
    pub air_friction: f32,

    /// Draw rule.
    pub kind: ParticleKind,
    /// Shader to draw with.
    pub shader: ShaderHandle,
    /// Half-width at spawn.
    pub width: f32,
    /// Half-height at spawn.
    pub height: f32,
    /// Half-width at `end_time`.
    pub end_width: f32,
    /// Half-height at `end_time`.
    pub end_height: f32,

    /// Alpha at spawn.
    pub alpha: f32,
    /// Alpha change per second.
    pub alpha_velocity: f32,
    /// Colour stops, one row per channel (r, g, b, a), five stops each.
    pub cols: [[f32; 5]; 4],

    /// Roll in degrees (per frame increment for smoke).
    pub roll: f32,
    /// Accumulated smoke roll.
    pub accumulated_roll: f32,
    /// Draw with the particle's own rolled basis.
    pub rotate: bool,

    /// Collision response.
    pub collision: CollisionBehavior,
    /// Position last frame, for stretching.
    pub stretch_origin: Vec3,
    /// Axis for direction-oriented quads.
    pub direction: Vec3,
}

impl Particle {
    /// Fills all five stops of every channel from `rgba` stops.
    pub fn set_color_stops(&mut self, stops: &[[f32; 4]; 5]) {
        for (stop, rgba) in stops.iter().enumerate() {
            for (channel, value) in rgba.iter().enumerate() {
                self.cols[channel][stop] = *value;
            }
        }
    }

    /// Uses a single colour for every stop.
    pub fn set_flat_color(&mut self, rgba: [f32; 4]) {
        self.set_color_stops(&[rgba; 5]);
    }

    /// Fraction of `[spawn_time, end_time]` elapsed at `now`, clamped to
    /// `[0, 1]`. Zero-length lives count as fully elapsed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn life_ratio(&self, now: i32) -> f32 {
        let span = self.end_time - self.spawn_time;
        if span <= 0 {
            return 1.0;
        }
        ((now - self.spawn_time) as f32 / span as f32).clamp(0.0, 1.0)
    }

    /// Half-size interpolated from spawn size to end size.
    #[must_use]
    pub fn size_at(&self, now: i32) -> (f32, f32) {
        let ratio = self.life_ratio(now);
        (
            self.width + ratio * (self.end_width - self.width),
            self.height + ratio * (self.end_height - self.height),
        )
    }

    /// Remaining fraction of the fade ramp at `now`: 1 before
    /// `fade_start_time`, 0 at `end_time`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fade_remaining(&self, now: i32) -> f32 {
        if now <= self.fade_start_time {
            return 1.0;
        }
        let span = self.end_time - self.fade_start_time;
        if span <= 0 {
            return 0.0;
        }
        (1.0 - (now - self.fade_start_time) as f32 / span as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_table() {
        assert!(ParticleKind::Sprite.expires_at_end_time());
        assert!(!ParticleKind::Weather(Weather::default()).expires_at_end_time());
        assert!(ParticleKind::Smoke(Smoke::default()).expires_at_end_time());
        assert!(ParticleKind::Lfx(LfxStyle::Shock).expires_at_end_time());
        assert!(ParticleKind::Spark.expires_at_end_time());
        assert!(ParticleKind::Quake(QuakeSprite::default()).expires_at_end_time());
    }

    #[test]
    fn test_collision_traces() {
        assert!(!CollisionBehavior::None.traces());
        assert!(!CollisionBehavior::Bounce(0.0).traces());
        assert!(CollisionBehavior::Bounce(0.5).traces());
        assert!(CollisionBehavior::ConvertToDecal.traces());
    }

    #[test]
    fn test_color_stops_layout() {
        let mut p = Particle::default();
        p.set_color_stops(&[
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 0.8],
            [0.0, 0.0, 1.0, 0.6],
            [1.0, 1.0, 0.0, 0.4],
            [0.0, 1.0, 1.0, 0.2],
        ]);
        assert_eq!(p.cols[0], [1.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(p.cols[3], [1.0, 0.8, 0.6, 0.4, 0.2]);
    }

    #[test]
    fn test_size_and_fade_ramps() {
        let p = Particle {
            spawn_time: 1000,
            end_time: 2000,
            fade_start_time: 1500,
            width: 2.0,
            height: 2.0,
            end_width: 4.0,
            end_height: 6.0,
            ..Particle::default()
        };
        assert_eq!(p.size_at(1500), (3.0, 4.0));
        assert_eq!(p.size_at(5000), (4.0, 6.0));
        assert_eq!(p.fade_remaining(1200), 1.0);
        assert!((p.fade_remaining(1750) - 0.5).abs() < 1e-6);
        assert_eq!(p.fade_remaining(2500), 0.0);
    }

    #[test]
    fn test_weather_band_order() {
        let w = Weather {
            band_start: 256.0,
            band_end: 0.0,
            ..Weather::default()
        };
        assert_eq!(w.band(), (0.0, 256.0));
    }
}
