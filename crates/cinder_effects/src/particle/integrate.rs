//! # Particle Integrator
//!
//! Positions are recomputed every frame from the particle's baseline
//! (`start_time`, `start_position`, `velocity`) with a closed-form motion
//! law, never accumulated frame to frame:
//!
//! ```text
//! p(t) = p0 + v0 * (1 - e^(-k t)) / k + a * t²      (k = air friction)
//! p(t) = p0 + v0 * t + a * t²                        (k = 0)
//! v(t) = v0 * e^(-k t) + 2 a t
//! ```
//!
//! Anything that changes motion in place (a bounce, a weather wrap) moves
//! the baseline to the current frame so the law keeps holding.

use cinder_shared::math::Vec3;

use crate::interfaces::{WorldCollision, CONTENTS_SOLID};
use crate::random::EffectRng;

use super::{CollisionBehavior, Particle, ParticleKind};

/// Horizontal drift given to turbulent weather when it wraps.
pub const TURBULENCE_DRIFT: f32 = 16.0;

/// Seconds between two render-clock times, clamped at zero.
#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn seconds_between(from: i32, to: i32) -> f32 {
    (to - from).max(0) as f32 / 1000.0
}

/// Closed-form position after `t` seconds.
#[must_use]
pub fn position_at(start: Vec3, velocity: Vec3, acceleration: Vec3, air_friction: f32, t: f32) -> Vec3 {
    let travel = if air_friction > 0.0 {
        (1.0 - (-air_friction * t).exp()) / air_friction
    } else {
        t
    };
    start + velocity * travel + acceleration * (t * t)
}

/// Derivative of [`position_at`].
#[must_use]
pub fn velocity_at(velocity: Vec3, acceleration: Vec3, air_friction: f32, t: f32) -> Vec3 {
    let damping = if air_friction > 0.0 {
        (-air_friction * t).exp()
    } else {
        1.0
    };
    velocity * damping + acceleration * (2.0 * t)
}

/// Velocity after an impact: `-coefficient * (v · n) * n`.
#[must_use]
pub fn reflect(velocity: Vec3, normal: Vec3, coefficient: f32) -> Vec3 {
    -(normal * (coefficient * velocity.dot(normal)))
}

/// Wraps `z` into `[min, max)` by whole multiples of the band height.
/// Returns `None` for an empty band or non-finite input.
#[must_use]
pub fn wrap_into_band(z: f32, min: f32, max: f32) -> Option<f32> {
    let span = max - min;
    if !(z.is_finite() && span.is_finite()) || span <= 0.0 {
        return None;
    }
    if (min..=max).contains(&z) {
        return Some(z);
    }
    Some(min + (z - min).rem_euclid(span))
}

/// Moves the kinematic baseline to `now`.
pub fn rebaseline(p: &mut Particle, now: i32, position: Vec3, velocity: Vec3) {
    p.start_time = now;
    p.start_position = position;
    p.position = position;
    p.velocity = velocity;
}

/// Per-frame values the geometry builder needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSample {
    /// Alpha after `alpha_velocity` has been applied.
    pub alpha: f32,
    /// Current velocity.
    pub velocity: Vec3,
    /// A bounce happened this frame.
    pub bounced: bool,
}

/// Outcome of one integration step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Still alive; draw it.
    Draw(FrameSample),
    /// Alpha reached zero.
    Faded,
    /// Past `end_time`.
    Expired,
    /// Hit the world with [`CollisionBehavior::ConvertToDecal`].
    Decal {
        /// Impact point.
        origin: Vec3,
        /// Surface normal.
        normal: Vec3,
        /// Particle alpha at impact.
        alpha: f32,
    },
}

/// Frame-wide inputs to [`Integrator::step`].
pub struct Integrator<'a> {
    /// Render clock in milliseconds.
    pub now: i32,
    /// Z acceleration installed after a bounce.
    pub post_impact_gravity: f32,
    /// Collision queries.
    pub world: &'a dyn WorldCollision,
}

impl Integrator<'_> {
    /// Advances one particle to `now`.
    pub fn step(&self, p: &mut Particle, rng: &mut EffectRng) -> Step {
        let now = self.now;

        let alpha = p.alpha + p.alpha_velocity * seconds_between(p.spawn_time, now);
        if alpha <= 0.0 {
            return Step::Faded;
        }
        if p.kind.expires_at_end_time() && now > p.end_time {
            return Step::Expired;
        }

        let t = seconds_between(p.start_time, now);
        let previous = p.position;
        let mut position = position_at(p.start_position, p.velocity, p.acceleration, p.air_friction, t);
        let mut velocity = velocity_at(p.velocity, p.acceleration, p.air_friction, t);

        if let ParticleKind::Weather(weather) = p.kind {
            let (min, max) = weather.band();
            if !(min..=max).contains(&position.z) {
                if let Some(z) = wrap_into_band(position.z, min, max) {
                    position.z = z;
                    if weather.turbulent {
                        velocity.x = rng.crandom() * TURBULENCE_DRIFT;
                        velocity.y = rng.crandom() * TURBULENCE_DRIFT;
                    }
                    rebaseline(p, now, position, velocity);
                }
            }
        }

        let mut bounced = false;
        if p.collision.traces() && previous != position {
            let trace = self.world.trace(previous, position, CONTENTS_SOLID);
            if trace.hit_world() {
                match p.collision {
                    CollisionBehavior::ConvertToDecal => {
                        return Step::Decal {
                            origin: trace.end_pos,
                            normal: trace.normal,
                            alpha: alpha.min(1.0),
                        };
                    }
                    CollisionBehavior::Bounce(coefficient) => {
                        position = trace.end_pos;
                        velocity = reflect(velocity, trace.normal, coefficient);
                        p.acceleration = Vec3::new(0.0, 0.0, self.post_impact_gravity);
                        rebaseline(p, now, position, velocity);
                        bounced = true;
                    }
                    CollisionBehavior::None => {}
                }
            }
        }

        p.stretch_origin = previous;
        p.position = position;

        Step::Draw(FrameSample {
            alpha,
            velocity,
            bounced,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::testing::{FloorWorld, OpenWorld};
    use crate::particle::{Smoke, Weather, WeatherStyle};

    fn moving(start: Vec3, velocity: Vec3, acceleration: Vec3) -> Particle {
        Particle {
            start_position: start,
            position: start,
            velocity,
            acceleration,
            alpha: 1.0,
            end_time: i32::MAX,
            ..Particle::default()
        }
    }

    #[test]
    fn test_closed_form_is_exact() {
        let pos = position_at(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -20.0), 0.0, 2.0);
        assert_eq!(pos, Vec3::new(20.0, 0.0, -80.0));
    }

    #[test]
    fn test_step_matches_closed_form_regardless_of_frames() {
        let world = OpenWorld;
        let mut rng = EffectRng::new(0);
        let mut jittery = moving(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -20.0));

        for now in [16, 50, 51, 300, 1234, 1999, 2000] {
            let integrator = Integrator { now, post_impact_gravity: -200.0, world: &world };
            assert!(matches!(integrator.step(&mut jittery, &mut rng), Step::Draw(_)));
        }
        assert_eq!(jittery.position, Vec3::new(20.0, 0.0, -80.0));
        assert_eq!(jittery.stretch_origin, position_at(
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -20.0),
            0.0,
            1.999,
        ));
    }

    #[test]
    fn test_air_friction_slows_travel() {
        let free = position_at(Vec3::ZERO, Vec3::X * 100.0, Vec3::ZERO, 0.0, 1.0);
        let damped = position_at(Vec3::ZERO, Vec3::X * 100.0, Vec3::ZERO, 0.5, 1.0);
        assert!(damped.x < free.x && damped.x > 0.0);
        let v = velocity_at(Vec3::X * 100.0, Vec3::ZERO, 0.5, 1.0);
        assert!((v.x - 100.0 * (-0.5f32).exp()).abs() < 1e-3);
    }

    #[test]
    fn test_alpha_fade_releases() {
        let world = OpenWorld;
        let mut rng = EffectRng::new(0);
        let mut p = moving(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
        p.alpha_velocity = -1.0;

        let integrator = Integrator { now: 500, post_impact_gravity: 0.0, world: &world };
        match integrator.step(&mut p, &mut rng) {
            Step::Draw(sample) => assert!((sample.alpha - 0.5).abs() < 1e-6),
            other => panic!("expected draw, got {other:?}"),
        }
        let integrator = Integrator { now: 1000, post_impact_gravity: 0.0, world: &world };
        assert_eq!(integrator.step(&mut p, &mut rng), Step::Faded);
    }

    #[test]
    fn test_expiry_depends_on_kind() {
        let world = OpenWorld;
        let mut rng = EffectRng::new(0);
        let integrator = Integrator { now: 200, post_impact_gravity: 0.0, world: &world };

        let mut smoke = moving(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
        smoke.kind = ParticleKind::Smoke(Smoke::default());
        smoke.end_time = 100;
        assert_eq!(integrator.step(&mut smoke, &mut rng), Step::Expired);

        let mut sprite = moving(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
        sprite.end_time = 100;
        assert_eq!(integrator.step(&mut sprite, &mut rng), Step::Expired);

        let mut snow = moving(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
        snow.kind = ParticleKind::Weather(Weather::default());
        snow.end_time = 100;
        assert!(matches!(integrator.step(&mut snow, &mut rng), Step::Draw(_)));
    }

    #[test]
    fn test_reflect_elastic() {
        let v = reflect(Vec3::new(0.0, 0.0, -50.0), Vec3::Z, 1.0);
        assert_eq!(v.z, 50.0);
    }

    #[test]
    fn test_bounce_rebaselines() {
        let world = FloorWorld::new(0.0);
        let mut rng = EffectRng::new(0);
        let mut p = moving(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -50.0), Vec3::ZERO);
        p.collision = CollisionBehavior::Bounce(1.0);

        let integrator = Integrator { now: 100, post_impact_gravity: -200.0, world: &world };
        let Step::Draw(sample) = integrator.step(&mut p, &mut rng) else {
            panic!("bouncing particle should still draw");
        };
        assert!(sample.bounced);
        assert_eq!(sample.velocity.z, 50.0);
        assert_eq!(p.velocity.z, 50.0);
        assert_eq!(p.position.z, 0.0);
        assert_eq!(p.start_time, 100);
        assert_eq!(p.start_position, p.position);
        assert_eq!(p.acceleration, Vec3::new(0.0, 0.0, -200.0));
    }

    #[test]
    fn test_bounce_ignores_dynamic_entities() {
        let world = FloorWorld::entity(0.0, 7);
        let mut rng = EffectRng::new(0);
        let mut p = moving(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -50.0), Vec3::ZERO);
        p.collision = CollisionBehavior::Bounce(1.0);

        let integrator = Integrator { now: 100, post_impact_gravity: -200.0, world: &world };
        let Step::Draw(sample) = integrator.step(&mut p, &mut rng) else {
            panic!("expected draw");
        };
        assert!(!sample.bounced);
        assert!(p.position.z < 0.0);
    }

    #[test]
    fn test_convert_to_decal() {
        let world = FloorWorld::new(0.0);
        let mut rng = EffectRng::new(0);
        let mut p = moving(Vec3::new(3.0, 4.0, 1.0), Vec3::new(0.0, 0.0, -50.0), Vec3::ZERO);
        p.collision = CollisionBehavior::ConvertToDecal;

        let integrator = Integrator { now: 100, post_impact_gravity: -200.0, world: &world };
        match integrator.step(&mut p, &mut rng) {
            Step::Decal { origin, normal, alpha } => {
                assert_eq!(origin, Vec3::new(3.0, 4.0, 0.0));
                assert_eq!(normal, Vec3::Z);
                assert_eq!(alpha, 1.0);
            }
            other => panic!("expected decal, got {other:?}"),
        }
    }

    #[test]
    fn test_wrap_into_band() {
        assert_eq!(wrap_into_band(-10.0, 0.0, 256.0), Some(246.0));
        assert_eq!(wrap_into_band(-600.0, 0.0, 256.0), Some(168.0));
        assert_eq!(wrap_into_band(300.0, 0.0, 256.0), Some(44.0));
        assert_eq!(wrap_into_band(100.0, 0.0, 256.0), Some(100.0));
        assert_eq!(wrap_into_band(5.0, 10.0, 10.0), None);
        assert_eq!(wrap_into_band(f32::NAN, 0.0, 256.0), None);
    }

    #[test]
    fn test_snow_recycles_into_band() {
        let world = OpenWorld;
        let mut rng = EffectRng::new(9);
        let mut p = moving(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -50.0), Vec3::ZERO);
        p.kind = ParticleKind::Weather(Weather {
            style: WeatherStyle::Snow,
            turbulent: true,
            band_start: 256.0,
            band_end: 0.0,
            linked: true,
            snow_id: 1,
        });

        let integrator = Integrator { now: 1000, post_impact_gravity: 0.0, world: &world };
        let Step::Draw(sample) = integrator.step(&mut p, &mut rng) else {
            panic!("weather should draw");
        };
        assert_eq!(p.position.z, 216.0);
        assert!((0.0..=256.0).contains(&p.position.z));
        assert_eq!(p.start_time, 1000);
        assert!(sample.velocity.x.abs() <= TURBULENCE_DRIFT);
        assert!(sample.velocity.y.abs() <= TURBULENCE_DRIFT);
        assert!(sample.velocity.x != 0.0 || sample.velocity.y != 0.0);
        assert_eq!(p.velocity, sample.velocity);
    }
}
