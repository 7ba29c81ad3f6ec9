//! Colour-cycling LFX presets.
//!
//! Every LFX particle carries five RGBA stops that are walked across its
//! fade ramp, so a single preset call can go white-hot to yellow to
//! smoke to nothing.

use cinder_shared::constants::PARTICLE_GRAVITY;
use cinder_shared::math::Vec3;

use crate::interfaces::SceneRenderer;
use crate::media::BlendMode;
use crate::particle::{CollisionBehavior, LfxStyle, Particle, ParticleKind};
use crate::random::EffectRng;

use super::Spawner;

/// Gravity on LFX sparks.
pub const SPARK_GRAVITY: f32 = 400.0;

/// Radius of the rocket explosion's dynamic light.
pub const ROCKET_LIGHT_RADIUS: f32 = 300.0;

/// Colour of the rocket explosion's dynamic light.
pub const ROCKET_LIGHT_COLOR: [f32; 3] = [1.0, 0.35, 0.0];

/// Shared parameters of the LFX presets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LfxParams {
    /// Emission point.
    pub origin: Vec3,
    /// Main direction (or velocity for smoke).
    pub dir: Vec3,
    /// Random velocity spread per axis.
    pub spread: f32,
    /// Speed along `dir`.
    pub speed: f32,
    /// Five RGBA colour stops.
    pub colors: [[f32; 4]; 5],
    /// Particle count; also drives the base size of smoke and shocks.
    pub count: u32,
    /// Lifetime in milliseconds.
    pub duration: i32,
    /// Growth from base size to end size.
    pub scale_up: f32,
    /// Shader blend variant.
    pub blend: BlendMode,
}

/// What an LFX spark does when it hits the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SparkImpact {
    /// Bounce off with the post-impact gravity.
    #[default]
    Bounce,
    /// Leave a blood mark and die.
    Bleed,
}

/// Builds a five-stop table from four colours, repeating the last.
#[must_use]
pub fn stops(c1: [f32; 4], c2: [f32; 4], c3: [f32; 4], c4: [f32; 4]) -> [[f32; 4]; 5] {
    [c1, c2, c3, c4, c4]
}

fn spread_velocity(params: &LfxParams, rng: &mut EffectRng) -> Vec3 {
    Vec3::from_fn(|axis| {
        let along = rng.crandom() * params.dir.axis(axis) * params.speed;
        along + rng.crandom() * params.spread - params.spread / 2.0
    })
}

fn puff_base(p: &mut Particle, params: &LfxParams, size: f32, rng: &mut EffectRng) {
    p.end_time = p.spawn_time + params.duration;
    p.fade_start_time = p.spawn_time;
    p.alpha = 0.1;
    p.width = size;
    p.height = size;
    p.end_width = size + params.scale_up;
    p.end_height = size + params.scale_up;
    p.rotate = true;
    p.roll = rng.crandom() * 179.0;
    p.set_color_stops(&params.colors);
    p.start_position = params.origin;
    p.velocity = spread_velocity(params, rng);
    p.air_friction = 0.2;
}

/// Camera-facing smoke. Fewer, larger puffs for larger `count`.
#[allow(clippy::cast_precision_loss)]
pub fn smoke(spawner: &mut Spawner<'_>, params: &LfxParams) -> usize {
    let puffs = (44 / (params.count / 2 + 1) + 1) as usize;
    let size = (params.count / 3) as f32;
    let shader = spawner.media().smoke.pick(params.blend);

    spawner.burst(puffs, |_, p, rng| {
        puff_base(p, params, size, rng);
        p.kind = ParticleKind::Lfx(LfxStyle::Smoke);
        p.shader = shader;
    })
}

/// Camera-facing smoke with exactly `count` puffs of base size `scale`.
pub fn smoke_scaled(spawner: &mut Spawner<'_>, params: &LfxParams, scale: f32) -> usize {
    let shader = spawner.media().smoke.pick(params.blend);

    spawner.burst(params.count as usize, |_, p, rng| {
        puff_base(p, params, scale, rng);
        p.kind = ParticleKind::Lfx(LfxStyle::Smoke);
        p.shader = shader;
    })
}

/// Shockwave rings lying across `dir`.
#[allow(clippy::cast_precision_loss)]
pub fn shock(spawner: &mut Spawner<'_>, params: &LfxParams) -> usize {
    let size = (params.count / 3) as f32;
    let shader = spawner.media().shock.pick(params.blend);

    spawner.burst(params.count as usize, |_, p, rng| {
        puff_base(p, params, size, rng);
        p.kind = ParticleKind::Lfx(LfxStyle::Shock);
        p.shader = shader;
        p.direction = params.dir;
    })
}

/// Streaking sparks thrown along `dir` with a little kick up.
pub fn spark(spawner: &mut Spawner<'_>, params: &LfxParams, impact: SparkImpact) -> usize {
    let media = *spawner.media();
    let shader = match impact {
        SparkImpact::Bounce => media.ball.pick(params.blend),
        SparkImpact::Bleed => media.ball.alpha,
    };

    spawner.burst(params.count as usize, |_, p, rng| {
        p.kind = ParticleKind::Lfx(LfxStyle::Spark);
        p.shader = shader;
        p.end_time = p.spawn_time + params.duration;
        p.fade_start_time = p.spawn_time;
        p.width = params.scale_up;
        p.height = params.scale_up;
        p.end_width = params.scale_up;
        p.end_height = params.scale_up;
        p.set_color_stops(&params.colors);

        p.start_position = params.origin;
        let mut velocity = Vec3::from_fn(|axis| {
            let speed = params.speed * (1.0 + rng.crandom()) + params.speed * 0.3;
            params.dir.axis(axis) * speed + rng.crandom() * params.spread - params.spread / 2.0
        });
        velocity.z += params.speed * 0.4;
        p.velocity = velocity;
        p.acceleration = Vec3::new(0.0, 0.0, -SPARK_GRAVITY);
        p.air_friction = 0.5;

        p.collision = match impact {
            SparkImpact::Bounce => CollisionBehavior::Bounce(1.0),
            SparkImpact::Bleed => CollisionBehavior::ConvertToDecal,
        };
    })
}

/// Blood droplets, drawn as camera-facing LFX smoke. `pressure` scales the
/// droplet count and spray length.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn blood(spawner: &mut Spawner<'_>, origin: Vec3, dir: Vec3, pressure: f32) -> usize {
    let count = (pressure * 4.0).max(0.0) as usize;
    let jitter = (count / 16) as f32;
    let offset = (count / 32) as f32;
    let shader = spawner.media().ball.alpha;

    spawner.burst(count, |i, p, rng| {
        p.kind = ParticleKind::Lfx(LfxStyle::Smoke);
        p.shader = shader;
        p.end_time = p.spawn_time + (1200.0 * rng.random() * 22.0) as i32;
        p.alpha_velocity = 2.0;
        p.width = 1.5;
        p.height = 1.5;
        p.end_width = 1.5;
        p.end_height = 1.5;
        p.set_flat_color([1.0, 0.0, 0.0, 1.0]);

        p.start_position = Vec3::from_fn(|axis| origin.axis(axis) + rng.crandom() * jitter - offset);
        p.velocity = dir * (i as f32 * 2.6 * 0.01);
        p.acceleration = Vec3::new(0.0, 0.0, -PARTICLE_GRAVITY * 8.0);
        p.collision = CollisionBehavior::Bounce(1.0);
    })
}

fn recipe(
    origin: Vec3,
    dir: Vec3,
    (spread, speed): (f32, f32),
    colors: [[f32; 4]; 5],
    (count, duration, scale_up): (u32, i32, f32),
    blend: BlendMode,
) -> LfxParams {
    LfxParams {
        origin,
        dir,
        spread,
        speed,
        colors,
        count,
        duration,
        scale_up,
        blend,
    }
}

/// Full rocket explosion: two shockwaves, a fireball, a mushroom cloud and
/// lingering after-smoke, lit by a dynamic light.
///
/// Returns the number of particles spawned.
pub fn rocket_explosion(
    spawner: &mut Spawner<'_>,
    renderer: &mut dyn SceneRenderer,
    origin: Vec3,
    dir: Vec3,
) -> usize {
    let add = BlendMode::Add;
    let velocity = dir * 64.0;
    let mut spawned = 0;

    // Shockwaves.
    let at = origin.mul_add(4.0, dir);
    let ring = stops(
        [1.0, 1.0, 1.0, 1.0],
        [1.0, 1.0, 0.5, 0.9],
        [0.7, 0.3, 0.1, 0.7],
        [0.0; 4],
    );
    spawned += shock(spawner, &recipe(at, dir, (0.0, 0.0), ring, (1, 500, 270.0), add));
    let dust = stops(
        [0.5, 0.5, 0.1, 1.0],
        [0.3, 0.2, 0.1, 0.9],
        [0.2, 0.1, 0.1, 0.7],
        [0.0; 4],
    );
    spawned += shock(spawner, &recipe(at, dir, (0.0, -683.0), dust, (13, 160, 120.0), add));

    // Fireball.
    let at = origin.mul_add(12.0, dir);
    let core = stops(
        [1.0, 0.2, 0.1, 1.0],
        [0.5, 0.0, 0.0, 0.9],
        [0.1, 0.0, 0.0, 0.7],
        [0.0; 4],
    );
    spawned += smoke(spawner, &recipe(at, velocity, (32.0, 0.54), core, (42, 1200, 54.0), add));
    let flash = stops(
        [1.0, 1.0, 0.9, 1.0],
        [1.0, 1.0, 0.7, 0.9],
        [0.4, 0.3, 0.2, 0.7],
        [0.1, 0.0, 0.0, 0.0],
    );
    for (spread, speed, count, duration, scale_up) in [
        (62.0, 2.0, 72, 200, 84.0),
        (32.0, 0.54, 42, 600, 74.0),
        (44.0, 1.3, 3, 800, 3.0),
        (32.0, 0.54, 42, 600, 74.0),
    ] {
        let params = recipe(at, velocity, (spread, speed), flash, (count, duration, scale_up), add);
        spawned += smoke(spawner, &params);
    }

    // Mushroom cloud.
    let at = origin.mul_add(16.0, dir);
    let cloud = stops(
        [0.5, 0.0, 0.0, 0.0],
        [1.0, 1.0, 0.2, 0.2],
        [0.5, 0.1, 0.0, 0.5],
        [0.0; 4],
    );
    for (spread, speed, count, duration, scale_up) in [
        (3.0, 0.7, 22, 300, 135.0),
        (355.0, 2.7, 13, 220, 15.0),
        (44.0, 0.7, 3, 1200, 3.0),
    ] {
        let params = recipe(at, velocity, (spread, speed), cloud, (count, duration, scale_up), add);
        spawned += smoke(spawner, &params);
    }

    // After-smoke.
    let at = origin.mul_add(32.0, dir);
    let soot = stops(
        [0.0; 4],
        [0.2, 0.2, 0.2, 0.2],
        [0.9, 0.9, 0.9, 0.5],
        [0.0; 4],
    );
    for (spread, count, duration) in [(4.0, 144, 5500), (9.0, 44, 3500), (12.0, 24, 1500)] {
        let params = recipe(
            at,
            velocity,
            (spread, 0.2),
            soot,
            (count, duration, 24.0),
            BlendMode::Subtract,
        );
        spawned += smoke(spawner, &params);
    }

    renderer.add_dynamic_light(origin, ROCKET_LIGHT_RADIUS, ROCKET_LIGHT_COLOR);
    spawned
}
