//! # Effects Context
//!
//! Owns every piece of mutable effects state: both pools, the jitter
//! generator, the roll clock and the registered media. One context per
//! client session; all mutation happens on the thread that renders.
//!
//! ## Frame Flow
//!
//! ```text
//! presets ──spawner()──► particle pool
//!                              │
//! tick(now) ──► add_particles ─┼─► integrate ─► build ─► SceneRenderer
//!                              └─► decal ─► impact_mark ─► mark pool
//!           ──► add_marks ───────► fade ─► SceneRenderer
//! ```

use cinder_core::FixedPool;

use crate::config::EffectsConfig;
use crate::emitters::Spawner;
use crate::error::EffectsResult;
use crate::interfaces::{SceneRenderer, ViewState, WorldCollision};
use crate::marks::{self, ImpactMark, ImpactOutcome, MarkPool};
use crate::media::MediaHandles;
use crate::particle::geometry::{self, Geometry};
use crate::particle::integrate::{Integrator, Step};
use crate::particle::{Particle, ParticleKind};
use crate::random::EffectRng;
use crate::stats::FrameStats;
use crate::view::{FrameView, RollClock};

/// Radius of the decal left by a particle that converts on impact.
pub const DECAL_RADIUS: f32 = 15.0;

/// The effects simulation context.
pub struct EffectsContext {
    config: EffectsConfig,
    media: MediaHandles,
    particles: FixedPool<Particle>,
    marks: MarkPool,
    rng: EffectRng,
    roll: RollClock,
    last_time: Option<i32>,
    /// Counters accumulated between ticks (spawn drops, mark evictions).
    pending: FrameStats,
    geometry: Geometry,
}

impl EffectsContext {
    /// Creates a context, allocating both pools and registering media.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn new(config: EffectsConfig, renderer: &mut dyn SceneRenderer) -> EffectsResult<Self> {
        config.validate()?;

        let media = MediaHandles::register(renderer);
        tracing::info!(
            "Effects context created: {} particles, {} marks, marks {}",
            config.particle_capacity,
            config.mark_capacity,
            if config.add_marks { "on" } else { "off" }
        );

        Ok(Self {
            media,
            particles: FixedPool::new(config.particle_capacity),
            marks: MarkPool::new(config.mark_capacity),
            rng: EffectRng::new(config.seed),
            roll: RollClock::default(),
            last_time: None,
            pending: FrameStats::default(),
            geometry: Geometry::default(),
            config,
        })
    }

    /// Returns both pools to all-free and restarts the clocks (match restart).
    pub fn reset(&mut self, now: i32) {
        self.particles.reset();
        self.marks.reset();
        self.rng.reseed(self.config.seed);
        self.roll.reset(now);
        self.last_time = Some(now);
        self.pending = FrameStats::default();
        tracing::info!("Effects context reset at {} ms", now);
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    /// Registered shaders.
    #[must_use]
    pub fn media(&self) -> &MediaHandles {
        &self.media
    }

    /// The particle pool.
    #[must_use]
    pub fn particles(&self) -> &FixedPool<Particle> {
        &self.particles
    }

    /// The mark pool.
    #[must_use]
    pub fn marks(&self) -> &MarkPool {
        &self.marks
    }

    /// A spawner stamping particles with `now`. Dropped spawns show up in
    /// the next tick's stats.
    pub fn spawner(&mut self, now: i32) -> Spawner<'_> {
        Spawner::new(
            &mut self.particles,
            &mut self.rng,
            &self.media,
            now,
            &mut self.pending.dropped_spawns,
        )
    }

    /// Creates a mark. Does nothing when marks are disabled.
    ///
    /// # Panics
    ///
    /// Panics if `mark.radius` is not positive.
    pub fn impact_mark(
        &mut self,
        now: i32,
        mark: &ImpactMark,
        world: &dyn WorldCollision,
        renderer: &mut dyn SceneRenderer,
    ) -> ImpactOutcome {
        if mark.radius <= 0.0 || mark.radius.is_nan() {
            tracing::error!("impact_mark called with radius {}", mark.radius);
            panic!("impact_mark called with radius {}", mark.radius);
        }
        if !self.config.add_marks {
            return ImpactOutcome::default();
        }

        let outcome = marks::impact_mark(&mut self.marks, world, renderer, now, mark);
        self.pending.marks_evicted += outcome.evicted;
        outcome
    }

    /// Shows or hides every weather particle tagged `snow_id`. Returns how
    /// many particles were touched.
    pub fn snow_link(&mut self, snow_id: i32, on: bool) -> usize {
        let mut touched = 0;
        self.particles.for_each_active_mut(|_, p| {
            if let ParticleKind::Weather(weather) = &mut p.kind {
                if weather.snow_id == snow_id {
                    weather.linked = on;
                    touched += 1;
                }
            }
        });
        tracing::debug!(
            "Snow link {} {} for {} particles",
            snow_id,
            if on { "on" } else { "off" },
            touched
        );
        touched
    }

    /// Runs the particle pass for one frame: integrate, collide, expire and
    /// draw every active particle.
    #[allow(clippy::cast_precision_loss)]
    pub fn add_particles(
        &mut self,
        now: i32,
        view: &ViewState,
        renderer: &mut dyn SceneRenderer,
        world: &dyn WorldCollision,
    ) -> FrameStats {
        let frame_seconds = self
            .last_time
            .map_or(0.0, |last| (now - last).max(0) as f32 * 0.001);
        self.last_time = Some(now);

        let global_roll = self.roll.advance(now);
        let frame = FrameView::new(
            view,
            now,
            frame_seconds,
            global_roll,
            self.config.cull_radius,
            self.config.vid_height,
        );
        let integrator = Integrator {
            now,
            post_impact_gravity: self.config.post_impact_gravity,
            world,
        };

        let Self {
            config,
            media,
            particles,
            marks: mark_pool,
            rng,
            geometry: scratch,
            ..
        } = self;
        let add_marks = config.add_marks;
        let blood_mark = media.blood_mark;

        let mut stats = FrameStats::default();
        let released = particles.retain_active(|_, p| match integrator.step(p, rng) {
            Step::Faded | Step::Expired => false,
            Step::Decal {
                origin,
                normal,
                alpha,
            } => {
                if add_marks {
                    let mark = ImpactMark {
                        shader: blood_mark,
                        origin,
                        dir: normal,
                        orientation: rng.random() * 360.0,
                        color: [1.0, 1.0, 1.0, alpha],
                        alpha_fade: true,
                        radius: DECAL_RADIUS,
                        temporary: false,
                    };
                    let outcome = marks::impact_mark(mark_pool, world, renderer, now, &mark);
                    stats.marks_evicted += outcome.evicted;
                }
                stats.decals_spawned += 1;
                false
            }
            Step::Draw(sample) => {
                if sample.bounced {
                    stats.bounces += 1;
                }
                if !p.shader.is_valid() {
                    stats.particles_culled += 1;
                    return true;
                }
                geometry::build(p, &sample, &frame, scratch);
                if geometry::submit(scratch, renderer) > 0 {
                    stats.particles_rendered += 1;
                } else {
                    stats.particles_culled += 1;
                }
                true
            }
        });
        stats.particles_released = released;
        stats.particles_active = particles.active_count();
        stats
    }

    /// Runs the mark pass for one frame. Skipped when marks are disabled.
    pub fn add_marks(&mut self, now: i32, renderer: &mut dyn SceneRenderer) -> FrameStats {
        let mut stats = FrameStats {
            marks_active: self.marks.active_count(),
            ..FrameStats::default()
        };
        if !self.config.add_marks {
            return stats;
        }

        let pass = marks::add_marks(&mut self.marks, now, self.media.energy_mark, renderer);
        stats.marks_expired = pass.expired;
        stats.mark_polys_submitted = pass.submitted;
        stats.marks_active = self.marks.active_count();
        stats
    }

    /// Runs the particle pass then the mark pass. The returned stats also
    /// carry spawn drops and mark evictions since the previous tick.
    pub fn tick(
        &mut self,
        now: i32,
        view: &ViewState,
        renderer: &mut dyn SceneRenderer,
        world: &dyn WorldCollision,
    ) -> FrameStats {
        let mut stats = self.add_particles(now, view, renderer, world);
        let mark_stats = self.add_marks(now, renderer);

        stats.marks_active = mark_stats.marks_active;
        stats.marks_expired = mark_stats.marks_expired;
        stats.mark_polys_submitted = mark_stats.mark_polys_submitted;

        let pending = std::mem::take(&mut self.pending);
        stats.dropped_spawns += pending.dropped_spawns;
        stats.marks_evicted += pending.marks_evicted;
        stats
    }
}
