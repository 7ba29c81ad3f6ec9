//! # Effects Soak
//!
//! Runs the whole effects pipeline headless against a flat floor and a
//! recording renderer: rocket explosions, spark showers, blood sprays and a
//! snow area, with pools sized small enough to hit exhaustion and mark
//! eviction. Prints one stats row per simulated second.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --features testing --bin fx_soak -- --seconds 30 --fps 60 --seed 7
//! cargo run --release --features testing --bin fx_soak -- --config effects.toml
//! ```

use std::time::Instant;

use cinder_effects::emitters::area::{spawn_area, ParticleArea};
use cinder_effects::emitters::beam::{tracer_sparks, TracerSparks};
use cinder_effects::emitters::lfx::{self, LfxParams, SparkImpact};
use cinder_effects::interfaces::testing::{FloorWorld, RecordingRenderer};
use cinder_effects::{BlendMode, EffectRng, EffectsConfig, EffectsContext, FrameStats, ViewState};
use cinder_shared::math::Vec3;

const SNOW_AREA: &str = "2 0 0 384  0 0 0  300 1 1";

const BLOOD_COLORS: [[f32; 4]; 5] = [
    [0.6, 0.0, 0.0, 1.0],
    [0.5, 0.0, 0.0, 1.0],
    [0.4, 0.0, 0.0, 1.0],
    [0.3, 0.0, 0.0, 1.0],
    [0.3, 0.0, 0.0, 1.0],
];

struct Options {
    seconds: u32,
    fps: u32,
    seed: u64,
    config: Option<String>,
}

fn parse_args() -> Option<Options> {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options {
        seconds: 30,
        fps: 60,
        seed: 0,
        config: None,
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--seconds" | "-s" => {
                options.seconds = value.and_then(|v| v.parse().ok()).unwrap_or(30);
                i += 1;
            }
            "--fps" | "-f" => {
                options.fps = value.and_then(|v| v.parse().ok()).unwrap_or(60).max(1);
                i += 1;
            }
            "--seed" => {
                options.seed = value.and_then(|v| v.parse().ok()).unwrap_or(0);
                i += 1;
            }
            "--config" | "-c" => {
                options.config = value.cloned();
                i += 1;
            }
            "--help" | "-h" => {
                println!("Usage: fx_soak [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --seconds <N>      Simulated seconds (default: 30)");
                println!("  -f, --fps <N>          Frames per simulated second (default: 60)");
                println!("      --seed <N>         Jitter seed (default: 0)");
                println!("  -c, --config <PATH>    Effects config TOML (default: small soak pools)");
                println!("  -h, --help             Show this help");
                return None;
            }
            _ => {}
        }
        i += 1;
    }
    Some(options)
}

fn soak_config(options: &Options) -> Result<EffectsConfig, String> {
    let mut config = match &options.config {
        Some(path) => EffectsConfig::load(path).map_err(|e| e.to_string())?,
        None => EffectsConfig {
            particle_capacity: 768,
            mark_capacity: 96,
            ..EffectsConfig::default()
        },
    };
    config.seed = options.seed;
    Ok(config)
}

fn print_row(second: u32, s: &FrameStats) {
    println!(
        "│ {:>4} │ {:>6} │ {:>8} │ {:>8} │ {:>6} │ {:>7} │ {:>6} │ {:>6} │ {:>7} │ {:>7} │",
        second,
        s.particles_active,
        s.particles_rendered,
        s.particles_released,
        s.bounces,
        s.decals_spawned,
        s.dropped_spawns,
        s.marks_active,
        s.marks_expired,
        s.marks_evicted,
    );
}

#[allow(clippy::cast_possible_wrap)]
fn main() {
    let Some(options) = parse_args() else {
        return;
    };

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         CINDER EFFECTS SOAK                                      ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let config = match soak_config(&options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("fx_soak: {e}");
            std::process::exit(1);
        }
    };

    println!("┌─ CONFIGURATION ─────────────────────────────────────────────────┐");
    println!("│ Particle Capacity:  {}", config.particle_capacity);
    println!("│ Mark Capacity:      {}", config.mark_capacity);
    println!("│ Marks:              {}", if config.add_marks { "on" } else { "off" });
    println!("│ Duration:           {} s at {} fps", options.seconds, options.fps);
    println!("│ Seed:               {}", config.seed);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    let mut renderer = RecordingRenderer::new();
    let world = FloorWorld::new(0.0);
    let view = ViewState::from_angles(Vec3::new(-256.0, 0.0, 96.0), [15.0, 0.0, 0.0]);

    let mut ctx = match EffectsContext::new(config, &mut renderer) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("fx_soak: {e}");
            std::process::exit(1);
        }
    };
    ctx.reset(0);

    // Placement jitter is kept apart from the context's own generator.
    let mut scatter = EffectRng::new(options.seed ^ 0x5eed);

    let area = match ParticleArea::parse(SNOW_AREA) {
        Ok(area) => area,
        Err(e) => {
            eprintln!("fx_soak: {e}");
            std::process::exit(1);
        }
    };
    if let Some(area) = &area {
        spawn_area(&mut ctx.spawner(0), area);
    }

    println!("┌──────┬────────┬──────────┬──────────┬────────┬─────────┬────────┬────────┬─────────┬─────────┐");
    println!("│  sec │ active │ rendered │ released │ bounce │  decals │ dropped│  marks │ expired │ evicted │");
    println!("├──────┼────────┼──────────┼──────────┼────────┼─────────┼────────┼────────┼─────────┼─────────┤");

    let frame_ms = (1000 / options.fps).max(1) as i32;
    let total_frames = options.seconds * options.fps;
    let start = Instant::now();

    let mut second = FrameStats::default();
    let mut total = FrameStats::default();
    let mut snow_visible = true;

    for frame in 1..=total_frames {
        let now = frame as i32 * frame_ms;

        if frame % (options.fps / 2).max(1) == 0 {
            let origin = Vec3::new(scatter.crandom() * 192.0, scatter.crandom() * 192.0, 2.0);
            lfx::rocket_explosion(&mut ctx.spawner(now), &mut renderer, origin, Vec3::Z);
        }

        if frame % 6 == 0 {
            let sparks = TracerSparks {
                origin: Vec3::new(scatter.crandom() * 128.0, scatter.crandom() * 128.0, 48.0),
                dir: Vec3::new(scatter.crandom(), scatter.crandom(), 1.0),
                count: 12,
                speed: 300.0,
                duration: 600,
                bounce: true,
            };
            tracer_sparks(&mut ctx.spawner(now), &sparks);
        }

        if frame % 15 == 0 {
            let origin = Vec3::new(scatter.crandom() * 160.0, scatter.crandom() * 160.0, 40.0);
            let mut spawner = ctx.spawner(now);
            lfx::blood(&mut spawner, origin, Vec3::Z, 6.0);
            let spray = LfxParams {
                origin,
                dir: Vec3::new(scatter.crandom(), scatter.crandom(), 0.5),
                spread: 40.0,
                speed: 120.0,
                colors: BLOOD_COLORS,
                count: 8,
                duration: 1500,
                scale_up: 0.0,
                blend: BlendMode::Alpha,
            };
            lfx::spark(&mut spawner, &spray, SparkImpact::Bleed);
        }

        if frame % (options.fps * 5).max(1) == 0 {
            if let Some(area) = &area {
                snow_visible = !snow_visible;
                ctx.snow_link(area.snow_id, snow_visible);
            }
        }

        renderer.clear_frame();
        let stats = ctx.tick(now, &view, &mut renderer, &world);
        tracing::trace!("Frame {} submitted {} polygons", frame, renderer.polygons.len());

        second.accumulate(&stats);
        total.accumulate(&stats);

        if frame % options.fps == 0 {
            print_row(frame / options.fps, &second);
            second = FrameStats::default();
        }
    }

    println!("└──────┴────────┴──────────┴──────────┴────────┴─────────┴────────┴────────┴─────────┴─────────┘");
    println!();

    let elapsed = start.elapsed();
    let integrity = ctx.particles().check_integrity() && ctx.marks().check_integrity();

    println!("┌─ TOTALS ─────────────────────────────────────────────────────────┐");
    println!("│ Real Time:          {:.2} s", elapsed.as_secs_f64());
    println!(
        "│ Avg Frame:          {:.1} μs",
        elapsed.as_secs_f64() * 1_000_000.0 / f64::from(total_frames.max(1))
    );
    println!("│ Rendered:           {}", total.particles_rendered);
    println!("│ Released:           {}", total.particles_released);
    println!("│ Bounces:            {}", total.bounces);
    println!("│ Decals:             {}", total.decals_spawned);
    println!("│ Dropped Spawns:     {}", total.dropped_spawns);
    println!("│ Marks Expired:      {}", total.marks_expired);
    println!("│ Marks Evicted:      {}", total.marks_evicted);
    println!("│ Mark Polys:         {}", total.mark_polys_submitted);
    if integrity {
        println!("│ Pool Integrity:     ✓ OK");
    } else {
        println!("│ Pool Integrity:     ✗ BROKEN");
    }
    println!("└──────────────────────────────────────────────────────────────────┘");

    if !integrity {
        std::process::exit(1);
    }
}
