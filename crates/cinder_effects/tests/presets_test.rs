//! Integration tests for the preset library driven through a context.

use cinder_effects::emitters::area::ParticleArea;
use cinder_effects::emitters::legacy::{self, Burst};
use cinder_effects::emitters::lfx::{self, LfxParams};
use cinder_effects::emitters::{quake, sprite};
use cinder_effects::interfaces::testing::{OpenWorld, RecordingRenderer};
use cinder_effects::particle::LfxStyle;
use cinder_effects::{
    BlendMode, EffectsConfig, EffectsContext, EffectsError, ParticleKind, ViewState,
};
use cinder_shared::math::Vec3;

fn setup() -> (EffectsContext, RecordingRenderer) {
    let mut renderer = RecordingRenderer::new();
    let ctx = EffectsContext::new(EffectsConfig::default(), &mut renderer).unwrap();
    (ctx, renderer)
}

fn burst(duration: i32) -> Burst {
    Burst {
        origin: Vec3::new(100.0, 0.0, 0.0),
        velocity: Vec3::Z,
        duration,
        spread_x: 4.0,
        spread_y: 4.0,
        speed: 1.0,
    }
}

#[test]
fn test_legacy_puffs_live_for_their_duration() {
    let (mut ctx, mut renderer) = setup();
    {
        let mut spawner = ctx.spawner(0);
        assert!(legacy::puff(&mut spawner, &burst(800), 6.0));
        assert!(legacy::blast(&mut spawner, &burst(800), 10.0));
        assert!(legacy::blood_spurt(&mut spawner, &burst(800), 2.0));
    }
    let view = ViewState::default();

    let stats = ctx.tick(400, &view, &mut renderer, &OpenWorld);
    assert_eq!(stats.particles_active, 3);
    assert_eq!(stats.particles_rendered, 3);

    let stats = ctx.tick(801, &view, &mut renderer, &OpenWorld);
    assert_eq!(stats.particles_released, 3);
    assert_eq!(stats.particles_active, 0);
}

#[test]
fn test_legacy_puff_darkens_while_fading() {
    let (mut ctx, mut renderer) = setup();
    legacy::puff(&mut ctx.spawner(0), &burst(1000), 6.0);
    let shader = ctx.media().puff;
    let view = ViewState::default();

    ctx.tick(200, &view, &mut renderer, &OpenWorld);
    let early = renderer.polygons_with(shader).next().unwrap().verts[0].modulate[0];

    renderer.clear_frame();
    ctx.tick(900, &view, &mut renderer, &OpenWorld);
    let late = renderer.polygons_with(shader).next().unwrap().verts[0].modulate[0];

    assert!(late < early, "early {early}, late {late}");
}

#[test]
fn test_sprite_explosion_grows_then_goes() {
    let (mut ctx, mut renderer) = setup();
    let origin = Vec3::new(200.0, 0.0, 0.0);
    assert!(sprite::explosion(&mut ctx.spawner(0), origin, Vec3::ZERO, 600, (10.0, 60.0)));
    let shader = ctx.media().explosion;
    let view = ViewState::default();

    let extent = |renderer: &RecordingRenderer| {
        let poly = renderer.polygons_with(shader).next().unwrap();
        poly.verts
            .iter()
            .map(|v| Vec3::from_array(v.xyz).distance(origin))
            .fold(0.0_f32, f32::max)
    };

    ctx.tick(50, &view, &mut renderer, &OpenWorld);
    let small = extent(&renderer);
    renderer.clear_frame();
    ctx.tick(500, &view, &mut renderer, &OpenWorld);
    let large = extent(&renderer);
    assert!(large > small);
    let late = renderer.polygons_with(shader).next().unwrap();
    assert!(late.verts.iter().all(|v| v.modulate == [255; 4]));

    renderer.clear_frame();
    let stats = ctx.tick(650, &view, &mut renderer, &OpenWorld);
    assert_eq!(stats.particles_active, 0);
    assert!(renderer.polygons_with(shader).next().is_none());
}

#[test]
fn test_blood_droplets_face_the_camera() {
    let (mut ctx, mut renderer) = setup();
    let spawned = lfx::blood(&mut ctx.spawner(0), Vec3::new(128.0, 0.0, 0.0), Vec3::Z, 4.0);
    assert_eq!(spawned, 16);
    let shader = ctx.media().ball.alpha;
    let view = ViewState::default();
    let forward = view.axis[0];

    let stats = ctx.tick(0, &view, &mut renderer, &OpenWorld);
    assert_eq!(stats.particles_rendered, 16);
    assert_eq!(renderer.polygons_with(shader).count(), 16);
    for poly in renderer.polygons_with(shader) {
        assert_eq!(poly.verts.len(), 4);
        let first = Vec3::from_array(poly.verts[0].xyz);
        for v in &poly.verts {
            let depth = (Vec3::from_array(v.xyz) - first).dot(forward);
            assert!(depth.abs() < 1e-3, "droplet quad tilted off the view plane: {depth}");
        }
    }
}

#[test]
fn test_run_effect_uses_white_shader() {
    let (mut ctx, mut renderer) = setup();
    let spawned = quake::run_effect(&mut ctx.spawner(0), Vec3::new(64.0, 0.0, 0.0), Vec3::Z, 0xf3, 12);
    assert_eq!(spawned, 12);

    // Some dots live for less than a frame, so draw at spawn time.
    let stats = ctx.tick(0, &ViewState::default(), &mut renderer, &OpenWorld);
    assert_eq!(stats.particles_rendered, 12);
    assert_eq!(renderer.polygons_with(ctx.media().white).count(), 12);
}

#[test]
fn test_smoke_puff_count_from_params() {
    let (mut ctx, _renderer) = setup();
    let params = LfxParams {
        origin: Vec3::ZERO,
        dir: Vec3::Z,
        spread: 8.0,
        speed: 1.0,
        colors: [[1.0; 4]; 5],
        count: 42,
        duration: 1000,
        scale_up: 20.0,
        blend: BlendMode::Modulate,
    };
    // 44 / (42 / 2 + 1) + 1
    assert_eq!(lfx::smoke(&mut ctx.spawner(0), &params), 3);

    let modulate = ctx.media().smoke.modulate;
    for (_, p) in ctx.particles().iter() {
        assert_eq!(p.kind, ParticleKind::Lfx(LfxStyle::Smoke));
        assert_eq!(p.shader, modulate);
        assert_eq!(p.width, 14.0);
    }
}

#[test]
fn test_area_records() {
    assert_eq!(ParticleArea::parse(""), Ok(None));

    let area = ParticleArea::parse("3 10 20 300 10 20 100 64 0 12").unwrap().unwrap();
    assert_eq!(area.range(), 32.0);
    assert_eq!(area.count, 64);
    assert!(!area.turbulent);

    match ParticleArea::parse("3 10 20") {
        Err(EffectsError::MalformedArea { field, .. }) => assert_eq!(field, "origin"),
        other => panic!("unexpected {other:?}"),
    }
}
