//! # Billboard Geometry
//!
//! Turns a particle's state for this frame into at most two polygons. One
//! builder per [`ParticleKind`] variant; each derives its own basis, colour
//! and size. Degenerate input (zero-length axes) produces no geometry, and
//! [`submit`] drops anything with a zero shader or non-finite vertices, so
//! NaN never reaches the renderer.

use cinder_shared::math::{rolled_basis, Vec3};
use cinder_shared::palette::palette_rgb;

use crate::interfaces::{PolyVert, SceneRenderer, ShaderHandle};
use crate::view::FrameView;

use super::integrate::FrameSample;
use super::{LfxStyle, Particle, ParticleKind, QuakeSprite, Smoke, SmokeTint, Weather, WeatherStyle};

/// Length multiplier of LFX spark streaks relative to per-frame travel.
pub const LFX_SPARK_STRETCH: f32 = 7.0;

/// Modulate scale of the LFX spark glow (out of 255).
pub const LFX_GLOW_INTENSITY: f32 = 32.0;

/// Beam length per unit of speed for spark beams.
pub const SPARK_STRETCH: f32 = 0.04;

/// Longest spark beam.
pub const SPARK_MAX_LENGTH: f32 = 48.0;

/// Palette sprites nearer than this are drawn at unit scale.
pub const QUAKE_NEAR_DISTANCE: f32 = 20.0;

/// Largest palette sprite scale.
pub const QUAKE_MAX_SCALE: f32 = 2.0;

/// Ramp steps advanced per second by ramping palette sprites.
pub const RAMP_STEPS_PER_SECOND: f32 = 10.0;

/// Packs an RGB colour and alpha into vertex colour, scaling by `scale`
/// (255 for full intensity) and saturating.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn pack_rgba(rgb: [f32; 3], alpha: f32, scale: f32) -> [u8; 4] {
    let channel = |v: f32| (v * scale).clamp(0.0, 255.0) as u8;
    [channel(rgb[0]), channel(rgb[1]), channel(rgb[2]), channel(alpha)]
}

/// A polygon of up to four vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Billboard {
    /// Shader to draw with.
    pub shader: ShaderHandle,
    verts: [PolyVert; 4],
    len: usize,
}

impl Billboard {
    /// Quad around `center`, `width`/`height` being half-extents along
    /// `right`/`up`.
    #[must_use]
    pub fn quad(
        shader: ShaderHandle,
        center: Vec3,
        right: Vec3,
        up: Vec3,
        width: f32,
        height: f32,
        modulate: [u8; 4],
    ) -> Self {
        let low = center.mul_add(-height, up);
        let high = center.mul_add(height, up);
        Self {
            shader,
            verts: [
                PolyVert::new(low.mul_add(-width, right), [0.0, 0.0], modulate),
                PolyVert::new(low.mul_add(width, right), [0.0, 1.0], modulate),
                PolyVert::new(high.mul_add(width, right), [1.0, 1.0], modulate),
                PolyVert::new(high.mul_add(-width, right), [1.0, 0.0], modulate),
            ],
            len: 4,
        }
    }

    /// Triangle covering the upper-left half of the equivalent quad.
    #[must_use]
    pub fn triangle(
        shader: ShaderHandle,
        center: Vec3,
        right: Vec3,
        up: Vec3,
        width: f32,
        height: f32,
        modulate: [u8; 4],
    ) -> Self {
        let low = center.mul_add(-height, up);
        let high = center.mul_add(height, up);
        Self {
            shader,
            verts: [
                PolyVert::new(low.mul_add(-width, right), [1.0, 0.0], modulate),
                PolyVert::new(high.mul_add(-width, right), [0.0, 0.0], modulate),
                PolyVert::new(high.mul_add(width, right), [0.0, 1.0], modulate),
                PolyVert::default(),
            ],
            len: 3,
        }
    }

    /// Quad from four corners in winding order.
    #[must_use]
    pub fn from_corners(shader: ShaderHandle, corners: [Vec3; 4], modulate: [u8; 4]) -> Self {
        let st = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];
        Self {
            shader,
            verts: [
                PolyVert::new(corners[0], st[0], modulate),
                PolyVert::new(corners[1], st[1], modulate),
                PolyVert::new(corners[2], st[2], modulate),
                PolyVert::new(corners[3], st[3], modulate),
            ],
            len: 4,
        }
    }

    /// Vertices in winding order.
    #[must_use]
    pub fn verts(&self) -> &[PolyVert] {
        &self.verts[..self.len]
    }

    /// True if every vertex is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.verts().iter().all(PolyVert::is_finite)
    }
}

/// Geometry produced for one particle this frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct Geometry {
    polys: [Billboard; 2],
    count: usize,
}

impl Geometry {
    /// Forgets the previous particle's polygons.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    fn push(&mut self, poly: Billboard) {
        if let Some(slot) = self.polys.get_mut(self.count) {
            *slot = poly;
            self.count += 1;
        }
    }

    /// The polygons built so far.
    #[must_use]
    pub fn as_slice(&self) -> &[Billboard] {
        &self.polys[..self.count]
    }

    /// True if nothing was built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Submits the polygons that have a shader and finite vertices. Returns how
/// many were submitted.
pub fn submit(geometry: &Geometry, renderer: &mut dyn SceneRenderer) -> usize {
    let mut submitted = 0;
    for poly in geometry.as_slice() {
        if !poly.shader.is_valid() || !poly.is_finite() {
            continue;
        }
        renderer.submit_polygon(poly.shader, poly.verts());
        submitted += 1;
    }
    submitted
}

/// Builds this frame's polygons for `p` into `out`.
///
/// May update per-frame particle state: smoke roll accumulation and palette
/// ramp progress (an exhausted ramp sets `end_time` to now and draws
/// nothing).
pub fn build(p: &mut Particle, sample: &FrameSample, view: &FrameView, out: &mut Geometry) {
    out.clear();
    match p.kind {
        ParticleKind::Sprite => sprite(p, view, out),
        ParticleKind::Weather(weather) => weather_flake(p, &weather, view, out),
        ParticleKind::Smoke(smoke) => smoke_puff(p, smoke, view, out),
        ParticleKind::Lfx(style) => lfx(p, style, view, out),
        ParticleKind::Spark => spark_beam(p, sample, view, out),
        ParticleKind::Quake(sprite) => quake(p, sprite, view, out),
    }
}

fn view_or_rolled(view: &FrameView, roll: f32) -> (Vec3, Vec3) {
    if roll == 0.0 {
        (view.right, view.up)
    } else {
        let basis = rolled_basis(view.forward, roll);
        (basis.right, basis.up)
    }
}

fn sprite(p: &Particle, view: &FrameView, out: &mut Geometry) {
    let (width, height) = p.size_at(view.now);
    let (right, up) = view_or_rolled(view, p.roll);
    let modulate = pack_rgba([1.0; 3], 1.0, 255.0);
    out.push(Billboard::quad(p.shader, p.position, right, up, width, height, modulate));
}

fn weather_flake(p: &Particle, weather: &Weather, view: &FrameView, out: &mut Geometry) {
    if !weather.linked || view.beyond_cull(p.position) {
        return;
    }
    let modulate = pack_rgba([1.0; 3], 1.0, 255.0);
    out.push(match weather.style {
        WeatherStyle::Bubble => {
            Billboard::quad(p.shader, p.position, view.right, view.up, p.width, p.height, modulate)
        }
        WeatherStyle::Snow => {
            Billboard::triangle(p.shader, p.position, view.right, view.up, p.width, p.height, modulate)
        }
    });
}

fn smoke_color(tint: SmokeTint, distance: f32, fade: f32) -> [f32; 3] {
    match tint {
        SmokeTint::White => [1.0; 3],
        SmokeTint::BloodRed => [0.22, 0.0, 0.0],
        SmokeTint::Grey75 => {
            let distance = if distance > 0.0 { distance } else { 1.0 };
            [(0.25 * 4096.0 / distance).min(0.5); 3]
        }
        SmokeTint::EmissiveFade => [(fade * fade).max(0.0); 3],
    }
}

fn smoke_puff(p: &mut Particle, smoke: Smoke, view: &FrameView, out: &mut Geometry) {
    if view.beyond_cull(p.position) {
        return;
    }

    let fade = p.fade_remaining(view.now);
    let color = smoke_color(smoke.tint, view.origin.distance(p.position), fade);
    let alpha = (fade * p.alpha).clamp(0.0, 1.0);

    let (roll_right, roll_up) = if smoke.impact {
        (view.roll_right, view.roll_up)
    } else {
        p.accumulated_roll = (p.accumulated_roll + p.roll) % 3600.0;
        let basis = rolled_basis(view.roll_forward, p.accumulated_roll * 0.1);
        (basis.right, basis.up)
    };

    let modulate = pack_rgba(color, alpha, 255.0);
    let poly = if p.rotate {
        let (width, height) = p.size_at(view.now);
        Billboard::quad(p.shader, p.position, roll_right, roll_up, width, height, modulate)
    } else {
        Billboard::quad(p.shader, p.position, view.right, view.up, p.width, p.height, modulate)
    };
    out.push(poly);
}

/// Colour of an LFX particle at `now`: the five stops are walked with four
/// linear segments across the fade ramp.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn lfx_color(p: &Particle, now: i32) -> [f32; 4] {
    let progress = (1.0 - p.fade_remaining(now)) * 4.0;
    let segment = (progress as usize).min(3);
    let local = (progress - segment as f32).clamp(0.0, 1.0);

    let mut rgba = [0.0; 4];
    for (channel, stops) in p.cols.iter().enumerate() {
        let from = stops[segment];
        rgba[channel] = from + (stops[segment + 1] - from) * local;
    }
    rgba
}

fn lfx(p: &Particle, style: LfxStyle, view: &FrameView, out: &mut Geometry) {
    let color = lfx_color(p, view.now);
    let rgb = [color[0], color[1], color[2]];
    let alpha = color[3].clamp(0.0, 1.0);
    let (width, height) = p.size_at(view.now);
    let modulate = pack_rgba(rgb, alpha, 255.0);

    match style {
        LfxStyle::Smoke => {
            let (right, up) = view_or_rolled(view, p.roll);
            out.push(Billboard::quad(p.shader, p.position, right, up, width, height, modulate));
        }
        LfxStyle::Shock => {
            let Some(direction) = p.direction.normalize() else {
                return;
            };
            let basis = rolled_basis(direction, p.roll);
            out.push(Billboard::quad(p.shader, p.position, basis.right, basis.up, width, height, modulate));
        }
        LfxStyle::Spark => {
            let Some((forward, travel)) = (p.position - p.stretch_origin).normalize_with_length() else {
                return;
            };
            let side = view.right * forward.dot(view.up) - view.up * forward.dot(view.right);
            let Some(side) = side.normalize() else {
                return;
            };

            let length = travel * (p.width + p.height) * LFX_SPARK_STRETCH;
            let start = p.position.mul_add(-length * 0.5, forward);
            let finish = p.position.mul_add(length * 0.5, forward);
            out.push(Billboard::from_corners(
                p.shader,
                [
                    finish.mul_add(width, side),
                    finish.mul_add(-width, side),
                    start.mul_add(-width, side),
                    start.mul_add(width, side),
                ],
                modulate,
            ));

            let glow = pack_rgba(rgb, alpha, LFX_GLOW_INTENSITY);
            out.push(Billboard::quad(
                p.shader,
                p.position,
                view.right,
                view.up,
                width * length,
                height * length,
                glow,
            ));
        }
    }
}

fn spark_beam(p: &Particle, sample: &FrameSample, view: &FrameView, out: &mut Geometry) {
    let Some(forward) = (sample.velocity + p.acceleration).normalize() else {
        return;
    };
    let side = view.right * forward.dot(view.up) - view.up * forward.dot(view.right);
    let Some(side) = side.normalize() else {
        return;
    };

    let length = (sample.velocity.length() * SPARK_STRETCH).min(SPARK_MAX_LENGTH);
    let fade = p.fade_remaining(view.now);
    let alpha = (fade * fade * sample.alpha).clamp(0.0, 1.0);
    let rgb = [p.cols[0][0], p.cols[1][0], p.cols[2][0]];
    let modulate = pack_rgba(rgb, alpha, 255.0);
    let (width, _) = p.size_at(view.now);

    let tail = p.position.mul_add(-length, forward);
    out.push(Billboard::from_corners(
        p.shader,
        [
            p.position.mul_add(width, side),
            p.position.mul_add(-width, side),
            tail.mul_add(-width, side),
            tail.mul_add(width, side),
        ],
        modulate,
    ));
}

/// Perspective scale of a palette sprite at `distance` from the viewer.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn quake_scale(distance: f32, vid_height: u32) -> f32 {
    let scale = if distance < QUAKE_NEAR_DISTANCE {
        1.0
    } else {
        1.0 + distance * 0.004
    };
    let resolution = 480.0 / vid_height.max(1) as f32 + 0.4;
    (scale * resolution).min(QUAKE_MAX_SCALE)
}

fn quake(p: &mut Particle, mut sprite: QuakeSprite, view: &FrameView, out: &mut Geometry) {
    let index = match sprite.ramp.as_mut() {
        Some(ramp) => {
            ramp.position += view.frame_seconds * RAMP_STEPS_PER_SECOND;
            let step = ramp.ramp.index_at(ramp.position);
            p.kind = ParticleKind::Quake(sprite);
            match step {
                Some(index) => index,
                None => {
                    p.end_time = view.now;
                    return;
                }
            }
        }
        None => sprite.palette_index,
    };

    let scale = quake_scale(view.origin.distance(p.position), view.vid_height);
    let alpha = (p.alpha * p.fade_remaining(view.now)).clamp(0.0, 1.0);
    let modulate = pack_rgba(palette_rgb(index), alpha, 255.0);
    out.push(Billboard::quad(p.shader, p.position, view.right, view.up, scale, scale, modulate));
}
