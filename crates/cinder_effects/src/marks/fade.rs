//! Per-frame mark pass: expire, fade, resubmit.

use cinder_shared::constants::{ENERGY_FADE_START, ENERGY_FADE_TIME, MARK_FADE_TIME, MARK_TOTAL_TIME};

use crate::interfaces::{SceneRenderer, ShaderHandle};

use super::pool::{MarkPoly, MarkPool};

/// Counters from one mark pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkPassStats {
    /// Marks released for age.
    pub expired: usize,
    /// Mark polygons submitted.
    pub submitted: usize,
}

/// Glow intensity of an energy mark `elapsed` ms after creation, on the
/// 0..255 scale. Starts over-bright and cools linearly to zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn energy_fade(elapsed: i32) -> f32 {
    (ENERGY_FADE_START - ENERGY_FADE_START * (elapsed as f32 / ENERGY_FADE_TIME as f32)).max(0.0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_rgb(mark: &mut MarkPoly, fade: f32) {
    let rgb = [
        (mark.color[0] * fade).clamp(0.0, 255.0) as u8,
        (mark.color[1] * fade).clamp(0.0, 255.0) as u8,
        (mark.color[2] * fade).clamp(0.0, 255.0) as u8,
    ];
    for v in mark.verts_mut() {
        v.modulate[..3].copy_from_slice(&rgb);
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fade_mark(mark: &mut MarkPoly, now: i32, energy_shader: ShaderHandle) {
    let elapsed = now - mark.time;

    if energy_shader.is_valid() && mark.shader == energy_shader {
        let fade = energy_fade(elapsed);
        let glowing = mark.verts().first().is_some_and(|v| v.modulate[0] != 0);
        if fade < 255.0 && glowing {
            scale_rgb(mark, fade);
        }
    }

    let remaining = mark.time + MARK_TOTAL_TIME - now;
    if remaining < MARK_FADE_TIME {
        let fade = 255.0 * remaining as f32 / MARK_FADE_TIME as f32;
        if mark.alpha_fade {
            let alpha = fade.clamp(0.0, 255.0) as u8;
            for v in mark.verts_mut() {
                v.modulate[3] = alpha;
            }
        } else {
            scale_rgb(mark, fade);
        }
    }
}

/// Runs the mark pass for one frame.
///
/// Marks past `MARK_TOTAL_TIME` are released. Energy marks cool from their
/// initial glow; every mark fades out over its final `MARK_FADE_TIME`,
/// through alpha or through colour depending on its `alpha_fade` flag.
/// Every surviving mark is submitted, changed or not.
pub fn add_marks(
    pool: &mut MarkPool,
    now: i32,
    energy_shader: ShaderHandle,
    renderer: &mut dyn SceneRenderer,
) -> MarkPassStats {
    let mut submitted = 0;

    let expired = pool.retain(|_, mark| {
        if now > mark.time + MARK_TOTAL_TIME {
            return false;
        }

        fade_mark(mark, now, energy_shader);

        if mark.shader.is_valid() && mark.num_verts > 0 {
            renderer.submit_polygon(mark.shader, mark.verts());
            submitted += 1;
        }
        true
    });

    MarkPassStats { expired, submitted }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::testing::RecordingRenderer;
    use crate::interfaces::PolyVert;
    use cinder_shared::math::Vec3;

    const BLOOD: ShaderHandle = ShaderHandle(1);
    const ENERGY: ShaderHandle = ShaderHandle(2);

    fn spawn(pool: &mut MarkPool, time: i32, shader: ShaderHandle, alpha_fade: bool) {
        let handle = pool.allocate_mark().handle;
        let mark = pool.get_mut(handle).unwrap();
        mark.time = time;
        mark.shader = shader;
        mark.color = [1.0, 1.0, 1.0, 1.0];
        mark.alpha_fade = alpha_fade;
        mark.num_verts = 4;
        for v in mark.verts_mut() {
            *v = PolyVert::new(Vec3::ZERO, [0.0, 0.0], [255; 4]);
        }
    }

    fn first_modulate(pool: &MarkPool) -> [u8; 4] {
        pool.iter().next().unwrap().1.verts()[0].modulate
    }

    #[test]
    fn test_alpha_fade_is_monotonic() {
        let mut pool = MarkPool::new(4);
        let mut renderer = RecordingRenderer::new();
        spawn(&mut pool, 0, BLOOD, true);

        let _ = add_marks(&mut pool, 0, ENERGY, &mut renderer);
        let at_start = first_modulate(&pool)[3];
        let _ = add_marks(&mut pool, MARK_TOTAL_TIME - MARK_FADE_TIME / 2, ENERGY, &mut renderer);
        let halfway = first_modulate(&pool)[3];
        let _ = add_marks(&mut pool, MARK_TOTAL_TIME, ENERGY, &mut renderer);
        let at_end = first_modulate(&pool)[3];

        assert!(halfway < at_start);
        assert!(halfway > at_end);
        assert_eq!(first_modulate(&pool)[0], 255);
    }

    #[test]
    fn test_color_fade_keeps_alpha() {
        let mut pool = MarkPool::new(4);
        let mut renderer = RecordingRenderer::new();
        spawn(&mut pool, 0, BLOOD, false);

        let _ = add_marks(&mut pool, MARK_TOTAL_TIME - MARK_FADE_TIME / 2, ENERGY, &mut renderer);
        let modulate = first_modulate(&pool);
        assert_eq!(modulate[3], 255);
        assert_eq!(modulate[0], 127);
    }

    #[test]
    fn test_expired_marks_released() {
        let mut pool = MarkPool::new(4);
        let mut renderer = RecordingRenderer::new();
        spawn(&mut pool, 0, BLOOD, true);
        spawn(&mut pool, 5000, BLOOD, true);

        let stats = add_marks(&mut pool, MARK_TOTAL_TIME + 1, ENERGY, &mut renderer);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.submitted, 1);
        assert_eq!(pool.active_count(), 1);
        assert!(pool.check_integrity());
    }

    #[test]
    fn test_every_live_mark_is_resubmitted() {
        let mut pool = MarkPool::new(8);
        let mut renderer = RecordingRenderer::new();
        for t in 0..5 {
            spawn(&mut pool, t, BLOOD, true);
        }
        for frame in 0..3 {
            renderer.clear_frame();
            let stats = add_marks(&mut pool, 100 + frame, ENERGY, &mut renderer);
            assert_eq!(stats.submitted, 5);
            assert_eq!(renderer.polygons.len(), 5);
        }
    }

    #[test]
    fn test_energy_mark_cools() {
        assert_eq!(energy_fade(0), 450.0);
        assert!((energy_fade(1500) - 225.0).abs() < 1e-3);
        assert_eq!(energy_fade(4000), 0.0);

        let mut pool = MarkPool::new(2);
        let mut renderer = RecordingRenderer::new();
        spawn(&mut pool, 0, ENERGY, false);

        let _ = add_marks(&mut pool, 500, ENERGY, &mut renderer);
        assert_eq!(first_modulate(&pool)[0], 255);

        let _ = add_marks(&mut pool, 1500, ENERGY, &mut renderer);
        assert_eq!(first_modulate(&pool)[0], 225);

        let _ = add_marks(&mut pool, 3500, ENERGY, &mut renderer);
        assert_eq!(first_modulate(&pool)[0], 0);
        assert_eq!(first_modulate(&pool)[3], 255);
    }

    #[test]
    fn test_unregistered_shader_not_submitted() {
        let mut pool = MarkPool::new(2);
        let mut renderer = RecordingRenderer::new();
        spawn(&mut pool, 0, ShaderHandle::NONE, true);
        let stats = add_marks(&mut pool, 10, ENERGY, &mut renderer);
        assert_eq!(stats.submitted, 0);
        assert_eq!(pool.active_count(), 1);
    }
}
