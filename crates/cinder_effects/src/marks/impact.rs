//! Projecting a decal onto world surfaces.

use cinder_shared::constants::{MARK_PROJECTION_DEPTH, MAX_MARK_FRAGMENTS, MAX_VERTS_ON_POLY};
use cinder_shared::math::{perpendicular_vector, rotate_point_around_vector, Vec3};

use crate::interfaces::{PolyVert, SceneRenderer, ShaderHandle, WorldCollision};

use super::pool::MarkPool;

/// A decal request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactMark {
    /// Shader to draw with.
    pub shader: ShaderHandle,
    /// Centre of the decal.
    pub origin: Vec3,
    /// Surface normal; the decal is projected opposite to it.
    pub dir: Vec3,
    /// Rotation about the normal, degrees.
    pub orientation: f32,
    /// Colour, each channel in `[0, 1]`.
    pub color: [f32; 4],
    /// Fade alpha rather than colour at end of life.
    pub alpha_fade: bool,
    /// Half-width of the decal quad. Must be positive.
    pub radius: f32,
    /// Draw for this frame only instead of storing.
    pub temporary: bool,
}

/// What [`impact_mark`] produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImpactOutcome {
    /// Fragments drawn or stored.
    pub fragments: usize,
    /// Older marks evicted to make room.
    pub evicted: usize,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pack_color(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c * 255.0).clamp(0.0, 255.0) as u8)
}

/// Clips a decal against the world and stores or draws the fragments.
///
/// # Panics
///
/// Panics if `mark.radius` is not positive.
pub fn impact_mark(
    marks: &mut MarkPool,
    world: &dyn WorldCollision,
    renderer: &mut dyn SceneRenderer,
    now: i32,
    mark: &ImpactMark,
) -> ImpactOutcome {
    if mark.radius <= 0.0 || mark.radius.is_nan() {
        tracing::error!("impact_mark called with radius {}", mark.radius);
        panic!("impact_mark called with radius {}", mark.radius);
    }

    let Some(normal) = mark.dir.normalize() else {
        tracing::trace!("impact_mark with zero normal ignored");
        return ImpactOutcome::default();
    };
    let Some(side) = perpendicular_vector(normal) else {
        return ImpactOutcome::default();
    };
    let up = rotate_point_around_vector(normal, side, mark.orientation);
    let side = normal.cross(up);

    let r = mark.radius;
    let corners = [
        mark.origin - side * r - up * r,
        mark.origin + side * r - up * r,
        mark.origin + side * r + up * r,
        mark.origin - side * r + up * r,
    ];
    let projection = normal * -MARK_PROJECTION_DEPTH;
    let tex_scale = 0.5 / r;
    let modulate = pack_color(mark.color);

    let mut outcome = ImpactOutcome::default();
    let mut visit = |points: &[Vec3]| {
        if outcome.fragments >= MAX_MARK_FRAGMENTS || points.len() < 3 {
            return;
        }

        let mut verts = [PolyVert::default(); MAX_VERTS_ON_POLY];
        let count = points.len().min(MAX_VERTS_ON_POLY);
        for (vert, &point) in verts.iter_mut().zip(&points[..count]) {
            let delta = point - mark.origin;
            let st = [
                0.5 + delta.dot(side) * tex_scale,
                0.5 + delta.dot(up) * tex_scale,
            ];
            *vert = PolyVert::new(point, st, modulate);
        }
        outcome.fragments += 1;

        if mark.temporary {
            if mark.shader.is_valid() {
                renderer.submit_polygon(mark.shader, &verts[..count]);
            }
            return;
        }

        let alloc = marks.allocate_mark();
        outcome.evicted += alloc.evicted;
        if let Some(slot) = marks.get_mut(alloc.handle) {
            slot.time = now;
            slot.shader = mark.shader;
            slot.color = mark.color;
            slot.alpha_fade = mark.alpha_fade;
            slot.verts = verts;
            slot.num_verts = count;
        }
    };
    world.mark_fragments(&corners, projection, &mut visit);

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::testing::{OpenWorld, RecordingRenderer};

    fn blood(temporary: bool) -> ImpactMark {
        ImpactMark {
            shader: ShaderHandle(3),
            origin: Vec3::new(10.0, 0.0, 0.0),
            dir: Vec3::Z,
            orientation: 45.0,
            color: [1.0, 0.5, 0.0, 1.0],
            alpha_fade: true,
            radius: 15.0,
            temporary,
        }
    }

    #[test]
    fn test_persistent_mark_stored() {
        let mut marks = MarkPool::new(8);
        let mut renderer = RecordingRenderer::new();
        let outcome = impact_mark(&mut marks, &OpenWorld, &mut renderer, 1234, &blood(false));

        assert_eq!(outcome, ImpactOutcome { fragments: 1, evicted: 0 });
        assert!(renderer.polygons.is_empty());

        let (_, stored) = marks.iter().next().unwrap();
        assert_eq!(stored.time, 1234);
        assert_eq!(stored.num_verts, 4);
        assert_eq!(stored.verts()[0].modulate, [255, 127, 0, 255]);
    }

    #[test]
    fn test_mark_texture_spans_unit_square() {
        let mut marks = MarkPool::new(8);
        let mut renderer = RecordingRenderer::new();
        let _ = impact_mark(&mut marks, &OpenWorld, &mut renderer, 0, &blood(false));

        let (_, stored) = marks.iter().next().unwrap();
        let st: Vec<[f32; 2]> = stored.verts().iter().map(|v| v.st).collect();
        let expected = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        for (got, want) in st.iter().zip(expected) {
            assert!((got[0] - want[0]).abs() < 1e-4, "{got:?} vs {want:?}");
            assert!((got[1] - want[1]).abs() < 1e-4, "{got:?} vs {want:?}");
        }
    }

    #[test]
    fn test_corners_lie_on_surface_plane() {
        let mut marks = MarkPool::new(8);
        let mut renderer = RecordingRenderer::new();
        let _ = impact_mark(&mut marks, &OpenWorld, &mut renderer, 0, &blood(false));

        let (_, stored) = marks.iter().next().unwrap();
        for v in stored.verts() {
            assert!(v.xyz[2].abs() < 1e-4);
            let d = Vec3::from_array(v.xyz) - Vec3::new(10.0, 0.0, 0.0);
            assert!((d.length() - 15.0 * 2f32.sqrt()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_temporary_mark_drawn_not_stored() {
        let mut marks = MarkPool::new(8);
        let mut renderer = RecordingRenderer::new();
        let outcome = impact_mark(&mut marks, &OpenWorld, &mut renderer, 0, &blood(true));

        assert_eq!(outcome.fragments, 1);
        assert_eq!(marks.active_count(), 0);
        assert_eq!(renderer.polygons.len(), 1);
        assert_eq!(renderer.polygons[0].verts.len(), 4);
    }

    #[test]
    fn test_full_pool_reports_eviction() {
        let mut marks = MarkPool::new(2);
        let mut renderer = RecordingRenderer::new();
        let _ = impact_mark(&mut marks, &OpenWorld, &mut renderer, 10, &blood(false));
        let _ = impact_mark(&mut marks, &OpenWorld, &mut renderer, 10, &blood(false));
        let outcome = impact_mark(&mut marks, &OpenWorld, &mut renderer, 20, &blood(false));

        assert_eq!(outcome.evicted, 2);
        assert_eq!(marks.active_count(), 1);
    }

    #[test]
    #[should_panic(expected = "radius")]
    fn test_non_positive_radius_is_fatal() {
        let mut marks = MarkPool::new(2);
        let mut renderer = RecordingRenderer::new();
        let mut mark = blood(false);
        mark.radius = 0.0;
        let _ = impact_mark(&mut marks, &OpenWorld, &mut renderer, 0, &mark);
    }
}
