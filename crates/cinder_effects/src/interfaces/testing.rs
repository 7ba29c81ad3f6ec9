//! Test doubles for the renderer and world collision.
//!
//! Used by unit tests, integration tests, benches and the soak binary.
//! Compiled only for tests or with the `testing` feature.

use cinder_shared::math::Vec3;

use super::{
    PolyVert, RefEntity, SceneRenderer, ShaderHandle, TraceResult, WorldCollision, WORLD_ENTITY,
};

/// A polygon captured by [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub struct SubmittedPolygon {
    /// Shader it was submitted with.
    pub shader: ShaderHandle,
    /// Its vertices.
    pub verts: Vec<PolyVert>,
}

/// Renderer that records everything submitted to it.
///
/// Shader handles are assigned in registration order starting at 1.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Registered shader names; handle `n` is `shaders[n - 1]`.
    pub shaders: Vec<String>,
    /// Polygons submitted since the last [`RecordingRenderer::clear_frame`].
    pub polygons: Vec<SubmittedPolygon>,
    /// Sprite entities submitted since the last clear.
    pub entities: Vec<RefEntity>,
    /// Dynamic lights submitted since the last clear.
    pub lights: Vec<(Vec3, f32, [f32; 3])>,
    /// When set, every registration fails.
    pub refuse_shaders: bool,
}

impl RecordingRenderer {
    /// Creates a renderer that accepts every shader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer that registers nothing.
    #[must_use]
    pub fn without_shaders() -> Self {
        Self {
            refuse_shaders: true,
            ..Self::default()
        }
    }

    /// Handle previously returned for `name`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn handle_of(&self, name: &str) -> ShaderHandle {
        self.shaders
            .iter()
            .position(|s| s == name)
            .map_or(ShaderHandle::NONE, |i| ShaderHandle(i as u32 + 1))
    }

    /// Name of a registered shader.
    #[must_use]
    pub fn name_of(&self, shader: ShaderHandle) -> Option<&str> {
        let index = (shader.0 as usize).checked_sub(1)?;
        self.shaders.get(index).map(String::as_str)
    }

    /// Polygons submitted with `shader`.
    pub fn polygons_with(&self, shader: ShaderHandle) -> impl Iterator<Item = &SubmittedPolygon> {
        self.polygons.iter().filter(move |p| p.shader == shader)
    }

    /// Forgets the current frame's submissions, keeping registrations.
    pub fn clear_frame(&mut self) {
        self.polygons.clear();
        self.entities.clear();
        self.lights.clear();
    }
}

impl SceneRenderer for RecordingRenderer {
    #[allow(clippy::cast_possible_truncation)]
    fn register_shader(&mut self, name: &str) -> ShaderHandle {
        if self.refuse_shaders {
            return ShaderHandle::NONE;
        }
        let existing = self.handle_of(name);
        if existing.is_valid() {
            return existing;
        }
        self.shaders.push(name.to_owned());
        ShaderHandle(self.shaders.len() as u32)
    }

    fn submit_polygon(&mut self, shader: ShaderHandle, verts: &[PolyVert]) {
        self.polygons.push(SubmittedPolygon {
            shader,
            verts: verts.to_vec(),
        });
    }

    fn submit_ref_entity(&mut self, entity: &RefEntity) {
        self.entities.push(*entity);
    }

    fn add_dynamic_light(&mut self, origin: Vec3, radius: f32, color: [f32; 3]) {
        self.lights.push((origin, radius, color));
    }
}

/// World with nothing in it. Every trace is clear.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenWorld;

impl WorldCollision for OpenWorld {
    fn trace(&self, _start: Vec3, end: Vec3, _mask: u32) -> TraceResult {
        TraceResult::clear(end)
    }
}

/// World consisting of an infinite horizontal floor at `height`.
#[derive(Clone, Copy, Debug)]
pub struct FloorWorld {
    /// Z coordinate of the floor surface.
    pub height: f32,
    /// Entity number reported on impact.
    pub entity: i32,
}

impl FloorWorld {
    /// A static-world floor at `height`.
    #[must_use]
    pub const fn new(height: f32) -> Self {
        Self {
            height,
            entity: WORLD_ENTITY,
        }
    }

    /// A floor that reports impacts against a dynamic entity instead.
    #[must_use]
    pub const fn entity(height: f32, entity: i32) -> Self {
        Self { height, entity }
    }
}

impl WorldCollision for FloorWorld {
    fn trace(&self, start: Vec3, end: Vec3, _mask: u32) -> TraceResult {
        if start.z < self.height || end.z >= self.height {
            return TraceResult::clear(end);
        }
        let fraction = (start.z - self.height) / (start.z - end.z);
        TraceResult {
            fraction,
            end_pos: start.lerp(end, fraction),
            normal: Vec3::Z,
            entity: self.entity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_renderer_handles() {
        let mut renderer = RecordingRenderer::new();
        let a = renderer.register_shader("a");
        let b = renderer.register_shader("b");
        assert_eq!(a, ShaderHandle(1));
        assert_eq!(b, ShaderHandle(2));
        assert_eq!(renderer.register_shader("a"), a);
        assert_eq!(renderer.name_of(b), Some("b"));
        assert!(!RecordingRenderer::without_shaders().register_shader("a").is_valid());
    }

    #[test]
    fn test_floor_trace() {
        let floor = FloorWorld::new(0.0);
        let hit = floor.trace(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -10.0), 1);
        assert!(hit.hit_world());
        assert!((hit.fraction - 0.5).abs() < 1e-6);
        assert_eq!(hit.end_pos, Vec3::ZERO);

        let miss = floor.trace(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 5.0), 1);
        assert!(!miss.hit_world());
    }
}
