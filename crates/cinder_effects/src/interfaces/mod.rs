//! # External Interfaces
//!
//! The effects core never talks to a GPU or a collision map directly. It
//! consumes two narrow traits, implemented by the host engine:
//!
//! ```text
//! ┌───────────────┐  submit_polygon   ┌──────────────────┐
//! │ EffectsContext│ ────────────────► │  SceneRenderer   │
//! │               │                   └──────────────────┘
//! │               │  trace            ┌──────────────────┐
//! │               │ ────────────────► │  WorldCollision  │
//! └───────────────┘                   └──────────────────┘
//! ```

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use bytemuck::{Pod, Zeroable};

use cinder_shared::math::{angle_vectors, Vec3};

/// Entity number reported by traces that hit the static world.
pub const WORLD_ENTITY: i32 = 1022;

/// Content mask used for particle traces.
pub const CONTENTS_SOLID: u32 = 1;

/// Opaque renderer shader handle. Zero means "not registered".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

impl ShaderHandle {
    /// The unregistered handle.
    pub const NONE: Self = Self(0);

    /// True if the renderer actually registered this shader.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// One polygon vertex as the renderer consumes it.
///
/// Layout is fixed (`#[repr(C)]`, 24 bytes) so slices can be uploaded as-is.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PolyVert {
    /// World-space position.
    pub xyz: [f32; 3],
    /// Texture coordinate.
    pub st: [f32; 2],
    /// Packed RGBA.
    pub modulate: [u8; 4],
}

impl PolyVert {
    /// Creates a vertex.
    #[must_use]
    pub fn new(xyz: Vec3, st: [f32; 2], modulate: [u8; 4]) -> Self {
        Self {
            xyz: xyz.to_array(),
            st,
            modulate,
        }
    }

    /// True if position and texture coordinate are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.xyz.iter().chain(self.st.iter()).all(|v| v.is_finite())
    }
}

/// A sprite entity handed to the renderer as-is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefEntity {
    /// World-space origin.
    pub origin: Vec3,
    /// Sprite shader.
    pub shader: ShaderHandle,
    /// Sprite radius.
    pub radius: f32,
    /// Roll in degrees.
    pub rotation: f32,
    /// Packed RGBA.
    pub rgba: [u8; 4],
}

/// The 3D scene renderer.
pub trait SceneRenderer {
    /// Registers a shader by name. Returns [`ShaderHandle::NONE`] if the
    /// renderer does not know it.
    fn register_shader(&mut self, name: &str) -> ShaderHandle;

    /// Adds a polygon to the current scene. `shader` is always valid.
    fn submit_polygon(&mut self, shader: ShaderHandle, verts: &[PolyVert]);

    /// Adds a sprite entity to the current scene.
    fn submit_ref_entity(&mut self, _entity: &RefEntity) {}

    /// Adds a dynamic light to the current scene.
    fn add_dynamic_light(&mut self, _origin: Vec3, _radius: f32, _color: [f32; 3]) {}
}

/// Result of a line trace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceResult {
    /// Fraction of the segment travelled before impact; `1.0` means no impact.
    pub fraction: f32,
    /// Point where the trace stopped.
    pub end_pos: Vec3,
    /// Surface normal at the impact.
    pub normal: Vec3,
    /// Entity that was hit.
    pub entity: i32,
}

impl TraceResult {
    /// A trace that reached `end` without hitting anything.
    #[must_use]
    pub fn clear(end: Vec3) -> Self {
        Self {
            fraction: 1.0,
            end_pos: end,
            normal: Vec3::ZERO,
            entity: WORLD_ENTITY,
        }
    }

    /// True if the trace stopped on the static world.
    #[must_use]
    pub fn hit_world(&self) -> bool {
        self.fraction < 1.0 && self.entity == WORLD_ENTITY
    }
}

/// World collision queries.
pub trait WorldCollision {
    /// Traces a line segment against solids matching `mask`.
    fn trace(&self, start: Vec3, end: Vec3, mask: u32) -> TraceResult;

    /// Clips a decal quad, projected along `projection`, against world
    /// surfaces. `visit` is called once per resulting fragment.
    ///
    /// The default treats the quad as lying on a single surface.
    fn mark_fragments(
        &self,
        corners: &[Vec3; 4],
        _projection: Vec3,
        visit: &mut dyn FnMut(&[Vec3]),
    ) {
        visit(corners);
    }
}

/// Camera state for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// Eye position.
    pub origin: Vec3,
    /// Forward, right and up axes.
    pub axis: [Vec3; 3],
}

impl ViewState {
    /// Builds a view from an eye position and `[pitch, yaw, roll]` angles.
    #[must_use]
    pub fn from_angles(origin: Vec3, angles: [f32; 3]) -> Self {
        let basis = angle_vectors(angles);
        Self {
            origin,
            axis: [basis.forward, basis.right, basis.up],
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::from_angles(Vec3::ZERO, [0.0; 3])
    }
}
