//! Vector math shared by the effects crates.
//!
//! Angles follow the engine convention: `[pitch, yaw, roll]` in degrees, with
//! `+z` up. Normalization is fallible so degenerate vectors never leak NaN
//! into vertex data.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Index of the pitch component in an angle triple.
pub const PITCH: usize = 0;
/// Index of the yaw component in an angle triple.
pub const YAW: usize = 1;
/// Index of the roll component in an angle triple.
pub const ROLL: usize = 2;

/// Vectors shorter than this are treated as zero length.
pub const NORMALIZE_EPSILON: f32 = 1e-6;

/// 3D Vector - position, velocity, direction
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit X vector
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a vector with all components set to `v`
    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Creates from array
    #[must_use]
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Distance squared (avoids sqrt)
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    /// Unit vector in the same direction, or `None` for (near) zero length
    /// and non-finite input.
    #[must_use]
    pub fn normalize(self) -> Option<Self> {
        let len = self.length();
        if len.is_finite() && len > NORMALIZE_EPSILON {
            Some(self * (1.0 / len))
        } else {
            None
        }
    }

    /// Normalizes and also returns the original length.
    #[must_use]
    pub fn normalize_with_length(self) -> Option<(Self, f32)> {
        let len = self.length();
        self.normalize().map(|n| (n, len))
    }

    /// `self + dir * scale`
    #[inline]
    #[must_use]
    pub fn mul_add(self, scale: f32, dir: Self) -> Self {
        Self::new(
            self.x + dir.x * scale,
            self.y + dir.y * scale,
            self.z + dir.z * scale,
        )
    }

    /// Linear interpolation towards `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// True when every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Component access by axis index (0 = x, 1 = y, 2 = z).
    #[must_use]
    pub fn axis(self, index: usize) -> f32 {
        match index {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Builds a vector component-wise from `f(axis)`.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(usize) -> f32) -> Self {
        Self::new(f(0), f(1), f(2))
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// 2D Vector - texture coords
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

/// Orthonormal basis produced by [`angle_vectors`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Basis {
    /// Forward axis
    pub forward: Vec3,
    /// Right axis
    pub right: Vec3,
    /// Up axis
    pub up: Vec3,
}

/// Converts a direction into `[pitch, yaw, 0]` angles.
#[must_use]
pub fn vector_to_angles(v: Vec3) -> [f32; 3] {
    let (yaw, pitch);

    if v.x == 0.0 && v.y == 0.0 {
        yaw = 0.0;
        pitch = if v.z > 0.0 { 90.0 } else { 270.0 };
    } else {
        let mut y = if v.x != 0.0 {
            v.y.atan2(v.x).to_degrees()
        } else if v.y > 0.0 {
            90.0
        } else {
            270.0
        };
        if y < 0.0 {
            y += 360.0;
        }
        yaw = y;

        let forward = (v.x * v.x + v.y * v.y).sqrt();
        let mut p = v.z.atan2(forward).to_degrees();
        if p < 0.0 {
            p += 360.0;
        }
        pitch = p;
    }

    [-pitch, yaw, 0.0]
}

/// Converts `[pitch, yaw, roll]` angles into forward/right/up axes.
#[must_use]
pub fn angle_vectors(angles: [f32; 3]) -> Basis {
    let (sy, cy) = angles[YAW].to_radians().sin_cos();
    let (sp, cp) = angles[PITCH].to_radians().sin_cos();
    let (sr, cr) = angles[ROLL].to_radians().sin_cos();

    Basis {
        forward: Vec3::new(cp * cy, cp * sy, -sp),
        right: Vec3::new(
            -sr * sp * cy + cr * sy,
            -sr * sp * sy - cr * cy,
            -sr * cp,
        ),
        up: Vec3::new(cr * sp * cy + sr * sy, cr * sp * sy - sr * cy, cr * cp),
    }
}

/// Basis for a direction with an extra roll (degrees) about it.
#[must_use]
pub fn rolled_basis(forward: Vec3, roll: f32) -> Basis {
    let mut angles = vector_to_angles(forward);
    angles[ROLL] += roll;
    angle_vectors(angles)
}

/// Projects `point` onto the plane through the origin with `normal`.
#[must_use]
pub fn project_point_on_plane(point: Vec3, normal: Vec3) -> Vec3 {
    let len_sq = normal.length_squared();
    if len_sq <= NORMALIZE_EPSILON * NORMALIZE_EPSILON {
        return point;
    }
    point - normal * (normal.dot(point) / len_sq)
}

/// Some unit vector perpendicular to `src`, or `None` if `src` is zero.
#[must_use]
pub fn perpendicular_vector(src: Vec3) -> Option<Vec3> {
    let src = src.normalize()?;

    // Pick the axis least aligned with src.
    let mut pos = 0;
    let mut min = f32::MAX;
    for i in 0..3 {
        let a = src.axis(i).abs();
        if a < min {
            pos = i;
            min = a;
        }
    }
    let temp = Vec3::from_fn(|i| if i == pos { 1.0 } else { 0.0 });

    project_point_on_plane(temp, src).normalize()
}

/// Rotates `point` by `degrees` about the unit axis `dir`.
#[must_use]
pub fn rotate_point_around_vector(dir: Vec3, point: Vec3, degrees: f32) -> Vec3 {
    let (s, c) = degrees.to_radians().sin_cos();
    point * c + dir.cross(point) * s + dir * (dir.dot(point) * (1.0 - c))
}
