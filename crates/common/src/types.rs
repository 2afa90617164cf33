use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Index of a shape within its group. Assigned once at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u32);

/// Euler angles in radians, applied in intrinsic X, Y, Z order.
///
/// Angles are never wrapped; callers may accumulate them without bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Euler {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Rotation matrix `Rx(x) * Ry(y) * Rz(z)`.
    pub fn to_mat4(self) -> Mat4 {
        Mat4::from_rotation_x(self.x) * Mat4::from_rotation_y(self.y) * Mat4::from_rotation_z(self.z)
    }
}

/// One of the three shared geometries a shape can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeometryKind {
    Icosahedron,
    Torus,
    Sphere,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 3] = [Self::Icosahedron, Self::Torus, Self::Sphere];

    /// Stable slot index, used to address per-geometry GPU buffers.
    pub fn index(self) -> usize {
        match self {
            Self::Icosahedron => 0,
            Self::Torus => 1,
            Self::Sphere => 2,
        }
    }
}

/// One of the two shared materials a shape can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaterialKind {
    Primary,
    Accent,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 2] = [Self::Primary, Self::Accent];
}

/// Pointer position normalized to [-1, 1] on both axes, +y up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Output dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// True when either dimension is zero, e.g. a minimized window.
    pub fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }
}
