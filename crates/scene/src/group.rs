use backdrop_common::{Euler, GeometryKind, MaterialKind, PointerState, ShapeId};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Scale from normalized pointer offset to group rotation in radians.
pub const PARALLAX_DAMPING: f32 = 0.1;

/// A single floating mesh instance.
///
/// Geometry, material and position are fixed at build time. Only `rotation`
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub position: Vec3,
    pub rotation: Euler,
    /// Per-axis angular velocity in radians per frame.
    pub spin: Euler,
    pub geometry: GeometryKind,
    pub material: MaterialKind,
}

impl Shape {
    /// Advance rotation by one frame of spin on the X and Y axes.
    pub fn spin_once(&mut self) {
        self.rotation.x += self.spin.x;
        self.rotation.y += self.spin.y;
    }

    /// Local transform: translate, then rotate in place.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * self.rotation.to_mat4()
    }
}

/// Container owning every shape. Sits at the origin; its own rotation is the
/// parallax tilt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeGroup {
    shapes: Vec<Shape>,
    pub rotation: Euler,
}

impl ShapeGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0 as usize)
    }

    /// Apply one frame of spin to every shape.
    pub fn spin_shapes(&mut self) {
        for shape in &mut self.shapes {
            shape.spin_once();
        }
    }

    /// Overwrite the group tilt from the pointer: horizontal offset turns the
    /// group about Y, vertical offset about X.
    pub fn apply_parallax(&mut self, pointer: PointerState) {
        self.rotation.y = pointer.x * PARALLAX_DAMPING;
        self.rotation.x = pointer.y * PARALLAX_DAMPING;
    }

    pub fn matrix(&self) -> Mat4 {
        self.rotation.to_mat4()
    }

    /// World transform of a member shape.
    pub fn world_matrix(&self, shape: &Shape) -> Mat4 {
        self.matrix() * shape.local_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(id: u32, spin: Euler) -> Shape {
        Shape {
            id: ShapeId(id),
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: spin,
            spin,
            geometry: GeometryKind::Torus,
            material: MaterialKind::Primary,
        }
    }

    #[test]
    fn spin_accumulates_linearly() {
        let spin = Euler::new(0.004, 0.002, 0.003);
        let mut s = shape(0, spin);
        for _ in 0..1000 {
            s.spin_once();
        }
        assert!((s.rotation.x - (0.004 + 1000.0 * 0.004)).abs() < 1e-4);
        assert!((s.rotation.y - (0.002 + 1000.0 * 0.002)).abs() < 1e-4);
    }

    #[test]
    fn spin_leaves_z_untouched() {
        let mut s = shape(0, Euler::new(0.001, 0.001, 0.004));
        s.spin_once();
        s.spin_once();
        assert_eq!(s.rotation.z, 0.004);
    }

    #[test]
    fn parallax_overwrites_previous_tilt() {
        let mut g = ShapeGroup::new();
        g.apply_parallax(PointerState::new(1.0, -1.0));
        g.apply_parallax(PointerState::new(0.5, 0.25));
        assert!((g.rotation.y - 0.05).abs() < 1e-7);
        assert!((g.rotation.x - 0.025).abs() < 1e-7);
        assert_eq!(g.rotation.z, 0.0);
    }

    #[test]
    fn world_matrix_at_rest_is_translation() {
        let mut g = ShapeGroup::new();
        g.push(shape(0, Euler::ZERO));
        let m = g.world_matrix(&g.shapes()[0]);
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn group_tilt_moves_members() {
        let mut g = ShapeGroup::new();
        g.push(shape(0, Euler::ZERO));
        g.apply_parallax(PointerState::new(1.0, 0.0));
        let p = g.world_matrix(&g.shapes()[0]).transform_point3(Vec3::ZERO);
        assert_ne!(p, Vec3::new(1.0, 2.0, 3.0));
        // Rotation about Y keeps height.
        assert!((p.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn lookup_by_id() {
        let mut g = ShapeGroup::new();
        g.push(shape(0, Euler::ZERO));
        g.push(shape(1, Euler::ZERO));
        assert_eq!(g.get(ShapeId(1)).map(|s| s.id), Some(ShapeId(1)));
        assert!(g.get(ShapeId(2)).is_none());
    }
}
