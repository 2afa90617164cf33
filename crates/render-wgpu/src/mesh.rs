//! Procedural meshes for the three shared geometries.
//!
//! All meshes are centred on the origin with counter-clockwise front faces.

use backdrop_scene::GeometrySpec;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.normalize_or_zero().to_array(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

pub fn build(spec: GeometrySpec) -> MeshData {
    match spec {
        GeometrySpec::Icosahedron { radius } => icosahedron(radius),
        GeometrySpec::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => torus(radius, tube, radial_segments, tubular_segments),
        GeometrySpec::Sphere {
            radius,
            width_segments,
            height_segments,
        } => sphere(radius, width_segments, height_segments),
    }
}

/// Flat-shaded icosahedron: every face gets its own three vertices.
pub fn icosahedron(radius: f32) -> MeshData {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let corners = [
        Vec3::new(-1.0, phi, 0.0),
        Vec3::new(1.0, phi, 0.0),
        Vec3::new(-1.0, -phi, 0.0),
        Vec3::new(1.0, -phi, 0.0),
        Vec3::new(0.0, -1.0, phi),
        Vec3::new(0.0, 1.0, phi),
        Vec3::new(0.0, -1.0, -phi),
        Vec3::new(0.0, 1.0, -phi),
        Vec3::new(phi, 0.0, -1.0),
        Vec3::new(phi, 0.0, 1.0),
        Vec3::new(-phi, 0.0, -1.0),
        Vec3::new(-phi, 0.0, 1.0),
    ]
    .map(|c| c.normalize() * radius);

    #[rustfmt::skip]
    let faces: [[usize; 3]; 20] = [
        [0, 11, 5], [0, 5, 1],  [0, 1, 7],   [0, 7, 10], [0, 10, 11],
        [1, 5, 9],  [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4],  [3, 4, 2],  [3, 2, 6],   [3, 6, 8],  [3, 8, 9],
        [4, 9, 5],  [2, 4, 11], [6, 2, 10],  [8, 6, 7],  [9, 8, 1],
    ];

    let mut mesh = MeshData::default();
    for [a, b, c] in faces {
        let (mut pa, mut pb, pc) = (corners[a], corners[b], corners[c]);
        let mut normal = (pb - pa).cross(pc - pa);
        if normal.dot(pa + pb + pc) < 0.0 {
            std::mem::swap(&mut pa, &mut pb);
            normal = -normal;
        }
        let base = mesh.vertices.len() as u16;
        for p in [pa, pb, pc] {
            mesh.vertices.push(Vertex::new(p, normal));
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }
    mesh
}

/// Torus in the XY plane. `radial_segments` go around the tube,
/// `tubular_segments` around the ring.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut mesh = MeshData::default();

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let centre = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.vertices.push(Vertex::new(position, position - centre));
        }
    }

    let stride = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            mesh.indices
                .extend_from_slice(&[a, b, d, b, c, d].map(|k| k as u16));
        }
    }
    mesh
}

/// UV sphere with poles on the Y axis. Degenerate pole triangles are omitted.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width = width_segments.max(3);
    let height = height_segments.max(2);
    let mut mesh = MeshData::default();

    for iy in 0..=height {
        let v = iy as f32 / height as f32;
        for ix in 0..=width {
            let u = ix as f32 / width as f32;
            let position = Vec3::new(
                -radius * (u * TAU).cos() * (v * PI).sin(),
                radius * (v * PI).cos(),
                radius * (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.vertices.push(Vertex::new(position, position));
        }
    }

    let stride = width + 1;
    for iy in 0..height {
        for ix in 0..width {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d].map(|k| k as u16));
            }
            if iy != height - 1 {
                mesh.indices.extend_from_slice(&[b, c, d].map(|k| k as u16));
            }
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_common::GeometryKind;
    use backdrop_scene::geometry_spec;

    fn assert_unit_normals(mesh: &MeshData) {
        for v in &mesh.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4, "normal {n:?} not unit");
        }
    }

    /// Every triangle's counter-clockwise normal agrees with its vertex normals.
    fn assert_wound_outward(mesh: &MeshData) {
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let [pa, pb, pc] = [a, b, c].map(|v| Vec3::from_array(v.position));
            let winding = (pb - pa).cross(pc - pa);
            let normal: Vec3 = [a, b, c].map(|v| Vec3::from_array(v.normal)).iter().sum();
            assert!(winding.dot(normal) > 0.0, "triangle {tri:?} faces inward");
        }
    }

    fn assert_indices_in_range(mesh: &MeshData) {
        assert_eq!(mesh.indices.len() % 3, 0);
        let n = mesh.vertices.len() as u16;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn icosahedron_is_flat_and_on_radius() {
        let mesh = icosahedron(2.0);
        assert_eq!(mesh.vertices.len(), 60);
        assert_eq!(mesh.indices.len(), 60);
        assert_unit_normals(&mesh);
        for v in &mesh.vertices {
            assert!((Vec3::from_array(v.position).length() - 2.0).abs() < 1e-4);
        }
        // Each face shares one normal across its three vertices.
        for tri in mesh.vertices.chunks(3) {
            assert_eq!(tri[0].normal, tri[1].normal);
            assert_eq!(tri[1].normal, tri[2].normal);
        }
    }

    #[test]
    fn icosahedron_faces_point_outward() {
        let mesh = icosahedron(1.0);
        for tri in mesh.vertices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|v| Vec3::from_array(v.position));
            let winding = (b - a).cross(c - a);
            assert!(winding.dot(a + b + c) > 0.0);
        }
    }

    #[test]
    fn torus_counts() {
        let mesh = build(geometry_spec(GeometryKind::Torus));
        assert_eq!(mesh.vertices.len(), 17 * 101);
        assert_eq!(mesh.indices.len(), 16 * 100 * 6);
        assert_unit_normals(&mesh);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn torus_stays_within_tube() {
        let mesh = torus(2.0, 0.5, 16, 100);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            let ring = glam::Vec2::new(p.x, p.y).length();
            let to_centre = glam::Vec2::new(ring - 2.0, p.z).length();
            assert!((to_centre - 0.5).abs() < 1e-4);
        }
    }

    #[test]
    fn torus_faces_point_outward() {
        assert_wound_outward(&build(geometry_spec(GeometryKind::Torus)));
    }

    #[test]
    fn sphere_faces_point_outward() {
        assert_wound_outward(&build(geometry_spec(GeometryKind::Sphere)));
    }

    #[test]
    fn sphere_counts() {
        let mesh = build(geometry_spec(GeometryKind::Sphere));
        assert_eq!(mesh.vertices.len(), 33 * 17);
        assert_eq!(mesh.indices.len(), 32 * 15 * 6);
        assert_unit_normals(&mesh);
        assert_indices_in_range(&mesh);
        for v in &mesh.vertices {
            assert!((Vec3::from_array(v.position).length() - 1.5).abs() < 1e-4);
        }
    }
}
