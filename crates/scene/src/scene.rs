use crate::group::{Shape, ShapeGroup};
use crate::lighting::Lighting;
use backdrop_common::{Euler, GeometryKind, MaterialKind, PointerState, ShapeId};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Number of shapes built at startup.
pub const SHAPE_COUNT: usize = 25;
/// Edge length of the cube positions are sampled from, centred on the origin.
pub const POSITION_SPREAD: f32 = 100.0;
/// Upper bound (exclusive) of the initial angle and spin on each axis.
pub const MAX_SPIN: f32 = 0.005;

/// Samples above this pick the accent material.
const ACCENT_THRESHOLD: f32 = 0.7;
const ICOSAHEDRON_THRESHOLD: f32 = 0.33;
const TORUS_THRESHOLD: f32 = 0.66;

/// Material for a uniform sample in [0, 1). Accent is chosen 30% of the time.
pub fn pick_material(u: f32) -> MaterialKind {
    if u > ACCENT_THRESHOLD {
        MaterialKind::Accent
    } else {
        MaterialKind::Primary
    }
}

/// Geometry for a uniform sample in [0, 1).
pub fn pick_geometry(u: f32) -> GeometryKind {
    if u < ICOSAHEDRON_THRESHOLD {
        GeometryKind::Icosahedron
    } else if u < TORUS_THRESHOLD {
        GeometryKind::Torus
    } else {
        GeometryKind::Sphere
    }
}

/// Uniform sample in (-range/2, range/2].
fn spread<R: Rng + ?Sized>(rng: &mut R, range: f32) -> f32 {
    range * (0.5 - rng.random::<f32>())
}

/// The complete backdrop: lights plus the shape group.
///
/// Built once; afterwards only rotations change. `frame` counts completed
/// frame updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    group: ShapeGroup,
    lighting: Lighting,
    frame: u64,
}

impl Scene {
    /// Build the full population from `rng`.
    ///
    /// Per shape the draws are: material, geometry, position x/y/z, then
    /// rotation x/y/z. The initial rotation doubles as the spin.
    pub fn populate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut group = ShapeGroup::new();
        for i in 0..SHAPE_COUNT {
            let material = pick_material(rng.random());
            let geometry = pick_geometry(rng.random());
            let position = Vec3::new(
                spread(rng, POSITION_SPREAD),
                spread(rng, POSITION_SPREAD),
                spread(rng, POSITION_SPREAD),
            );
            let rotation = Euler::new(
                rng.random::<f32>() * MAX_SPIN,
                rng.random::<f32>() * MAX_SPIN,
                rng.random::<f32>() * MAX_SPIN,
            );
            group.push(Shape {
                id: ShapeId(i as u32),
                position,
                rotation,
                spin: rotation,
                geometry,
                material,
            });
        }

        let scene = Self {
            group,
            lighting: Lighting::default(),
            frame: 0,
        };
        tracing::debug!(
            shapes = scene.group.len(),
            accent = scene.count_material(MaterialKind::Accent),
            icosahedra = scene.count_geometry(GeometryKind::Icosahedron),
            tori = scene.count_geometry(GeometryKind::Torus),
            spheres = scene.count_geometry(GeometryKind::Sphere),
            "scene populated"
        );
        scene
    }

    /// Reproducible population for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::populate(&mut StdRng::seed_from_u64(seed))
    }

    /// Population seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::populate(&mut StdRng::from_os_rng())
    }

    pub fn group(&self) -> &ShapeGroup {
        &self.group
    }

    pub fn shapes(&self) -> &[Shape] {
        self.group.shapes()
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    /// Completed frame updates since population.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn count_material(&self, kind: MaterialKind) -> usize {
        self.shapes().iter().filter(|s| s.material == kind).count()
    }

    pub fn count_geometry(&self, kind: GeometryKind) -> usize {
        self.shapes().iter().filter(|s| s.geometry == kind).count()
    }

    /// One frame update: spin every shape, then tilt the group from the latest
    /// pointer position.
    pub fn advance_frame(&mut self, pointer: PointerState) {
        self.group.spin_shapes();
        self.group.apply_parallax(pointer);
        self.frame += 1;
    }

    /// FNV-1a hash over every shape's fixed attributes and current angles.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let mix_euler = |h: &mut u64, e: Euler| {
            mix(h, &e.x.to_le_bytes());
            mix(h, &e.y.to_le_bytes());
            mix(h, &e.z.to_le_bytes());
        };
        mix(&mut h, &self.frame.to_le_bytes());
        mix_euler(&mut h, self.group.rotation);
        for shape in self.shapes() {
            mix(&mut h, &shape.id.0.to_le_bytes());
            mix(&mut h, &[shape.geometry.index() as u8, shape.material as u8]);
            mix(&mut h, &shape.position.x.to_le_bytes());
            mix(&mut h, &shape.position.y.to_le_bytes());
            mix(&mut h, &shape.position.z.to_le_bytes());
            mix_euler(&mut h, shape.rotation);
            mix_euler(&mut h, shape.spin);
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_has_fixed_size() {
        let scene = Scene::with_seed(42);
        assert_eq!(scene.shapes().len(), SHAPE_COUNT);
        assert_eq!(scene.frame(), 0);
        let by_geometry: usize = GeometryKind::ALL
            .iter()
            .map(|g| scene.count_geometry(*g))
            .sum();
        let by_material: usize = MaterialKind::ALL
            .iter()
            .map(|m| scene.count_material(*m))
            .sum();
        assert_eq!(by_geometry, SHAPE_COUNT);
        assert_eq!(by_material, SHAPE_COUNT);
    }

    #[test]
    fn ids_follow_build_order() {
        let scene = Scene::with_seed(3);
        for (i, shape) in scene.shapes().iter().enumerate() {
            assert_eq!(shape.id, ShapeId(i as u32));
        }
    }

    #[test]
    fn sampled_ranges() {
        for seed in 0..20 {
            let scene = Scene::with_seed(seed);
            for s in scene.shapes() {
                for c in s.position.to_array() {
                    assert!(c > -50.0 && c <= 50.0, "position {c} out of spread");
                }
                for a in [s.spin.x, s.spin.y, s.spin.z] {
                    assert!((0.0..MAX_SPIN).contains(&a));
                }
                assert_eq!(s.rotation, s.spin);
            }
        }
    }

    #[test]
    fn material_thresholds() {
        assert_eq!(pick_material(0.0), MaterialKind::Primary);
        assert_eq!(pick_material(0.7), MaterialKind::Primary);
        assert_eq!(pick_material(0.71), MaterialKind::Accent);
        assert_eq!(pick_material(0.999), MaterialKind::Accent);
    }

    #[test]
    fn geometry_thresholds() {
        assert_eq!(pick_geometry(0.0), GeometryKind::Icosahedron);
        assert_eq!(pick_geometry(0.32), GeometryKind::Icosahedron);
        assert_eq!(pick_geometry(0.33), GeometryKind::Torus);
        assert_eq!(pick_geometry(0.65), GeometryKind::Torus);
        assert_eq!(pick_geometry(0.66), GeometryKind::Sphere);
        assert_eq!(pick_geometry(0.999), GeometryKind::Sphere);
    }

    #[test]
    fn material_split_is_roughly_seventy_thirty() {
        let mut accent = 0;
        let mut total = 0;
        for seed in 0..400 {
            let scene = Scene::with_seed(seed);
            accent += scene.count_material(MaterialKind::Accent);
            total += scene.shapes().len();
        }
        let ratio = accent as f32 / total as f32;
        assert!((0.26..0.34).contains(&ratio), "accent ratio {ratio}");
    }

    #[test]
    fn same_seed_same_scene() {
        let a = Scene::with_seed(42);
        let b = Scene::with_seed(42);
        assert_eq!(a, b);
        assert_eq!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn different_seeds_diverge() {
        assert_ne!(Scene::with_seed(1).state_hash(), Scene::with_seed(2).state_hash());
    }

    #[test]
    fn rotation_after_n_frames() {
        let mut scene = Scene::with_seed(9);
        let start: Vec<Shape> = scene.shapes().to_vec();
        let n = 600;
        for _ in 0..n {
            scene.advance_frame(PointerState::CENTER);
        }
        for (before, after) in start.iter().zip(scene.shapes()) {
            let expect_x = before.rotation.x + n as f32 * before.spin.x;
            let expect_y = before.rotation.y + n as f32 * before.spin.y;
            assert!((after.rotation.x - expect_x).abs() < 1e-4);
            assert!((after.rotation.y - expect_y).abs() < 1e-4);
            assert_eq!(after.rotation.z, before.rotation.z);
        }
        assert_eq!(scene.frame(), n);
    }

    #[test]
    fn parallax_tracks_latest_pointer() {
        let mut scene = Scene::with_seed(5);
        scene.advance_frame(PointerState::new(0.8, -0.4));
        scene.advance_frame(PointerState::new(-0.2, 0.6));
        let tilt = scene.group().rotation;
        assert!((tilt.y - (-0.02)).abs() < 1e-7);
        assert!((tilt.x - 0.06).abs() < 1e-7);
    }

    #[test]
    fn frames_never_restructure() {
        let mut scene = Scene::with_seed(11);
        let identity: Vec<_> = scene
            .shapes()
            .iter()
            .map(|s| (s.id, s.geometry, s.material, s.position, s.spin))
            .collect();
        for i in 0..250 {
            scene.advance_frame(PointerState::new((i as f32).sin(), (i as f32).cos()));
        }
        let after: Vec<_> = scene
            .shapes()
            .iter()
            .map(|s| (s.id, s.geometry, s.material, s.position, s.spin))
            .collect();
        assert_eq!(identity, after);
    }

    #[test]
    fn state_hash_changes_with_frames() {
        let mut scene = Scene::with_seed(42);
        let h0 = scene.state_hash();
        scene.advance_frame(PointerState::CENTER);
        assert_ne!(h0, scene.state_hash());
    }
}
