use crate::camera::PerspectiveCamera;
use backdrop_common::{Euler, GeometryKind, MaterialKind, ShapeId};
use backdrop_scene::Scene;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Renderer-agnostic interface.
///
/// A renderer reads the scene and camera and produces output. It never
/// mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and camera.
    fn render(&self, scene: &Scene, camera: &PerspectiveCamera) -> Self::Output;
}

/// Human-readable dump of the frame, one line per shape.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, camera: &PerspectiveCamera) -> String {
        let mut out = String::new();
        let tilt = scene.group().rotation;
        out.push_str(&format!(
            "=== Backdrop (frame={}, hash={:#018x}) ===\n",
            scene.frame(),
            scene.state_hash()
        ));
        out.push_str(&format!("Shapes: {}\n", scene.shapes().len()));
        out.push_str(&format!("Group tilt: x={:.4} y={:.4}\n", tilt.x, tilt.y));
        out.push_str(&format!(
            "Camera: pos=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.3}\n",
            camera.position.x, camera.position.y, camera.position.z, camera.fov_degrees, camera.aspect
        ));

        for shape in scene.shapes() {
            let p = shape.position;
            let r = shape.rotation;
            out.push_str(&format!(
                "  [{:02}] {:<11} {:<7} pos=({:6.2}, {:6.2}, {:6.2}) rot=({:.4}, {:.4}, {:.4})\n",
                shape.id.0,
                format!("{:?}", shape.geometry),
                format!("{:?}", shape.material),
                p.x,
                p.y,
                p.z,
                r.x,
                r.y,
                r.z
            ));
        }

        out
    }
}

/// Serializable per-shape record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    pub id: ShapeId,
    pub geometry: GeometryKind,
    pub material: MaterialKind,
    pub position: Vec3,
    pub rotation: Euler,
    /// World-space centre after the group tilt.
    pub world_position: Vec3,
}

/// Serializable view of one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub state_hash: u64,
    pub group_rotation: Euler,
    pub camera_position: Vec3,
    pub camera_aspect: f32,
    pub shapes: Vec<ShapeSnapshot>,
}

/// Captures the frame as a [`FrameSnapshot`].
#[derive(Debug, Default)]
pub struct SnapshotRenderer;

impl SnapshotRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for SnapshotRenderer {
    type Output = FrameSnapshot;

    fn render(&self, scene: &Scene, camera: &PerspectiveCamera) -> FrameSnapshot {
        let group = scene.group();
        FrameSnapshot {
            frame: scene.frame(),
            state_hash: scene.state_hash(),
            group_rotation: group.rotation,
            camera_position: camera.position,
            camera_aspect: camera.aspect,
            shapes: scene
                .shapes()
                .iter()
                .map(|s| ShapeSnapshot {
                    id: s.id,
                    geometry: s.geometry,
                    material: s.material,
                    position: s.position,
                    rotation: s.rotation,
                    world_position: group.world_matrix(s).transform_point3(Vec3::ZERO),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_common::PointerState;

    #[test]
    fn debug_renderer_fresh_scene() {
        let scene = Scene::with_seed(42);
        let output = DebugTextRenderer::new().render(&scene, &PerspectiveCamera::default());

        assert!(output.contains("frame=0"));
        assert!(output.contains("Shapes: 25"));
        assert_eq!(output.lines().filter(|l| l.starts_with("  [")).count(), 25);
    }

    #[test]
    fn debug_renderer_reports_tilt() {
        let mut scene = Scene::with_seed(42);
        scene.advance_frame(PointerState::new(1.0, 1.0));
        let output = DebugTextRenderer::new().render(&scene, &PerspectiveCamera::default());
        assert!(output.contains("frame=1"));
        assert!(output.contains("Group tilt: x=0.1000 y=0.1000"));
    }

    #[test]
    fn snapshot_matches_scene() {
        let mut scene = Scene::with_seed(7);
        scene.advance_frame(PointerState::CENTER);
        let snap = SnapshotRenderer::new().render(&scene, &PerspectiveCamera::new(2.0));

        assert_eq!(snap.frame, 1);
        assert_eq!(snap.state_hash, scene.state_hash());
        assert_eq!(snap.camera_aspect, 2.0);
        assert_eq!(snap.shapes.len(), scene.shapes().len());
        // No tilt at the centre, so world and local positions agree.
        for (s, shape) in snap.shapes.iter().zip(scene.shapes()) {
            assert!((s.world_position - shape.position).length() < 1e-4);
        }
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let scene = Scene::with_seed(1);
        let snap = SnapshotRenderer::new().render(&scene, &PerspectiveCamera::default());
        let json = serde_json::to_string(&snap).unwrap();
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.shapes.len(), 25);
        assert_eq!(back.state_hash, snap.state_hash);
    }
}
