use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Uniform light applied to every surface regardless of orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Omnidirectional light at a fixed world position. No distance falloff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

/// The scene's fixed light rig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub point: PointLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: [1.0, 1.0, 1.0],
                intensity: 0.8,
            },
            point: PointLight {
                color: [1.0, 1.0, 1.0],
                intensity: 0.5,
                position: Vec3::new(5.0, 15.0, 20.0),
            },
        }
    }
}

impl AmbientLight {
    /// Colour premultiplied by intensity.
    pub fn radiance(&self) -> [f32; 3] {
        self.color.map(|c| c * self.intensity)
    }
}

impl PointLight {
    /// Colour premultiplied by intensity.
    pub fn radiance(&self) -> [f32; 3] {
        self.color.map(|c| c * self.intensity)
    }
}
