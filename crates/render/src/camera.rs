use glam::{Mat4, Vec3};

/// Perspective camera looking down -Z from a fixed position.
///
/// The projection matrix is cached: changing `fov_degrees`, `aspect`, `near`
/// or `far` has no effect until [`PerspectiveCamera::update_projection_matrix`]
/// is called.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Vertical field of view.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        let mut cam = Self {
            position: Vec3::new(0.0, 0.0, 30.0),
            fov_degrees: 75.0,
            aspect,
            near: 0.1,
            far: 1000.0,
            projection: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Recompute the cached projection from the current parameters.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}
