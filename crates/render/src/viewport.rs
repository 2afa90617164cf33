use crate::camera::PerspectiveCamera;
use backdrop_common::Viewport;

/// Something that owns an output buffer whose size tracks the window.
pub trait RenderTarget {
    fn output_size(&self) -> Viewport;

    /// Resize the output buffer. Implementations clamp each dimension to at
    /// least one pixel.
    fn set_output_size(&mut self, size: Viewport);
}

/// Bring the camera and the render target in line with a new window size.
///
/// Calling this repeatedly with the same size leaves the same state as
/// calling it once. A degenerate size (minimized window) only resizes the
/// target; the camera keeps its last valid projection.
pub fn sync_viewport<T: RenderTarget + ?Sized>(
    camera: &mut PerspectiveCamera,
    target: &mut T,
    viewport: Viewport,
) {
    if !viewport.is_degenerate() {
        camera.set_aspect(viewport.aspect());
        camera.update_projection_matrix();
    }
    target.set_output_size(viewport);
    tracing::debug!(
        width = viewport.width,
        height = viewport.height,
        aspect = camera.aspect,
        "viewport synced"
    );
}
