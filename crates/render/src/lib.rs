//! Rendering adapter: renderer-agnostic camera, viewport sync, and the
//! non-GPU renderers.
//!
//! # Invariants
//! - Renderers never mutate the scene.
//! - Camera aspect and output size change only through [`sync_viewport`].

mod camera;
mod renderer;
mod viewport;

pub use camera::PerspectiveCamera;
pub use renderer::{DebugTextRenderer, FrameSnapshot, Renderer, ShapeSnapshot, SnapshotRenderer};
pub use viewport::{RenderTarget, sync_viewport};

pub fn crate_info() -> &'static str {
    "backdrop-render v0.1.0"
}
