//! wgpu render backend for the backdrop.
//!
//! Draws the shape group as lit instanced meshes (one draw per shared
//! geometry), then blends the cursor glow on top.
//!
//! # Invariants
//! - The renderer never mutates the scene.
//! - The depth buffer always matches the surface size at draw time.

mod context;
mod error;
mod gpu;
pub mod mesh;
mod shaders;

pub use context::GpuContext;
pub use error::GpuError;
pub use gpu::WgpuRenderer;
