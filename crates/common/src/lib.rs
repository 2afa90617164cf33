//! Shared value types for the backdrop workspace.

mod types;

pub use types::{Euler, GeometryKind, MaterialKind, PointerState, ShapeId, Viewport};
