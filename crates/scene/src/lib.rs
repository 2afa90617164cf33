//! Scene graph: the shape population, its light rig, and the per-frame update.
//!
//! # Invariants
//! - Shape count and per-shape identity are fixed once the scene is built.
//! - A frame update only touches shape rotations and the group tilt.
//! - Angles accumulate without wrapping.

pub mod group;
pub mod lighting;
pub mod palette;
pub mod scene;

pub use group::{PARALLAX_DAMPING, Shape, ShapeGroup};
pub use lighting::{AmbientLight, Lighting, PointLight};
pub use palette::{GeometrySpec, MaterialParams, geometry_spec, material_params};
pub use scene::{Scene, SHAPE_COUNT, pick_geometry, pick_material};
