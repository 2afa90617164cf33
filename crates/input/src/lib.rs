//! Input Tracker: pointer movement mapped to parallax input and glow position.
//!
//! # Invariants
//! - Only pointer-move events write the pointer state.
//! - The glow position is the raw pixel position, never normalized.

pub mod glow;
pub mod pointer;

pub use glow::CursorGlow;
pub use pointer::{PointerTracker, normalize};
