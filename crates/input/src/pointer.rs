use crate::glow::CursorGlow;
use backdrop_common::{PointerState, Viewport};
use glam::Vec2;

/// Map a pixel position (origin top-left, +y down) to [-1, 1] on both axes
/// with +y up.
///
/// Returns `None` for a degenerate viewport. Positions outside the viewport
/// map outside [-1, 1] and are not clamped.
pub fn normalize(position: Vec2, viewport: Viewport) -> Option<PointerState> {
    if viewport.is_degenerate() {
        return None;
    }
    let w = viewport.width as f32;
    let h = viewport.height as f32;
    Some(PointerState {
        x: (position.x / w) * 2.0 - 1.0,
        y: -(position.y / h) * 2.0 + 1.0,
    })
}

/// Latest pointer state plus the glow overlay it drives.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    pointer: PointerState,
    glow: CursorGlow,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a pointer-move event at `position` (pixels).
    ///
    /// The glow always follows the raw position. The normalized pointer is
    /// left unchanged when the viewport has no area.
    pub fn on_pointer_move(&mut self, position: Vec2, viewport: Viewport) {
        self.glow.move_to(position);
        match normalize(position, viewport) {
            Some(pointer) => self.pointer = pointer,
            None => tracing::trace!(?viewport, "pointer move ignored for parallax"),
        }
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn glow(&self) -> &CursorGlow {
        &self.glow
    }
}
