use glam::Vec2;

/// Screen-space glow that follows the raw pointer position.
///
/// Has no position until the first pointer move; renderers skip it until then.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorGlow {
    position: Option<Vec2>,
}

impl CursorGlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixel position of the glow centre, origin at the top-left corner.
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = Some(position);
    }
}
