/// Gameplay tuning for projectiles fired by either side.

#[derive(Debug, Clone, Copy)]
pub struct ProjectileTuning {
    /// Hit box width in pixels.
    pub width: f32,

    /// Hit box height in pixels.
    pub height: f32,

    /// Vertical travel in pixels per tick.
    pub speed: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            width: 26.0,
            height: 37.0,
            speed: 10.0,
        }
    }
}
