/// Gameplay tuning for the player craft.

#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Sprite and hit box width in pixels.
    pub width: f32,

    /// Sprite and hit box height in pixels.
    pub height: f32,

    /// Keyboard movement speed in pixels per tick (applied by the input collaborator).
    pub speed: f32,

    /// Horizontal offset of the start position from the stage center.
    pub start_offset_x: f32,

    /// Distance the craft rises from its start position when it enters the stage.
    pub entrance_rise: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 119.0,
            height: 181.0,
            speed: 7.0,
            start_offset_x: 60.0,
            entrance_rise: 200.0,
        }
    }
}
