/// Gameplay tuning for enemy craft.

#[derive(Debug, Clone, Copy)]
pub struct EnemyTuning {
    /// Hit box width in pixels.
    pub width: f32,

    /// Hit box height in pixels.
    pub height: f32,

    /// Hits an enemy absorbs before it is destroyed.
    pub life: u32,

    /// Spawn height; negative values start the craft above the visible stage.
    pub spawn_y: f32,

    /// Downward descent in pixels per tick.
    pub speed: f32,

    /// Life removed by a single player projectile.
    pub damage_per_hit: u32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: 217.0,
            height: 263.0,
            life: 3,
            spawn_y: -200.0,
            speed: 1.0,
            damage_per_hit: 1,
        }
    }
}
