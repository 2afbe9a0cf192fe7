use crate::domain::geometry::Stage;
use crate::domain::state::DestroyCause;
use crate::domain::store::{EntityStore, Side};

#[derive(Debug, Clone, Copy)]
pub struct MovementConfig {
    pub projectile_speed: f32, // px/tick
    pub enemy_speed: f32,      // px/tick, downward
    pub stage: Stage,
}

/// Moves one side's projectiles along their direction, then drops those that left the stage.
pub fn tick_projectiles(store: &mut EntityStore, side: Side, cfg: MovementConfig) {
    for p in store.projectiles_mut(side) {
        p.bounds.y += cfg.projectile_speed * p.direction.sign();
    }

    // Movement owns the border check; the presentation layer only hears about it.
    store.retain_projectiles(side, DestroyCause::Offscreen, |p| {
        !cfg.stage.has_left_vertically(&p.bounds)
    });
}

/// Descends every enemy and drops the ones that scrolled past the bottom edge.
pub fn tick_enemies(store: &mut EntityStore, cfg: MovementConfig) {
    for e in store.enemies_mut() {
        e.bounds.y += cfg.enemy_speed;
    }

    // Enemies start above the stage, so only the bottom edge removes them.
    let bottom = cfg.stage.height as f32;
    store.retain_enemies(DestroyCause::Offscreen, |e| e.bounds.y < bottom);
}
