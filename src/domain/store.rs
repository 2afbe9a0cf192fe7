// Owner of every live entity in a session.
//
// Collections keep insertion order; removal closes the gap without reordering. Every removal
// is recorded so the presentation layer can be told which ids went away.

use crate::domain::geometry::{Bounds, Stage};
use crate::domain::state::{DestroyCause, Destroyed, Direction, EnemyCraft, PlayerCraft, Projectile};
use crate::domain::tuning::GameTuning;
use tracing::trace;

/// Which side fired a projectile; selects the collection it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

/// Result of applying damage to an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageResult {
    /// Enemy survived with the remaining life.
    Damaged { life: u32 },
    /// Life reached zero and the enemy was removed in the same call.
    Destroyed,
    /// No live enemy has that id (already removed this tick, for example).
    Missing,
}

pub struct EntityStore {
    player: PlayerCraft,
    player_projectiles: Vec<Projectile>,
    enemy_projectiles: Vec<Projectile>,
    enemies: Vec<EnemyCraft>,

    // Session-scoped counters; ids are never reused within a session.
    next_projectile_id: u64,
    next_enemy_id: u64,

    tuning: GameTuning,
    destroyed: Vec<Destroyed>,
}

impl EntityStore {
    /// Creates an empty store with the player craft at its start position for `stage`.
    pub fn new(stage: Stage, tuning: GameTuning) -> Self {
        let start_x = stage.width as f32 / 2.0 - tuning.player.start_offset_x;
        let start_y = stage.height as f32;

        Self {
            player: PlayerCraft {
                bounds: Bounds::new(
                    start_x,
                    start_y,
                    tuning.player.width,
                    tuning.player.height,
                ),
                speed: tuning.player.speed,
            },
            player_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            enemies: Vec::new(),
            next_projectile_id: 0,
            next_enemy_id: 0,
            tuning,
            destroyed: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &GameTuning {
        &self.tuning
    }

    pub fn player(&self) -> &PlayerCraft {
        &self.player
    }

    /// Applies the authoritative position reported by the input collaborator.
    pub fn set_player_position(&mut self, x: f32, y: f32) {
        self.player.bounds.x = x;
        self.player.bounds.y = y;
    }

    pub fn player_projectiles(&self) -> &[Projectile] {
        &self.player_projectiles
    }

    pub fn enemy_projectiles(&self) -> &[Projectile] {
        &self.enemy_projectiles
    }

    pub fn enemies(&self) -> &[EnemyCraft] {
        &self.enemies
    }

    pub fn spawn_player_projectile(&mut self, x: f32, y: f32, direction: Direction) -> u64 {
        self.spawn_projectile(Side::Player, x, y, direction)
    }

    pub fn spawn_enemy_projectile(&mut self, x: f32, y: f32, direction: Direction) -> u64 {
        self.spawn_projectile(Side::Enemy, x, y, direction)
    }

    fn spawn_projectile(&mut self, side: Side, x: f32, y: f32, direction: Direction) -> u64 {
        let id = self.next_projectile_id;
        self.next_projectile_id += 1;

        let t = self.tuning.projectile;
        self.collection_mut(side).push(Projectile {
            id,
            bounds: Bounds::new(x, y, t.width, t.height),
            direction,
        });
        trace!(projectile_id = id, ?side, x, y, "projectile spawned");
        id
    }

    /// Appends a fresh enemy at `x` on the spawn row.
    pub fn spawn_enemy(&mut self, x: f32) -> u64 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;

        let t = self.tuning.enemy;
        self.enemies.push(EnemyCraft {
            id,
            bounds: Bounds::new(x, t.spawn_y, t.width, t.height),
            life: t.life,
        });
        trace!(enemy_id = id, x, "enemy spawned");
        id
    }

    /// Removes a projectile from whichever side owns it. Unknown ids are a no-op.
    pub fn remove_projectile(&mut self, id: u64, cause: DestroyCause) -> bool {
        for side in [Side::Player, Side::Enemy] {
            let projectiles = self.collection_mut(side);
            if let Some(index) = projectiles.iter().position(|p| p.id == id) {
                projectiles.remove(index);
                self.destroyed.push(Destroyed::Projectile { id, cause });
                return true;
            }
        }
        false
    }

    /// Removes an enemy by id. Unknown ids are a no-op.
    pub fn remove_enemy(&mut self, id: u64, cause: DestroyCause) -> bool {
        let Some(index) = self.enemies.iter().position(|e| e.id == id) else {
            return false;
        };
        let enemy = self.enemies.remove(index);
        self.destroyed.push(Destroyed::Enemy {
            id,
            bounds: enemy.bounds,
            cause,
        });
        true
    }

    /// Decrements life and removes the enemy in the same call once it reaches zero.
    pub fn damage_enemy(&mut self, id: u64, amount: u32) -> DamageResult {
        let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == id) else {
            return DamageResult::Missing;
        };

        enemy.life = enemy.life.saturating_sub(amount);
        if enemy.life > 0 {
            return DamageResult::Damaged { life: enemy.life };
        }

        self.remove_enemy(id, DestroyCause::Collision);
        DamageResult::Destroyed
    }

    /// Ids of one side's projectiles, captured before a pass mutates the collection.
    pub fn projectile_ids(&self, side: Side) -> Vec<u64> {
        self.collection(side).iter().map(|p| p.id).collect()
    }

    pub fn projectile_bounds(&self, side: Side, id: u64) -> Option<Bounds> {
        self.collection(side)
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.bounds)
    }

    pub fn enemy_ids(&self) -> Vec<u64> {
        self.enemies.iter().map(|e| e.id).collect()
    }

    pub(crate) fn projectiles_mut(&mut self, side: Side) -> &mut [Projectile] {
        self.collection_mut(side)
    }

    pub(crate) fn enemies_mut(&mut self) -> &mut [EnemyCraft] {
        &mut self.enemies
    }

    /// Drops every projectile of `side` for which `keep` is false, recording each removal.
    pub(crate) fn retain_projectiles(
        &mut self,
        side: Side,
        cause: DestroyCause,
        mut keep: impl FnMut(&Projectile) -> bool,
    ) {
        let destroyed = &mut self.destroyed;
        let projectiles = match side {
            Side::Player => &mut self.player_projectiles,
            Side::Enemy => &mut self.enemy_projectiles,
        };
        projectiles.retain(|p| {
            let kept = keep(p);
            if !kept {
                destroyed.push(Destroyed::Projectile { id: p.id, cause });
            }
            kept
        });
    }

    pub(crate) fn retain_enemies(
        &mut self,
        cause: DestroyCause,
        mut keep: impl FnMut(&EnemyCraft) -> bool,
    ) {
        let destroyed = &mut self.destroyed;
        self.enemies.retain(|e| {
            let kept = keep(e);
            if !kept {
                destroyed.push(Destroyed::Enemy {
                    id: e.id,
                    bounds: e.bounds,
                    cause,
                });
            }
            kept
        });
    }

    /// Hands over the removal notices recorded since the previous call.
    pub fn drain_destroyed(&mut self) -> Vec<Destroyed> {
        std::mem::take(&mut self.destroyed)
    }

    fn collection(&self, side: Side) -> &Vec<Projectile> {
        match side {
            Side::Player => &self.player_projectiles,
            Side::Enemy => &self.enemy_projectiles,
        }
    }

    fn collection_mut(&mut self, side: Side) -> &mut Vec<Projectile> {
        match side {
            Side::Player => &mut self.player_projectiles,
            Side::Enemy => &mut self.enemy_projectiles,
        }
    }
}
