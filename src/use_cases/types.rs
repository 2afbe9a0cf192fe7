// Use-case level inputs/outputs for the game loop.

use crate::domain::systems::collision::CollisionReport;
use crate::domain::{Destroyed, EnemySnapshot, Outcome, PlayerSnapshot, ProjectileSnapshot};

/// Events external collaborators feed into a running session.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Authoritative player position from the keyboard integrator.
    PlayerMoved { x: f32, y: f32 },
    PlayerAttack { x: f32, y: f32 },
    EnemyAttack { x: f32, y: f32 },
    /// The presentation layer saw a projectile leave the screen.
    ProjectileOffscreen { id: u64 },
}

/// Render state after one tick.
#[derive(Debug, Clone)]
pub struct WorldUpdate {
    pub tick: u64,
    pub outcome: Outcome,
    pub player: PlayerSnapshot,
    pub player_projectiles: Vec<ProjectileSnapshot>,
    pub enemy_projectiles: Vec<ProjectileSnapshot>,
    pub enemies: Vec<EnemySnapshot>,
    // Removals since the previous update.
    pub destroyed: Vec<Destroyed>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub collisions: CollisionReport,
    /// Set only on the tick that ended the session.
    pub transition: Option<Outcome>,
}
