// Domain-level simulation entities and their render snapshots.

use crate::domain::geometry::Bounds;

/// Travel direction of a projectile; also identifies the side that fired it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Player-fired, moves toward negative y.
    Up,
    /// Enemy-fired, moves toward positive y.
    Down,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
        }
    }
}

/// Why an entity left its live collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyCause {
    /// Fully left the visible vertical range.
    Offscreen,
    /// Removed by a collision pass (hit, intercept, or killed by damage).
    Collision,
    /// Removed on request from an external collaborator.
    Requested,
}

pub struct PlayerCraft {
    pub bounds: Bounds,
    // Pixels per tick; consumed by the input collaborator, not by the simulation.
    pub speed: f32,
}

pub struct Projectile {
    pub id: u64,
    pub bounds: Bounds,
    pub direction: Direction,
}

pub struct EnemyCraft {
    pub id: u64,
    pub bounds: Bounds,
    pub life: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub bounds: Bounds,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSnapshot {
    pub id: u64,
    pub bounds: Bounds,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemySnapshot {
    pub id: u64,
    pub bounds: Bounds,
    pub life: u32,
}

/// Removal notice handed to the presentation layer so it can release per-entity resources.
#[derive(Debug, Clone, PartialEq)]
pub enum Destroyed {
    Projectile {
        id: u64,
        cause: DestroyCause,
    },
    // Last known box so an explosion can be drawn where the craft was.
    Enemy {
        id: u64,
        bounds: Bounds,
        cause: DestroyCause,
    },
}

impl From<&PlayerCraft> for PlayerSnapshot {
    fn from(p: &PlayerCraft) -> Self {
        Self {
            bounds: p.bounds,
            speed: p.speed,
        }
    }
}

impl From<&Projectile> for ProjectileSnapshot {
    fn from(p: &Projectile) -> Self {
        Self {
            id: p.id,
            bounds: p.bounds,
            direction: p.direction,
        }
    }
}

impl From<&EnemyCraft> for EnemySnapshot {
    fn from(e: &EnemyCraft) -> Self {
        Self {
            id: e.id,
            bounds: e.bounds,
            life: e.life,
        }
    }
}
