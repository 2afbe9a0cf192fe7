// Render protocol DTOs consumed by the presentation and navigation collaborators.

use crate::domain::{
    Bounds, DestroyCause, Destroyed, Direction, EnemySnapshot, Outcome, Page, PlayerSnapshot,
    ProjectileSnapshot,
};
use crate::use_cases::WorldUpdate;
use serde::Serialize;

/// Messages published for the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum RenderMessage {
    // Snapshot of every live entity for a given tick.
    WorldUpdate(WorldUpdateDto),
    // The one-time match outcome transition.
    Outcome(OutcomeDto),
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldUpdateDto {
    pub tick: u64,
    pub player: PlayerStateDto,
    pub player_projectiles: Vec<ProjectileStateDto>,
    pub enemy_projectiles: Vec<ProjectileStateDto>,
    pub enemies: Vec<EnemyStateDto>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub destroyed_projectiles: Vec<DestroyedProjectileDto>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub destroyed_enemies: Vec<DestroyedEnemyDto>,
}

impl From<&WorldUpdate> for WorldUpdateDto {
    fn from(update: &WorldUpdate) -> Self {
        let mut destroyed_projectiles = Vec::new();
        let mut destroyed_enemies = Vec::new();
        for d in &update.destroyed {
            match d {
                Destroyed::Projectile { id, cause } => {
                    destroyed_projectiles.push(DestroyedProjectileDto {
                        id: *id,
                        cause: (*cause).into(),
                    })
                }
                Destroyed::Enemy { id, bounds, cause } => {
                    destroyed_enemies.push(DestroyedEnemyDto {
                        id: *id,
                        rect: bounds.into(),
                        cause: (*cause).into(),
                    })
                }
            }
        }

        Self {
            tick: update.tick,
            player: PlayerStateDto::from(&update.player),
            player_projectiles: update
                .player_projectiles
                .iter()
                .map(ProjectileStateDto::from)
                .collect(),
            enemy_projectiles: update
                .enemy_projectiles
                .iter()
                .map(ProjectileStateDto::from)
                .collect(),
            enemies: update.enemies.iter().map(EnemyStateDto::from).collect(),
            destroyed_projectiles,
            destroyed_enemies,
        }
    }
}

/// Position and size, flattened for drawing.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RectDto {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&Bounds> for RectDto {
    fn from(b: &Bounds) -> Self {
        Self {
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerStateDto {
    #[serde(flatten)]
    pub rect: RectDto,
    pub speed: f32,
}

impl From<&PlayerSnapshot> for PlayerStateDto {
    fn from(p: &PlayerSnapshot) -> Self {
        Self {
            rect: (&p.bounds).into(),
            speed: p.speed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileStateDto {
    // Stable key for the drawn sprite.
    pub id: u64,
    #[serde(flatten)]
    pub rect: RectDto,
    pub direction: DirectionDto,
}

impl From<&ProjectileSnapshot> for ProjectileStateDto {
    fn from(p: &ProjectileSnapshot) -> Self {
        Self {
            id: p.id,
            rect: (&p.bounds).into(),
            direction: p.direction.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyStateDto {
    pub id: u64,
    #[serde(flatten)]
    pub rect: RectDto,
    pub life: u32,
}

impl From<&EnemySnapshot> for EnemyStateDto {
    fn from(e: &EnemySnapshot) -> Self {
        Self {
            id: e.id,
            rect: (&e.bounds).into(),
            life: e.life,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DestroyedProjectileDto {
    pub id: u64,
    pub cause: DestroyCauseDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct DestroyedEnemyDto {
    pub id: u64,
    #[serde(flatten)]
    pub rect: RectDto,
    pub cause: DestroyCauseDto,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionDto {
    Up,
    Down,
}

impl From<Direction> for DirectionDto {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Up => DirectionDto::Up,
            Direction::Down => DirectionDto::Down,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DestroyCauseDto {
    Offscreen,
    Collision,
    Requested,
}

impl From<DestroyCause> for DestroyCauseDto {
    fn from(c: DestroyCause) -> Self {
        match c {
            DestroyCause::Offscreen => DestroyCauseDto::Offscreen,
            DestroyCause::Collision => DestroyCauseDto::Collision,
            DestroyCause::Requested => DestroyCauseDto::Requested,
        }
    }
}

/// Outcome sent to the navigation collaborator.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OutcomeDto {
    Playing,
    Ended { destination: PageDto },
}

impl From<Outcome> for OutcomeDto {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Playing => OutcomeDto::Playing,
            Outcome::Ended { destination } => OutcomeDto::Ended {
                destination: destination.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDto {
    End,
}

impl From<Page> for PageDto {
    fn from(page: Page) -> Self {
        match page {
            Page::End => PageDto::End,
        }
    }
}
