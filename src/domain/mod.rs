// Domain layer: core simulation types and rules.

pub mod geometry;
pub mod outcome;
pub mod state;
pub mod store;
pub mod systems;
pub mod tuning;

pub use geometry::{Bounds, Stage, overlaps};
pub use outcome::{Outcome, OutcomeSignal, Page};
pub use state::{
    DestroyCause, Destroyed, Direction, EnemyCraft, EnemySnapshot, PlayerCraft, PlayerSnapshot,
    Projectile, ProjectileSnapshot,
};
pub use store::{DamageResult, EntityStore, Side};
