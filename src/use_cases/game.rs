use super::types::{GameEvent, TickReport, WorldUpdate};
use crate::domain::systems::collision;
use crate::domain::systems::movement::{self, MovementConfig};
use crate::domain::systems::spawn::SpawnScheduler;
use crate::domain::tuning::GameTuning;
use crate::domain::{
    DestroyCause, Direction, EnemySnapshot, EntityStore, Outcome, OutcomeSignal, PlayerSnapshot,
    ProjectileSnapshot, Side, Stage,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, broadcast, mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

/// Frame-by-frame driver for one session.
///
/// Owns the entity store and the outcome signal. Everything here is synchronous; the async
/// [`world_task`] only decides *when* a frame or a spawn happens.
pub struct GameLoop {
    store: EntityStore,
    outcome: OutcomeSignal,
    movement: MovementConfig,
    tick: u64,
}

impl GameLoop {
    pub fn new(stage: Stage, tuning: GameTuning) -> Self {
        Self {
            store: EntityStore::new(stage, tuning),
            outcome: OutcomeSignal::new(),
            movement: MovementConfig {
                projectile_speed: tuning.projectile.speed,
                enemy_speed: tuning.enemy.speed,
                stage,
            },
            tick: 0,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome.state()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn handle_event(&mut self, ev: GameEvent) {
        match ev {
            GameEvent::PlayerMoved { x, y } => self.on_player_moved(x, y),
            GameEvent::PlayerAttack { x, y } => {
                self.on_player_attack(x, y);
            }
            GameEvent::EnemyAttack { x, y } => {
                self.on_enemy_attack(x, y);
            }
            GameEvent::ProjectileOffscreen { id } => {
                self.on_projectile_offscreen(id);
            }
        }
    }

    pub fn on_player_moved(&mut self, x: f32, y: f32) {
        self.store.set_player_position(x, y);
    }

    pub fn on_player_attack(&mut self, x: f32, y: f32) -> u64 {
        self.store.spawn_player_projectile(x, y, Direction::Up)
    }

    pub fn on_enemy_attack(&mut self, x: f32, y: f32) -> u64 {
        self.store.spawn_enemy_projectile(x, y, Direction::Down)
    }

    /// Movement already drops projectiles that leave the stage, so this is usually a no-op.
    pub fn on_projectile_offscreen(&mut self, id: u64) -> bool {
        let removed = self.store.remove_projectile(id, DestroyCause::Requested);
        if removed {
            trace!(projectile_id = id, "projectile removed on request");
        }
        removed
    }

    pub fn spawn_enemy(&mut self, scheduler: &mut SpawnScheduler) -> u64 {
        scheduler.spawn(&mut self.store)
    }

    /// One frame: move player shots, enemy shots and enemies, then run the collision passes.
    pub fn tick(&mut self) -> TickReport {
        self.tick += 1;

        movement::tick_projectiles(&mut self.store, Side::Player, self.movement);
        movement::tick_projectiles(&mut self.store, Side::Enemy, self.movement);
        movement::tick_enemies(&mut self.store, self.movement);

        let collisions = collision::run(&mut self.store, &mut self.outcome);

        TickReport {
            tick: self.tick,
            collisions,
            transition: collisions.ended.then(|| self.outcome.state()),
        }
    }

    /// Render state for the current frame; hands over removals recorded since the last call.
    pub fn snapshot(&mut self) -> WorldUpdate {
        WorldUpdate {
            tick: self.tick,
            outcome: self.outcome.state(),
            player: PlayerSnapshot::from(self.store.player()),
            player_projectiles: self
                .store
                .player_projectiles()
                .iter()
                .map(ProjectileSnapshot::from)
                .collect(),
            enemy_projectiles: self
                .store
                .enemy_projectiles()
                .iter()
                .map(ProjectileSnapshot::from)
                .collect(),
            enemies: self
                .store
                .enemies()
                .iter()
                .map(EnemySnapshot::from)
                .collect(),
            destroyed: self.store.drain_destroyed(),
        }
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }
}

/// Drives one session: a frame clock and an independent spawn timer on the same task.
///
/// Both clocks live inside one `select!`, so a spawn always lands between two frames. The task
/// returns after the frame that ends the session or when `shutdown` is notified; either way
/// both timers are dropped with it.
pub async fn world_task(
    mut game: GameLoop,
    mut spawner: SpawnScheduler,
    mut input_rx: mpsc::Receiver<GameEvent>,
    world_tx: broadcast::Sender<WorldUpdate>,
    outcome_tx: watch::Sender<Outcome>,
    tick_interval: Duration,
    shutdown: Arc<Notify>,
) {
    let mut frames = tokio::time::interval(tick_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // First spawn after one full period, like a plain repeating timer.
    let mut spawns = tokio::time::interval_at(Instant::now() + spawner.interval, spawner.interval);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                // Exit cleanly when the session is torn down.
                debug!(tick = game.tick_count(), "session task shutting down");
                break;
            }
            _ = spawns.tick() => {
                let enemy_id = game.spawn_enemy(&mut spawner);
                debug!(enemy_id, "enemy spawned");
            }
            _ = frames.tick() => {
                // Apply everything collaborators sent since the previous frame.
                while let Ok(ev) = input_rx.try_recv() {
                    game.handle_event(ev);
                }

                let report = game.tick();
                let _ = world_tx.send(game.snapshot());

                if let Some(outcome) = report.transition {
                    info!(
                        tick = report.tick,
                        game_over_hits = report.collisions.game_over_hits,
                        ?outcome,
                        "session ended"
                    );
                    let _ = outcome_tx.send(outcome);
                    break;
                }
            }
        }
    }
}
