// Pairwise overlap checks and hit resolution, run once per tick after movement.
//
// Pass order is part of the game rules: player shots hit enemies first, surviving shots can
// then cancel enemy shots, and only afterwards is the player checked against enemy shots and
// enemy craft. Each pass walks an id list captured before it starts, so removals made
// mid-pass never shift or skip the entities still to be examined.

use crate::domain::geometry::overlaps;
use crate::domain::outcome::{OutcomeSignal, Page};
use crate::domain::state::DestroyCause;
use crate::domain::store::{DamageResult, EntityStore, Side};
use tracing::{debug, trace};

/// What the collision passes did during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Player projectiles that struck an enemy.
    pub player_hits: u32,
    /// Enemies whose life reached zero.
    pub enemies_destroyed: u32,
    /// Player/enemy projectile pairs that destroyed each other.
    pub intercepts: u32,
    /// Game-over detections, counted once per qualifying entity.
    pub game_over_hits: u32,
    /// True when this tick moved the outcome from playing to ended.
    pub ended: bool,
}

pub fn run(store: &mut EntityStore, outcome: &mut OutcomeSignal) -> CollisionReport {
    let mut report = CollisionReport::default();

    player_projectiles_vs_enemies(store, &mut report);
    player_projectiles_vs_enemy_projectiles(store, &mut report);
    enemy_projectiles_vs_player(store, outcome, &mut report);
    enemies_vs_player(store, outcome, &mut report);

    report
}

fn player_projectiles_vs_enemies(store: &mut EntityStore, report: &mut CollisionReport) {
    let damage = store.tuning().enemy.damage_per_hit;

    for projectile_id in store.projectile_ids(Side::Player) {
        let Some(shot) = store.projectile_bounds(Side::Player, projectile_id) else {
            continue;
        };

        // A projectile is spent on the first enemy it touches, in enemy order.
        let target = store
            .enemies()
            .iter()
            .find(|e| overlaps(&shot, &e.bounds))
            .map(|e| e.id);
        let Some(enemy_id) = target else {
            continue;
        };

        store.remove_projectile(projectile_id, DestroyCause::Collision);
        report.player_hits += 1;

        match store.damage_enemy(enemy_id, damage) {
            DamageResult::Destroyed => {
                report.enemies_destroyed += 1;
                debug!(enemy_id, projectile_id, "enemy destroyed");
            }
            DamageResult::Damaged { life } => {
                trace!(enemy_id, projectile_id, life, "enemy hit");
            }
            DamageResult::Missing => {}
        }
    }
}

fn player_projectiles_vs_enemy_projectiles(store: &mut EntityStore, report: &mut CollisionReport) {
    for projectile_id in store.projectile_ids(Side::Player) {
        let Some(shot) = store.projectile_bounds(Side::Player, projectile_id) else {
            continue;
        };

        let target = store
            .enemy_projectiles()
            .iter()
            .find(|p| overlaps(&shot, &p.bounds))
            .map(|p| p.id);
        let Some(enemy_shot_id) = target else {
            continue;
        };

        store.remove_projectile(projectile_id, DestroyCause::Collision);
        store.remove_projectile(enemy_shot_id, DestroyCause::Collision);
        report.intercepts += 1;
        trace!(projectile_id, enemy_shot_id, "projectiles intercepted");
    }
}

// The offending enemy projectile stays live; the session ends on this tick regardless.
fn enemy_projectiles_vs_player(
    store: &EntityStore,
    outcome: &mut OutcomeSignal,
    report: &mut CollisionReport,
) {
    let player = store.player().bounds;
    for p in store.enemy_projectiles() {
        if overlaps(&player, &p.bounds) {
            debug!(projectile_id = p.id, "player hit by enemy projectile");
            game_over(outcome, report);
        }
    }
}

fn enemies_vs_player(
    store: &EntityStore,
    outcome: &mut OutcomeSignal,
    report: &mut CollisionReport,
) {
    let player = store.player().bounds;
    for e in store.enemies() {
        if overlaps(&player, &e.bounds) {
            debug!(enemy_id = e.id, "player rammed by enemy");
            game_over(outcome, report);
        }
    }
}

fn game_over(outcome: &mut OutcomeSignal, report: &mut CollisionReport) {
    report.game_over_hits += 1;
    if outcome.raise(Page::End) {
        report.ended = true;
    }
}
