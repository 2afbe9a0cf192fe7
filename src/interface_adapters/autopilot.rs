// Scripted stand-in for the keyboard and enemy-behavior collaborators.
//
// Used by the headless binary so a session plays itself: the craft rises to its resting spot
// once, then fires on a fixed cadence, and every live enemy returns fire on every third volley.

use crate::domain::tuning::GameTuning;
use crate::interface_adapters::input::{InputClient, InputError};
use crate::use_cases::{SessionHandle, WorldUpdate};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const ENEMY_VOLLEY_EVERY: u64 = 3;

pub fn spawn_autopilot(session: &SessionHandle, fire_interval: Duration) -> JoinHandle<()> {
    tokio::spawn(autopilot(
        session.world_tx.subscribe(),
        InputClient::new(session.input_tx.clone()),
        session.tuning,
        fire_interval,
    ))
}

async fn autopilot(
    mut world_rx: broadcast::Receiver<WorldUpdate>,
    mut input: InputClient,
    tuning: GameTuning,
    fire_interval: Duration,
) {
    let mut fire = tokio::time::interval(fire_interval);
    let mut latest: Option<WorldUpdate> = None;
    let mut entered = false;
    let mut volleys: u64 = 0;

    loop {
        let result = tokio::select! {
            update = world_rx.recv() => match update {
                Ok(update) => {
                    let result = if entered {
                        Ok(())
                    } else {
                        entered = true;
                        let p = update.player.bounds;
                        input.player_moved(p.x, p.y - tuning.player.entrance_rise)
                    };
                    latest = Some(update);
                    result
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(missed = n, "autopilot lagged behind world updates");
                    Ok(())
                }
                Err(broadcast::error::RecvError::Closed) => Err(InputError::SessionClosed),
            },
            _ = fire.tick() => match latest.as_ref() {
                Some(world) => {
                    volleys += 1;
                    volley(&mut input, world, &tuning, volleys % ENEMY_VOLLEY_EVERY == 0)
                }
                None => Ok(()),
            },
        };

        if let Err(e) = result {
            debug!(error = ?e, "autopilot stopping");
            return;
        }
    }
}

fn volley(
    input: &mut InputClient,
    world: &WorldUpdate,
    tuning: &GameTuning,
    enemies_fire: bool,
) -> Result<(), InputError> {
    let shot = tuning.projectile;

    // Player shots leave from the nose, enemy shots from the belly.
    let p = world.player.bounds;
    input.player_attack(p.center_x() - shot.width / 2.0, p.y - shot.height)?;

    if enemies_fire {
        for e in &world.enemies {
            input.enemy_attack(e.bounds.center_x() - shot.width / 2.0, e.bounds.bottom())?;
        }
    }
    Ok(())
}
