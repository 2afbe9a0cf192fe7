// Collaborator-facing entry points: position stream, attacks and offscreen reports.

use crate::use_cases::GameEvent;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::warn;

const LOG_THROTTLE: Duration = Duration::from_secs(2);

#[derive(Debug, PartialEq, Eq)]
pub enum InputError {
    /// The session task is gone; callers should stop sending.
    SessionClosed,
    /// Coordinates were NaN or infinite and were dropped.
    InvalidPosition,
}

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

pub fn sanitize_position(x: f32, y: f32) -> Option<(f32, f32)> {
    (x.is_finite() && y.is_finite()).then_some((x, y))
}

/// Non-blocking sender used by input, presentation and enemy-behavior collaborators.
///
/// A full channel drops the event (the next frame carries fresher input) and logs at most once
/// per throttle window.
pub struct InputClient {
    input_tx: mpsc::Sender<GameEvent>,
    last_full_log: Instant,
    last_invalid_log: Instant,
}

impl InputClient {
    pub fn new(input_tx: mpsc::Sender<GameEvent>) -> Self {
        let now = Instant::now()
            .checked_sub(LOG_THROTTLE)
            .unwrap_or_else(Instant::now);
        Self {
            input_tx,
            last_full_log: now,
            last_invalid_log: now,
        }
    }

    pub fn player_moved(&mut self, x: f32, y: f32) -> Result<(), InputError> {
        let (x, y) = self.checked(x, y)?;
        self.send(GameEvent::PlayerMoved { x, y })
    }

    pub fn player_attack(&mut self, x: f32, y: f32) -> Result<(), InputError> {
        let (x, y) = self.checked(x, y)?;
        self.send(GameEvent::PlayerAttack { x, y })
    }

    pub fn enemy_attack(&mut self, x: f32, y: f32) -> Result<(), InputError> {
        let (x, y) = self.checked(x, y)?;
        self.send(GameEvent::EnemyAttack { x, y })
    }

    pub fn projectile_offscreen(&mut self, id: u64) -> Result<(), InputError> {
        self.send(GameEvent::ProjectileOffscreen { id })
    }

    fn checked(&mut self, x: f32, y: f32) -> Result<(f32, f32), InputError> {
        sanitize_position(x, y).ok_or_else(|| {
            if should_log(&mut self.last_invalid_log) {
                warn!("invalid input position (NaN/inf); dropping");
            }
            InputError::InvalidPosition
        })
    }

    fn send(&mut self, ev: GameEvent) -> Result<(), InputError> {
        match self.input_tx.try_send(ev) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_ev)) => {
                if should_log(&mut self.last_full_log) {
                    warn!("input channel full; dropping event");
                }
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_ev)) => Err(InputError::SessionClosed),
        }
    }
}
