// Shared settings and helpers for session integration tests.
#![allow(dead_code)]

use play_plane::domain::Stage;
use play_plane::domain::tuning::GameTuning;
use play_plane::use_cases::{SessionSettings, WorldUpdate};
use std::time::Duration;
use tokio::sync::broadcast::{self, error::TryRecvError};

pub const TICK: Duration = Duration::from_millis(16);

// Full-size stage with the default one-second spawn cadence.
pub fn settings() -> SessionSettings {
    SessionSettings {
        stage: Stage::new(750, 1080),
        tuning: GameTuning::default(),
        input_channel_capacity: 64,
        world_broadcast_capacity: 16,
        tick_interval: TICK,
        spawn_interval: Duration::from_millis(1000),
        spawn_seed: Some(11),
    }
}

// Zero-width, shallow stage: every enemy spawns at x = 0 over the player's start column and
// reaches it a few dozen frames after spawning.
pub fn collision_course_settings() -> SessionSettings {
    SessionSettings {
        stage: Stage::new(0, 100),
        spawn_interval: Duration::from_millis(50),
        ..settings()
    }
}

pub fn session_id() -> String {
    format!("test-{}", uuid::Uuid::new_v4())
}

// Returns the newest buffered update, skipping anything the receiver lagged past.
pub fn latest_update(rx: &mut broadcast::Receiver<WorldUpdate>) -> Option<WorldUpdate> {
    let mut latest = None;
    loop {
        match rx.try_recv() {
            Ok(update) => latest = Some(update),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => return latest,
        }
    }
}
