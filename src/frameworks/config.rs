use std::{env, time::Duration};

// Runtime constants (not gameplay tuning).

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;
pub const WORLD_BROADCAST_CAPACITY: usize = 128;

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn millis_var(key: &str, default: u64) -> Duration {
    // Zero periods would panic in the timers; treat them as the smallest step.
    Duration::from_millis(parse_var::<u64>(key).unwrap_or(default).max(1))
}

pub fn stage_width() -> u32 {
    parse_var("STAGE_WIDTH").unwrap_or(750)
}

pub fn stage_height() -> u32 {
    parse_var("STAGE_HEIGHT").unwrap_or(1080)
}

/// Frame clock period, roughly 60 Hz by default.
pub fn tick_interval() -> Duration {
    millis_var("TICK_INTERVAL_MS", 16)
}

pub fn spawn_interval() -> Duration {
    millis_var("SPAWN_INTERVAL_MS", 1000)
}

pub fn spawn_seed() -> Option<u64> {
    parse_var("SPAWN_SEED")
}

/// Autopilot volley period; `None` when disabled with `AUTOPILOT_FIRE_MS=0`.
pub fn autopilot_fire_interval() -> Option<Duration> {
    match parse_var::<u64>("AUTOPILOT_FIRE_MS").unwrap_or(400) {
        0 => None,
        millis => Some(Duration::from_millis(millis)),
    }
}
