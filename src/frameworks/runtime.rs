// Framework bootstrap for the headless simulation runtime.

use crate::domain::tuning::GameTuning;
use crate::domain::{Outcome, Stage};
use crate::frameworks::config;
use crate::interface_adapters::autopilot::spawn_autopilot;
use crate::interface_adapters::render::spawn_session_serializer;
use crate::use_cases::{SessionRegistry, SessionSettings};

use std::io::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::level_filters::LevelFilter;
use tracing::{info, trace};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_SESSION_ID: &str = "main";

fn init_runtime() {
    // A missing .env is the normal case outside local runs.
    let _ = dotenvy::dotenv();
    init_tracing();
    install_panic_hook();
}

// `RUST_LOG` overrides the default `info` level; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let (json_layer, compact_layer) = match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => (
            Some(
                fmt::layer()
                    .with_target(false)
                    .json()
                    .with_current_span(true),
            ),
            None,
        ),
        _ => (None, Some(fmt::layer().with_target(false).compact())),
    };

    tracing_subscriber::Registry::default()
        .with(filter)
        .with(json_layer)
        .with(compact_layer)
        .init();
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "simulation panicked");
    }));
}

/// Session settings assembled from the environment.
pub fn settings_from_env() -> SessionSettings {
    SessionSettings {
        stage: Stage::new(config::stage_width(), config::stage_height()),
        tuning: GameTuning::default(),
        input_channel_capacity: config::INPUT_CHANNEL_CAPACITY,
        world_broadcast_capacity: config::WORLD_BROADCAST_CAPACITY,
        tick_interval: config::tick_interval(),
        spawn_interval: config::spawn_interval(),
        spawn_seed: config::spawn_seed(),
    }
}

// Dumps the render stream at trace level in place of a real presentation layer.
async fn trace_render_messages(mut render_rx: broadcast::Receiver<Arc<str>>) {
    loop {
        match render_rx.recv().await {
            Ok(msg) => trace!(message = %msg, "render"),
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Plays one session until it ends or the process is interrupted.
pub async fn run(settings: SessionSettings, autopilot_fire: Option<Duration>) -> Result<Outcome> {
    let registry = Arc::new(SessionRegistry::new(settings));
    let session = registry
        .create_session(DEFAULT_SESSION_ID.to_string())
        .await
        .map_err(|e| std::io::Error::other(format!("failed to start session: {e:?}")))?;

    let outcome_rx = session.outcome_tx.subscribe();
    tokio::spawn(trace_render_messages(session.render_tx.subscribe()));
    spawn_session_serializer(&session);
    if let Some(interval) = autopilot_fire {
        spawn_autopilot(&session, interval);
    }

    tracing::debug!(
        stage_width = session.stage.width,
        stage_height = session.stage.height,
        tick_interval_ms = registry.settings().tick_interval.as_millis(),
        spawn_interval_ms = registry.settings().spawn_interval.as_millis(),
        autopilot = autopilot_fire.is_some(),
        "session configured"
    );

    // The watcher tears the session down once it ends; Ctrl-C takes the same path early.
    let watcher = registry.clone().spawn_outcome_watcher(&session);
    drop(session);

    tokio::select! {
        interrupted = tokio::signal::ctrl_c() => {
            interrupted?;
            info!("interrupt received; tearing down");
            registry.remove_session(DEFAULT_SESSION_ID).await;
        }
        _ = watcher => {}
    }

    let outcome = *outcome_rx.borrow();
    info!(?outcome, "session finished");
    Ok(outcome)
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();
    run(settings_from_env(), config::autopilot_fire_interval())
        .await
        .map(|_| ())
}
