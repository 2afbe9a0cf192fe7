// Session lifecycle: spawning, tearing down and restarting game worlds.

use crate::domain::systems::spawn::SpawnScheduler;
use crate::domain::tuning::GameTuning;
use crate::domain::{Outcome, Stage};
use crate::use_cases::game::{GameLoop, world_task};
use crate::use_cases::{GameEvent, WorldUpdate};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Notify, RwLock, broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, info_span};

/// Stage, tuning and clock settings every new session is started with.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Visible play area handed to every new session.
    pub stage: Stage,
    /// Per-entity gameplay constants.
    pub tuning: GameTuning,
    /// Bound on queued input events between two frames.
    pub input_channel_capacity: usize,
    /// How many frames a slow world or render subscriber may fall behind.
    pub world_broadcast_capacity: usize,
    /// Frame clock period.
    pub tick_interval: Duration,
    /// Enemy spawn period, independent of the frame clock.
    pub spawn_interval: Duration,
    /// Fixed seed for spawn columns; entropy when absent.
    pub spawn_seed: Option<u64>,
}

#[derive(Debug)]
pub enum SessionError {
    /// A session is already running under this id; use `restart_session` to replace it.
    AlreadyExists,
}

/// Cloneable access to one running session: its identity and every channel in or out.
#[derive(Clone)]
pub struct SessionHandle {
    pub session_id: Arc<str>,
    /// Distinguishes successive sessions created under the same id.
    pub generation: u64,
    /// Stage the session was created with.
    pub stage: Stage,
    /// Gameplay constants the session was created with.
    pub tuning: GameTuning,
    /// Position, attack and offscreen events, applied at the start of the next frame.
    pub input_tx: mpsc::Sender<GameEvent>,
    /// One `WorldUpdate` per frame.
    pub world_tx: broadcast::Sender<WorldUpdate>,
    /// JSON render messages: frames and the outcome change.
    pub render_tx: broadcast::Sender<Arc<str>>,
    /// Most recent JSON frame, for presenters that attach mid-match.
    pub render_latest_tx: watch::Sender<Arc<str>>,
    /// `Playing` until the match ends; changes at most once.
    pub outcome_tx: watch::Sender<Outcome>,
}

/// A running session. Owns its task: dropping it cancels the frame clock and the spawn timer.
pub struct Session {
    handle: SessionHandle,
    shutdown: Arc<Notify>,
    task: Option<JoinHandle<()>>,
}

impl Session {
    /// Wires the channels and spawns the session task.
    pub fn start(session_id: Arc<str>, generation: u64, settings: &SessionSettings) -> Self {
        let (input_tx, input_rx) = mpsc::channel::<GameEvent>(settings.input_channel_capacity);
        let (world_tx, _world_rx) =
            broadcast::channel::<WorldUpdate>(settings.world_broadcast_capacity);
        let (render_tx, _render_rx) =
            broadcast::channel::<Arc<str>>(settings.world_broadcast_capacity);
        let (render_latest_tx, _render_latest_rx) = watch::channel::<Arc<str>>(Arc::from(""));
        let (outcome_tx, _outcome_rx) = watch::channel(Outcome::Playing);

        let spawner = match settings.spawn_seed {
            Some(seed) => SpawnScheduler::seeded(settings.spawn_interval, settings.stage, seed),
            None => SpawnScheduler::from_entropy(settings.spawn_interval, settings.stage),
        };
        let game = GameLoop::new(settings.stage, settings.tuning);
        let shutdown = Arc::new(Notify::new());

        let span = info_span!("session", session_id = %session_id, generation);
        let task = tokio::spawn(
            world_task(
                game,
                spawner,
                input_rx,
                world_tx.clone(),
                outcome_tx.clone(),
                settings.tick_interval,
                shutdown.clone(),
            )
            .instrument(span),
        );
        info!(%session_id, generation, "session started");

        Self {
            handle: SessionHandle {
                session_id,
                generation,
                stage: settings.stage,
                tuning: settings.tuning,
                input_tx,
                world_tx,
                render_tx,
                render_latest_tx,
                outcome_tx,
            },
            shutdown,
            task: Some(task),
        }
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// True once the session task has returned (ended, shut down or aborted).
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|task| task.is_finished())
    }

    /// Stops the session task and waits for it to release both timers.
    pub async fn teardown(mut self) {
        self.shutdown.notify_one();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        info!(session_id = %self.handle.session_id, "session torn down");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Covers every path that skips `teardown`.
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Sessions by id. Each id maps to at most one running match.
#[derive(Debug)]
pub struct SessionRegistry {
    settings: SessionSettings,
    sessions: RwLock<HashMap<String, Session>>,
    next_generation: AtomicU64,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &self.handle.session_id)
            .field("generation", &self.handle.generation)
            .field("finished", &self.is_finished())
            .finish()
    }
}

impl SessionRegistry {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            sessions: RwLock::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Starts a match under `session_id`; its frame clock and spawn timer begin immediately.
    pub async fn create_session(&self, session_id: String) -> Result<SessionHandle, SessionError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session_id) {
            return Err(SessionError::AlreadyExists);
        }

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let session = Session::start(Arc::from(session_id.as_str()), generation, &self.settings);
        let handle = session.handle().clone();
        sessions.insert(session_id, session);
        Ok(handle)
    }

    pub async fn get_session(&self, session_id: &str) -> Option<SessionHandle> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).map(|s| s.handle().clone())
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Removes and tears down a session. Returns false when no such session exists.
    pub async fn remove_session(&self, session_id: &str) -> bool {
        // Release the map lock before waiting on the task.
        let removed = self.sessions.write().await.remove(session_id);
        match removed {
            Some(session) => {
                session.teardown().await;
                true
            }
            None => false,
        }
    }

    /// Tears down the current session under `session_id`, if any, and starts a fresh one.
    pub async fn restart_session(&self, session_id: String) -> Result<SessionHandle, SessionError> {
        self.remove_session(&session_id).await;
        self.create_session(session_id).await
    }

    /// Removes a session only if it is still the given generation.
    async fn remove_generation(&self, session_id: &str, generation: u64) -> bool {
        let removed = {
            let mut sessions = self.sessions.write().await;
            let is_current = sessions
                .get(session_id)
                .is_some_and(|s| s.handle().generation == generation);
            if is_current {
                sessions.remove(session_id)
            } else {
                None
            }
        };
        match removed {
            Some(session) => {
                session.teardown().await;
                true
            }
            None => false,
        }
    }

    /// Tears a session down once its outcome reaches `Ended`.
    pub fn spawn_outcome_watcher(self: Arc<Self>, handle: &SessionHandle) -> JoinHandle<()> {
        let session_id = handle.session_id.clone();
        let generation = handle.generation;
        let mut outcome_rx = handle.outcome_tx.subscribe();

        tokio::spawn(async move {
            loop {
                if let Outcome::Ended { destination } = *outcome_rx.borrow_and_update() {
                    info!(%session_id, ?destination, "session outcome reached");
                    break;
                }
                if outcome_rx.changed().await.is_err() {
                    // Session handle dropped elsewhere; nothing left to clean up.
                    return;
                }
            }

            // A restart may already have replaced this session; leave the new one alone.
            if !self.remove_generation(&session_id, generation).await {
                debug!(%session_id, generation, "ended session already replaced");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SessionSettings {
        SessionSettings {
            stage: Stage::new(750, 1080),
            tuning: GameTuning::default(),
            input_channel_capacity: 16,
            world_broadcast_capacity: 16,
            tick_interval: Duration::from_millis(16),
            spawn_interval: Duration::from_millis(1000),
            spawn_seed: Some(5),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_ids_are_rejected() {
        let registry = SessionRegistry::new(settings());
        registry
            .create_session("a".to_string())
            .await
            .expect("first create succeeds");

        assert!(matches!(
            registry.create_session("a".to_string()).await,
            Err(SessionError::AlreadyExists)
        ));
        assert_eq!(registry.session_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_stops_the_task_and_closes_its_input() {
        let session = Session::start(Arc::from("t"), 0, &settings());
        let input_tx = session.handle().input_tx.clone();
        assert!(!input_tx.is_closed());

        session.teardown().await;

        assert!(input_tx.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_a_session_aborts_its_task() {
        let session = Session::start(Arc::from("d"), 0, &settings());
        let input_tx = session.handle().input_tx.clone();

        drop(session);
        // Let the runtime process the abort.
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert!(input_tx.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_the_generation() {
        let registry = SessionRegistry::new(settings());
        let first = registry
            .create_session("r".to_string())
            .await
            .expect("create succeeds");
        let second = registry
            .restart_session("r".to_string())
            .await
            .expect("restart succeeds");

        assert!(second.generation > first.generation);
        assert!(first.input_tx.is_closed());
        assert!(!second.input_tx.is_closed());
    }
}
