use crate::domain::Outcome;
use crate::interface_adapters::protocol::{OutcomeDto, RenderMessage, WorldUpdateDto};
use crate::use_cases::{SessionHandle, WorldUpdate};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{error, warn};

fn encode(msg: &RenderMessage) -> Option<Arc<str>> {
    match serde_json::to_string(msg) {
        Ok(txt) => Some(Arc::from(txt)),
        Err(e) => {
            error!(error = ?e, "failed to serialize render message");
            None
        }
    }
}

/// Serializes each world update once and broadcasts the shared text, plus the outcome change.
pub async fn render_serializer(
    mut world_rx: broadcast::Receiver<WorldUpdate>,
    mut outcome_rx: watch::Receiver<Outcome>,
    render_tx: broadcast::Sender<Arc<str>>,
    render_latest_tx: watch::Sender<Arc<str>>,
) {
    let mut outcome_open = true;

    loop {
        tokio::select! {
            // The ending frame is sent before the outcome; drain world updates first so the
            // outcome message never overtakes it.
            biased;

            update = world_rx.recv() => match update {
                Ok(update) => {
                    let msg = RenderMessage::WorldUpdate(WorldUpdateDto::from(&update));
                    if let Some(txt) = encode(&msg) {
                        // Store the latest text for late subscribers.
                        let _ = render_latest_tx.send(txt.clone());
                        let _ = render_tx.send(txt);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(missed = n, "render serializer lagged; skipping to latest update");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    break;
                }
            },
            changed = outcome_rx.changed(), if outcome_open => match changed {
                Ok(()) => {
                    let outcome = *outcome_rx.borrow_and_update();
                    let msg = RenderMessage::Outcome(OutcomeDto::from(outcome));
                    if let Some(txt) = encode(&msg) {
                        let _ = render_tx.send(txt);
                    }
                }
                Err(_) => outcome_open = false,
            },
        }
    }
}

pub fn spawn_session_serializer(session: &SessionHandle) -> JoinHandle<()> {
    // Spawn a task that serializes render state for this session.
    tokio::spawn(render_serializer(
        session.world_tx.subscribe(),
        session.outcome_tx.subscribe(),
        session.render_tx.clone(),
        session.render_latest_tx.clone(),
    ))
}
