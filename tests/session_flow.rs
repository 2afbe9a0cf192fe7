mod support;

use play_plane::domain::{Direction, Outcome, Page};
use play_plane::interface_adapters::input::{InputClient, InputError};
use play_plane::use_cases::SessionRegistry;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn enemies_arrive_on_the_spawn_cadence() {
    let registry = SessionRegistry::new(support::settings());
    let session = registry
        .create_session(support::session_id())
        .await
        .expect("create succeeds");
    let mut world_rx = session.world_tx.subscribe();

    tokio::time::sleep(Duration::from_millis(3500)).await;

    let update = support::latest_update(&mut world_rx).expect("frames were published");
    let ids: Vec<u64> = update.enemies.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert!(update.enemies.iter().all(|e| e.life == 3));
    assert_eq!(update.outcome, Outcome::Playing);
}

#[tokio::test(start_paused = true)]
async fn player_attack_shows_up_in_the_next_frames() {
    let registry = SessionRegistry::new(support::settings());
    let session = registry
        .create_session(support::session_id())
        .await
        .expect("create succeeds");
    let mut world_rx = session.world_tx.subscribe();
    let mut input = InputClient::new(session.input_tx.clone());

    input.player_attack(100.0, 500.0).expect("sent");
    tokio::time::sleep(support::TICK * 3).await;

    let update = support::latest_update(&mut world_rx).expect("frames were published");
    let shot = &update.player_projectiles[0];
    assert_eq!(shot.id, 0);
    assert_eq!(shot.direction, Direction::Up);
    assert_eq!(shot.bounds.x, 100.0);
    assert!(shot.bounds.y < 500.0);
}

#[tokio::test(start_paused = true)]
async fn sessions_keep_their_own_id_counters() {
    let registry = SessionRegistry::new(support::settings());
    let a = registry
        .create_session(support::session_id())
        .await
        .expect("create a");
    let b = registry
        .create_session(support::session_id())
        .await
        .expect("create b");
    let mut a_rx = a.world_tx.subscribe();
    let mut b_rx = b.world_tx.subscribe();

    InputClient::new(a.input_tx.clone())
        .enemy_attack(10.0, 10.0)
        .expect("sent");
    InputClient::new(b.input_tx.clone())
        .player_attack(10.0, 900.0)
        .expect("sent");
    tokio::time::sleep(support::TICK * 2).await;

    let a_update = support::latest_update(&mut a_rx).expect("a frames");
    let b_update = support::latest_update(&mut b_rx).expect("b frames");
    assert_eq!(a_update.enemy_projectiles[0].id, 0);
    assert!(a_update.player_projectiles.is_empty());
    assert_eq!(b_update.player_projectiles[0].id, 0);
    assert!(b_update.enemy_projectiles.is_empty());
}

#[tokio::test(start_paused = true)]
async fn removing_a_session_closes_its_input() {
    let registry = SessionRegistry::new(support::settings());
    let id = support::session_id();
    let session = registry
        .create_session(id.clone())
        .await
        .expect("create succeeds");
    let mut input = InputClient::new(session.input_tx.clone());

    assert!(registry.remove_session(&id).await);
    assert!(!registry.remove_session(&id).await);

    assert_eq!(registry.session_count().await, 0);
    assert_eq!(input.player_moved(0.0, 0.0), Err(InputError::SessionClosed));
}

#[tokio::test(start_paused = true)]
async fn contact_ends_the_session_and_the_watcher_removes_it() {
    let registry = Arc::new(SessionRegistry::new(support::collision_course_settings()));
    let id = support::session_id();
    let session = registry
        .create_session(id.clone())
        .await
        .expect("create succeeds");
    let outcome_rx = session.outcome_tx.subscribe();
    let mut world_rx = session.world_tx.subscribe();

    let watcher = registry.clone().spawn_outcome_watcher(&session);
    tokio::time::timeout(Duration::from_secs(10), watcher)
        .await
        .expect("session ends before the timeout")
        .expect("watcher exits cleanly");

    assert_eq!(
        *outcome_rx.borrow(),
        Outcome::Ended {
            destination: Page::End
        }
    );
    assert!(registry.get_session(&id).await.is_none());

    // The last frame carries the ended outcome and nothing follows it.
    let last = support::latest_update(&mut world_rx).expect("frames were published");
    assert!(matches!(last.outcome, Outcome::Ended { .. }));
    assert!(session.input_tx.is_closed());
}

#[tokio::test(start_paused = true)]
async fn an_ended_session_can_be_restarted() {
    let registry = Arc::new(SessionRegistry::new(support::collision_course_settings()));
    let id = support::session_id();
    let first = registry
        .create_session(id.clone())
        .await
        .expect("create succeeds");
    let watcher = registry.clone().spawn_outcome_watcher(&first);
    tokio::time::timeout(Duration::from_secs(10), watcher)
        .await
        .expect("session ends before the timeout")
        .expect("watcher exits cleanly");

    let second = registry
        .restart_session(id)
        .await
        .expect("restart succeeds");

    assert!(second.generation > first.generation);
    assert_eq!(*second.outcome_tx.borrow(), Outcome::Playing);
    assert!(!second.input_tx.is_closed());
}

#[tokio::test(start_paused = true)]
async fn headless_run_returns_the_final_outcome() {
    let outcome = tokio::time::timeout(
        Duration::from_secs(10),
        play_plane::run(support::collision_course_settings(), None),
    )
    .await
    .expect("run finishes before the timeout")
    .expect("run succeeds");

    assert_eq!(
        outcome,
        Outcome::Ended {
            destination: Page::End
        }
    );
}
