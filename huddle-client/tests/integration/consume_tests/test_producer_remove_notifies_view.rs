use huddle_client::{SessionConfig, SessionState, Track};
use huddle_core::{MediaKind, ParticipantId};

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{
    MockMediaEngine, StaticCapture, ViewEvent, push_snapshot, room_snapshot, serve_until,
};

#[tokio::test]
async fn test_producer_remove_notifies_view() {
    init_tracing();

    let mut t = create_test_session(
        SessionConfig::default(),
        MockMediaEngine::new(),
        StaticCapture::nothing(),
    );
    push_snapshot(
        &t.server,
        room_snapshot("room-1", &[("alice", "cam-a"), ("alice", "mic-a")]),
    );
    serve_until(&mut t.server, &t.session, SessionState::Active)
        .await
        .unwrap();
    assert!(t.view.wait_for_events(2, 2000).await);

    let alice = ParticipantId::from("alice");

    t.server.producer_remove("alice", "cam-a");
    assert!(t.view.wait_for_events(3, 2000).await);
    assert_eq!(t.session.participants().await[0].track_count(), 1);

    // Unknown producers are ignored
    t.server.producer_remove("alice", "nope");

    t.server.producer_remove("alice", "mic-a");
    assert!(t.view.wait_for_events(5, 2000).await);

    assert_eq!(
        t.view.events()[2..],
        [
            ViewEvent::TrackRemoved(
                alice.clone(),
                Track::new("track-c-cam-a", MediaKind::Video)
            ),
            ViewEvent::TrackRemoved(
                alice.clone(),
                Track::new("track-c-mic-a", MediaKind::Video)
            ),
            ViewEvent::ParticipantRemoved(alice),
        ]
    );
    assert!(t.session.participants().await.is_empty());
}
