use huddle_client::{SessionConfig, SessionState, Track};
use huddle_core::{MediaKind, MessageKind, ParticipantId, ProducerId};

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{MockMediaEngine, StaticCapture, push_snapshot, room_snapshot, serve_until};

#[tokio::test]
async fn test_producer_added_after_active() {
    init_tracing();

    let mut t = create_test_session(
        SessionConfig::default(),
        MockMediaEngine::new(),
        StaticCapture::nothing(),
    );
    push_snapshot(&t.server, room_snapshot("room-1", &[]));
    serve_until(&mut t.server, &t.session, SessionState::Active)
        .await
        .unwrap();
    assert_eq!(t.server.kinds(), vec![MessageKind::FinishInit]);

    t.server.producer_added("bob", "prod-b");

    let consume = t.server.serve_next().await.unwrap();
    assert_eq!(consume.data.kind(), MessageKind::Consume);
    t.server.serve_next().await.unwrap();
    let resume = t.server.serve_next().await.unwrap();
    assert_eq!(resume.data.kind(), MessageKind::ConsumerResume);

    assert!(t.view.wait_for_events(1, 2000).await, "track never shown");

    let participants = t.session.participants().await;
    assert_eq!(participants.len(), 1);
    let bob = &participants[0];
    assert_eq!(bob.id(), &ParticipantId::from("bob"));
    assert_eq!(
        bob.track(&ProducerId::from("prod-b")),
        Some(&Track::new("track-c-prod-b", MediaKind::Video))
    );
}
