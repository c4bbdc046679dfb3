use huddle_client::{SessionConfig, SessionState};
use huddle_core::{MessageKind, ParticipantId, ProducerId};

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{
    MockMediaEngine, StaticCapture, ViewEvent, push_snapshot, room_snapshot, serve_until,
};

/// A removal that overtakes the consume it cancels is a no-op; the track still shows up.
#[tokio::test]
async fn test_remove_races_pending_consume() {
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

    t.server.producer_added("p1", "prod1");
    let consume = t.server.expect(MessageKind::Consume).await.unwrap();

    t.server.producer_remove("p1", "prod1");
    t.server.answer(&consume);
    t.server
        .expect(MessageKind::ConnectConsumerTransport)
        .await
        .map(|r| t.server.answer(&r))
        .unwrap();
    t.server
        .expect(MessageKind::ConsumerResume)
        .await
        .map(|r| t.server.answer(&r))
        .unwrap();

    assert!(t.view.wait_for_events(1, 2000).await);
    assert!(matches!(
        t.view.events().as_slice(),
        [ViewEvent::TrackAdded(p, _)] if p == &ParticipantId::from("p1")
    ));

    let participants = t.session.participants().await;
    assert_eq!(participants.len(), 1);
    assert!(participants[0].track(&ProducerId::from("prod1")).is_some());
}
