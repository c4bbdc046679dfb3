use huddle_client::{SessionConfig, SessionEvent, SessionState};
use huddle_core::MessageKind;
use tokio::time::{Duration, timeout};

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{
    MockMediaEngine, StaticCapture, push_snapshot, room_snapshot, serve_until, wait_for_event,
};

/// Work in flight when the room is left stops quietly instead of reporting failures.
#[tokio::test]
async fn test_leave_abandons_pending_consume() {
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

    let session = t.session.clone();
    let leaving = tokio::spawn(async move { session.leave().await });
    let leave = t.server.expect(MessageKind::LeaveRoom).await.unwrap();
    t.server.answer(&leave);
    leaving.await.unwrap().unwrap();

    wait_for_event(&mut t.events, |e| matches!(e, SessionEvent::Left { .. }))
        .await
        .unwrap();

    // Too late: nobody is waiting for this any more
    t.server.answer(&consume);

    let extra = timeout(Duration::from_millis(200), t.events.recv()).await;
    assert!(extra.is_err(), "unexpected event after leave: {:?}", extra);
    t.server
        .expect_silence(100)
        .await
        .expect("consume continued after leave");
    assert!(t.view.events().is_empty());
    assert!(t.session.participants().await.is_empty());
}
