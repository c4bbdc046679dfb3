use std::time::Duration;

use huddle_client::{SessionConfig, SessionEvent, SessionState};
use huddle_core::MessageKind;

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{
    MockMediaEngine, StaticCapture, push_snapshot, room_snapshot, wait_for_event, wait_for_state,
};

#[tokio::test]
async fn test_request_timeout_fails_join() {
    init_tracing();

    let config = SessionConfig::default().with_request_timeout(Duration::from_millis(50));
    let mut t = create_test_session(config, MockMediaEngine::new(), StaticCapture::av());
    push_snapshot(&t.server, room_snapshot("room-1", &[]));

    // Never answered
    t.server.expect(MessageKind::FinishInit).await.unwrap();

    let failed = wait_for_event(&mut t.events, |e| {
        matches!(e, SessionEvent::JoinFailed { .. })
    })
    .await
    .expect("no JoinFailed event");
    let SessionEvent::JoinFailed { reason, .. } = failed else {
        unreachable!()
    };
    assert!(reason.contains("timed out"), "reason: {}", reason);

    wait_for_state(&t.session, SessionState::Idle).await.unwrap();
    assert_eq!(t.session.correlator().pending_count(), 0);
}
