use huddle_client::{CorrelationMode, SessionConfig, SessionEvent, SessionState};
use huddle_core::MessageKind;

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{
    MockMediaEngine, StaticCapture, push_snapshot, room_snapshot, wait_for_event, wait_for_state,
};

/// A rejection carrying only a reason still resolves its request when matching by id.
#[tokio::test]
async fn test_bare_rejection_fails_join() {
    init_tracing();

    let config = SessionConfig::default().with_correlation(CorrelationMode::ByRequestId);
    let mut t = create_test_session(config, MockMediaEngine::new(), StaticCapture::av());
    push_snapshot(&t.server, room_snapshot("room-1", &[]));

    let finish = t.server.expect(MessageKind::FinishInit).await.unwrap();
    t.server.reject_bare(&finish, "unsupported device");

    let failed = wait_for_event(&mut t.events, |e| {
        matches!(e, SessionEvent::JoinFailed { .. })
    })
    .await
    .expect("join hung on a kind-less rejection");
    let SessionEvent::JoinFailed { reason, .. } = failed else {
        unreachable!()
    };
    assert!(reason.contains("unsupported device"), "reason: {}", reason);

    wait_for_state(&t.session, SessionState::Idle).await.unwrap();
    assert_eq!(t.session.correlator().pending_count(), 0);
}
