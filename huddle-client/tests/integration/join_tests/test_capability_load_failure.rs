use huddle_client::{SessionConfig, SessionEvent, SessionState};
use huddle_core::RoomId;

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{
    EngineCall, MockMediaEngine, StaticCapture, push_snapshot, room_snapshot, wait_for_event,
};

#[tokio::test]
async fn test_capability_load_failure() {
    init_tracing();

    let mut t = create_test_session(
        SessionConfig::default(),
        MockMediaEngine::failing_load(),
        StaticCapture::av(),
    );
    push_snapshot(&t.server, room_snapshot("room-1", &[("alice", "prod-a")]));

    let event = wait_for_event(&mut t.events, |e| {
        matches!(e, SessionEvent::JoinFailed { .. })
    })
    .await
    .expect("no JoinFailed event");
    let SessionEvent::JoinFailed {
        room_id,
        reason,
        stranded,
    } = event
    else {
        unreachable!()
    };
    assert_eq!(room_id, RoomId::from("room-1"));
    assert!(reason.contains("not supported"), "reason: {}", reason);
    assert!(stranded.is_empty());

    // No FinishInit, no transports
    t.server
        .expect_silence(100)
        .await
        .expect("client talked to the server after a failed load");
    assert_eq!(t.engine.calls().await, vec![EngineCall::LoadCapabilities]);
    assert_eq!(t.session.state(), SessionState::Idle);
}
