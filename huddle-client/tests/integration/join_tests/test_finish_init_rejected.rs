use huddle_client::{SessionEvent, SessionState};
use huddle_core::MessageKind;

use crate::integration::{create_default_session, init_tracing};
use crate::utils::{EngineCall, push_snapshot, room_snapshot, wait_for_event, wait_for_state};

#[tokio::test]
async fn test_finish_init_rejected() {
    init_tracing();

    let mut t = create_default_session();
    push_snapshot(&t.server, room_snapshot("room-1", &[]));

    let finish = t.server.expect(MessageKind::FinishInit).await.unwrap();
    t.server.reject(&finish, "capabilities mismatch");

    let event = wait_for_event(&mut t.events, |e| {
        matches!(e, SessionEvent::JoinFailed { .. })
    })
    .await
    .expect("no JoinFailed event");
    let SessionEvent::JoinFailed { reason, .. } = event else {
        unreachable!()
    };
    assert!(reason.contains("capabilities mismatch"), "reason: {}", reason);

    wait_for_state(&t.session, SessionState::Idle).await.unwrap();
    assert!(
        !t.engine
            .calls()
            .await
            .iter()
            .any(|c| matches!(c, EngineCall::CreateSendTransport(_))),
        "transport created without the server's go-ahead"
    );
}
