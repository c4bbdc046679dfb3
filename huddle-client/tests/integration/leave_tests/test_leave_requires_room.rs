use huddle_client::{SessionError, SessionState};

use crate::integration::{create_default_session, init_tracing};

#[tokio::test]
async fn test_leave_requires_room() {
    init_tracing();

    let mut t = create_default_session();

    let err = t.session.leave().await.expect_err("left without a room");
    assert!(matches!(
        err,
        SessionError::InvalidState {
            action: "leave",
            state: SessionState::Idle
        }
    ));

    t.server
        .expect_silence(100)
        .await
        .expect("LeaveRoom sent while idle");
}
