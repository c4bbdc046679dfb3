use huddle_client::{SessionEvent, SessionState};
use huddle_core::{MessageKind, RoomId};

use crate::integration::{create_default_session, init_tracing};
use crate::utils::{push_snapshot, room_snapshot, serve_until, wait_for_event};

#[tokio::test]
async fn test_rejoin_after_leave() {
    init_tracing();

    let mut t = create_default_session();
    push_snapshot(&t.server, room_snapshot("room-1", &[]));
    serve_until(&mut t.server, &t.session, SessionState::Active)
        .await
        .unwrap();

    let session = t.session.clone();
    let leaving = tokio::spawn(async move { session.leave().await });
    let leave = t.server.expect(MessageKind::LeaveRoom).await.unwrap();
    t.server.answer(&leave);
    leaving.await.unwrap().unwrap();
    wait_for_event(&mut t.events, |e| matches!(e, SessionEvent::Left { .. }))
        .await
        .unwrap();

    push_snapshot(&t.server, room_snapshot("room-2", &[("dave", "prod-d")]));
    serve_until(&mut t.server, &t.session, SessionState::Active)
        .await
        .expect("second join did not complete");

    assert_eq!(t.session.room_id().await, Some(RoomId::from("room-2")));
    assert_eq!(t.session.participants().await.len(), 1);
    assert_eq!(
        t.server
            .kinds()
            .iter()
            .filter(|k| **k == MessageKind::FinishInit)
            .count(),
        2
    );
}
