use huddle_client::{CorrelationMode, SessionConfig, SessionState};
use huddle_core::{Ack, RequestId, ResponsePayload, ServerMessage};

use crate::integration::{create_test_session, init_tracing};
use crate::utils::{MockMediaEngine, StaticCapture, push_snapshot, room_snapshot, serve_until};

#[tokio::test]
async fn test_unmatched_response_dropped() {
    init_tracing();

    let config = SessionConfig::default().with_correlation(CorrelationMode::ByRequestId);
    let mut t = create_test_session(config, MockMediaEngine::new(), StaticCapture::nothing());
    push_snapshot(&t.server, room_snapshot("room-1", &[]));
    serve_until(&mut t.server, &t.session, SessionState::Active)
        .await
        .unwrap();

    t.server.push(ServerMessage::RequestResponse {
        id: Some(RequestId::new()),
        result: Ok(ResponsePayload::ConsumerResume(Ack {})),
    });
    t.server.push(ServerMessage::RequestResponse {
        id: None,
        result: Ok(ResponsePayload::Consume(crate::utils::consumer_parameters(
            "c-x", "prod-x",
        ))),
    });

    // The session keeps working afterwards
    t.server.producer_added("erin", "prod-e");
    for _ in 0..3 {
        t.server.serve_next().await.unwrap();
    }
    assert!(t.view.wait_for_events(1, 2000).await);

    assert_eq!(t.session.state(), SessionState::Active);
    assert_eq!(t.session.participants().await.len(), 1);
    assert_eq!(t.session.correlator().pending_count(), 0);
}
