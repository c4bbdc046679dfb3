use huddle_client::SessionState;
use huddle_core::{
    FinishInitAck, IceServerConfig, IceTransportPolicy, MessageKind, ResponsePayload,
};

use crate::integration::{create_default_session, init_tracing};
use crate::utils::{push_snapshot, room_snapshot, serve_until};

#[tokio::test]
async fn test_server_ice_servers_merged() {
    init_tracing();

    let mut t = create_default_session();
    push_snapshot(&t.server, room_snapshot("room-1", &[]));

    let turn = IceServerConfig {
        urls: vec!["turn:turn.example.org:3478".to_owned()],
        username: Some("user".to_owned()),
        credential: Some("secret".to_owned()),
    };
    let finish = t.server.expect(MessageKind::FinishInit).await.unwrap();
    t.server.respond(
        &finish,
        ResponsePayload::FinishInit(FinishInitAck {
            ice_servers: vec![turn.clone()],
            ice_transport_policy: Some(IceTransportPolicy::Relay),
        }),
    );

    serve_until(&mut t.server, &t.session, SessionState::Active)
        .await
        .unwrap();

    let options = t
        .engine
        .send_transport_options()
        .await
        .expect("no send transport");
    let urls: Vec<_> = options
        .ice_servers
        .iter()
        .flat_map(|s| s.urls.iter().map(String::as_str))
        .collect();
    assert_eq!(
        urls,
        vec!["stun:stun.l.google.com:19302", "turn:turn.example.org:3478"]
    );
    assert_eq!(options.ice_servers[1], turn);
    assert_eq!(options.ice_transport_policy, Some(IceTransportPolicy::Relay));
}
