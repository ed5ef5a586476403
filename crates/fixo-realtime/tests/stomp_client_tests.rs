// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests against an in-process STOMP broker.
//!
//! The broker speaks just enough STOMP to answer the handshake and relay
//! frames, so these exercise the real connection task: handshake,
//! subscription replay, reconnect, and message delivery.

use std::time::Duration;

use serde_json::json;
use tokio::time::timeout;

use fixo_config::RealtimeConfig;
use fixo_realtime::{Command, RealtimeClient};
use fixo_test_utils::StompBroker;

const WAIT: Duration = Duration::from_secs(5);

fn config_for(broker: &StompBroker) -> RealtimeConfig {
    RealtimeConfig {
        ws_url: broker.ws_url(),
        reconnect_delay_secs: 1,
        channel_capacity: 16,
    }
}

#[tokio::test]
async fn subscribe_before_connect_is_replayed_and_delivers() {
    let broker = StompBroker::bind().await;
    let client = RealtimeClient::start(config_for(&broker));
    // Subscribe before the handshake has had any chance to complete.
    let mut sub = client.subscribe("/topic/confirmPrice/JR-1");

    let mut session = broker.accept().await;
    let subscribe = session.expect(Command::Subscribe).await;
    assert_eq!(
        subscribe.get_header("destination"),
        Some("/topic/confirmPrice/JR-1")
    );

    session
        .publish("/topic/confirmPrice/JR-1", &json!({"finalPrice": 450000}))
        .await;

    let payload = timeout(WAIT, sub.recv()).await.unwrap().unwrap();
    assert_eq!(payload["finalPrice"], 450000);
    assert!(client.is_connected());
}

#[tokio::test]
async fn reconnect_replays_subscriptions() {
    let broker = StompBroker::bind().await;
    let client = RealtimeClient::start(config_for(&broker));
    let mut sub = client.subscribe("/topic/job-canceled/JR-2");

    let mut session = broker.accept().await;
    session.expect(Command::Subscribe).await;
    // Kill the session from the broker side.
    drop(session);

    // The client reconnects after its fixed delay and re-subscribes
    // without any caller involvement.
    let mut session = broker.accept().await;
    let replayed = session.expect(Command::Subscribe).await;
    assert_eq!(
        replayed.get_header("destination"),
        Some("/topic/job-canceled/JR-2")
    );

    session
        .publish("/topic/job-canceled/JR-2", &json!({"reason": "customer"}))
        .await;
    let payload = timeout(WAIT, sub.recv()).await.unwrap().unwrap();
    assert_eq!(payload["reason"], "customer");
}

#[tokio::test]
async fn unsubscribe_tears_down_broker_subscription() {
    let broker = StompBroker::bind().await;
    let client = RealtimeClient::start(config_for(&broker));
    let sub = client.subscribe("/topic/chat/room-1");

    let mut session = broker.accept().await;
    let subscribe = session.expect(Command::Subscribe).await;
    let sub_id = subscribe.get_header("id").unwrap().to_string();

    sub.unsubscribe();
    let unsubscribe = session.expect(Command::Unsubscribe).await;
    assert_eq!(unsubscribe.get_header("id"), Some(sub_id.as_str()));
}

#[tokio::test]
async fn shared_topic_sends_one_subscribe_and_fans_out() {
    let broker = StompBroker::bind().await;
    let client = RealtimeClient::start(config_for(&broker));
    let mut first = client.subscribe("/topic/new-job/svc-1");
    let mut second = client.subscribe("/topic/new-job/svc-1");

    let mut session = broker.accept().await;
    session.expect(Command::Subscribe).await;

    session
        .publish("/topic/new-job/svc-1", &json!({"jobRequestCode": "JR-3"}))
        .await;
    // Both local subscribers see the message from the single broker
    // subscription; dropping one must not send a second SUBSCRIBE.
    let a = timeout(WAIT, first.recv()).await.unwrap().unwrap();
    let b = timeout(WAIT, second.recv()).await.unwrap().unwrap();
    assert_eq!(a["jobRequestCode"], "JR-3");
    assert_eq!(b["jobRequestCode"], "JR-3");

    drop(second);
    session
        .publish("/topic/new-job/svc-1", &json!({"jobRequestCode": "JR-4"}))
        .await;
    let again = timeout(WAIT, first.recv()).await.unwrap().unwrap();
    assert_eq!(again["jobRequestCode"], "JR-4");
}

#[tokio::test]
async fn send_delivers_frame_to_broker() {
    let broker = StompBroker::bind().await;
    let client = RealtimeClient::start(config_for(&broker));
    let mut session = broker.accept().await;

    // Wait until the handshake is visible client-side.
    timeout(WAIT, async {
        while !client.is_connected() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();

    client
        .send("/app/chat/room-1", &json!({"content": "on my way"}))
        .unwrap();

    let frame = session.expect(Command::Send).await;
    assert_eq!(frame.get_header("destination"), Some("/app/chat/room-1"));
    assert_eq!(frame.body, r#"{"content":"on my way"}"#);
}

#[tokio::test]
async fn send_while_disconnected_errors_immediately() {
    // Bind then drop so nothing listens on the port.
    let broker = StompBroker::bind().await;
    let config = config_for(&broker);
    drop(broker);

    let client = RealtimeClient::start(config);
    let err = client
        .send("/app/chat/room-1", &json!({"content": "hello"}))
        .unwrap_err();
    assert!(err.to_string().contains("transport"));
}
