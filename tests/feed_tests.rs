use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use oddsmith::broadcast::Broadcaster;
use oddsmith::ws;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

async fn wait_for_subscribers(broadcaster: &Broadcaster, expected: usize) {
    for _ in 0..100 {
        if broadcaster.subscriber_count() == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "expected {expected} subscribers, found {}",
        broadcaster.subscriber_count()
    );
}

#[tokio::test]
async fn feed_delivers_published_events_to_connected_clients() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let broadcaster = Arc::new(Broadcaster::new());
    let server = tokio::spawn(ws::serve_on(listener, Arc::clone(&broadcaster)));

    let (mut client, _) = connect_async(format!("ws://{addr}")).await.unwrap();
    wait_for_subscribers(&broadcaster, 1).await;

    broadcaster.publish("game_update", &json!({"id": "g1", "homeScore": 99}));

    let message = tokio::time::timeout(Duration::from_secs(5), client.next())
        .await
        .expect("feed timed out")
        .unwrap()
        .unwrap();
    let event: Value = serde_json::from_str(message.to_text().unwrap()).unwrap();
    assert_eq!(event["type"], "game_update");
    assert_eq!(event["data"]["id"], "g1");
    assert_eq!(event["data"]["homeScore"], 99);

    server.abort();
}

#[tokio::test]
async fn disconnected_clients_are_removed_from_the_set() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let broadcaster = Arc::new(Broadcaster::new());
    let server = tokio::spawn(ws::serve_on(listener, Arc::clone(&broadcaster)));

    let (mut client, _) = connect_async(format!("ws://{addr}")).await.unwrap();
    wait_for_subscribers(&broadcaster, 1).await;

    client.close(None).await.unwrap();
    wait_for_subscribers(&broadcaster, 0).await;

    // Publishing into an empty set delivers to nobody and does not panic.
    assert_eq!(broadcaster.publish("game_update", &json!({})), 0);

    server.abort();
}

#[tokio::test]
async fn per_client_delivery_matches_publish_order() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let broadcaster = Arc::new(Broadcaster::new());
    let server = tokio::spawn(ws::serve_on(listener, Arc::clone(&broadcaster)));

    let (mut client, _) = connect_async(format!("ws://{addr}")).await.unwrap();
    wait_for_subscribers(&broadcaster, 1).await;

    for seq in 1..=5 {
        broadcaster.publish("game_update", &json!({"seq": seq}));
    }

    for expected in 1..=5 {
        let message = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("feed timed out")
            .unwrap()
            .unwrap();
        if let Message::Text(text) = message {
            let event: Value = serde_json::from_str(&text).unwrap();
            assert_eq!(event["data"]["seq"], expected);
        } else {
            panic!("unexpected frame: {message:?}");
        }
    }

    server.abort();
}
