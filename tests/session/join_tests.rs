//! Join and reconnect tests

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use yard_client::domain::{Colour, Delivery, GameId};
use yard_client::shared::ClientError;

use crate::common::Harness;

fn registered(game_id: i64, colours: serde_json::Value) -> String {
    json!({
        "type": "REGISTERED",
        "game_id": game_id,
        "host": "judge.example",
        "port": 8124,
        "colours": colours,
    })
    .to_string()
}

/// Full handshake: human colours join the judge, automated ones go to the AI
#[tokio::test]
async fn test_registration_then_join() {
    // Arrange
    let mut harness = Harness::builder()
        .roster(&[Colour::Blue, Colour::Yellow])
        .ai(true)
        .build();
    let raw = registered(31, json!(["Black", "Blue", "Red", "Yellow"]));
    assert_ok!(harness.messenger.handle_message(&raw).await);

    // Act
    let outcome = assert_ok!(harness.messenger.send_join().await);

    // Assert
    assert_eq!(outcome.game_id, GameId(31));
    assert_eq!(outcome.ai_delivery, Delivery::Sent);
    assert_eq!(
        *harness.connections.lock(),
        vec!["ws://judge.example:8124".to_string()]
    );
    assert_eq!(
        harness.judge.values(),
        vec![
            json!({"type": "JOIN", "colour": "Black", "game_id": 31}),
            json!({"type": "JOIN", "colour": "Red", "game_id": 31}),
        ]
    );
    assert_eq!(
        harness.ai.values(),
        vec![json!({
            "type": "REGISTERED",
            "game_id": 31,
            "host": "judge.example",
            "port": 8124,
            "colours": ["Blue", "Yellow"],
        })]
    );
    assert_eq!(harness.view.read().game_id, Some(GameId(31)));
}

/// Joining uses the most recent registration
#[tokio::test]
async fn test_join_uses_latest_registration() {
    // Arrange
    let mut harness = Harness::builder().build();
    assert_ok!(harness.messenger.handle_message(&registered(1, json!(["Red"]))).await);
    assert_ok!(harness.messenger.handle_message(&registered(2, json!(["Green"]))).await);

    // Act
    assert_ok!(harness.messenger.send_join().await);

    // Assert
    assert_eq!(
        harness.judge.values(),
        vec![json!({"type": "JOIN", "colour": "Green", "game_id": 2})]
    );
}

/// Every colour automated: nothing goes to the judge after reconnecting
#[tokio::test]
async fn test_all_colours_automated() {
    // Arrange
    let mut harness = Harness::builder()
        .roster(&[Colour::Black, Colour::Red])
        .ai(true)
        .build();
    assert_ok!(
        harness
            .messenger
            .handle_message(&registered(4, json!(["Black", "Red"])))
            .await
    );

    // Act
    let outcome = assert_ok!(harness.messenger.send_join().await);

    // Assert
    assert!(outcome.human.is_empty());
    assert_eq!(harness.connections.lock().len(), 1);
    assert_eq!(harness.judge.len(), 0);
    assert_eq!(harness.ai.len(), 1);
}

/// Joining before any registration is refused
#[tokio::test]
async fn test_join_without_registration() {
    // Arrange
    let mut harness = Harness::builder().build();

    // Act
    let err = assert_err!(harness.messenger.send_join().await);

    // Assert
    assert!(matches!(err, ClientError::NotRegistered));
    assert!(harness.connections.lock().is_empty());
}

/// A reconnect that never opens fails after the configured timeout
#[tokio::test]
async fn test_reconnect_times_out() {
    // Arrange
    let mut harness = Harness::builder()
        .hanging_transport()
        .connect_timeout(Duration::from_millis(50))
        .build();
    assert_ok!(harness.messenger.handle_message(&registered(9, json!(["Red"]))).await);

    // Act
    let err = assert_err!(harness.messenger.send_join().await);

    // Assert
    match err {
        ClientError::ConnectTimeout { address, timeout } => {
            assert_eq!(address, "ws://judge.example:8124");
            assert_eq!(timeout, Duration::from_millis(50));
        }
        other => panic!("expected ConnectTimeout, got {other:?}"),
    }
    assert_eq!(harness.judge.len(), 0);
}
