//! Application loop tests over real WebSocket connections

use pretty_assertions::assert_eq;
use serde_json::json;

use yard_client::config::Settings;
use yard_client::domain::GameId;
use yard_client::startup::Application;

use crate::common::{eventually, Peer, WAIT};

fn settings_for(lobby: &Peer) -> Settings {
    let mut settings = Settings::defaults().unwrap();
    settings.judge.host = "127.0.0.1".into();
    settings.judge.port = lobby.port;
    settings
}

/// REGISTERED moves the client to the named judge and joins there
#[tokio::test]
async fn test_registration_moves_client_to_judge() {
    // Arrange
    let mut lobby = Peer::start().await;
    let mut judge = Peer::start().await;
    let application = Application::build(settings_for(&lobby)).await.unwrap();
    let view = application.view();
    let run = tokio::spawn(application.run_until_stopped());

    // Act
    lobby.send(json!({
        "type": "REGISTERED",
        "game_id": 3,
        "host": "127.0.0.1",
        "port": judge.port,
        "colours": ["Red", "Green"],
    }));

    // Assert
    assert_eq!(
        judge.next_message().await,
        json!({"type": "JOIN", "colour": "Red", "game_id": 3})
    );
    assert_eq!(
        judge.next_message().await,
        json!({"type": "JOIN", "colour": "Green", "game_id": 3})
    );

    judge.send(json!({"type": "GAME_OVER", "winners": ["Black"]}));
    judge.close();
    lobby.close();
    tokio::time::timeout(WAIT, run).await.unwrap().unwrap().unwrap();

    let view = view.read();
    assert_eq!(view.game_id, Some(GameId(3)));
    assert!(view.game_over.is_some());
}

/// The lobby closing after the move to the judge does not end the session
#[tokio::test]
async fn test_replaced_connection_closing_is_ignored() {
    // Arrange
    let mut lobby = Peer::start().await;
    let mut judge = Peer::start().await;
    let application = Application::build(settings_for(&lobby)).await.unwrap();
    let view = application.view();
    let run = tokio::spawn(application.run_until_stopped());

    // Act
    lobby.send(json!({
        "type": "REGISTERED",
        "game_id": 8,
        "host": "127.0.0.1",
        "port": judge.port,
        "colours": ["Red"],
    }));
    lobby.close();

    // Assert
    assert_eq!(
        judge.next_message().await,
        json!({"type": "JOIN", "colour": "Red", "game_id": 8})
    );
    judge.send(json!({"type": "PENDING_GAME", "opponents": ["Blue"]}));
    eventually(|| view.read().setup_message.is_some()).await;
    assert_eq!(
        view.read().setup_message.as_deref(),
        Some("Waiting for: Blue")
    );
    assert!(!run.is_finished());

    judge.close();
    tokio::time::timeout(WAIT, run).await.unwrap().unwrap().unwrap();
}

/// Without auto-join a registration is recorded but no JOIN is sent
#[tokio::test]
async fn test_registration_without_auto_join() {
    // Arrange
    let mut lobby = Peer::start().await;
    let mut settings = settings_for(&lobby);
    settings.session.auto_join = false;
    let application = Application::build(settings).await.unwrap();
    let view = application.view();
    let run = tokio::spawn(application.run_until_stopped());

    // Act
    lobby.send(json!({
        "type": "REGISTERED",
        "game_id": 6,
        "host": "127.0.0.1",
        "port": 1,
        "colours": ["Red"],
    }));
    lobby.send(json!({"type": "PENDING_GAME", "opponents": ["Green"]}));

    // Assert
    eventually(|| view.read().setup_message.is_some()).await;
    assert_eq!(view.read().game_id, Some(GameId(6)));
    assert!(lobby.is_idle());
    assert!(!run.is_finished());

    lobby.close();
    tokio::time::timeout(WAIT, run).await.unwrap().unwrap().unwrap();
}

/// CONNECTION moves the client to another judge to spectate the chosen game
#[tokio::test]
async fn test_connection_spectates_configured_game() {
    // Arrange
    let mut lobby = Peer::start().await;
    let mut judge = Peer::start().await;
    let mut settings = settings_for(&lobby);
    settings.session.spectate_game = Some(GameId(5));
    let application = Application::build(settings).await.unwrap();
    let run = tokio::spawn(application.run_until_stopped());

    // Act
    lobby.send(json!({"type": "CONNECTION", "host": "127.0.0.1", "port": judge.port}));

    // Assert
    assert_eq!(
        judge.next_message().await,
        json!({"type": "SPECTATE", "game_id": 5})
    );
    judge.close();
    lobby.close();
    tokio::time::timeout(WAIT, run).await.unwrap().unwrap().unwrap();
}

/// A judge that cannot be reached after REGISTERED ends the loop with an error
#[tokio::test]
async fn test_unreachable_judge_after_registration() {
    // Arrange
    let mut lobby = Peer::start().await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_port = listener.local_addr().unwrap().port();
    drop(listener);
    let application = Application::build(settings_for(&lobby)).await.unwrap();
    let run = tokio::spawn(application.run_until_stopped());

    // Act
    lobby.send(json!({
        "type": "REGISTERED",
        "game_id": 3,
        "host": "127.0.0.1",
        "port": dead_port,
        "colours": ["Red"],
    }));

    // Assert
    let result = tokio::time::timeout(WAIT, run).await.unwrap().unwrap();
    assert!(result.is_err());
    lobby.close();
}

/// Malformed frames are dropped and the loop keeps going
#[tokio::test]
async fn test_malformed_frame_does_not_stop_loop() {
    // Arrange
    let mut lobby = Peer::start().await;
    let application = Application::build(settings_for(&lobby)).await.unwrap();
    let view = application.view();
    let run = tokio::spawn(application.run_until_stopped());

    // Act
    lobby.send_raw("definitely not json");
    lobby.send_raw(r#"["type", "GAMES"]"#);
    lobby.send(json!({"type": "GAMES", "games": [{"game_id": 1}, {"game_id": 2}]}));
    lobby.close();

    // Assert
    tokio::time::timeout(WAIT, run).await.unwrap().unwrap().unwrap();
    assert_eq!(view.read().games.len(), 2);
}

/// A judge nobody listens on fails the build
#[tokio::test]
async fn test_build_fails_without_judge() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut settings = Settings::defaults().unwrap();
    settings.judge.host = "127.0.0.1".into();
    settings.judge.port = port;

    assert!(Application::build(settings).await.is_err());
}

/// An unreachable automated player is not fatal
#[tokio::test]
async fn test_build_continues_without_ai() {
    let lobby = Peer::start().await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let ai_port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut settings = settings_for(&lobby);
    settings.ai.enabled = true;
    settings.ai.host = "127.0.0.1".into();
    settings.ai.port = ai_port;

    assert!(Application::build(settings).await.is_ok());
}
