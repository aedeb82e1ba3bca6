use axum::{http::StatusCode, routing::get, Json, Router};
use imposter::config::ServerConfig;
use imposter::game::GameNotice;
use imposter::options::{
    GameOptions, HttpOptionsProvider, OptionsError, OptionsProvider, OptionsSnapshot,
    StaticOptionsProvider,
};
use imposter::protocol::{ClientMessage, Role, ServerMessage, SessionView};
use imposter::state::AppState;
use imposter::timers;
use imposter::types::{OutcomeReason, SessionStage, Winner};
use imposter::ws::handlers::handle_message;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

fn fast_state() -> Arc<AppState> {
    Arc::new(AppState::new(ServerConfig {
        reveal_duration: Duration::from_millis(5),
        ..ServerConfig::default()
    }))
}

async fn loaded_state() -> Arc<AppState> {
    let state = fast_state();
    let provider = Arc::new(StaticOptionsProvider::new(GameOptions::from_entries([(
        "location",
        vec!["Museum".to_string(), "Airport".to_string()],
    )])));
    timers::spawn_options_fetch(state.clone(), provider)
        .await
        .expect("fetch task should finish");
    state
}

/// Wait until the reveal for `index` has been hidden by its timer
async fn wait_for_reveal_hidden(rx: &mut broadcast::Receiver<ServerMessage>, index: usize) {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if let Ok(ServerMessage::RevealHidden { player_index }) = rx.recv().await {
                if player_index == index {
                    return;
                }
            }
        }
    })
    .await
    .expect("reveal should be hidden");
}

async fn view(state: &Arc<AppState>) -> SessionView {
    match handle_message(ClientMessage::RequestState, state).await {
        Some(ServerMessage::State { session }) => session,
        other => panic!("Expected State, got {:?}", other),
    }
}

/// Configure and name every player. Returns which indices are imposters.
async fn set_up_game(
    state: &Arc<AppState>,
    names: &[&str],
    imposters: usize,
    reveal_eliminated_role: bool,
) -> Vec<bool> {
    let mut rx = state.broadcast.subscribe();

    let result = handle_message(
        ClientMessage::Configure {
            category: "location".to_string(),
            players: names.len(),
            imposters,
            reveal_eliminated_role,
        },
        state,
    )
    .await;
    assert!(result.is_none(), "configure failed: {:?}", result);

    let mut roles = Vec::new();
    for (i, name) in names.iter().enumerate() {
        let result = handle_message(
            ClientMessage::SubmitName {
                name: name.to_string(),
            },
            state,
        )
        .await;

        match result {
            Some(ServerMessage::Reveal {
                player_index,
                content,
                is_imposter,
                ..
            }) => {
                assert_eq!(player_index, i);
                if is_imposter {
                    assert_eq!(content, "Imposter");
                } else {
                    assert!(content == "Museum" || content == "Airport");
                }
                roles.push(is_imposter);
            }
            other => panic!("Expected Reveal, got {:?}", other),
        }

        wait_for_reveal_hidden(&mut rx, i).await;
    }

    assert_eq!(roles.iter().filter(|r| **r).count(), imposters);
    roles
}

/// End-to-end integration test for a complete game flow
#[tokio::test]
async fn test_full_game_players_win() {
    let state = loaded_state().await;
    let names = ["Ann", "Ben", "Cat", "Dan", "Eve"];
    let roles = set_up_game(&state, &names, 1, true).await;

    let ready = view(&state).await;
    assert_eq!(ready.stage, SessionStage::ReadyToBegin);
    let ready_view = ready.ready.expect("ready view");
    assert_eq!(ready_view.names, names);
    assert_eq!(ready_view.category, "location");

    assert!(handle_message(ClientMessage::BeginRound, &state)
        .await
        .is_none());

    let playing = view(&state).await;
    assert_eq!(playing.stage, SessionStage::PlayingRound);
    let round = playing.round.expect("round view");
    assert_eq!(round.players.len(), 5);
    assert!(round.players.iter().all(|p| p.role.is_none()));
    assert!(round.secret_item.is_none());

    let imposter = roles.iter().position(|r| *r).expect("one imposter");
    let loyal = roles.iter().position(|r| !*r).expect("loyal player");

    // Eliminating a loyal player reveals only that role
    handle_message(ClientMessage::EliminatePlayer { index: loyal }, &state).await;
    let round = view(&state).await.round.expect("round view");
    assert!(round.outcome.is_none());
    assert!(round.players[loyal].is_eliminated);
    assert_eq!(round.players[loyal].role, Some(Role::Loyal));
    assert!(round.players[imposter].role.is_none());

    let mut rx = state.broadcast.subscribe();
    handle_message(ClientMessage::EliminatePlayer { index: imposter }, &state).await;

    match rx.recv().await.unwrap() {
        ServerMessage::GameOver { winner, reason, .. } => {
            assert_eq!(winner, Winner::Players);
            assert_eq!(reason, OutcomeReason::AllImpostersEliminated);
        }
        other => panic!("Expected GameOver, got {:?}", other),
    }
    match rx.recv().await.unwrap() {
        ServerMessage::Notice { title, .. } => assert_eq!(title, "Game Over!"),
        other => panic!("Expected Notice, got {:?}", other),
    }

    // Terminal: further eliminations are ignored
    let other = (0..5).find(|i| *i != loyal && *i != imposter).unwrap();
    assert!(
        handle_message(ClientMessage::EliminatePlayer { index: other }, &state)
            .await
            .is_none()
    );

    let round = view(&state).await.round.expect("round view");
    assert!(!round.players[other].is_eliminated);
    assert!(round.players.iter().all(|p| p.role.is_some()));
    assert_eq!(round.players[imposter].role, Some(Role::Imposter));
    assert_eq!(
        round.message.as_deref(),
        Some("Players Win! All imposters have been eliminated.")
    );
    assert!(round.secret_item.is_some());

    handle_message(ClientMessage::ResetGame, &state).await;
    let fresh = view(&state).await;
    assert_eq!(fresh.stage, SessionStage::Configuring);
    assert!(fresh.configuration.is_none());
    assert!(fresh.round.is_none());
}

#[tokio::test]
async fn test_imposters_win_at_parity() {
    let state = loaded_state().await;
    let roles = set_up_game(&state, &["Ann", "Ben", "Cat", "Dan"], 1, false).await;

    handle_message(ClientMessage::BeginRound, &state).await;

    let loyal: Vec<usize> = roles
        .iter()
        .enumerate()
        .filter(|(_, r)| !**r)
        .map(|(i, _)| i)
        .collect();

    handle_message(ClientMessage::EliminatePlayer { index: loyal[0] }, &state).await;
    let round = view(&state).await.round.expect("round view");
    assert!(round.outcome.is_none());
    // Reveal on elimination is off
    assert!(round.players[loyal[0]].role.is_none());

    handle_message(ClientMessage::EliminatePlayer { index: loyal[1] }, &state).await;
    let round = view(&state).await.round.expect("round view");
    let outcome = round.outcome.expect("game should be over");
    assert_eq!(outcome.winner, Winner::Imposters);
    assert_eq!(outcome.reason, OutcomeReason::ImpostersReachedParity);
}

#[tokio::test]
async fn test_previous_player_keeps_names() {
    let state = loaded_state().await;
    let mut rx = state.broadcast.subscribe();

    handle_message(
        ClientMessage::Configure {
            category: "location".to_string(),
            players: 3,
            imposters: 1,
            reveal_eliminated_role: false,
        },
        &state,
    )
    .await;

    for (i, name) in ["Ann", "Ben"].iter().enumerate() {
        handle_message(
            ClientMessage::SubmitName {
                name: name.to_string(),
            },
            &state,
        )
        .await;
        wait_for_reveal_hidden(&mut rx, i).await;
    }

    assert!(handle_message(ClientMessage::PreviousPlayer, &state)
        .await
        .is_none());

    let naming = view(&state).await.naming.expect("naming view");
    assert_eq!(naming.active_index, 1);
    assert_eq!(naming.current_name, "Ben");
    assert_eq!(naming.names[0], "Ann");

    handle_message(ClientMessage::PreviousPlayer, &state).await;
    match handle_message(ClientMessage::PreviousPlayer, &state).await {
        Some(ServerMessage::Error { code, .. }) => assert_eq!(code, "NAVIGATION_REJECTED"),
        other => panic!("Expected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_reset_discards_pending_reveal() {
    let state = Arc::new(AppState::new(ServerConfig {
        reveal_duration: Duration::from_millis(30),
        ..ServerConfig::default()
    }));
    state
        .set_options(OptionsSnapshot::loaded(GameOptions::new()))
        .await;

    handle_message(
        ClientMessage::Configure {
            category: "location".to_string(),
            players: 3,
            imposters: 1,
            reveal_eliminated_role: false,
        },
        &state,
    )
    .await;
    handle_message(
        ClientMessage::SubmitName {
            name: "Ann".to_string(),
        },
        &state,
    )
    .await;

    handle_message(ClientMessage::ResetGame, &state).await;
    handle_message(
        ClientMessage::Configure {
            category: "location".to_string(),
            players: 3,
            imposters: 1,
            reveal_eliminated_role: false,
        },
        &state,
    )
    .await;

    tokio::time::sleep(Duration::from_millis(100)).await;

    let naming = view(&state).await.naming.expect("naming view");
    assert_eq!(naming.active_index, 0);
    assert!(naming.names.iter().all(|n| n.is_empty()));
}

#[tokio::test]
async fn test_configure_before_options_resolve() {
    let state = fast_state();

    let result = handle_message(
        ClientMessage::Configure {
            category: "location".to_string(),
            players: 5,
            imposters: 1,
            reveal_eliminated_role: false,
        },
        &state,
    )
    .await;

    match result {
        Some(ServerMessage::Error { code, .. }) => assert_eq!(code, "PREMATURE_TRANSITION"),
        other => panic!("Expected error, got {:?}", other),
    }
    assert_eq!(view(&state).await.stage, SessionStage::Configuring);
}

#[tokio::test]
async fn test_failed_fetch_falls_back_to_default_item() {
    let state = fast_state();
    let mut rx = state.broadcast.subscribe();
    state
        .set_options(OptionsSnapshot::failed("HTTP 503 Service Unavailable"))
        .await;

    match rx.recv().await.unwrap() {
        ServerMessage::Notice { title, .. } => {
            assert_eq!(
                title,
                GameNotice::OptionsFetchFailed {
                    reason: String::new()
                }
                .title()
            )
        }
        other => panic!("Expected Notice, got {:?}", other),
    }

    let roles = set_up_game(&state, &["Ann", "Ben", "Cat"], 1, false).await;
    assert_eq!(roles.len(), 3);

    handle_message(ClientMessage::BeginRound, &state).await;
    let loyal: Vec<usize> = (0..3).filter(|i| !roles[*i]).collect();
    handle_message(ClientMessage::EliminatePlayer { index: loyal[0] }, &state).await;

    let round = view(&state).await.round.expect("round view");
    assert_eq!(round.secret_item.as_deref(), Some("Mystery Item"));
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_http_provider_fetches_options() {
    let app = Router::new().route(
        "/options.json",
        get(|| async {
            Json(json!({
                "Location": ["Museum", "Airport"],
                "movies": ["Alien"],
                "broken": 42
            }))
        }),
    );
    let base = serve(app).await;

    let provider = HttpOptionsProvider::new(format!("{}/options.json", base));
    let options = provider.fetch().await.unwrap();

    assert_eq!(options.category("location"), ["Museum", "Airport"]);
    assert_eq!(options.category("movies"), ["Alien"]);
    assert!(options.category("broken").is_empty());
}

#[tokio::test]
async fn test_http_provider_rejects_error_status() {
    let app = Router::new().route(
        "/options.json",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = serve(app).await;

    let provider = HttpOptionsProvider::new(format!("{}/options.json", base));
    let result = provider.fetch().await;

    assert!(matches!(result, Err(OptionsError::Status(_))));
}

#[tokio::test]
async fn test_http_provider_rejects_non_object_body() {
    let app = Router::new().route("/options.json", get(|| async { Json(json!(["Museum"])) }));
    let base = serve(app).await;

    let provider = HttpOptionsProvider::new(format!("{}/options.json", base));
    let result = provider.fetch().await;

    assert!(matches!(result, Err(OptionsError::Format)));
}

#[tokio::test]
async fn test_unreachable_provider_degrades() {
    let state = fast_state();
    // Nothing listens on port 9 locally
    let provider = Arc::new(HttpOptionsProvider::new("http://127.0.0.1:9/options.json"));

    timers::spawn_options_fetch(state.clone(), provider)
        .await
        .unwrap();

    let options = state.options_state().await;
    let snapshot = options.snapshot().expect("fetch should resolve");
    assert!(snapshot.fetch_error.is_some());
    assert!(snapshot.options.is_empty());
}
