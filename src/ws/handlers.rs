//! WebSocket message dispatch
//!
//! Every state-changing message broadcasts the new session view to all
//! sockets. The return value is sent back to the sender only.

use crate::game::{ConfigDraft, Elimination, GameNotice, SessionError};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use crate::timers;
use crate::types::PlayerIndex;
use std::sync::Arc;

fn error_response(e: SessionError) -> Option<ServerMessage> {
    Some(ServerMessage::Error {
        code: e.code().to_string(),
        msg: e.to_string(),
    })
}

/// Handle client messages and return optional response
pub async fn handle_message(msg: ClientMessage, state: &Arc<AppState>) -> Option<ServerMessage> {
    match msg {
        ClientMessage::Configure {
            category,
            players,
            imposters,
            reveal_eliminated_role,
        } => handle_configure(state, category, players, imposters, reveal_eliminated_role).await,

        ClientMessage::SubmitName { name } => handle_submit_name(state, name).await,

        ClientMessage::PreviousPlayer => handle_previous_player(state).await,

        ClientMessage::BeginRound => handle_begin_round(state).await,

        ClientMessage::EliminatePlayer { index } => handle_eliminate_player(state, index).await,

        ClientMessage::ResetGame => {
            tracing::info!("Resetting game");
            state.reset_session().await;
            state.broadcast_state().await;
            None
        }

        ClientMessage::RequestState => Some(ServerMessage::State {
            session: state.session_view().await,
        }),
    }
}

async fn handle_configure(
    state: &Arc<AppState>,
    category: String,
    players: usize,
    imposters: usize,
    reveal: bool,
) -> Option<ServerMessage> {
    // Same rules as the configuration form: counts are clamped, not rejected
    let mut draft = ConfigDraft::default();
    draft.set_category(category);
    draft.set_player_count(players);
    draft.set_imposter_count(imposters);
    draft.set_reveal_on_elimination(reveal);

    if draft.player_count() != players || draft.imposter_count() != imposters {
        tracing::debug!(
            "Clamped configuration from {}/{} to {}/{}",
            players,
            imposters,
            draft.player_count(),
            draft.imposter_count()
        );
    }

    let configuration = match draft.finish() {
        Ok(c) => c,
        Err(e) => return error_response(e.into()),
    };

    match state.configure(configuration).await {
        Ok(notices) => {
            for notice in &notices {
                state.broadcast_to_all(ServerMessage::from(notice));
            }
            state.broadcast_state().await;
            None
        }
        Err(e) => error_response(e),
    }
}

async fn handle_submit_name(state: &Arc<AppState>, name: String) -> Option<ServerMessage> {
    match state.submit_name(&name).await {
        Ok((token, content)) => {
            tracing::debug!("Name saved for player {}", token.index() + 1);
            timers::spawn_reveal_timer(state.clone(), token);
            state.broadcast_state().await;

            Some(ServerMessage::Reveal {
                player_index: token.index(),
                is_imposter: content.is_imposter(),
                content: content.text().to_string(),
                duration_ms: u64::try_from(state.config.reveal_duration.as_millis())
                    .unwrap_or(u64::MAX),
            })
        }
        Err(e) => error_response(e),
    }
}

async fn handle_previous_player(state: &Arc<AppState>) -> Option<ServerMessage> {
    match state.previous_player().await {
        Ok(index) => {
            tracing::debug!("Back to player {}", index + 1);
            state.broadcast_state().await;
            None
        }
        Err(e) => error_response(e),
    }
}

async fn handle_begin_round(state: &Arc<AppState>) -> Option<ServerMessage> {
    match state.begin_round().await {
        Ok(()) => {
            state.broadcast_state().await;
            None
        }
        Err(e) => error_response(e),
    }
}

async fn handle_eliminate_player(state: &Arc<AppState>, index: PlayerIndex) -> Option<ServerMessage> {
    match state.eliminate(index).await {
        Ok(Elimination::Eliminated { outcome, .. }) => {
            if let Some(outcome) = outcome {
                let message = outcome.reason.message().to_string();
                state.broadcast_to_all(ServerMessage::from(outcome));
                state.broadcast_to_all(ServerMessage::from(&GameNotice::GameOver { message }));
            }
            state.broadcast_state().await;
            None
        }
        Ok(other) => {
            tracing::debug!("Elimination of {} ignored: {:?}", index, other);
            None
        }
        Err(e) => error_response(e),
    }
}
