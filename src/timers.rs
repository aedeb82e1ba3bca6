//! Background tasks: the startup options fetch and reveal-hide timers

use crate::game::{NamingProgress, RevealToken};
use crate::options::OptionsProvider;
use crate::protocol::ServerMessage;
use crate::state::AppState;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Spawn the one-time options fetch. The session refuses to leave
/// configuration until this resolves.
pub fn spawn_options_fetch(
    state: Arc<AppState>,
    provider: Arc<dyn OptionsProvider>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!("Fetching game options from {}", provider.name());
        state.load_options_from(provider.as_ref()).await;
    })
}

/// Spawn a timer that hides the reveal for `token` after the configured
/// duration. If the session has moved on by then the token is stale and
/// nothing happens.
pub fn spawn_reveal_timer(state: Arc<AppState>, token: RevealToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(state.config.reveal_duration).await;

        match state.finish_reveal(token).await {
            NamingProgress::Stale => {
                tracing::debug!(index = token.index(), "Reveal timer expired for stale token");
            }
            NamingProgress::Advanced { next_index } => {
                tracing::debug!(next_index, "Reveal hidden");
                state.broadcast_to_all(ServerMessage::RevealHidden {
                    player_index: token.index(),
                });
                state.broadcast_state().await;
            }
            NamingProgress::Completed { notice } => {
                state.broadcast_to_all(ServerMessage::RevealHidden {
                    player_index: token.index(),
                });
                state.broadcast_to_all(ServerMessage::from(&notice));
                state.broadcast_state().await;
            }
        }
    })
}
