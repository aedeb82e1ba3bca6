mod options;
mod session;

use crate::config::ServerConfig;
use crate::game::Session;
use crate::options::OptionsState;
use crate::protocol::{ServerMessage, SessionView};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The one game on this screen
    pub session: Arc<RwLock<Session>>,
    /// Result of the startup options fetch, cached for the process lifetime
    pub options: Arc<RwLock<OptionsState>>,
    /// Broadcast channel for sending messages to all connected clients
    pub broadcast: broadcast::Sender<ServerMessage>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            session: Arc::new(RwLock::new(Session::new())),
            options: Arc::new(RwLock::new(OptionsState::Loading)),
            broadcast: tx,
            config,
        }
    }

    /// Send a message to every connected client
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        // No receivers connected is fine
        let _ = self.broadcast.send(msg);
    }

    pub async fn session_view(&self) -> SessionView {
        SessionView::from(&*self.session.read().await)
    }

    /// Push the current session view to every client
    pub async fn broadcast_state(&self) {
        let session = self.session_view().await;
        self.broadcast_to_all(ServerMessage::State { session });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}
