use super::AppState;
use crate::game::{
    Elimination, GameNotice, NamingProgress, RevealContent, RevealToken, SessionResult,
};
use crate::types::{GameConfiguration, PlayerIndex};

impl AppState {
    /// Lock in a configuration. Refused until the options fetch has resolved.
    pub async fn configure(
        &self,
        configuration: GameConfiguration,
    ) -> SessionResult<Vec<GameNotice>> {
        let options = self.options_state().await;
        let mut session = self.session.write().await;
        session.configure(configuration, &options, &mut rand::rng())
    }

    pub async fn submit_name(&self, name: &str) -> SessionResult<(RevealToken, RevealContent)> {
        self.session.write().await.submit_name(name)
    }

    pub async fn previous_player(&self) -> SessionResult<PlayerIndex> {
        self.session.write().await.previous_player()
    }

    /// Called by the reveal timer once the reveal duration has passed
    pub async fn finish_reveal(&self, token: RevealToken) -> NamingProgress {
        self.session.write().await.reveal_elapsed(token)
    }

    pub async fn begin_round(&self) -> SessionResult<()> {
        self.session.write().await.begin_round()
    }

    pub async fn eliminate(&self, index: PlayerIndex) -> SessionResult<Elimination> {
        self.session.write().await.eliminate(index)
    }

    pub async fn reset_session(&self) {
        self.session.write().await.reset();
    }
}
