use super::AppState;
use crate::game::GameNotice;
use crate::options::{load_options, OptionsProvider, OptionsSnapshot, OptionsState};
use crate::protocol::ServerMessage;

impl AppState {
    /// Current options cache (Loading until the fetch resolves)
    pub async fn options_state(&self) -> OptionsState {
        self.options.read().await.clone()
    }

    /// Store a resolved fetch. A failed fetch is announced to every client
    /// connected at that moment.
    pub async fn set_options(&self, snapshot: OptionsSnapshot) {
        if let Some(notice) = fetch_failed_notice(&snapshot) {
            self.broadcast_to_all(ServerMessage::from(&notice));
        }

        *self.options.write().await = OptionsState::Ready(snapshot);
    }

    /// Notice for clients that connect after a failed fetch has resolved
    pub async fn options_notice(&self) -> Option<GameNotice> {
        self.options
            .read()
            .await
            .snapshot()
            .and_then(fetch_failed_notice)
    }

    /// Fetch from `provider` and cache the result, success or not
    pub async fn load_options_from(&self, provider: &dyn OptionsProvider) -> OptionsSnapshot {
        let snapshot = load_options(provider).await;
        self.set_options(snapshot.clone()).await;
        snapshot
    }
}

fn fetch_failed_notice(snapshot: &OptionsSnapshot) -> Option<GameNotice> {
    snapshot
        .fetch_error
        .as_ref()
        .map(|reason| GameNotice::OptionsFetchFailed {
            reason: reason.clone(),
        })
}
