use crate::types::*;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Please select a game category before starting")]
    MissingCategory,

    #[error("Player count must be between 3 and 20, got {0}")]
    PlayerCount(usize),

    #[error("Imposter count must be between 1 and {max} for {players} players, got {got}")]
    ImposterCount {
        got: usize,
        max: usize,
        players: usize,
    },
}

impl GameConfiguration {
    /// Validate a complete configuration. Nothing is clamped here; use
    /// `ConfigDraft` for form-style editing.
    pub fn new(
        category: impl Into<String>,
        player_count: usize,
        imposter_count: usize,
        reveal_on_elimination: bool,
    ) -> Result<Self, ConfigError> {
        let category = category.into().trim().to_string();
        if category.is_empty() {
            return Err(ConfigError::MissingCategory);
        }

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(ConfigError::PlayerCount(player_count));
        }

        let max = max_imposters_for(player_count);
        if !(MIN_IMPOSTERS..=max).contains(&imposter_count) {
            return Err(ConfigError::ImposterCount {
                got: imposter_count,
                max,
                players: player_count,
            });
        }

        Ok(Self {
            category,
            player_count,
            imposter_count,
            reveal_on_elimination,
        })
    }
}

/// Editable form state behind the configuration screen.
///
/// Every setter keeps `1 <= imposters <= max_imposters_for(players)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDraft {
    category: String,
    player_count: usize,
    imposter_count: usize,
    reveal_on_elimination: bool,
}

impl Default for ConfigDraft {
    fn default() -> Self {
        let category = CATEGORIES
            .first()
            .map(|(value, _)| value.to_string())
            .unwrap_or_default();

        Self {
            category,
            player_count: DEFAULT_PLAYERS,
            imposter_count: MIN_IMPOSTERS,
            reveal_on_elimination: false,
        }
    }
}

impl ConfigDraft {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn imposter_count(&self) -> usize {
        self.imposter_count
    }

    pub fn max_imposters(&self) -> usize {
        max_imposters_for(self.player_count)
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Move the player slider. Out-of-range values snap to the nearest bound
    /// and the imposter count is re-clamped.
    pub fn set_player_count(&mut self, player_count: usize) {
        self.player_count = player_count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self.imposter_count = self.imposter_count.clamp(MIN_IMPOSTERS, self.max_imposters());
    }

    pub fn set_imposter_count(&mut self, imposter_count: usize) {
        self.imposter_count = imposter_count.clamp(MIN_IMPOSTERS, self.max_imposters());
    }

    pub fn set_reveal_on_elimination(&mut self, reveal: bool) {
        self.reveal_on_elimination = reveal;
    }

    pub fn finish(&self) -> Result<GameConfiguration, ConfigError> {
        GameConfiguration::new(
            self.category.clone(),
            self.player_count,
            self.imposter_count,
            self.reveal_on_elimination,
        )
    }
}
