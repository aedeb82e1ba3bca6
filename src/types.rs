use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Index of a player in the roster (0-based, in name-entry order)
pub type PlayerIndex = usize;

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 20;
pub const DEFAULT_PLAYERS: usize = 5;
pub const MIN_IMPOSTERS: usize = 1;

/// Longest accepted player name, in characters
pub const MAX_NAME_CHARS: usize = 30;

/// How long a player's role stays on screen after they enter their name
pub const DEFAULT_REVEAL_DURATION: Duration = Duration::from_millis(3000);

/// Secret item used when no options could be loaded at all
pub const DEFAULT_SECRET_ITEM: &str = "Mystery Item";

/// What an imposter sees instead of the secret item
pub const IMPOSTER_LABEL: &str = "Imposter";

/// Categories offered by the configuration form (value, label)
pub const CATEGORIES: &[(&str, &str)] = &[
    ("location", "Locations"),
    ("cities", "Cities"),
    ("activities", "Activities"),
    ("movies", "Movies"),
    ("games", "Video Games"),
    ("mythology", "Mythology"),
];

/// Largest imposter count allowed for a given number of players.
///
/// Roughly one imposter per four players, but never below one.
pub fn max_imposters_for(player_count: usize) -> usize {
    (player_count / 4).max(MIN_IMPOSTERS)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStage {
    Configuring,
    NamingPlayers,
    ReadyToBegin,
    PlayingRound,
}

/// Validated settings for one game. Build through `GameConfiguration::new`
/// or `ConfigDraft::finish`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfiguration {
    pub(crate) category: String,
    pub(crate) player_count: usize,
    pub(crate) imposter_count: usize,
    pub(crate) reveal_on_elimination: bool,
}

impl GameConfiguration {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn imposter_count(&self) -> usize {
        self.imposter_count
    }

    pub fn reveal_on_elimination(&self) -> bool {
        self.reveal_on_elimination
    }
}

/// Who the imposters are and what everybody else is shown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundAssignment {
    pub imposter_indices: BTreeSet<PlayerIndex>,
    pub secret_item: String,
}

impl RoundAssignment {
    pub fn is_imposter(&self, index: PlayerIndex) -> bool {
        self.imposter_indices.contains(&index)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerRecord {
    pub name: String,
    pub is_imposter: bool,
    pub is_eliminated: bool,
    pub role_revealed_on_elimination: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Players,
    Imposters,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeReason {
    AllImpostersEliminated,
    AllLoyalEliminated,
    ImpostersReachedParity,
}

impl OutcomeReason {
    pub fn message(&self) -> &'static str {
        match self {
            OutcomeReason::AllImpostersEliminated => {
                "Players Win! All imposters have been eliminated."
            }
            OutcomeReason::AllLoyalEliminated => {
                "Imposters Win! All loyal players have been eliminated."
            }
            OutcomeReason::ImpostersReachedParity => {
                "Imposters Win! Their numbers match or exceed the loyal players."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: Winner,
    pub reason: OutcomeReason,
}

/// Immutable record captured once every player has a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub configuration: GameConfiguration,
    pub assignment: RoundAssignment,
    pub names: Vec<String>,
}
