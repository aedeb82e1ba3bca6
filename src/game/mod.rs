//! Core game state machine
//!
//! Everything in here is synchronous and owns its data. The async shell in
//! `crate::state` wraps a single `Session` and forwards events into it.

mod assignment;
mod config;
mod naming;
mod round;
mod session;

pub use assignment::{assign_roles, ItemStrategy, RoleAssignmentResult, ITEM_STRATEGIES};
pub use config::{ConfigDraft, ConfigError};
pub use naming::{NamingError, NamingSequencer, RevealContent, RevealElapsed, RevealToken};
pub use round::{evaluate_outcome, Elimination, RoundEngine};
pub use session::{NamingProgress, Session};

use crate::types::SessionStage;
use serde::{Deserialize, Serialize};

/// Result type for session transitions
pub type SessionResult<T> = Result<T, SessionError>;

/// Rejected session events. None of these change any state.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Game options are still loading, try again in a moment")]
    PrematureTransition,

    #[error("Expected stage {expected:?} but session is in {actual:?}")]
    InvalidStage {
        expected: SessionStage,
        actual: SessionStage,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Naming(#[from] NamingError),
}

impl SessionError {
    /// Stable code for protocol error messages
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::PrematureTransition => "PREMATURE_TRANSITION",
            SessionError::InvalidStage { .. } => "INVALID_STAGE",
            SessionError::Config(_) => "INVALID_CONFIGURATION",
            SessionError::Naming(NamingError::NameRequired { .. }) => "NAME_REQUIRED",
            SessionError::Naming(_) => "NAVIGATION_REJECTED",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Non-fatal things the players should be told about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameNotice {
    /// The options list could not be fetched; a default item was used
    OptionsFetchFailed { reason: String },
    /// The chosen category had nothing in it; picked from every category instead
    EmptyCategoryOptions { category: String },
    /// The options list was empty; a default item was used
    NoOptionsAvailable,
    ConfigurationSaved {
        player_count: usize,
        imposter_count: usize,
        reveal_on_elimination: bool,
    },
    SetupComplete {
        player_count: usize,
        imposter_count: usize,
        category: String,
    },
    GameOver { message: String },
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

impl GameNotice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            GameNotice::OptionsFetchFailed { .. } | GameNotice::NoOptionsAvailable => {
                NoticeLevel::Error
            }
            _ => NoticeLevel::Info,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameNotice::OptionsFetchFailed { .. } => "Error Loading Game Options",
            GameNotice::EmptyCategoryOptions { .. } => "Category Options Not Found",
            GameNotice::NoOptionsAvailable => "No Game Options Available",
            GameNotice::ConfigurationSaved { .. } => "Configuration Saved!",
            GameNotice::SetupComplete { .. } => "All Set!",
            GameNotice::GameOver { .. } => "Game Over!",
        }
    }

    pub fn description(&self) -> String {
        match self {
            GameNotice::OptionsFetchFailed { reason } => {
                format!("{}. Using a default item.", reason)
            }
            GameNotice::EmptyCategoryOptions { category } => format!(
                "No options found for '{}' in the fetched data. Using a general random option.",
                category
            ),
            GameNotice::NoOptionsAvailable => {
                "The fetched game options list is completely empty. Using a default item."
                    .to_string()
            }
            GameNotice::ConfigurationSaved {
                player_count,
                imposter_count,
                reveal_on_elimination,
            } => format!(
                "Next, enter names for {} players. {} imposter{}. Reveal role: {}.",
                player_count,
                imposter_count,
                plural(*imposter_count),
                if *reveal_on_elimination { "Yes" } else { "No" }
            ),
            GameNotice::SetupComplete {
                player_count,
                imposter_count,
                category,
            } => format!(
                "Game ready with {} players ({} imposter{}). Category: {}.",
                player_count,
                imposter_count,
                plural(*imposter_count),
                category
            ),
            GameNotice::GameOver { message } => message.clone(),
        }
    }
}
