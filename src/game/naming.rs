//! Naming sequencer
//!
//! Walks through the players one at a time. After each accepted name the
//! player's role is shown privately; the reveal ends when a timer fires with
//! the `RevealToken` handed out on submission. Tokens go stale as soon as the
//! sequencer moves on (new submission, navigation, or a new sequencer).

use crate::types::*;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NamingError {
    #[error("Please enter a name for Player {}", .index + 1)]
    NameRequired { index: PlayerIndex },

    #[error("Wait until the reveal is hidden again")]
    RevealInProgress,

    #[error("Already at the first player")]
    NoPreviousPlayer,

    #[error("All player names have already been entered")]
    Finished,
}

/// What a player is shown right after entering their name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealContent {
    Imposter,
    SecretItem(String),
}

impl RevealContent {
    pub fn text(&self) -> &str {
        match self {
            RevealContent::Imposter => IMPOSTER_LABEL,
            RevealContent::SecretItem(item) => item,
        }
    }

    pub fn is_imposter(&self) -> bool {
        matches!(self, RevealContent::Imposter)
    }
}

/// Identifies one pending reveal-hide transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealToken {
    pub(crate) epoch: u64,
    pub(crate) index: PlayerIndex,
    pub(crate) generation: u64,
}

impl RevealToken {
    pub fn index(&self) -> PlayerIndex {
        self.index
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealElapsed {
    /// Token no longer matches; nothing changed
    Stale,
    /// Reveal hidden, now entering the name for `next_index`
    Advanced { next_index: PlayerIndex },
    /// Last reveal hidden; the full ordered name list
    Completed(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NamingPhase {
    Entering,
    Revealing(RevealContent),
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingSequencer {
    names: Vec<String>,
    active: PlayerIndex,
    phase: NamingPhase,
    epoch: u64,
    generation: u64,
}

impl NamingSequencer {
    /// `epoch` is stamped into every token so tokens from an earlier
    /// sequencer never match this one.
    pub fn new(player_count: usize, epoch: u64) -> Self {
        Self {
            names: vec![String::new(); player_count],
            active: 0,
            phase: NamingPhase::Entering,
            epoch,
            generation: 0,
        }
    }

    pub fn active_index(&self) -> PlayerIndex {
        self.active
    }

    pub fn player_count(&self) -> usize {
        self.names.len()
    }

    pub fn is_last(&self) -> bool {
        self.active + 1 == self.names.len()
    }

    /// Input is locked while a reveal is showing
    pub fn is_revealing(&self) -> bool {
        matches!(self.phase, NamingPhase::Revealing(_))
    }

    pub fn is_done(&self) -> bool {
        self.phase == NamingPhase::Done
    }

    pub fn revealed(&self) -> Option<&RevealContent> {
        match &self.phase {
            NamingPhase::Revealing(content) => Some(content),
            _ => None,
        }
    }

    /// Saved names, with empty strings for players not reached yet
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Pre-filled value for the active player's input
    pub fn current_name(&self) -> &str {
        self.names.get(self.active).map(String::as_str).unwrap_or("")
    }

    fn token(&self) -> RevealToken {
        RevealToken {
            epoch: self.epoch,
            index: self.active,
            generation: self.generation,
        }
    }

    /// Record the active player's name and start their reveal.
    ///
    /// Blank input is rejected without touching any state.
    pub fn submit(
        &mut self,
        raw_name: &str,
        assignment: &RoundAssignment,
    ) -> Result<(RevealToken, RevealContent), NamingError> {
        match self.phase {
            NamingPhase::Revealing(_) => return Err(NamingError::RevealInProgress),
            NamingPhase::Done => return Err(NamingError::Finished),
            NamingPhase::Entering => {}
        }

        let name: String = raw_name.trim().chars().take(MAX_NAME_CHARS).collect();
        let name = name.trim_end();
        if name.is_empty() {
            return Err(NamingError::NameRequired { index: self.active });
        }

        self.names[self.active] = name.to_string();
        self.generation += 1;

        let content = if assignment.is_imposter(self.active) {
            RevealContent::Imposter
        } else {
            RevealContent::SecretItem(assignment.secret_item.clone())
        };
        self.phase = NamingPhase::Revealing(content.clone());

        Ok((self.token(), content))
    }

    /// Go back one player. Names already entered for later players are kept.
    pub fn previous(&mut self) -> Result<PlayerIndex, NamingError> {
        match self.phase {
            NamingPhase::Revealing(_) => return Err(NamingError::RevealInProgress),
            NamingPhase::Done => return Err(NamingError::Finished),
            NamingPhase::Entering => {}
        }
        if self.active == 0 {
            return Err(NamingError::NoPreviousPlayer);
        }

        self.generation += 1;
        self.active -= 1;
        Ok(self.active)
    }

    /// Called when a reveal timer fires
    pub fn reveal_elapsed(&mut self, token: RevealToken) -> RevealElapsed {
        if !self.is_revealing() || token != self.token() {
            tracing::debug!(?token, "Ignoring stale reveal timer");
            return RevealElapsed::Stale;
        }

        self.generation += 1;
        if self.is_last() {
            self.phase = NamingPhase::Done;
            RevealElapsed::Completed(self.names.clone())
        } else {
            self.phase = NamingPhase::Entering;
            self.active += 1;
            RevealElapsed::Advanced {
                next_index: self.active,
            }
        }
    }
}
