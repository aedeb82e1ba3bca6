//! Session controller
//!
//! Owns every piece of game state and moves it strictly forward:
//! Configuring -> NamingPlayers -> ReadyToBegin -> PlayingRound.
//! `reset` is the only way back.

use super::{
    assign_roles, Elimination, GameNotice, NamingSequencer, RevealContent, RevealElapsed,
    RevealToken, RoundEngine, SessionError, SessionResult,
};
use crate::options::OptionsState;
use crate::types::*;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Configuring,
    NamingPlayers {
        configuration: GameConfiguration,
        assignment: RoundAssignment,
        sequencer: NamingSequencer,
    },
    ReadyToBegin(RoundSnapshot),
    PlayingRound {
        snapshot: RoundSnapshot,
        engine: RoundEngine,
    },
}

/// What happened when a reveal timer fired
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingProgress {
    Stale,
    Advanced { next_index: PlayerIndex },
    /// Every name is in; the session is now ReadyToBegin
    Completed { notice: GameNotice },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    phase: Phase,
    /// Bumped on every reset and new configuration; stamped into reveal tokens
    epoch: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Configuring,
            epoch: 0,
        }
    }

    pub fn stage(&self) -> SessionStage {
        match self.phase {
            Phase::Configuring => SessionStage::Configuring,
            Phase::NamingPlayers { .. } => SessionStage::NamingPlayers,
            Phase::ReadyToBegin(_) => SessionStage::ReadyToBegin,
            Phase::PlayingRound { .. } => SessionStage::PlayingRound,
        }
    }

    pub fn configuration(&self) -> Option<&GameConfiguration> {
        match &self.phase {
            Phase::Configuring => None,
            Phase::NamingPlayers { configuration, .. } => Some(configuration),
            Phase::ReadyToBegin(snapshot) | Phase::PlayingRound { snapshot, .. } => {
                Some(&snapshot.configuration)
            }
        }
    }

    pub fn assignment(&self) -> Option<&RoundAssignment> {
        match &self.phase {
            Phase::Configuring => None,
            Phase::NamingPlayers { assignment, .. } => Some(assignment),
            Phase::ReadyToBegin(snapshot) | Phase::PlayingRound { snapshot, .. } => {
                Some(&snapshot.assignment)
            }
        }
    }

    pub fn sequencer(&self) -> Option<&NamingSequencer> {
        match &self.phase {
            Phase::NamingPlayers { sequencer, .. } => Some(sequencer),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Option<&RoundSnapshot> {
        match &self.phase {
            Phase::ReadyToBegin(snapshot) | Phase::PlayingRound { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    pub fn round(&self) -> Option<&RoundEngine> {
        match &self.phase {
            Phase::PlayingRound { engine, .. } => Some(engine),
            _ => None,
        }
    }

    /// Players of the running round; empty outside PlayingRound
    pub fn roster(&self) -> &[PlayerRecord] {
        self.round().map(RoundEngine::players).unwrap_or(&[])
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.round().and_then(RoundEngine::outcome)
    }

    fn wrong_stage(&self, expected: SessionStage) -> SessionError {
        let actual = self.stage();
        tracing::warn!(?expected, ?actual, "Rejected session event");
        SessionError::InvalidStage { expected, actual }
    }

    /// Lock in the configuration and assign roles.
    ///
    /// Refused while the options fetch has not resolved yet.
    pub fn configure<R: Rng + ?Sized>(
        &mut self,
        configuration: GameConfiguration,
        options: &OptionsState,
        rng: &mut R,
    ) -> SessionResult<Vec<GameNotice>> {
        if self.stage() != SessionStage::Configuring {
            return Err(self.wrong_stage(SessionStage::Configuring));
        }
        let Some(snapshot) = options.snapshot() else {
            tracing::warn!("Configuration submitted while options are still loading");
            return Err(SessionError::PrematureTransition);
        };

        let result = assign_roles(&configuration, snapshot, rng);
        let mut notices: Vec<GameNotice> = result.notice.into_iter().collect();
        notices.push(GameNotice::ConfigurationSaved {
            player_count: configuration.player_count(),
            imposter_count: configuration.imposter_count(),
            reveal_on_elimination: configuration.reveal_on_elimination(),
        });

        self.epoch += 1;
        tracing::info!(
            category = configuration.category(),
            players = configuration.player_count(),
            imposters = configuration.imposter_count(),
            "Game configured"
        );
        self.phase = Phase::NamingPlayers {
            sequencer: NamingSequencer::new(configuration.player_count(), self.epoch),
            configuration,
            assignment: result.assignment,
        };

        Ok(notices)
    }

    pub fn submit_name(&mut self, name: &str) -> SessionResult<(RevealToken, RevealContent)> {
        match &mut self.phase {
            Phase::NamingPlayers {
                assignment,
                sequencer,
                ..
            } => Ok(sequencer.submit(name, assignment)?),
            _ => Err(self.wrong_stage(SessionStage::NamingPlayers)),
        }
    }

    pub fn previous_player(&mut self) -> SessionResult<PlayerIndex> {
        match &mut self.phase {
            Phase::NamingPlayers { sequencer, .. } => Ok(sequencer.previous()?),
            _ => Err(self.wrong_stage(SessionStage::NamingPlayers)),
        }
    }

    /// Apply a fired reveal timer. Tokens from a previous stage or epoch
    /// are ignored.
    pub fn reveal_elapsed(&mut self, token: RevealToken) -> NamingProgress {
        let Phase::NamingPlayers { sequencer, .. } = &mut self.phase else {
            tracing::debug!(?token, "Reveal timer fired outside name entry");
            return NamingProgress::Stale;
        };

        match sequencer.reveal_elapsed(token) {
            RevealElapsed::Stale => NamingProgress::Stale,
            RevealElapsed::Advanced { next_index } => NamingProgress::Advanced { next_index },
            RevealElapsed::Completed(names) => {
                match std::mem::replace(&mut self.phase, Phase::Configuring) {
                    Phase::NamingPlayers {
                        configuration,
                        assignment,
                        ..
                    } => {
                        let notice = GameNotice::SetupComplete {
                            player_count: configuration.player_count(),
                            imposter_count: configuration.imposter_count(),
                            category: configuration.category().to_string(),
                        };
                        tracing::info!(players = names.len(), "All names entered");
                        self.phase = Phase::ReadyToBegin(RoundSnapshot {
                            configuration,
                            assignment,
                            names,
                        });
                        NamingProgress::Completed { notice }
                    }
                    other => {
                        self.phase = other;
                        NamingProgress::Stale
                    }
                }
            }
        }
    }

    pub fn begin_round(&mut self) -> SessionResult<()> {
        match std::mem::replace(&mut self.phase, Phase::Configuring) {
            Phase::ReadyToBegin(snapshot) => {
                tracing::info!("Round started");
                self.phase = Phase::PlayingRound {
                    engine: RoundEngine::new(&snapshot),
                    snapshot,
                };
                Ok(())
            }
            other => {
                self.phase = other;
                Err(self.wrong_stage(SessionStage::ReadyToBegin))
            }
        }
    }

    pub fn eliminate(&mut self, index: PlayerIndex) -> SessionResult<Elimination> {
        match &mut self.phase {
            Phase::PlayingRound { engine, .. } => Ok(engine.eliminate(index)),
            _ => Err(self.wrong_stage(SessionStage::PlayingRound)),
        }
    }

    /// Drop everything and go back to configuration
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.phase = Phase::Configuring;
        tracing::info!("Session reset");
    }
}
