use crate::types::*;

/// Result of an elimination request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elimination {
    /// Player removed; `outcome` is set if this ended the game
    Eliminated {
        index: PlayerIndex,
        outcome: Option<GameOutcome>,
    },
    AlreadyEliminated,
    GameOver,
    UnknownPlayer,
}

/// Decide whether the game is over for the given roster.
///
/// Rules are checked in a fixed order and the first match wins:
/// all imposters out, then all loyal players out, then imposter parity.
pub fn evaluate_outcome(players: &[PlayerRecord], total_imposters: usize) -> Option<GameOutcome> {
    let (imposters, loyal) = players
        .iter()
        .filter(|p| !p.is_eliminated)
        .fold((0usize, 0usize), |(i, n), p| {
            if p.is_imposter {
                (i + 1, n)
            } else {
                (i, n + 1)
            }
        });

    if total_imposters > 0 && imposters == 0 {
        Some(GameOutcome {
            winner: Winner::Players,
            reason: OutcomeReason::AllImpostersEliminated,
        })
    } else if imposters > 0 && loyal == 0 {
        Some(GameOutcome {
            winner: Winner::Imposters,
            reason: OutcomeReason::AllLoyalEliminated,
        })
    } else if imposters > 0 && imposters >= loyal {
        Some(GameOutcome {
            winner: Winner::Imposters,
            reason: OutcomeReason::ImpostersReachedParity,
        })
    } else {
        None
    }
}

/// Elimination state for one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundEngine {
    players: Vec<PlayerRecord>,
    reveal_on_elimination: bool,
    total_imposters: usize,
    outcome: Option<GameOutcome>,
}

impl RoundEngine {
    pub fn new(snapshot: &RoundSnapshot) -> Self {
        let players = snapshot
            .names
            .iter()
            .enumerate()
            .map(|(index, name)| PlayerRecord {
                name: name.clone(),
                is_imposter: snapshot.assignment.is_imposter(index),
                is_eliminated: false,
                role_revealed_on_elimination: false,
            })
            .collect();

        Self {
            players,
            reveal_on_elimination: snapshot.configuration.reveal_on_elimination(),
            total_imposters: snapshot.configuration.imposter_count(),
            outcome: None,
        }
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn remaining(&self) -> usize {
        self.players.iter().filter(|p| !p.is_eliminated).count()
    }

    /// Vote a player out. Rejected requests leave the round untouched.
    pub fn eliminate(&mut self, index: PlayerIndex) -> Elimination {
        if self.is_over() {
            return Elimination::GameOver;
        }

        let reveal = self.reveal_on_elimination;
        let Some(player) = self.players.get_mut(index) else {
            return Elimination::UnknownPlayer;
        };
        if player.is_eliminated {
            return Elimination::AlreadyEliminated;
        }

        player.is_eliminated = true;
        player.role_revealed_on_elimination = reveal;
        tracing::info!(index, name = %player.name, "Player eliminated");

        self.outcome = evaluate_outcome(&self.players, self.total_imposters);
        if let Some(outcome) = self.outcome {
            tracing::info!(?outcome, "Round over");
        }

        Elimination::Eliminated {
            index,
            outcome: self.outcome,
        }
    }
}
