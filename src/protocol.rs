use crate::game::{GameNotice, NoticeLevel, Session};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Protocol version reported in `Welcome`
pub const PROTOCOL_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    Configure {
        category: String,
        players: usize,
        imposters: usize,
        #[serde(default)]
        reveal_eliminated_role: bool,
    },
    SubmitName {
        name: String,
    },
    PreviousPlayer,
    BeginRound,
    EliminatePlayer {
        index: PlayerIndex,
    },
    ResetGame,
    RequestState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        session: SessionView,
        server_now: String,
    },
    State {
        session: SessionView,
    },
    /// Sent only to the socket that submitted the name
    Reveal {
        player_index: PlayerIndex,
        content: String,
        is_imposter: bool,
        duration_ms: u64,
    },
    RevealHidden {
        player_index: PlayerIndex,
    },
    Notice {
        level: NoticeLevel,
        title: String,
        description: String,
    },
    GameOver {
        winner: Winner,
        reason: OutcomeReason,
        message: String,
    },
    Error {
        code: String,
        msg: String,
    },
}

impl From<&GameNotice> for ServerMessage {
    fn from(notice: &GameNotice) -> Self {
        ServerMessage::Notice {
            level: notice.level(),
            title: notice.title().to_string(),
            description: notice.description(),
        }
    }
}

impl From<GameOutcome> for ServerMessage {
    fn from(outcome: GameOutcome) -> Self {
        ServerMessage::GameOver {
            winner: outcome.winner,
            reason: outcome.reason,
            message: outcome.reason.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Imposter,
    Loyal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigurationView {
    pub category: String,
    pub players: usize,
    pub imposters: usize,
    pub reveal_eliminated_role: bool,
}

impl From<&GameConfiguration> for ConfigurationView {
    fn from(config: &GameConfiguration) -> Self {
        Self {
            category: config.category().to_string(),
            players: config.player_count(),
            imposters: config.imposter_count(),
            reveal_eliminated_role: config.reveal_on_elimination(),
        }
    }
}

/// Name-entry screen state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamingView {
    pub active_index: PlayerIndex,
    pub player_count: usize,
    /// Pre-filled input value for the active player
    pub current_name: String,
    /// Saved names; empty strings for players not reached yet
    pub names: Vec<String>,
    pub is_last: bool,
    pub input_locked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadyView {
    pub category: String,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerView {
    pub index: PlayerIndex,
    pub name: String,
    pub is_eliminated: bool,
    /// Hidden until revealed on elimination or the game is over
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundView {
    pub players: Vec<PlayerView>,
    pub outcome: Option<GameOutcome>,
    pub message: Option<String>,
    /// Only disclosed once the round is over
    pub secret_item: Option<String>,
}

/// Everything a screen needs to render the session, without leaking roles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionView {
    pub stage: SessionStage,
    pub configuration: Option<ConfigurationView>,
    pub naming: Option<NamingView>,
    pub ready: Option<ReadyView>,
    pub round: Option<RoundView>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        let naming = session.sequencer().map(|seq| NamingView {
            active_index: seq.active_index(),
            player_count: seq.player_count(),
            current_name: seq.current_name().to_string(),
            names: seq.names().to_vec(),
            is_last: seq.is_last(),
            input_locked: seq.is_revealing() || seq.is_done(),
        });

        let ready = match (session.stage(), session.snapshot()) {
            (SessionStage::ReadyToBegin, Some(snapshot)) => Some(ReadyView {
                category: snapshot.configuration.category().to_string(),
                names: snapshot.names.clone(),
            }),
            _ => None,
        };

        let round = session.round().map(|engine| {
            let outcome = engine.outcome();
            let players = engine
                .players()
                .iter()
                .enumerate()
                .map(|(index, player)| {
                    let visible = outcome.is_some() || player.role_revealed_on_elimination;
                    PlayerView {
                        index,
                        name: player.name.clone(),
                        is_eliminated: player.is_eliminated,
                        role: visible.then_some(if player.is_imposter {
                            Role::Imposter
                        } else {
                            Role::Loyal
                        }),
                    }
                })
                .collect();

            RoundView {
                players,
                outcome,
                message: outcome.map(|o| o.reason.message().to_string()),
                secret_item: outcome
                    .and(session.assignment())
                    .map(|a| a.secret_item.clone()),
            }
        });

        Self {
            stage: session.stage(),
            configuration: session.configuration().map(ConfigurationView::from),
            naming,
            ready,
            round,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_message_tagging() {
        let msg: ClientMessage = serde_json::from_value(json!({
            "t": "configure",
            "category": "movies",
            "players": 6,
            "imposters": 1
        }))
        .unwrap();

        match msg {
            ClientMessage::Configure {
                category,
                players,
                reveal_eliminated_role,
                ..
            } => {
                assert_eq!(category, "movies");
                assert_eq!(players, 6);
                assert!(!reveal_eliminated_role);
            }
            _ => panic!("Expected Configure"),
        }

        let msg: ClientMessage =
            serde_json::from_value(json!({ "t": "eliminate_player", "index": 3 })).unwrap();
        assert!(matches!(msg, ClientMessage::EliminatePlayer { index: 3 }));
    }

    #[test]
    fn test_game_over_message() {
        let msg = ServerMessage::from(GameOutcome {
            winner: Winner::Players,
            reason: OutcomeReason::AllImpostersEliminated,
        });
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(value["t"], "game_over");
        assert_eq!(value["winner"], "players");
        assert_eq!(value["reason"], "all_imposters_eliminated");
    }

    #[test]
    fn test_initial_view() {
        let view = SessionView::from(&Session::new());
        assert_eq!(view.stage, SessionStage::Configuring);
        assert!(view.configuration.is_none());
        assert!(view.naming.is_none());
        assert!(view.round.is_none());
    }
}
