use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Direction;
use crate::player::PlayerId;

/// Round lifecycle. `Idle`/`Ended` wait for a start command, `Running` has the clock active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    #[default]
    Idle,
    Running,
    Ended,
}

impl RoundState {
    /// Whether a start command is actionable in this state.
    pub const fn accepts_start(self) -> bool {
        matches!(self, RoundState::Idle | RoundState::Ended)
    }
}

/// Terminal result of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Player1Wins,
    Player2Wins,
    Draw,
}

impl Outcome {
    pub const fn win_for(player: PlayerId) -> Outcome {
        match player {
            PlayerId::One => Outcome::Player1Wins,
            PlayerId::Two => Outcome::Player2Wins,
        }
    }

    pub const fn winner(self) -> Option<PlayerId> {
        match self {
            Outcome::Player1Wins => Some(PlayerId::One),
            Outcome::Player2Wins => Some(PlayerId::Two),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Player1Wins => write!(f, "P1 WINS!"),
            Outcome::Player2Wins => write!(f, "P2 WINS!"),
            Outcome::Draw => write!(f, "DRAW!"),
        }
    }
}

/// Cumulative counters as shown on the scoreboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub player1_wins: u32,
    pub player2_wins: u32,
    pub draws: u32,
}

impl ScoreSnapshot {
    pub fn wins(&self, player: PlayerId) -> u32 {
        match player {
            PlayerId::One => self.player1_wins,
            PlayerId::Two => self.player2_wins,
        }
    }

    pub fn rounds(&self) -> u32 {
        self.player1_wins + self.player2_wins + self.draws
    }
}

impl fmt::Display for ScoreSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P1: {}  P2: {}", self.player1_wins, self.player2_wins)
    }
}

/// Events emitted by the round controller, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    RoundStarted {
        round: u32,
    },
    TurnAccepted {
        player: PlayerId,
        direction: Direction,
    },
    FrameAdvanced {
        tick: u32,
    },
    RoundEnded {
        round: u32,
        outcome: Outcome,
        scores: ScoreSnapshot,
    },
}
