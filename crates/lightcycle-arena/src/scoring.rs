use serde::{Deserialize, Serialize};

use lightcycle_core::{Outcome, PlayerId, ScoreSnapshot};

/// Cumulative round results for the lifetime of the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    wins: [u32; 2],
    draws: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_win(&mut self, player: PlayerId) {
        self.wins[player.index()] += 1;
    }

    pub fn record_draw(&mut self) {
        self.draws += 1;
    }

    /// Credit a finished round. A draw touches neither win counter.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome.winner() {
            Some(player) => self.record_win(player),
            None => self.record_draw(),
        }
    }

    pub fn wins(&self, player: PlayerId) -> u32 {
        self.wins[player.index()]
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn rounds(&self) -> u32 {
        self.wins.iter().sum::<u32>() + self.draws
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            player1_wins: self.wins(PlayerId::One),
            player2_wins: self.wins(PlayerId::Two),
            draws: self.draws,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let scores = ScoreTracker::new();
        assert_eq!(scores.snapshot(), ScoreSnapshot::default());
        assert_eq!(scores.rounds(), 0);
    }

    #[test]
    fn win_increments_only_that_player() {
        let mut scores = ScoreTracker::new();
        scores.record_win(PlayerId::Two);
        assert_eq!(scores.wins(PlayerId::One), 0);
        assert_eq!(scores.wins(PlayerId::Two), 1);
    }

    #[test]
    fn draw_leaves_win_counters_alone() {
        let mut scores = ScoreTracker::new();
        scores.record(Outcome::Draw);
        assert_eq!(scores.wins(PlayerId::One), 0);
        assert_eq!(scores.wins(PlayerId::Two), 0);
        assert_eq!(scores.draws(), 1);
    }

    #[test]
    fn mixed_results_accumulate() {
        let mut scores = ScoreTracker::new();
        let results = [
            Outcome::Player1Wins,
            Outcome::Draw,
            Outcome::Player2Wins,
            Outcome::Player1Wins,
            Outcome::Draw,
            Outcome::Player1Wins,
        ];
        for outcome in results {
            scores.record(outcome);
        }
        let snap = scores.snapshot();
        assert_eq!((snap.player1_wins, snap.player2_wins, snap.draws), (3, 1, 2));
        assert_eq!(scores.rounds(), results.len() as u32);
    }
}
