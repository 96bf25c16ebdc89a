//! Outbound collaborators. Drawing, sound and the scoreboard live outside the
//! simulation; the controller only ever calls into them, nothing flows back.

use lightcycle_core::{GridDimensions, Outcome, PlayerId, ScoreSnapshot};

use crate::agent::Agent;

pub trait RenderPort {
    /// Draw the current arena. Called at round start and after every tick.
    fn present_frame(&mut self, agents: &[Agent], grid: GridDimensions, cell_size: u32);
}

pub trait AudioPort {
    fn on_turn_accepted(&mut self, player: PlayerId);

    /// Background music cue.
    fn on_round_started(&mut self) {}

    /// Crash cue, fired exactly once per round end.
    fn on_round_ended(&mut self, outcome: Outcome);
}

pub trait ScoreboardPort {
    fn show_scores(&mut self, scores: ScoreSnapshot);
}

/// Everything a host has to provide to present a session.
pub trait Ports: RenderPort + AudioPort + ScoreboardPort {}

impl<T: RenderPort + AudioPort + ScoreboardPort + ?Sized> Ports for T {}
