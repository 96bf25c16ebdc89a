pub mod agent;
pub mod arena;
pub mod collision;
pub mod config;
pub mod input;
pub mod occupancy;
pub mod ports;
pub mod scoring;

use std::time::Duration;

use serde::Serialize;

use lightcycle_core::{GridDimensions, Outcome, PlayerId, RoundEvent, RoundState};

use agent::Agent;
use arena::SpawnPoint;
use config::{ArenaConfig, ConfigError};
use input::{InputArbiter, KeyOutcome};
use occupancy::TrailOccupancy;
use ports::Ports;
use scoring::ScoreTracker;

/// Borrowed view of everything that determines the next tick, for serialization.
#[derive(Serialize)]
struct ArenaSnapshot<'a> {
    state: RoundState,
    round: u32,
    tick: u32,
    agents: &'a [Agent; 2],
    scores: &'a ScoreTracker,
    last_outcome: Option<Outcome>,
}

/// Owns both cycles, the trail occupancy and the score tracker, and moves them
/// through the `Idle -> Running -> Ended -> Running ...` round lifecycle.
///
/// Every operation returns the events it produced. Operations that are not valid in
/// the current state do nothing and return no events.
pub struct RoundController {
    config: ArenaConfig,
    grid: GridDimensions,
    spawns: [SpawnPoint; 2],
    agents: [Agent; 2],
    occupancy: TrailOccupancy,
    arbiter: InputArbiter,
    scores: ScoreTracker,
    state: RoundState,
    tick: u32,
    round: u32,
    last_outcome: Option<Outcome>,
}

impl RoundController {
    pub fn new(config: ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = config.grid();
        let spawns = PlayerId::ALL.map(|player| config.spawn(player));
        let agents = PlayerId::ALL.map(|player| {
            let spawn = spawns[player.index()];
            Agent::new(player, config.color(player), spawn.start, spawn.heading)
        });
        let mut occupancy = TrailOccupancy::new();
        occupancy.rebuild(&agents);
        let arbiter = InputArbiter::from_config(&config);

        tracing::debug!(
            width = grid.width,
            height = grid.height,
            tick_ms = config.tick_period_ms,
            "Arena created"
        );

        Ok(Self {
            config,
            grid,
            spawns,
            agents,
            occupancy,
            arbiter,
            scores: ScoreTracker::new(),
            state: RoundState::Idle,
            tick: 0,
            round: 0,
            last_outcome: None,
        })
    }

    /// Begin a new round. Only actionable while `Idle` or `Ended`.
    pub fn start(&mut self) -> Vec<RoundEvent> {
        if !self.state.accepts_start() {
            tracing::debug!(round = self.round, "Ignoring start while running");
            return Vec::new();
        }

        for (agent, spawn) in self.agents.iter_mut().zip(self.spawns) {
            agent.reset(spawn.start, spawn.heading);
        }
        self.occupancy.rebuild(&self.agents);
        self.tick = 0;
        self.round += 1;
        self.last_outcome = None;
        self.state = RoundState::Running;

        tracing::info!(round = self.round, "Round started");
        vec![RoundEvent::RoundStarted { round: self.round }]
    }

    /// Host control surface alias for [`RoundController::start`].
    pub fn request_start(&mut self) -> Vec<RoundEvent> {
        self.start()
    }

    /// Advance the simulation one fixed step. Only meaningful while `Running`.
    pub fn tick(&mut self) -> Vec<RoundEvent> {
        if self.state != RoundState::Running {
            return Vec::new();
        }

        for agent in &mut self.agents {
            agent.advance();
        }

        // Occupancy still holds the pre-advance trails here.
        let eliminated = collision::evaluate(&self.agents, &self.occupancy, self.grid);
        for agent in &self.agents {
            self.occupancy.mark(agent.position(), agent.id());
        }
        self.tick += 1;

        let mut events = vec![RoundEvent::FrameAdvanced { tick: self.tick }];

        if let Some(outcome) = eliminated.outcome() {
            for e in eliminated.iter() {
                tracing::info!(
                    round = self.round,
                    tick = self.tick,
                    player = %e.player,
                    cause = %e.cause,
                    col = e.at.col,
                    row = e.at.row,
                    "Cycle eliminated"
                );
            }
            self.state = RoundState::Ended;
            self.scores.record(outcome);
            self.last_outcome = Some(outcome);
            tracing::info!(round = self.round, tick = self.tick, %outcome, "Round ended");

            events.push(RoundEvent::RoundEnded {
                round: self.round,
                outcome,
                scores: self.scores.snapshot(),
            });
        }

        events
    }

    /// Route a raw key code. Safe at any time: turns only queue a heading for the
    /// next tick, and the start key is honoured only between rounds.
    pub fn submit_key(&mut self, code: &str) -> Vec<RoundEvent> {
        match self.arbiter.handle_key(code, self.state, &mut self.agents) {
            KeyOutcome::Ignored => Vec::new(),
            KeyOutcome::TurnRejected { player, direction } => {
                tracing::trace!(%player, ?direction, "Turn rejected");
                Vec::new()
            },
            KeyOutcome::TurnAccepted { player, direction } => {
                tracing::trace!(%player, ?direction, "Turn queued");
                vec![RoundEvent::TurnAccepted { player, direction }]
            },
            KeyOutcome::StartRequested => self.start(),
        }
    }

    /// Fan freshly produced events out to the host's collaborators. Frames are drawn
    /// from current agent state, so call this right after the operation that returned
    /// `events`.
    pub fn dispatch<P: Ports + ?Sized>(&self, events: &[RoundEvent], ports: &mut P) {
        for event in events {
            match *event {
                RoundEvent::RoundStarted { .. } => {
                    ports.on_round_started();
                    ports.present_frame(&self.agents, self.grid, self.config.cell_size);
                },
                RoundEvent::FrameAdvanced { .. } => {
                    ports.present_frame(&self.agents, self.grid, self.config.cell_size);
                },
                RoundEvent::TurnAccepted { player, .. } => ports.on_turn_accepted(player),
                RoundEvent::RoundEnded {
                    outcome, scores, ..
                } => {
                    ports.on_round_ended(outcome);
                    ports.show_scores(scores);
                },
            }
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RoundState::Running
    }

    pub fn agents(&self) -> &[Agent; 2] {
        &self.agents
    }

    pub fn agent(&self, player: PlayerId) -> &Agent {
        &self.agents[player.index()]
    }

    pub fn grid(&self) -> GridDimensions {
        self.grid
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn scores(&self) -> &ScoreTracker {
        &self.scores
    }

    /// Ticks completed in the current (or last) round.
    pub fn tick_count(&self) -> u32 {
        self.tick
    }

    /// 1-based number of the current (or last) round; 0 before the first start.
    pub fn round_number(&self) -> u32 {
        self.round
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    pub fn tick_period(&self) -> Duration {
        self.config.tick_period()
    }

    /// MessagePack encoding of the simulation state. Two controllers fed the same
    /// inputs produce identical bytes.
    pub fn serialize_state(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec(&ArenaSnapshot {
            state: self.state,
            round: self.round,
            tick: self.tick,
            agents: &self.agents,
            scores: &self.scores,
            last_outcome: self.last_outcome,
        })
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use lightcycle_core::{
        Direction, GridCoordinate, GridDimensions, Outcome, PlayerId, RoundEvent, ScoreSnapshot,
    };

    use crate::RoundController;
    use crate::agent::Agent;
    use crate::config::ArenaConfig;
    use crate::ports::{AudioPort, RenderPort, ScoreboardPort};

    /// Arena config with explicit start cells and headings.
    pub fn arena_config(
        width: u32,
        height: u32,
        p1: (i32, i32, Direction),
        p2: (i32, i32, Direction),
    ) -> ArenaConfig {
        let mut config = ArenaConfig {
            arena_width: width,
            arena_height: height,
            ..ArenaConfig::default()
        };
        for (player, (col, row, heading)) in PlayerId::ALL.into_iter().zip([p1, p2]) {
            let seat = config.player_mut(player);
            seat.start = Some(GridCoordinate::new(col, row));
            seat.heading = Some(heading);
        }
        config
    }

    /// 10x10 arena, P1 at (1,5) heading right and P2 at (8,5) heading left.
    pub fn facing_config() -> ArenaConfig {
        arena_config(10, 10, (1, 5, Direction::Right), (8, 5, Direction::Left))
    }

    pub fn make_controller(config: ArenaConfig) -> RoundController {
        RoundController::new(config).expect("test config must be valid")
    }

    /// Start a round, submit `keys`, then tick until it ends or `max_ticks` pass.
    /// Returns the outcome, if the round ended.
    pub fn play_round(
        controller: &mut RoundController,
        keys: &[&str],
        max_ticks: u32,
    ) -> Option<Outcome> {
        controller.request_start();
        for key in keys {
            controller.submit_key(key);
        }
        for _ in 0..max_ticks {
            controller.tick();
            if !controller.is_running() {
                break;
            }
        }
        controller.last_outcome()
    }

    /// Run one round from a `(tick, key)` script, where keys tagged `n` are submitted
    /// after `n` ticks have completed. Returns the serialized state after every tick
    /// and every emitted event.
    pub fn run_script(
        config: ArenaConfig,
        script: &[(u32, &str)],
        max_ticks: u32,
    ) -> (Vec<Vec<u8>>, Vec<RoundEvent>) {
        let mut controller = make_controller(config);
        let mut states = Vec::new();
        let mut events = controller.request_start();
        for tick in 0..max_ticks {
            for (_, key) in script.iter().filter(|(at, _)| *at == tick) {
                events.extend(controller.submit_key(key));
            }
            events.extend(controller.tick());
            states.push(
                controller
                    .serialize_state()
                    .expect("state serialization must succeed"),
            );
            if !controller.is_running() {
                break;
            }
        }
        (states, events)
    }

    /// Port implementation that records every call.
    #[derive(Debug, Default)]
    pub struct RecordingPorts {
        pub frames: Vec<Vec<GridCoordinate>>,
        pub grids: Vec<GridDimensions>,
        pub turns: Vec<PlayerId>,
        pub rounds_started: u32,
        pub outcomes: Vec<Outcome>,
        pub scoreboards: Vec<ScoreSnapshot>,
    }

    impl RenderPort for RecordingPorts {
        fn present_frame(&mut self, agents: &[Agent], grid: GridDimensions, _cell_size: u32) {
            self.frames.push(agents.iter().map(Agent::position).collect());
            self.grids.push(grid);
        }
    }

    impl AudioPort for RecordingPorts {
        fn on_turn_accepted(&mut self, player: PlayerId) {
            self.turns.push(player);
        }

        fn on_round_started(&mut self) {
            self.rounds_started += 1;
        }

        fn on_round_ended(&mut self, outcome: Outcome) {
            self.outcomes.push(outcome);
        }
    }

    impl ScoreboardPort for RecordingPorts {
        fn show_scores(&mut self, scores: ScoreSnapshot) {
            self.scoreboards.push(scores);
        }
    }
}
