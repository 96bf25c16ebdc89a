use std::collections::HashMap;

use lightcycle_core::{Direction, PlayerId, RoundState};

use crate::agent::Agent;
use crate::config::ArenaConfig;

/// What a recognized key code asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Turn {
        player: PlayerId,
        direction: Direction,
    },
    Start,
}

/// Result of routing one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    TurnAccepted {
        player: PlayerId,
        direction: Direction,
    },
    TurnRejected {
        player: PlayerId,
        direction: Direction,
    },
    StartRequested,
}

/// Maps raw key codes to heading changes on the right cycle.
#[derive(Debug, Clone)]
pub struct InputArbiter {
    bindings: HashMap<String, (PlayerId, Direction)>,
    start_key: String,
}

impl InputArbiter {
    /// Build the key table from a config. The config is expected to be validated, so
    /// the two control schemes do not overlap.
    pub fn from_config(config: &ArenaConfig) -> Self {
        let mut bindings = HashMap::new();
        for player in PlayerId::ALL {
            for (code, direction) in config.controls(player).bindings() {
                bindings.insert(code.to_string(), (player, direction));
            }
        }
        Self {
            bindings,
            start_key: config.start_key.clone(),
        }
    }

    pub fn resolve(&self, code: &str) -> Option<InputAction> {
        if code == self.start_key {
            return Some(InputAction::Start);
        }
        self.bindings
            .get(code)
            .map(|&(player, direction)| InputAction::Turn { player, direction })
    }

    /// Route a key press. Turn keys only queue a heading on the owning cycle; the start
    /// key is reported back while a start would be actionable and ignored otherwise.
    pub fn handle_key(&self, code: &str, state: RoundState, agents: &mut [Agent]) -> KeyOutcome {
        match self.resolve(code) {
            None => KeyOutcome::Ignored,
            Some(InputAction::Start) if state.accepts_start() => KeyOutcome::StartRequested,
            Some(InputAction::Start) => KeyOutcome::Ignored,
            Some(InputAction::Turn { player, direction }) => {
                let Some(agent) = agents.iter_mut().find(|a| a.id() == player) else {
                    return KeyOutcome::Ignored;
                };
                if agent.set_heading(direction) {
                    KeyOutcome::TurnAccepted { player, direction }
                } else {
                    KeyOutcome::TurnRejected { player, direction }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use lightcycle_core::{GridCoordinate, PlayerColor};

    use super::*;

    fn setup() -> (InputArbiter, [Agent; 2]) {
        let arbiter = InputArbiter::from_config(&ArenaConfig::default());
        let agents = [
            Agent::new(
                PlayerId::One,
                PlayerColor::MAGENTA,
                GridCoordinate::new(10, 30),
                Direction::Right,
            ),
            Agent::new(
                PlayerId::Two,
                PlayerColor::CYAN,
                GridCoordinate::new(89, 30),
                Direction::Left,
            ),
        ];
        (arbiter, agents)
    }

    #[test]
    fn default_schemes_resolve_to_their_seat() {
        let (arbiter, _) = setup();
        assert_eq!(
            arbiter.resolve("KeyW"),
            Some(InputAction::Turn {
                player: PlayerId::One,
                direction: Direction::Up
            })
        );
        assert_eq!(
            arbiter.resolve("ArrowLeft"),
            Some(InputAction::Turn {
                player: PlayerId::Two,
                direction: Direction::Left
            })
        );
        assert_eq!(arbiter.resolve("Enter"), Some(InputAction::Start));
        assert_eq!(arbiter.resolve("KeyQ"), None);
    }

    #[test]
    fn turn_key_only_touches_its_own_cycle() {
        let (arbiter, mut agents) = setup();
        let outcome = arbiter.handle_key("KeyS", RoundState::Running, &mut agents);
        assert_eq!(
            outcome,
            KeyOutcome::TurnAccepted {
                player: PlayerId::One,
                direction: Direction::Down
            }
        );
        assert_eq!(agents[0].pending_heading(), Some(Direction::Down));
        assert_eq!(agents[1].pending_heading(), None);
    }

    #[test]
    fn reversal_is_reported_as_rejected() {
        let (arbiter, mut agents) = setup();
        let outcome = arbiter.handle_key("ArrowRight", RoundState::Running, &mut agents);
        assert_eq!(
            outcome,
            KeyOutcome::TurnRejected {
                player: PlayerId::Two,
                direction: Direction::Right
            }
        );
        assert_eq!(agents[1].pending_heading(), None);
    }

    #[test]
    fn start_key_depends_on_round_state() {
        let (arbiter, mut agents) = setup();
        assert_eq!(
            arbiter.handle_key("Enter", RoundState::Idle, &mut agents),
            KeyOutcome::StartRequested
        );
        assert_eq!(
            arbiter.handle_key("Enter", RoundState::Ended, &mut agents),
            KeyOutcome::StartRequested
        );
        assert_eq!(
            arbiter.handle_key("Enter", RoundState::Running, &mut agents),
            KeyOutcome::Ignored
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let (arbiter, mut agents) = setup();
        for code in ["", "Space", "keyw", "Escape"] {
            assert_eq!(
                arbiter.handle_key(code, RoundState::Running, &mut agents),
                KeyOutcome::Ignored
            );
        }
    }
}
