use std::fmt;

use lightcycle_core::{GridCoordinate, GridDimensions, Outcome, PlayerId};

use crate::agent::Agent;
use crate::occupancy::Occupancy;

/// Why a cycle was eliminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionCause {
    /// Left the arena.
    Wall,
    /// Entered a trail cell. `owner` is the cycle itself for self-collisions.
    Trail { owner: PlayerId },
    /// Both heads landed on the same fresh cell.
    HeadOn,
}

impl fmt::Display for CollisionCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wall => write!(f, "wall"),
            Self::Trail { owner } => write!(f, "{owner} trail"),
            Self::HeadOn => write!(f, "head-on"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elimination {
    pub player: PlayerId,
    pub cause: CollisionCause,
    pub at: GridCoordinate,
}

/// Cycles eliminated on one tick. Empty means the round continues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EliminationSet {
    eliminations: Vec<Elimination>,
}

impl EliminationSet {
    pub fn is_empty(&self) -> bool {
        self.eliminations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.eliminations.len()
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.eliminations.iter().any(|e| e.player == player)
    }

    pub fn get(&self, player: PlayerId) -> Option<&Elimination> {
        self.eliminations.iter().find(|e| e.player == player)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Elimination> {
        self.eliminations.iter()
    }

    fn insert(&mut self, elimination: Elimination) {
        if !self.contains(elimination.player) {
            self.eliminations.push(elimination);
        }
    }

    /// Round result implied by this set, `None` when nobody was eliminated.
    pub fn outcome(&self) -> Option<Outcome> {
        match (self.contains(PlayerId::One), self.contains(PlayerId::Two)) {
            (false, false) => None,
            (true, true) => Some(Outcome::Draw),
            (true, false) => Some(Outcome::win_for(PlayerId::Two)),
            (false, true) => Some(Outcome::win_for(PlayerId::One)),
        }
    }
}

/// Check if a cycle's head has left the arena.
pub fn check_arena_boundary(agent: &Agent, grid: GridDimensions) -> bool {
    !grid.contains(agent.position())
}

/// Decide which cycles die this tick.
///
/// `occupancy` must describe the trails as they were before this tick's advance; every
/// agent is checked against that same snapshot so simultaneous crashes are all caught
/// regardless of evaluation order.
pub fn evaluate(
    agents: &[Agent],
    occupancy: &impl Occupancy,
    grid: GridDimensions,
) -> EliminationSet {
    let mut eliminated = EliminationSet::default();

    for agent in agents {
        let head = agent.position();
        let cause = if check_arena_boundary(agent, grid) {
            Some(CollisionCause::Wall)
        } else {
            occupancy
                .owner_of(head)
                .map(|owner| CollisionCause::Trail { owner })
        };
        if let Some(cause) = cause {
            eliminated.insert(Elimination {
                player: agent.id(),
                cause,
                at: head,
            });
        }
    }

    // Two heads entering the same empty cell are invisible to the occupancy lookup.
    for (i, a) in agents.iter().enumerate() {
        for b in &agents[i + 1..] {
            if a.position() == b.position() {
                for agent in [a, b] {
                    eliminated.insert(Elimination {
                        player: agent.id(),
                        cause: CollisionCause::HeadOn,
                        at: agent.position(),
                    });
                }
            }
        }
    }

    eliminated
}

#[cfg(test)]
mod tests {
    use lightcycle_core::{Direction, PlayerColor};

    use super::*;
    use crate::occupancy::{LinearOccupancy, TrailOccupancy};

    fn agent(id: PlayerId, col: i32, row: i32, heading: Direction) -> Agent {
        Agent::new(
            id,
            PlayerColor::for_player(id),
            GridCoordinate::new(col, row),
            heading,
        )
    }

    /// Advance both agents once and evaluate against the pre-advance occupancy.
    fn step(agents: &mut [Agent; 2], grid: GridDimensions) -> EliminationSet {
        let mut occupancy = TrailOccupancy::new();
        occupancy.rebuild(&agents[..]);
        for a in agents.iter_mut() {
            a.advance();
        }
        evaluate(&agents[..], &occupancy, grid)
    }

    #[test]
    fn open_field_eliminates_nobody() {
        let grid = GridDimensions::new(10, 10);
        let mut agents = [
            agent(PlayerId::One, 1, 1, Direction::Right),
            agent(PlayerId::Two, 8, 8, Direction::Left),
        ];
        let result = step(&mut agents, grid);
        assert!(result.is_empty());
        assert_eq!(result.outcome(), None);
    }

    #[test]
    fn each_wall_is_lethal() {
        let grid = GridDimensions::new(10, 10);
        let cases = [
            (0, 5, Direction::Left, GridCoordinate::new(-1, 5)),
            (9, 5, Direction::Right, GridCoordinate::new(10, 5)),
            (5, 0, Direction::Up, GridCoordinate::new(5, -1)),
            (5, 9, Direction::Down, GridCoordinate::new(5, 10)),
        ];
        for (col, row, heading, expected) in cases {
            let mut agents = [
                agent(PlayerId::One, col, row, heading),
                agent(PlayerId::Two, 2, 2, Direction::Down),
            ];
            let result = step(&mut agents, grid);
            let hit = result.get(PlayerId::One).expect("P1 should hit the wall");
            assert_eq!(hit.cause, CollisionCause::Wall);
            assert_eq!(hit.at, expected);
            assert!(!result.contains(PlayerId::Two));
            assert_eq!(result.outcome(), Some(Outcome::Player2Wins));
        }
    }

    #[test]
    fn entering_opponent_trail_reports_owner() {
        let grid = GridDimensions::new(10, 10);
        let mut agents = [
            agent(PlayerId::One, 4, 5, Direction::Right),
            agent(PlayerId::Two, 5, 5, Direction::Down),
        ];
        let result = step(&mut agents, grid);
        assert_eq!(
            result.get(PlayerId::One).map(|e| e.cause),
            Some(CollisionCause::Trail {
                owner: PlayerId::Two
            })
        );
        assert_eq!(result.outcome(), Some(Outcome::Player2Wins));
    }

    #[test]
    fn same_cell_arrival_is_a_head_on_draw() {
        let grid = GridDimensions::new(10, 10);
        let mut agents = [
            agent(PlayerId::One, 3, 5, Direction::Right),
            agent(PlayerId::Two, 5, 5, Direction::Left),
        ];
        let result = step(&mut agents, grid);
        assert_eq!(result.len(), 2);
        for e in result.iter() {
            assert_eq!(e.cause, CollisionCause::HeadOn);
            assert_eq!(e.at, GridCoordinate::new(4, 5));
        }
        assert_eq!(result.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn swapping_cells_kills_both_through_trails() {
        let grid = GridDimensions::new(10, 10);
        let mut agents = [
            agent(PlayerId::One, 4, 5, Direction::Right),
            agent(PlayerId::Two, 5, 5, Direction::Left),
        ];
        let result = step(&mut agents, grid);
        assert_eq!(result.outcome(), Some(Outcome::Draw));
        assert!(
            result
                .iter()
                .all(|e| matches!(e.cause, CollisionCause::Trail { .. }))
        );
    }

    #[test]
    fn hash_and_linear_occupancy_agree() {
        let grid = GridDimensions::new(10, 10);
        let mut agents = [
            agent(PlayerId::One, 2, 2, Direction::Right),
            agent(PlayerId::Two, 2, 4, Direction::Up),
        ];
        let mut occupancy = TrailOccupancy::new();
        occupancy.rebuild(&agents);
        for a in agents.iter_mut() {
            a.advance();
        }
        let fast = evaluate(&agents, &occupancy, grid);
        let slow = evaluate(&agents, &LinearOccupancy::new(&agents), grid);
        assert_eq!(fast, slow);
    }

    #[test]
    fn cause_display() {
        assert_eq!(CollisionCause::Wall.to_string(), "wall");
        assert_eq!(
            CollisionCause::Trail {
                owner: PlayerId::One
            }
            .to_string(),
            "P1 trail"
        );
        assert_eq!(CollisionCause::HeadOn.to_string(), "head-on");
    }
}
