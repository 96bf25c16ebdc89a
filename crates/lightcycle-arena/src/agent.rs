use serde::{Deserialize, Serialize};

use lightcycle_core::{Direction, GridCoordinate, PlayerColor, PlayerId};

/// One light cycle: head position, heading and the trail it has laid this round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    id: PlayerId,
    color: PlayerColor,
    position: GridCoordinate,
    heading: Direction,
    /// Turn requested since the last tick; applied by the next `advance`.
    pending: Option<Direction>,
    /// Every cell occupied this round, in traversal order. Last entry is the head.
    trail: Vec<GridCoordinate>,
}

impl Agent {
    pub fn new(
        id: PlayerId,
        color: PlayerColor,
        start: GridCoordinate,
        heading: Direction,
    ) -> Self {
        Self {
            id,
            color,
            position: start,
            heading,
            pending: None,
            trail: vec![start],
        }
    }

    /// Put the cycle back on its start cell with a single-cell trail.
    pub fn reset(&mut self, start: GridCoordinate, heading: Direction) {
        self.position = start;
        self.heading = heading;
        self.pending = None;
        self.trail.clear();
        self.trail.push(start);
    }

    /// Queue a turn for the next tick.
    ///
    /// Returns `false` (and changes nothing) when the turn would stay on the current
    /// axis, which covers both reversals and "turns" that keep going straight, or when
    /// it repeats the turn already queued.
    pub fn set_heading(&mut self, direction: Direction) -> bool {
        if direction == Direction::None || direction.axis() == self.heading.axis() {
            return false;
        }
        if self.pending == Some(direction) {
            return false;
        }
        self.pending = Some(direction);
        true
    }

    /// Apply the queued turn, move one cell and extend the trail.
    pub fn advance(&mut self) -> GridCoordinate {
        if let Some(next) = self.pending.take() {
            self.heading = next;
        }
        self.position = self.position.step(self.heading);
        self.trail.push(self.position);
        self.position
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn color(&self) -> PlayerColor {
        self.color
    }

    pub fn position(&self) -> GridCoordinate {
        self.position
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn pending_heading(&self) -> Option<Direction> {
        self.pending
    }

    pub fn trail(&self) -> &[GridCoordinate] {
        &self.trail
    }

    /// Trail cells behind the head.
    pub fn body(&self) -> &[GridCoordinate] {
        &self.trail[..self.trail.len().saturating_sub(1)]
    }
}
