use std::collections::HashMap;

use lightcycle_core::{GridCoordinate, PlayerId};

use crate::agent::Agent;

/// Read-only view of the cells that are blocked for collision purposes.
pub trait Occupancy {
    /// Whose trail covers `cell`, if anyone's.
    fn owner_of(&self, cell: GridCoordinate) -> Option<PlayerId>;

    fn is_occupied(&self, cell: GridCoordinate) -> bool {
        self.owner_of(cell).is_some()
    }
}

/// Hash-backed union of both trails, excluding the heads laid this tick.
///
/// Seeded from the agents at round start, then extended with the new heads after
/// every collision evaluation, so each lookup and update is O(1) amortized no matter
/// how long the trails get.
#[derive(Debug, Clone, Default)]
pub struct TrailOccupancy {
    cells: HashMap<GridCoordinate, PlayerId>,
}

impl TrailOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with every trail cell of `agents`.
    pub fn rebuild(&mut self, agents: &[Agent]) {
        self.cells.clear();
        for agent in agents {
            for &cell in agent.trail() {
                self.cells.entry(cell).or_insert(agent.id());
            }
        }
    }

    /// Record a cell as trail. A cell keeps its first owner.
    pub fn mark(&mut self, cell: GridCoordinate, owner: PlayerId) {
        self.cells.entry(cell).or_insert(owner);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl Occupancy for TrailOccupancy {
    fn owner_of(&self, cell: GridCoordinate) -> Option<PlayerId> {
        self.cells.get(&cell).copied()
    }
}

/// Linear scan over every agent's trail minus its head. Reference behaviour for tests;
/// cost grows with total trail length on every query.
#[derive(Debug, Clone, Copy)]
pub struct LinearOccupancy<'a> {
    agents: &'a [Agent],
}

impl<'a> LinearOccupancy<'a> {
    pub fn new(agents: &'a [Agent]) -> Self {
        Self { agents }
    }
}

impl Occupancy for LinearOccupancy<'_> {
    fn owner_of(&self, cell: GridCoordinate) -> Option<PlayerId> {
        self.agents
            .iter()
            .find(|agent| agent.body().contains(&cell))
            .map(Agent::id)
    }
}
