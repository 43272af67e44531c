//! Per-turn sensory input of one mouse
//!
//! A snapshot is built once at the transport boundary and never mutated
//! while a decision is being made.

use crate::core::types::{AgentId, Position, Turn};
use crate::sensing::direction::{Direction, DirectionSet};

/// Openness of the cell adjacent in one cardinal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborCell {
    pub direction: Direction,
    pub is_free: bool,
}

impl NeighborCell {
    pub fn new(direction: Direction, is_free: bool) -> Self {
        Self { direction, is_free }
    }
}

/// Another mouse on the board (the caller itself is usually listed too)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: AgentId,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SensorySnapshot {
    pub turn: Turn,
    pub self_position: Position,
    pub neighbors: Vec<NeighborCell>,
    /// Goal cells, in the order the game reported them
    pub cheese_goals: Vec<Position>,
    pub other_agents: Vec<RosterEntry>,
}

impl SensorySnapshot {
    pub fn new(turn: Turn, self_position: Position) -> Self {
        Self {
            turn,
            self_position,
            ..Default::default()
        }
    }

    /// Report the given directions as open and the remaining cardinals as blocked
    pub fn with_free(mut self, free: &[Direction]) -> Self {
        self.neighbors = Direction::CARDINALS
            .into_iter()
            .map(|dir| NeighborCell::new(dir, free.contains(&dir)))
            .collect();
        self
    }

    pub fn with_cheese(mut self, goal: Position) -> Self {
        self.cheese_goals.push(goal);
        self
    }

    pub fn with_agent(mut self, id: impl Into<AgentId>, position: Position) -> Self {
        self.other_agents.push(RosterEntry {
            id: id.into(),
            position,
        });
        self
    }

    /// Directions whose neighbor cell is open
    ///
    /// The first entry for a direction wins; `Stay` entries are ignored.
    pub fn free_directions(&self) -> DirectionSet {
        let mut seen = DirectionSet::empty();
        let mut free = DirectionSet::empty();
        for cell in &self.neighbors {
            if !cell.direction.is_movement() || seen.contains(cell.direction) {
                continue;
            }
            seen.insert(cell.direction);
            if cell.is_free {
                free.insert(cell.direction);
            }
        }
        free
    }
}
