//! Per-agent navigation state carried between turns

use serde::{Deserialize, Serialize};

use crate::core::types::Position;
use crate::sensing::direction::Direction;

/// Behavioral regime of the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Head straight for the nearest cheese
    #[default]
    Greedy,
    /// Right-hand wall following to escape a dead end
    WallFollow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgentMemory {
    /// Last movement returned (never `Stay`)
    pub last_direction: Option<Direction>,
    pub last_position: Option<Position>,
    /// Decaying count of turns without positional progress
    pub stuck_count: u32,
    pub mode: Mode,
    /// Calls spent in the current WallFollow episode; ignored in Greedy
    pub wall_step_count: u32,
}

impl AgentMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close out a decision: remember where we were and any move we made
    pub fn record(&mut self, direction: Direction, position: Position) {
        if direction.is_movement() {
            self.last_direction = Some(direction);
        }
        self.last_position = Some(position);
    }

    /// Switch into WallFollow with a fresh step budget
    pub fn enter_wall_follow(&mut self, facing_if_unset: Direction) {
        self.mode = Mode::WallFollow;
        self.wall_step_count = 0;
        if self.last_direction.is_none() {
            self.last_direction = Some(facing_if_unset);
        }
    }

    /// Hand control back to Greedy and forget accumulated stuck history
    pub fn enter_greedy(&mut self) {
        self.mode = Mode::Greedy;
        self.stuck_count = 0;
    }
}
