//! Baseline opponents: a random walker and a straight-line runner
//!
//! Neither looks at cheese. They exist to give the navigator something
//! to race against.

use crate::agent::memory::AgentMemory;
use crate::agent::random::{pick_direction, RandomSource};
use crate::agent::Strategy;
use crate::sensing::direction::Direction;
use crate::sensing::snapshot::SensorySnapshot;

/// Uniformly random open move each turn
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomWalker;

impl Strategy for RandomWalker {
    fn name(&self) -> &'static str {
        "random"
    }

    fn decide(
        &self,
        memory: &mut AgentMemory,
        snapshot: &SensorySnapshot,
        rng: &mut dyn RandomSource,
    ) -> Direction {
        let direction = pick_direction(snapshot.free_directions(), rng);
        memory.record(direction, snapshot.self_position);
        direction
    }
}

/// Keeps its heading until blocked, then picks a new random open heading
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightRunner;

impl Strategy for StraightRunner {
    fn name(&self) -> &'static str {
        "straight"
    }

    fn decide(
        &self,
        memory: &mut AgentMemory,
        snapshot: &SensorySnapshot,
        rng: &mut dyn RandomSource,
    ) -> Direction {
        let free = snapshot.free_directions();
        let direction = match memory.last_direction {
            Some(heading) if free.contains(heading) => heading,
            _ => pick_direction(free, rng),
        };
        memory.record(direction, snapshot.self_position);
        direction
    }
}
