//! Stateful navigation engine - the mode controller
//!
//! Each call runs, in order:
//! 1. stuck counter update from the position history
//! 2. reversal filtering of the open directions
//! 3. dispatch on mode: greedy approach, or right-hand wall following
//! 4. mode transition check for the next call
//! 5. history update (last move, last position)
//!
//! The call that first pushes the stuck counter to the threshold still
//! answers greedily; the switch to WallFollow takes effect on the next call.

use crate::agent::greedy::greedy_step;
use crate::agent::memory::{AgentMemory, Mode};
use crate::agent::oscillation::filter_reversal;
use crate::agent::random::{pick_cardinal, RandomSource};
use crate::agent::stuck::next_stuck_count;
use crate::agent::wall_follow::right_hand_step;
use crate::agent::Strategy;
use crate::core::config::NavigatorConfig;
use crate::sensing::direction::{Direction, DirectionSet};
use crate::sensing::snapshot::SensorySnapshot;

#[derive(Debug, Clone)]
pub struct Navigator {
    stuck_threshold: u32,
    wall_follow_steps: u32,
}

impl Navigator {
    pub fn new(config: &NavigatorConfig) -> Self {
        Self {
            stuck_threshold: config.stuck_threshold,
            wall_follow_steps: config.wall_follow_steps,
        }
    }

    pub fn stuck_threshold(&self) -> u32 {
        self.stuck_threshold
    }

    pub fn wall_follow_steps(&self) -> u32 {
        self.wall_follow_steps
    }

    fn follow_wall(&self, memory: &mut AgentMemory, candidates: DirectionSet) -> Direction {
        let facing = memory.last_direction.unwrap_or(Direction::North);
        let direction = right_hand_step(facing, candidates);

        memory.wall_step_count += 1;
        if memory.wall_step_count >= self.wall_follow_steps {
            tracing::debug!(
                "WallFollow -> Greedy after {} steps",
                memory.wall_step_count
            );
            memory.enter_greedy();
        }
        direction
    }

    fn approach(
        &self,
        memory: &mut AgentMemory,
        snapshot: &SensorySnapshot,
        candidates: DirectionSet,
        rng: &mut dyn RandomSource,
    ) -> Direction {
        let direction = greedy_step(
            snapshot.self_position,
            &snapshot.cheese_goals,
            candidates,
            rng,
        );

        if memory.stuck_count >= self.stuck_threshold {
            tracing::debug!(
                "Greedy -> WallFollow at {} (stuck {})",
                snapshot.self_position,
                memory.stuck_count
            );
            let facing = match memory.last_direction {
                Some(dir) => dir,
                None => pick_cardinal(rng),
            };
            memory.enter_wall_follow(facing);
        }
        direction
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(&NavigatorConfig::default())
    }
}

impl Strategy for Navigator {
    fn name(&self) -> &'static str {
        "navigator"
    }

    fn decide(
        &self,
        memory: &mut AgentMemory,
        snapshot: &SensorySnapshot,
        rng: &mut dyn RandomSource,
    ) -> Direction {
        let here = snapshot.self_position;
        let free = snapshot.free_directions();

        memory.stuck_count = next_stuck_count(here, memory.last_position, memory.stuck_count);
        let candidates = filter_reversal(free, memory.last_direction);

        let direction = match memory.mode {
            Mode::WallFollow => self.follow_wall(memory, candidates),
            Mode::Greedy => self.approach(memory, snapshot, candidates, rng),
        };

        memory.record(direction, here);
        direction
    }
}
