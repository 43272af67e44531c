//! Decision strategies and the per-agent state they share
//!
//! `Navigator` is the real agent; `RandomWalker` and `StraightRunner` are
//! baselines served through the same interface.

pub mod greedy;
pub mod memory;
pub mod navigator;
pub mod oscillation;
pub mod random;
pub mod service;
pub mod simple;
pub mod store;
pub mod stuck;
pub mod wall_follow;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::config::NavigatorConfig;
use crate::sensing::direction::Direction;
use crate::sensing::snapshot::SensorySnapshot;

pub use memory::{AgentMemory, Mode};
pub use navigator::Navigator;
pub use random::{RandomSource, ScriptedRandom};
pub use service::{Decision, DecisionService};
pub use simple::{RandomWalker, StraightRunner};
pub use store::AgentMemoryStore;

/// One decision per call, from a snapshot and the caller's memory
///
/// Implementations record the turn into `memory` themselves and must only
/// return `Stay` or a direction the snapshot reports as free.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn decide(
        &self,
        memory: &mut AgentMemory,
        snapshot: &SensorySnapshot,
        rng: &mut dyn RandomSource,
    ) -> Direction;
}

/// Strategy selectable from configuration or the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    Navigator,
    Random,
    Straight,
}

impl StrategyKind {
    pub fn build(&self, navigator: &NavigatorConfig) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Navigator => Box::new(Navigator::new(navigator)),
            StrategyKind::Random => Box::new(RandomWalker),
            StrategyKind::Straight => Box::new(StraightRunner),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Navigator => "navigator",
            StrategyKind::Random => "random",
            StrategyKind::Straight => "straight",
        };
        f.write_str(name)
    }
}
