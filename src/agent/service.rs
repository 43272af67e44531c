//! Decision façade shared by every connection
//!
//! Resolves who is asking, runs the configured strategy inside that
//! agent's single store update, and clamps the answer to a legal move.

use std::sync::Arc;

use crate::agent::store::AgentMemoryStore;
use crate::agent::{Mode, Strategy, StrategyKind};
use crate::core::config::{AgentConfig, ChaseConfig};
use crate::core::types::AgentId;
use crate::sensing::direction::Direction;
use crate::sensing::identity::IdentityResolver;
use crate::sensing::snapshot::SensorySnapshot;

/// Outcome of one decision call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub agent: AgentId,
    pub direction: Direction,
    /// Mode the agent is in for its next call
    pub mode: Mode,
}

pub struct DecisionService {
    store: Arc<AgentMemoryStore>,
    strategy: Box<dyn Strategy>,
    resolver: IdentityResolver,
}

impl DecisionService {
    pub fn new(
        store: Arc<AgentMemoryStore>,
        strategy: Box<dyn Strategy>,
        resolver: IdentityResolver,
    ) -> Self {
        Self {
            store,
            strategy,
            resolver,
        }
    }

    /// Build from configuration; `seed` overrides `agent.seed`
    pub fn from_config(config: &ChaseConfig, seed: u64) -> Self {
        let strategy = config.agent.strategy.build(&config.navigator);
        let resolver = IdentityResolver::new(AgentId::new(
            config.navigator.fallback_agent_id.clone(),
        ));
        Self::new(Arc::new(AgentMemoryStore::new(seed)), strategy, resolver)
    }

    /// Navigator with default tuning
    pub fn with_seed(seed: u64) -> Self {
        let config = ChaseConfig {
            agent: AgentConfig {
                strategy: StrategyKind::Navigator,
                seed: Some(seed),
            },
            ..Default::default()
        };
        Self::from_config(&config, seed)
    }

    pub fn store(&self) -> &Arc<AgentMemoryStore> {
        &self.store
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn decide(&self, snapshot: &SensorySnapshot) -> Decision {
        let agent = self.resolver.resolve(snapshot);
        let free = snapshot.free_directions();

        let (direction, mode) = self.store.update(&agent, |memory, rng| {
            let previous_direction = memory.last_direction;
            let mut direction = self.strategy.decide(memory, snapshot, rng);
            if direction.is_movement() && !free.contains(direction) {
                tracing::warn!(
                    "{} chose blocked move {} for {}; answering Stay",
                    self.strategy.name(),
                    direction,
                    agent
                );
                // Stay is recorded as no movement: the move never happened
                memory.last_direction = previous_direction;
                direction = Direction::Stay;
            }
            (direction, memory.mode)
        });

        tracing::debug!(
            "turn {} agent {} at {} free {} -> {} ({:?})",
            snapshot.turn,
            agent,
            snapshot.self_position,
            free,
            direction,
            mode
        );

        Decision {
            agent,
            direction,
            mode,
        }
    }
}
