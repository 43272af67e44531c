//! Maps a snapshot to the memory key of the mouse that sent it
//!
//! The game world does not tell a mouse its own id; the roster lists every
//! mouse with its position, and the caller is the one standing on
//! `self_position`.

use crate::core::types::AgentId;
use crate::sensing::snapshot::SensorySnapshot;

#[derive(Debug, Clone)]
pub struct IdentityResolver {
    fallback: AgentId,
}

impl IdentityResolver {
    pub fn new(fallback: AgentId) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> &AgentId {
        &self.fallback
    }

    /// First roster entry standing on the caller's cell, else the fallback id
    ///
    /// Two mice sharing a cell are indistinguishable here; roster order decides.
    pub fn resolve(&self, snapshot: &SensorySnapshot) -> AgentId {
        snapshot
            .other_agents
            .iter()
            .find(|entry| entry.position == snapshot.self_position)
            .map(|entry| entry.id.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Position;

    fn resolver() -> IdentityResolver {
        IdentityResolver::new(AgentId::new("__solo__"))
    }

    #[test]
    fn test_resolves_by_position() {
        let snapshot = SensorySnapshot::new(1, Position::new(2, 3))
            .with_agent("a", Position::new(0, 0))
            .with_agent("b", Position::new(2, 3));
        assert_eq!(resolver().resolve(&snapshot), AgentId::new("b"));
    }

    #[test]
    fn test_empty_roster_uses_fallback() {
        let snapshot = SensorySnapshot::new(1, Position::new(2, 3));
        assert_eq!(resolver().resolve(&snapshot), AgentId::new("__solo__"));
    }

    #[test]
    fn test_roster_without_self_uses_fallback() {
        let snapshot =
            SensorySnapshot::new(1, Position::new(2, 3)).with_agent("a", Position::new(9, 9));
        assert_eq!(resolver().resolve(&snapshot), *resolver().fallback());
    }

    #[test]
    fn test_shared_cell_picks_first_listed() {
        let snapshot = SensorySnapshot::new(1, Position::new(1, 1))
            .with_agent("late", Position::new(1, 1))
            .with_agent("early", Position::new(1, 1));
        assert_eq!(resolver().resolve(&snapshot), AgentId::new("late"));
    }
}
