//! JSON records exchanged with the game engine
//!
//! Request shape:
//! `{ turn, me: {x, y}, neighbors: [{dir, free}], cheeses: [{x, y}], mice: [{id, x, y}] }`
//!
//! Response shape: `{ "direction": "N" | "E" | "S" | "W" | "X" }`

use serde::{Deserialize, Serialize};

use crate::core::error::{ChaseError, Result};
use crate::core::types::{AgentId, Position, Turn};
use crate::sensing::direction::Direction;
use crate::sensing::snapshot::{NeighborCell, RosterEntry, SensorySnapshot};

/// Grid point; extra fields such as `health` or `mood` are ignored
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WirePoint {
    pub x: i32,
    pub y: i32,
}

impl From<WirePoint> for Position {
    fn from(point: WirePoint) -> Self {
        Position::new(point.x, point.y)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireNeighbor {
    pub dir: String,
    /// Missing means blocked
    #[serde(default)]
    pub free: bool,
}

/// Mouse ids arrive as strings from the web engine and as numbers from
/// older harnesses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for AgentId {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(text) => AgentId(text),
            WireId::Number(n) => AgentId(n.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMouse {
    pub id: WireId,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenseRequest {
    pub turn: Turn,
    pub me: WirePoint,
    pub neighbors: Vec<WireNeighbor>,
    pub cheeses: Vec<WirePoint>,
    pub mice: Vec<WireMouse>,
}

impl SenseRequest {
    /// Parse and validate a request body
    pub fn parse(body: &[u8]) -> Result<SensorySnapshot> {
        let request: SenseRequest = serde_json::from_slice(body)?;
        SensorySnapshot::try_from(request)
    }
}

impl TryFrom<SenseRequest> for SensorySnapshot {
    type Error = ChaseError;

    fn try_from(request: SenseRequest) -> Result<Self> {
        let mut neighbors = Vec::with_capacity(request.neighbors.len());
        for neighbor in &request.neighbors {
            let direction: Direction = neighbor.dir.parse()?;
            if direction.is_movement() {
                neighbors.push(NeighborCell::new(direction, neighbor.free));
            }
        }

        Ok(SensorySnapshot {
            turn: request.turn,
            self_position: request.me.into(),
            neighbors,
            cheese_goals: request.cheeses.into_iter().map(Position::from).collect(),
            other_agents: request
                .mice
                .into_iter()
                .map(|mouse| RosterEntry {
                    id: mouse.id.into(),
                    position: Position::new(mouse.x, mouse.y),
                })
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideResponse {
    pub direction: Direction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
