//! One-step greedy approach toward the nearest cheese
//!
//! No search: the selector only ever looks at the two moves that shrink
//! the Manhattan distance to the closest goal.

use crate::agent::random::{pick_direction, RandomSource};
use crate::core::types::Position;
use crate::sensing::direction::{Direction, DirectionSet};

/// Closest goal by Manhattan distance; the earliest listed wins ties
pub fn nearest_goal(from: Position, goals: &[Position]) -> Option<Position> {
    // min_by_key returns the first of equal minima
    goals.iter().copied().min_by_key(|goal| from.manhattan(goal))
}

/// Distance-reducing moves toward `goal`, dominant axis first
///
/// An axis with zero delta contributes nothing; on equal deltas the
/// horizontal axis leads.
pub fn approach_candidates(from: Position, goal: Position) -> Vec<Direction> {
    let dx = i64::from(goal.x) - i64::from(from.x);
    let dy = i64::from(goal.y) - i64::from(from.y);

    let horizontal = match dx.signum() {
        1 => Some(Direction::East),
        -1 => Some(Direction::West),
        _ => None,
    };
    let vertical = match dy.signum() {
        1 => Some(Direction::South),
        -1 => Some(Direction::North),
        _ => None,
    };

    let ordered = if dx.abs() >= dy.abs() {
        [horizontal, vertical]
    } else {
        [vertical, horizontal]
    };
    ordered.into_iter().flatten().collect()
}

/// Greedy move for this turn
///
/// `Stay` without goals. When neither approach move is open, a random open
/// direction keeps the mouse from freezing against a wall.
pub fn greedy_step(
    from: Position,
    goals: &[Position],
    free: DirectionSet,
    rng: &mut dyn RandomSource,
) -> Direction {
    let Some(goal) = nearest_goal(from, goals) else {
        return Direction::Stay;
    };

    approach_candidates(from, goal)
        .into_iter()
        .find(|dir| free.contains(*dir))
        .unwrap_or_else(|| pick_direction(free, rng))
}
