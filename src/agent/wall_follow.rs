//! Right-hand-rule traversal

use crate::sensing::direction::{Direction, DirectionSet};

/// Order in which the right-hand rule tries moves relative to `facing`
///
/// Right, straight, left, back. A `Stay` facing is treated as North.
pub fn right_hand_order(facing: Direction) -> [Direction; 4] {
    let facing = if facing.is_movement() {
        facing
    } else {
        Direction::North
    };
    let right = facing.clockwise().unwrap_or(Direction::East);
    let left = facing.counter_clockwise().unwrap_or(Direction::West);
    let back = facing.opposite().unwrap_or(Direction::South);
    [right, facing, left, back]
}

/// First open move in right-hand order, or `Stay` when boxed in
pub fn right_hand_step(facing: Direction, free: DirectionSet) -> Direction {
    right_hand_order(facing)
        .into_iter()
        .find(|dir| free.contains(*dir))
        .unwrap_or(Direction::Stay)
}
