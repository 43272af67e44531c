//! Anti ping-pong filter

use crate::sensing::direction::{Direction, DirectionSet};

/// Drop the reversal of the last move, unless it is the only way out
pub fn filter_reversal(free: DirectionSet, last_direction: Option<Direction>) -> DirectionSet {
    let Some(avoid) = last_direction.and_then(|dir| dir.opposite()) else {
        return free;
    };
    if free.contains(avoid) && free.len() > 1 {
        free.without(avoid)
    } else {
        free
    }
}
