//! Positional non-progress tracking

use crate::core::types::Position;

/// Next stuck counter value
///
/// Standing still adds one; any move takes one off, floored at zero. A
/// single good step therefore does not wipe out a long blockage.
pub fn next_stuck_count(current: Position, last: Option<Position>, stuck_count: u32) -> u32 {
    if last == Some(current) {
        stuck_count.saturating_add(1)
    } else {
        stuck_count.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_position_increments() {
        let here = Position::new(1, 1);
        assert_eq!(next_stuck_count(here, Some(here), 0), 1);
        assert_eq!(next_stuck_count(here, Some(here), 5), 6);
    }

    #[test]
    fn test_progress_decays_with_floor() {
        let here = Position::new(1, 1);
        let before = Position::new(1, 2);
        assert_eq!(next_stuck_count(here, Some(before), 3), 2);
        assert_eq!(next_stuck_count(here, Some(before), 0), 0);
    }

    #[test]
    fn test_first_call_counts_as_progress() {
        assert_eq!(next_stuck_count(Position::new(0, 0), None, 0), 0);
    }
}
