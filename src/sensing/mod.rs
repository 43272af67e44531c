//! What a mouse perceives each turn, and who it is

pub mod direction;
pub mod identity;
pub mod snapshot;

pub use direction::{Direction, DirectionSet};
pub use identity::IdentityResolver;
pub use snapshot::{NeighborCell, RosterEntry, SensorySnapshot};
