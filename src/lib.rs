//! Cheese Chase - decision agents for the mice-and-cheese grid chase
//!
//! Each turn the game engine posts a mouse's local view of the maze and
//! receives one move back. The `Navigator` strategy combines a greedy
//! approach to the nearest cheese with stuck detection, reversal
//! suppression and a right-hand wall-following escape mode.

pub mod agent;
pub mod core;
pub mod sensing;
pub mod server;
