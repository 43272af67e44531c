//! Injectable randomness for the decision strategies
//!
//! Production draws from per-agent ChaCha streams so that one mouse's
//! choices never depend on how requests for other mice interleave.
//! Tests pin the random branches with `ScriptedRandom`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

use crate::core::types::AgentId;
use crate::sensing::direction::{Direction, DirectionSet};

/// Uniform index source
pub trait RandomSource {
    /// Index in `0..len`; callers never pass `len == 0`
    fn pick_index(&mut self, len: usize) -> usize;
}

impl RandomSource for ChaCha8Rng {
    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.gen_range(0..len)
    }
}

/// Replays a fixed sequence of picks, reduced modulo `len`
///
/// Once the script is exhausted every pick is 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    picks: VecDeque<usize>,
    drawn: usize,
}

impl ScriptedRandom {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            drawn: 0,
        }
    }

    /// Number of picks consumed so far
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl RandomSource for ScriptedRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.drawn += 1;
        let pick = self.picks.pop_front().unwrap_or(0);
        if len == 0 {
            0
        } else {
            pick % len
        }
    }
}

/// Uniformly random member of `set`, or `Stay` when it is empty
pub fn pick_direction(set: DirectionSet, rng: &mut dyn RandomSource) -> Direction {
    if set.is_empty() {
        return Direction::Stay;
    }
    let index = rng.pick_index(set.len());
    set.nth(index).unwrap_or(Direction::Stay)
}

/// Uniformly random cardinal direction
pub fn pick_cardinal(rng: &mut dyn RandomSource) -> Direction {
    Direction::CARDINALS[rng.pick_index(Direction::CARDINALS.len())]
}

/// ChaCha stream number for `id` under `base_seed`
///
/// FNV-1a over the id bytes, folded with the seed through the SplitMix64
/// finalizer. Fixed arithmetic, so a seed replays the same streams on
/// every platform and build.
pub fn stream_id(base_seed: u64, id: &AgentId) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in id.as_str().bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }

    let mut z = (hash ^ base_seed).wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Deterministic random stream for one agent under a base seed
pub fn agent_stream(base_seed: u64, id: &AgentId) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(base_seed);
    rng.set_stream(stream_id(base_seed, id));
    rng
}
