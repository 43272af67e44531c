//! Process-lifetime memory of every agent seen so far
//!
//! The map itself sits behind a read-write lock that is held only long
//! enough to find or insert a slot. Each slot has its own mutex, so a
//! decision for one mouse never waits on a decision for another, while
//! two concurrent requests for the same mouse are serialized.
//!
//! Entries are never evicted.

use ahash::AHashMap;
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::agent::memory::AgentMemory;
use crate::agent::random::{agent_stream, RandomSource};
use crate::core::types::AgentId;

/// Memory plus the agent's private random stream
#[derive(Debug, Clone)]
pub struct AgentSlot {
    pub memory: AgentMemory,
    rng: ChaCha8Rng,
}

impl AgentSlot {
    fn new(base_seed: u64, id: &AgentId) -> Self {
        Self {
            memory: AgentMemory::new(),
            rng: agent_stream(base_seed, id),
        }
    }
}

pub struct AgentMemoryStore {
    entries: RwLock<AHashMap<AgentId, Arc<Mutex<AgentSlot>>>>,
    base_seed: u64,
}

impl AgentMemoryStore {
    pub fn new(base_seed: u64) -> Self {
        Self {
            entries: RwLock::new(AHashMap::new()),
            base_seed,
        }
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    fn slot(&self, id: &AgentId) -> Arc<Mutex<AgentSlot>> {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = entries.get(id) {
                return Arc::clone(slot);
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another request may have inserted between the two locks
        let slot = entries
            .entry(id.clone())
            .or_insert_with(|| {
                tracing::debug!("Created memory for agent {}", id);
                Arc::new(Mutex::new(AgentSlot::new(self.base_seed, id)))
            })
            .clone();
        tracing::debug!("Agent memory store holds {} entries", entries.len());
        slot
    }

    /// Current memory of `id`, creating the default entry if unseen
    pub fn get_or_create(&self, id: &AgentId) -> AgentMemory {
        let slot = self.slot(id);
        let guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        guard.memory
    }

    /// Apply one read-modify-write to the entry of `id`
    ///
    /// The entry is created first if needed. The per-agent lock is held for
    /// the whole mutation, so no other caller observes a half-applied update.
    pub fn update<T, F>(&self, id: &AgentId, mutation: F) -> T
    where
        F: FnOnce(&mut AgentMemory, &mut dyn RandomSource) -> T,
    {
        let slot = self.slot(id);
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        let AgentSlot { memory, rng } = &mut *guard;
        mutation(memory, rng)
    }

    /// Copy of an existing entry, without creating one
    pub fn snapshot(&self, id: &AgentId) -> Option<AgentMemory> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(id).map(|slot| {
            slot.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .memory
        })
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AgentMemoryStore {
    fn default() -> Self {
        Self::new(0)
    }
}
