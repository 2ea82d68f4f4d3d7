//! Open-addressing registry keyed by name
//!
//! One generic table serves both UI elements and the text objects of each
//! element. Collisions are resolved by linear probing; records are never
//! removed individually.
//!
//! # Growth
//!
//! A registry doubles its slot count as soon as `count >= limit` after an
//! insertion. Under [`GrowthPolicy::Legacy`] existing records stay at the
//! slot they were placed in under the old limit, so they no longer sit at
//! (or after) their home slot for the new limit. Lookups still find them
//! because a lookup probes the whole table before giving up, but probe
//! paths get longer and a duplicate name inserted after the growth can
//! shadow the earlier record. [`GrowthPolicy::Rehash`] re-places every
//! record at a hash-consistent slot instead.

use serde::{Deserialize, Serialize};

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur while inserting into a registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Records must have a non-empty name
    #[error("Registry keys must not be empty")]
    EmptyKey,

    /// The backing array could not be grown
    #[error("Failed to grow registry to {0} slots")]
    AllocationFailed(usize),
}

/// A record that can be stored in a [`Registry`]
///
/// An empty slot is represented by `None`, so the only capability a record
/// needs is its key.
pub trait RegistryRecord {
    /// Name the record is registered under
    fn key(&self) -> &str;
}

/// What a registry does with existing records when it grows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GrowthPolicy {
    /// Double the slot array and leave records where they are
    #[default]
    Legacy,
    /// Double the slot array and re-place every record from its hash
    Rehash,
}

/// Rolling hash over the bytes of `name`
///
/// `hash = (hash + byte) << 1` on a 64-bit accumulator; high bits shifted
/// out are discarded.
pub fn hash_name(name: &str) -> u64 {
    name.bytes()
        .fold(0u64, |hash, byte| hash.wrapping_add(u64::from(byte)) << 1)
}

/// Reduce a hash to a slot index: `(hash mod 2^32) mod limit`
pub fn slot_for(hash: u64, limit: usize) -> usize {
    ((hash & 0xFFFF_FFFF) % limit as u64) as usize
}

/// Open-addressing table of named records
#[derive(Debug, Clone)]
pub struct Registry<T> {
    slots: Vec<Option<T>>,
    count: usize,
    /// Slot indices in insertion order
    order: Vec<usize>,
    initial_limit: usize,
    policy: GrowthPolicy,
    #[cfg(test)]
    fail_growth: bool,
}

impl<T: RegistryRecord> Registry<T> {
    /// Create a registry with `limit` slots and legacy growth
    pub fn new(limit: usize) -> Self {
        Self::with_policy(limit, GrowthPolicy::Legacy)
    }

    /// Create a registry with `limit` slots and the given growth policy
    pub fn with_policy(limit: usize, policy: GrowthPolicy) -> Self {
        let limit = limit.max(1);
        let mut slots = Vec::with_capacity(limit);
        slots.resize_with(limit, || None);
        Self {
            slots,
            count: 0,
            order: Vec::new(),
            initial_limit: limit,
            policy,
            #[cfg(test)]
            fail_growth: false,
        }
    }

    /// Number of records stored
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no record has been stored
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current number of slots
    pub fn limit(&self) -> usize {
        self.slots.len()
    }

    /// Home slot of `name` under the current limit
    pub fn probe_start(&self, name: &str) -> usize {
        slot_for(hash_name(name), self.limit())
    }

    /// Store `record`, returning the slot it ends up in
    ///
    /// Duplicate names are not rejected. The returned index is valid until
    /// the next insertion under [`GrowthPolicy::Rehash`]. On error the
    /// registry is left as it was.
    pub fn insert(&mut self, record: T) -> RegistryResult<usize> {
        if record.key().is_empty() {
            return Err(RegistryError::EmptyKey);
        }

        // Growth fires as soon as the table fills, so a free slot always exists
        debug_assert!(self.count < self.limit());

        let fresh = if self.count + 1 >= self.limit() {
            Some(self.reserve_growth()?)
        } else {
            None
        };

        let mut idx = self.probe_start(record.key());
        while self.slots[idx].is_some() {
            idx = (idx + 1) % self.limit();
        }

        self.slots[idx] = Some(record);
        self.count += 1;
        self.order.push(idx);

        Ok(match fresh {
            Some(fresh) => self.grow(fresh, idx),
            None => idx,
        })
    }

    /// Find the slot holding `name`
    ///
    /// Probes from the home slot, skipping empty slots, until the name
    /// matches or the probe wraps back to where it started.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        let start = self.probe_start(name);
        let mut idx = start;
        loop {
            if let Some(record) = &self.slots[idx] {
                if record.key() == name {
                    return Some(idx);
                }
            }
            idx = (idx + 1) % self.limit();
            if idx == start {
                return None;
            }
        }
    }

    /// Find the record registered as `name`
    pub fn find(&self, name: &str) -> Option<&T> {
        self.lookup(name).and_then(|idx| self.get(idx))
    }

    /// Find the record registered as `name` for mutation
    pub fn find_mut(&mut self, name: &str) -> Option<&mut T> {
        let idx = self.lookup(name)?;
        self.get_mut(idx)
    }

    /// Record stored in slot `idx`
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.slots.get(idx)?.as_ref()
    }

    /// Mutable record stored in slot `idx`
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots.get_mut(idx)?.as_mut()
    }

    /// Slot indices in the order records were inserted
    pub fn insertion_order(&self) -> &[usize] {
        &self.order
    }

    /// Records in the order they were inserted
    pub fn iter_ordered(&self) -> impl Iterator<Item = &T> + '_ {
        self.order.iter().filter_map(move |&idx| self.get(idx))
    }

    /// Drop every record and shrink back to the initial slot count
    pub fn release(&mut self) {
        self.slots.clear();
        self.slots.shrink_to_fit();
        self.slots.resize_with(self.initial_limit, || None);
        self.order = Vec::new();
        self.count = 0;
    }

    /// Claim the memory for the next doubling without touching any record
    ///
    /// Legacy growth reserves in place and returns an empty vector; rehash
    /// growth returns the new table's backing storage.
    fn reserve_growth(&mut self) -> RegistryResult<Vec<Option<T>>> {
        let old_limit = self.limit();
        let new_limit = old_limit
            .checked_mul(2)
            .ok_or(RegistryError::AllocationFailed(usize::MAX))?;

        #[cfg(test)]
        if self.fail_growth {
            return Err(RegistryError::AllocationFailed(new_limit));
        }

        match self.policy {
            GrowthPolicy::Legacy => {
                self.slots
                    .try_reserve_exact(new_limit - old_limit)
                    .map_err(|_| RegistryError::AllocationFailed(new_limit))?;
                Ok(Vec::new())
            }
            GrowthPolicy::Rehash => {
                let mut slots: Vec<Option<T>> = Vec::new();
                slots
                    .try_reserve_exact(new_limit)
                    .map_err(|_| RegistryError::AllocationFailed(new_limit))?;
                Ok(slots)
            }
        }
    }

    /// Double the slot count into memory claimed by [`Self::reserve_growth`];
    /// returns where the record in slot `tracked` lives afterwards
    fn grow(&mut self, mut fresh: Vec<Option<T>>, tracked: usize) -> usize {
        let old_limit = self.limit();
        let new_limit = old_limit * 2;

        match self.policy {
            GrowthPolicy::Legacy => {
                self.slots.resize_with(new_limit, || None);
                log::debug!(
                    "Registry grew {} -> {} slots without rehash ({} records keep their old slots)",
                    old_limit, new_limit, self.count
                );
                tracked
            }
            GrowthPolicy::Rehash => {
                fresh.resize_with(new_limit, || None);

                let old_slots = std::mem::replace(&mut self.slots, fresh);
                let mut remap = vec![0usize; old_limit];
                for (old_idx, slot) in old_slots.into_iter().enumerate() {
                    if let Some(record) = slot {
                        remap[old_idx] = self.place(record);
                    }
                }
                for idx in &mut self.order {
                    *idx = remap[*idx];
                }
                log::debug!(
                    "Registry grew {} -> {} slots, rehashed {} records",
                    old_limit, new_limit, self.count
                );
                remap[tracked]
            }
        }
    }

    /// Put `record` in the first free slot from its home slot
    fn place(&mut self, record: T) -> usize {
        let mut idx = self.probe_start(record.key());
        while self.slots[idx].is_some() {
            idx = (idx + 1) % self.limit();
        }
        self.slots[idx] = Some(record);
        idx
    }
}
