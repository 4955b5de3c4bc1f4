//! Insertion-ordered block records with a hash index

use crate::canvas::block::{BlockRecord, Rect};
use crate::isl::block_id::BlockId;
use std::collections::HashMap;

/// All blocks ever created on a canvas, valid or consumed
///
/// Consumed records stay in place so undo can bring them back. Lookups only see
/// valid records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockRegistry {
    records: Vec<BlockRecord>,
    index: HashMap<BlockId, usize>,
}

impl BlockRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding one root block covering `rect`
    pub fn with_root(rect: Rect) -> Self {
        let mut registry = Self::new();
        registry.insert(BlockRecord::new(BlockId::ROOT, rect));
        registry
    }

    /// Append a record, returning its slot
    ///
    /// A record with an id already present replaces the index entry of the old one.
    pub fn insert(&mut self, record: BlockRecord) -> usize {
        let slot = self.records.len();
        self.index.insert(record.id.clone(), slot);
        self.records.push(record);
        slot
    }

    /// Remove a record entirely, shifting later slots down
    pub fn remove(&mut self, id: &BlockId) -> Option<BlockRecord> {
        let slot = self.index.remove(id)?;
        if slot >= self.records.len() {
            return None;
        }
        let record = self.records.remove(slot);
        for later in self.records.iter().skip(slot) {
            if let Some(entry) = self.index.get_mut(&later.id) {
                *entry -= 1;
            }
        }
        Some(record)
    }

    /// Valid record with the given id
    pub fn get(&self, id: &BlockId) -> Option<&BlockRecord> {
        self.slot_of(id).and_then(|slot| self.records.get(slot))
    }

    /// Slot of the valid record with the given id
    pub fn slot_of(&self, id: &BlockId) -> Option<usize> {
        let slot = *self.index.get(id)?;
        self.records
            .get(slot)
            .filter(|record| record.valid)
            .map(|_| slot)
    }

    /// Record at a slot, valid or not
    pub fn record(&self, slot: usize) -> Option<&BlockRecord> {
        self.records.get(slot)
    }

    /// Mutable records at two distinct slots
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut BlockRecord, &mut BlockRecord)> {
        if a == b {
            return None;
        }
        let (low, high) = (a.min(b), a.max(b));
        let (head, tail) = self.records.split_at_mut_checked(high)?;
        let first = head.get_mut(low)?;
        let second = tail.first_mut()?;
        if a < b {
            Some((first, second))
        } else {
            Some((second, first))
        }
    }

    /// Set the validity flag of a record regardless of its current state
    ///
    /// Returns false if no record carries the id.
    pub fn set_valid(&mut self, id: &BlockId, valid: bool) -> bool {
        let Some(&slot) = self.index.get(id) else {
            return false;
        };
        self.records.get_mut(slot).is_some_and(|record| {
            record.valid = valid;
            true
        })
    }

    /// Every record in insertion order
    pub fn records(&self) -> &[BlockRecord] {
        &self.records
    }

    /// Valid records in insertion order
    pub fn valid_records(&self) -> impl Iterator<Item = &BlockRecord> {
        self.records.iter().filter(|record| record.valid)
    }

    /// Ids of valid records in insertion order
    pub fn valid_ids(&self) -> Vec<BlockId> {
        self.valid_records().map(|record| record.id.clone()).collect()
    }

    /// Number of valid records
    pub fn valid_count(&self) -> usize {
        self.valid_records().count()
    }

    /// Number of records, valid or not
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
