//! Tests for the block registry: ordering, validity and removal

#[cfg(test)]
mod tests {
    use blocoder::BlockId;
    use blocoder::canvas::block::{BlockRecord, Rect};
    use blocoder::canvas::registry::BlockRegistry;

    fn registry_with(count: u64) -> BlockRegistry {
        let mut registry = BlockRegistry::new();
        for counter in 0..count {
            let x = counter as u32 * 2;
            registry.insert(BlockRecord::new(
                BlockId::Counter(counter),
                Rect::new(x, 0, x + 2, 2),
            ));
        }
        registry
    }

    // Tests the root registry holds one valid block covering the canvas
    // Verified by creating the root as invalid
    #[test]
    fn test_with_root() {
        let registry = BlockRegistry::with_root(Rect::new(0, 0, 8, 6));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.valid_ids(), vec![BlockId::ROOT]);
        assert_eq!(
            registry.get(&BlockId::ROOT).map(|record| record.area()),
            Some(48)
        );
    }

    // Tests invalid records are hidden from lookups but keep their slot
    // Verified by returning invalid records from get
    #[test]
    fn test_invalid_records_hidden() {
        let mut registry = registry_with(3);
        assert!(registry.set_valid(&BlockId::Counter(1), false));

        assert!(registry.get(&BlockId::Counter(1)).is_none());
        assert!(registry.slot_of(&BlockId::Counter(1)).is_none());
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.valid_count(), 2);
        assert_eq!(
            registry.record(1).map(|record| record.valid),
            Some(false)
        );

        assert!(registry.set_valid(&BlockId::Counter(1), true));
        assert!(registry.get(&BlockId::Counter(1)).is_some());
        assert!(!registry.set_valid(&BlockId::Counter(9), true));
    }

    // Tests removal shifts the index of later records
    // Verified by leaving later index entries untouched
    #[test]
    fn test_remove_reindexes() {
        let mut registry = registry_with(4);
        let removed = registry.remove(&BlockId::Counter(1));

        assert_eq!(removed.map(|record| record.id), Some(BlockId::Counter(1)));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.slot_of(&BlockId::Counter(2)), Some(1));
        assert_eq!(registry.slot_of(&BlockId::Counter(3)), Some(2));
        assert_eq!(
            registry.get(&BlockId::Counter(3)).map(|record| record.id.clone()),
            Some(BlockId::Counter(3))
        );
        assert!(registry.remove(&BlockId::Counter(1)).is_none());
    }

    // Tests pair_mut hands out the records in argument order
    // Verified by always returning the lower slot first
    #[test]
    fn test_pair_mut_order() {
        let mut registry = registry_with(3);
        let Some((a, b)) = registry.pair_mut(2, 0) else {
            panic!("distinct slots must pair");
        };
        assert_eq!(a.id, BlockId::Counter(2));
        assert_eq!(b.id, BlockId::Counter(0));
        assert!(registry.pair_mut(1, 1).is_none());
        assert!(registry.pair_mut(0, 7).is_none());
    }

    // Tests valid ids keep insertion order
    // Verified by sorting ids before returning them
    #[test]
    fn test_valid_ids_insertion_order() {
        let mut registry = BlockRegistry::new();
        for counter in [5, 2, 9] {
            registry.insert(BlockRecord::new(
                BlockId::Counter(counter),
                Rect::new(0, 0, 1, 1),
            ));
        }
        assert_eq!(
            registry.valid_ids(),
            vec![BlockId::Counter(5), BlockId::Counter(2), BlockId::Counter(9)]
        );
    }
}
