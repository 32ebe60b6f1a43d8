//! Ordered store of saved scene records.
//!
//! The registry is the authoritative copy of what a story contains. Blocks on
//! the page are a projection of it; exports are a snapshot of it.

use serde_json::Value;

use super::model::{SceneIndex, SceneRecord, StoryDocument};

/// What `SceneRegistry::insert` did with a candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// No record had this index; the candidate was appended.
    Inserted,
    /// A record with this index held different data; it was overwritten in place.
    Replaced,
    /// An identical `(index, data)` pair was already stored.
    Duplicate,
}

/// Scene records in insertion order, at most one per index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneRegistry {
    records: Vec<SceneRecord>,
}

impl SceneRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `index`.
    ///
    /// Re-submitting an identical pair is a no-op. Saving different data for an
    /// index that is already present replaces it without moving the record.
    pub fn insert(&mut self, index: SceneIndex, data: Value) -> InsertOutcome {
        match self.records.iter_mut().find(|r| r.index == index) {
            Some(existing) if existing.data == data => {
                tracing::debug!(%index, "registry already holds scene, not pushing");
                InsertOutcome::Duplicate
            }
            Some(existing) => {
                existing.data = data;
                InsertOutcome::Replaced
            }
            None => {
                self.records.push(SceneRecord::new(index, data));
                InsertOutcome::Inserted
            }
        }
    }

    /// Removes every record stored under `index`. Returns true if any matched.
    pub fn remove_by_index(&mut self, index: SceneIndex) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.index != index);
        self.records.len() != before
    }

    /// Drops all records.
    pub fn reset(&mut self) {
        self.records.clear();
    }

    /// Returns the records in registry order.
    pub fn snapshot(&self) -> &[SceneRecord] {
        &self.records
    }

    /// Builds a story document from the current snapshot.
    pub fn to_document(&self) -> StoryDocument {
        StoryDocument::new(self.records.clone())
    }

    /// True if a structurally equal `(index, data)` pair is stored.
    pub fn contains(&self, index: SceneIndex, data: &Value) -> bool {
        self.records
            .iter()
            .any(|r| r.index == index && r.data == *data)
    }

    /// Gets the record stored under `index`.
    pub fn get(&self, index: SceneIndex) -> Option<&SceneRecord> {
        self.records.iter().find(|r| r.index == index)
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no scene has been saved.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records sorted to follow `order`, a sequence of block indices.
    ///
    /// Stable: records whose index is absent from `order` keep their relative
    /// order and go last. The registry itself keeps insertion order.
    pub fn ordered_by(&self, order: &[SceneIndex]) -> Vec<SceneRecord> {
        let mut records = self.records.clone();
        records.sort_by_key(|r| {
            order
                .iter()
                .position(|i| *i == r.index)
                .unwrap_or(usize::MAX)
        });
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_insert_appends_in_order() {
        let mut registry = SceneRegistry::new();
        assert_eq!(registry.insert(SceneIndex(1), json!("b")), InsertOutcome::Inserted);
        assert_eq!(registry.insert(SceneIndex(0), json!("a")), InsertOutcome::Inserted);

        let indices: Vec<_> = registry.snapshot().iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![SceneIndex(1), SceneIndex(0)]);
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut registry = SceneRegistry::new();
        registry.insert(SceneIndex(0), json!({"a": 1}));
        let before = registry.clone();

        assert_eq!(
            registry.insert(SceneIndex(0), json!({"a": 1})),
            InsertOutcome::Duplicate
        );
        assert_eq!(registry, before);
    }

    #[test]
    fn test_resave_replaces_in_place() {
        let mut registry = SceneRegistry::new();
        registry.insert(SceneIndex(0), json!(1));
        registry.insert(SceneIndex(1), json!(2));

        assert_eq!(registry.insert(SceneIndex(0), json!(3)), InsertOutcome::Replaced);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.snapshot()[0], SceneRecord::new(0, json!(3)));
        assert!(!registry.contains(SceneIndex(0), &json!(1)));
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let mut registry = SceneRegistry::new();
        registry.insert(SceneIndex(2), json!(null));
        assert!(!registry.remove_by_index(SceneIndex(5)));
        assert!(registry.remove_by_index(SceneIndex(2)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut registry = SceneRegistry::new();
        registry.insert(SceneIndex(0), json!(true));
        registry.reset();
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_ordered_by_block_order() {
        let mut registry = SceneRegistry::new();
        registry.insert(SceneIndex(0), json!("a"));
        registry.insert(SceneIndex(1), json!("b"));
        registry.insert(SceneIndex(2), json!("c"));

        let ordered = registry.ordered_by(&[SceneIndex(2), SceneIndex(0)]);

        let data: Vec<_> = ordered.iter().map(|r| r.data.clone()).collect();
        assert_eq!(data, vec![json!("c"), json!("a"), json!("b")]);

        let stored: Vec<_> = registry.snapshot().iter().map(|r| r.index).collect();
        assert_eq!(stored, vec![SceneIndex(0), SceneIndex(1), SceneIndex(2)]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u64, i64),
        Remove(u64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..8u64, 0..4i64).prop_map(|(i, v)| Op::Insert(i, v)),
            (0..8u64).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_indices_stay_unique(ops in proptest::collection::vec(op_strategy(), 0..64)) {
            let mut registry = SceneRegistry::new();
            for op in ops {
                match op {
                    Op::Insert(i, v) => { registry.insert(SceneIndex(i), json!(v)); }
                    Op::Remove(i) => { registry.remove_by_index(SceneIndex(i)); }
                }
                let mut seen = HashSet::new();
                for record in registry.snapshot() {
                    prop_assert!(seen.insert(record.index));
                }
            }
        }

        #[test]
        fn prop_repeated_insert_is_idempotent(i in 0..8u64, v in any::<i64>()) {
            let mut registry = SceneRegistry::new();
            registry.insert(SceneIndex(i), json!(v));
            let once = registry.clone();
            registry.insert(SceneIndex(i), json!(v));
            prop_assert_eq!(registry, once);
        }
    }
}
