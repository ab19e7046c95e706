use crate::types::{FastMap, RecordId};

/// Parent/child nesting of collections in a document schema.
///
/// This is the collection-level relation, unrelated to the parent links
/// between individual cases.
#[derive(Debug, Clone, Default)]
pub struct SchemaHierarchy {
    parents: FastMap<RecordId, Option<RecordId>>,
}

impl SchemaHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or re-parents `collection`. `None` makes it a top-level collection.
    pub fn add_collection(&mut self, collection: RecordId, parent: Option<RecordId>) {
        self.parents.insert(collection, parent);
    }

    pub fn remove_collection(&mut self, collection: RecordId) -> bool {
        self.parents.remove(&collection).is_some()
    }

    #[inline]
    pub fn contains(&self, collection: RecordId) -> bool {
        self.parents.contains_key(&collection)
    }

    pub fn parent_of(&self, collection: RecordId) -> Option<RecordId> {
        self.parents.get(&collection).copied().flatten()
    }

    /// Whether `ancestor` sits strictly above `descendant`.
    ///
    /// `None` if either collection is unknown. A malformed cycle ends the
    /// walk after one step per known collection.
    pub fn is_ancestor_of(&self, ancestor: RecordId, descendant: RecordId) -> Option<bool> {
        if !self.contains(ancestor) || !self.contains(descendant) {
            return None;
        }
        let mut current = self.parent_of(descendant);
        for _ in 0..self.parents.len() {
            match current {
                Some(id) if id == ancestor => return Some(true),
                Some(id) => current = self.parent_of(id),
                None => return Some(false),
            }
        }
        Some(false)
    }
}
