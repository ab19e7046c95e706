mod index;
mod snapshot;

pub use snapshot::CollectionSnapshot;

use crate::error::RegistryError;
use crate::hierarchy::SchemaHierarchy;
use crate::record::{AttributeRecord, CaseRecord, CollectionProps, CollectionRecord};
use crate::registry::IdentityRegistry;
use crate::types::{FastMap, RecordId};
use smol_str::SmolStr;
use std::rc::Rc;
use tracing::debug;

// ─── Collection ─────────────────────────────────────────────────────────────

/// Controller for one collection's attributes and cases.
///
/// All structural changes go through here so the per-parent ordinal map
/// stays in step with the case list. Calls are not reentrant: do not create
/// or delete cases while iterating [`Collection::cases`].
#[derive(Debug, Clone)]
pub struct Collection {
    record: Rc<CollectionRecord>,
}

impl Collection {
    /// Wraps an existing record and rebuilds its ordinal map from the
    /// current case list.
    pub fn new(record: Rc<CollectionRecord>) -> Self {
        let collection = Self { record };
        collection.update_case_id_to_index_map();
        collection
    }

    /// Registers a fresh, empty collection record and wraps it.
    pub fn create(registry: &mut IdentityRegistry, props: CollectionProps) -> Result<Self, RegistryError> {
        let record = CollectionRecord::create(registry, props)?;
        Ok(Self::new(record))
    }

    #[inline]
    pub fn id(&self) -> RecordId {
        self.record.id()
    }

    #[inline]
    pub fn name(&self) -> &SmolStr {
        self.record.name()
    }

    #[inline]
    pub fn record(&self) -> &Rc<CollectionRecord> {
        &self.record
    }

    /// Whether callers have declared the cases' parent links trustworthy.
    /// Exposed for legacy callers; nothing here depends on it.
    pub fn are_parent_child_links_configured(&self) -> bool {
        self.record.are_parent_child_links_configured()
    }

    pub fn set_parent_child_links_configured(&self, configured: bool) {
        self.record.set_parent_child_links_configured(configured);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Projections
    // ════════════════════════════════════════════════════════════════════════

    pub fn attributes(&self) -> Vec<Rc<AttributeRecord>> {
        self.record.attrs.borrow().clone()
    }

    /// Every case in stored order, destroyed ones included.
    pub fn cases(&self) -> Vec<Rc<CaseRecord>> {
        self.record.cases.borrow().clone()
    }

    pub fn attribute_ids(&self) -> Vec<RecordId> {
        self.record.attrs.borrow().iter().map(|a| a.id()).collect()
    }

    pub fn attribute_names(&self) -> Vec<SmolStr> {
        self.record.attrs.borrow().iter().map(|a| a.name().clone()).collect()
    }

    /// Ids of every case in stored order. Destroyed cases are still listed;
    /// filter on [`CaseRecord::is_destroyed`] via [`Collection::cases`] if
    /// that matters.
    pub fn case_ids(&self) -> Vec<RecordId> {
        self.record.cases.borrow().iter().map(|c| c.id()).collect()
    }

    /// Ordinal of `case_id` within its parent group.
    pub fn case_index(&self, case_id: RecordId) -> Option<usize> {
        self.record.case_id_to_index_map.borrow().get(&case_id).copied()
    }

    /// Number of cases in the group of `parent` (`None` = root group) as of
    /// the last update.
    pub fn case_count(&self, parent: Option<RecordId>) -> usize {
        self.record.case_counts.borrow().get(&parent).copied().unwrap_or(0)
    }

    pub fn case_id_to_index_map(&self) -> FastMap<RecordId, usize> {
        self.record.case_id_to_index_map.borrow().clone()
    }

    pub fn case_counts(&self) -> FastMap<Option<RecordId>, usize> {
        self.record.case_counts.borrow().clone()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Schema hierarchy
    // ════════════════════════════════════════════════════════════════════════

    /// True if `other` is nested (at any depth) below this collection.
    /// False when either collection is missing from `hierarchy`.
    pub fn is_ancestor_of(&self, other: &Collection, hierarchy: &SchemaHierarchy) -> bool {
        hierarchy.is_ancestor_of(self.id(), other.id()).unwrap_or(false)
    }

    pub fn is_descendant_of(&self, other: &Collection, hierarchy: &SchemaHierarchy) -> bool {
        hierarchy.is_ancestor_of(other.id(), self.id()).unwrap_or(false)
    }

    pub fn debug_log(&self, prompt: &str) {
        debug!(
            collection = %self.id(),
            attrs = ?self.attribute_ids(),
            cases = ?self.case_ids(),
            "{prompt}"
        );
    }
}
