mod resolve;

pub use resolve::RecordRef;

use crate::error::RegistryError;
use crate::record::{AttributeRecord, CaseRecord, CollectionRecord, Record, Registrable};
use crate::types::{FastMap, RecordId, RecordType, RegistryConfig};
use std::rc::Rc;
use tracing::{debug, trace};

// ─── IdentityRegistry ───────────────────────────────────────────────────────

/// Owner of the id → record mapping for one document.
///
/// Every cross-reference between records goes through an id held here. The
/// counter only moves forward, so a released id can come back only if a
/// caller asks for it explicitly via `guid`/`id`.
#[derive(Debug)]
pub struct IdentityRegistry {
    config: RegistryConfig,
    counter: u64,
    store: FastMap<RecordId, Record>,
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        let mut store = FastMap::default();
        store.reserve(config.capacity);
        Self {
            counter: config.initial_counter,
            config,
            store,
        }
    }

    /// Drops every record and rewinds the counter. Records are not marked
    /// destroyed; callers holding handles keep them alive.
    pub fn reset(&mut self) {
        self.store.clear();
        self.counter = self.config.initial_counter;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: RecordId) -> bool {
        self.store.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecordId, &Record)> {
        self.store.iter()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Register / deregister
    // ════════════════════════════════════════════════════════════════════════

    /// Allocates an id for `obj`, writes it into the record and stores it.
    pub fn register<R: Registrable>(&mut self, mut obj: R) -> Result<Rc<R>, RegistryError> {
        let id = self.id_for_new_record(&obj)?;
        // id_for_new_record only hands out free slots.
        debug_assert!(!self.store.contains_key(&id), "id {id} is already registered");
        obj.assign_id(id);
        let rc = Rc::new(obj);
        self.store.insert(id, R::into_record(Rc::clone(&rc)));
        trace!(%id, record_type = %R::RECORD_TYPE, "registered record");
        Ok(rc)
    }

    /// Removes the slot for `id`, returning what was stored there.
    pub fn deregister(&mut self, id: RecordId) -> Option<Record> {
        let removed = self.store.remove(&id);
        if removed.is_some() {
            trace!(%id, "deregistered record");
        }
        removed
    }

    /// Removes `record`'s slot only if that slot still holds this very
    /// record. A stale handle whose id has since been taken by another
    /// record leaves the registry untouched.
    pub fn deregister_record(&mut self, record: &Record) -> bool {
        let id = record.id();
        let owns_slot = self.find(None, id).is_some_and(|live| live.ptr_eq(record));
        if owns_slot {
            self.deregister(id);
        }
        owns_slot
    }

    /// Picks the id a new record will be stored under: its `guid`, then its
    /// own `id`, and otherwise (or when that slot is taken) the next free
    /// counter value.
    fn id_for_new_record<R: Registrable>(&mut self, obj: &R) -> Result<RecordId, RegistryError> {
        let mut candidate = obj
            .guid()
            .filter(|guid| !guid.is_unassigned())
            .or_else(|| Some(obj.id()).filter(|id| !id.is_unassigned()));
        loop {
            match candidate {
                Some(id) if !self.store.contains_key(&id) => return Ok(id),
                _ => {
                    self.counter = self
                        .counter
                        .checked_add(1)
                        .ok_or(RegistryError::IdSpaceExhausted)?;
                    candidate = Some(RecordId::new(self.counter));
                }
            }
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Lookup
    // ════════════════════════════════════════════════════════════════════════

    /// Looks up `id`. The type is accepted for call-site symmetry only and
    /// never filters the result.
    pub fn find(&self, _record_type: Option<RecordType>, id: RecordId) -> Option<&Record> {
        self.store.get(&id)
    }

    pub fn find_attribute(&self, id: RecordId) -> Option<Rc<AttributeRecord>> {
        self.store.get(&id).and_then(Record::as_attribute).cloned()
    }

    pub fn find_case(&self, id: RecordId) -> Option<Rc<CaseRecord>> {
        self.store.get(&id).and_then(Record::as_case).cloned()
    }

    pub fn find_collection(&self, id: RecordId) -> Option<Rc<CollectionRecord>> {
        self.store.get(&id).and_then(Record::as_collection).cloned()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Bulk teardown
    // ════════════════════════════════════════════════════════════════════════

    /// Destroys and deregisters every record of `record_type` whose id is not
    /// in `exceptions`. Returns the removed ids in ascending order.
    ///
    /// Collections holding destroyed cases keep stale ordinal maps until
    /// `Collection::update_case_id_to_index_map` runs.
    pub fn destroy_all_records_of_type(
        &mut self,
        record_type: RecordType,
        exceptions: &[RecordId],
    ) -> Vec<RecordId> {
        let mut removed: Vec<RecordId> = self
            .iter()
            .map(|(_, record)| record)
            .filter(|record| record.record_type() == record_type && !exceptions.contains(&record.id()))
            .map(Record::id)
            .collect();
        removed.sort_unstable();

        for id in &removed {
            if let Some(record) = self.store.get(id) {
                record.destroy();
            }
            self.deregister(*id);
        }

        debug!(
            %record_type,
            removed = removed.len(),
            kept = exceptions.len(),
            "destroyed records of type"
        );
        removed
    }
}
