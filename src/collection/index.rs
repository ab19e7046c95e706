use super::Collection;
use crate::error::{ModelError, RegistryError};
use crate::record::{AttributeProps, AttributeRecord, CaseProps, CaseRecord};
use crate::registry::IdentityRegistry;
use crate::types::{FastMap, RecordId};
use std::rc::Rc;
use tracing::trace;

impl Collection {
    // ════════════════════════════════════════════════════════════════════════
    // Attributes
    // ════════════════════════════════════════════════════════════════════════

    /// Creates an attribute owned by this collection and appends it.
    pub fn create_attribute(
        &self,
        registry: &mut IdentityRegistry,
        mut props: AttributeProps,
    ) -> Result<Rc<AttributeRecord>, RegistryError> {
        props.collection = Some(self.id());
        let attr = AttributeRecord::create(registry, props)?;
        self.record.attrs.borrow_mut().push(Rc::clone(&attr));
        Ok(attr)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Cases
    // ════════════════════════════════════════════════════════════════════════

    /// Creates a case owned by this collection and appends it.
    ///
    /// The new case takes the next ordinal of its parent group in O(1); no
    /// rebuild happens here.
    pub fn create_case(
        &self,
        registry: &mut IdentityRegistry,
        mut props: CaseProps,
    ) -> Result<Rc<CaseRecord>, RegistryError> {
        props.collection = Some(self.id());
        let case = CaseRecord::create(registry, props)?;
        {
            let mut counts = self.record.case_counts.borrow_mut();
            let count = counts.entry(case.parent()).or_insert(0);
            self.record
                .case_id_to_index_map
                .borrow_mut()
                .insert(case.id(), *count);
            *count += 1;
        }
        self.record.cases.borrow_mut().push(Rc::clone(&case));
        Ok(case)
    }

    /// Destroys `case`, releases its id and renumbers the remaining cases.
    ///
    /// Deleting a case that is already destroyed only renumbers; its old id
    /// is left to whichever record holds it now.
    pub fn delete_case(&self, registry: &mut IdentityRegistry, case: &Rc<CaseRecord>) -> Result<(), ModelError> {
        if case.collection() != self.id() {
            return Err(ModelError::ForeignCase {
                case: case.id(),
                collection: self.id(),
            });
        }
        CaseRecord::destroy_case(registry, case);
        self.update_case_id_to_index_map();
        Ok(())
    }

    /// Full O(n) rebuild of the ordinal map and per-parent counts from the
    /// case list, skipping destroyed cases.
    ///
    /// Must be called by anyone who removes cases without going through
    /// [`Collection::delete_case`]. When deleting in bulk, call it once at
    /// the end.
    pub fn update_case_id_to_index_map(&self) {
        let mut counts: FastMap<Option<RecordId>, usize> = FastMap::default();
        let mut map: FastMap<RecordId, usize> = FastMap::default();

        for case in self.record.cases.borrow().iter() {
            if case.is_destroyed() {
                continue;
            }
            let next = counts.entry(case.parent()).or_insert(0);
            map.insert(case.id(), *next);
            *next += 1;
        }

        trace!(
            collection = %self.id(),
            cases = map.len(),
            groups = counts.len(),
            "rebuilt case index map"
        );
        *self.record.case_id_to_index_map.borrow_mut() = map;
        // Final counters are the live case count per parent.
        *self.record.case_counts.borrow_mut() = counts;
    }
}
