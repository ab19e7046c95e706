use super::{Record, Registrable};
use crate::error::RegistryError;
use crate::registry::IdentityRegistry;
use crate::types::{RecordId, RecordType};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseProps {
    pub guid: Option<RecordId>,
    pub id: Option<RecordId>,
    /// Owning collection. Overwritten by `Collection::create_case`.
    pub collection: Option<RecordId>,
    /// Parent case in an ancestor collection; `None` for root-level cases.
    pub parent: Option<RecordId>,
}

impl CaseProps {
    pub fn with_parent(parent: RecordId) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }
}

/// One row of a collection.
///
/// Destroyed cases stay in their collection's case list with the flag set;
/// only the registry slot is released.
#[derive(Debug)]
pub struct CaseRecord {
    id: RecordId,
    guid: Option<RecordId>,
    collection: RecordId,
    parent: Option<RecordId>,
    destroyed: Cell<bool>,
}

impl CaseRecord {
    pub fn new(props: CaseProps) -> Self {
        Self {
            id: props.id.unwrap_or(RecordId::UNASSIGNED),
            guid: props.guid,
            collection: props.collection.unwrap_or(RecordId::UNASSIGNED),
            parent: props.parent,
            destroyed: Cell::new(false),
        }
    }

    /// Builds the case and registers it.
    pub fn create(registry: &mut IdentityRegistry, props: CaseProps) -> Result<Rc<Self>, RegistryError> {
        registry.register(Self::new(props))
    }

    /// Marks the case destroyed and releases its id.
    ///
    /// Returns false for a case that was already destroyed; its id may now
    /// belong to another record, so the registry is not touched.
    pub fn destroy_case(registry: &mut IdentityRegistry, case: &Rc<CaseRecord>) -> bool {
        if case.is_destroyed() {
            return false;
        }
        case.destroy();
        registry.deregister_record(&Record::Case(Rc::clone(case)));
        true
    }

    #[inline]
    pub fn id(&self) -> RecordId {
        self.id
    }

    #[inline]
    pub fn collection(&self) -> RecordId {
        self.collection
    }

    #[inline]
    pub fn parent(&self) -> Option<RecordId> {
        self.parent
    }

    pub fn destroy(&self) {
        self.destroyed.set(true);
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    pub fn to_props(&self) -> CaseProps {
        CaseProps {
            guid: self.guid,
            id: Some(self.id),
            collection: Some(self.collection),
            parent: self.parent,
        }
    }
}

impl Registrable for CaseRecord {
    const RECORD_TYPE: RecordType = RecordType::Case;

    fn guid(&self) -> Option<RecordId> {
        self.guid
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn into_record(this: Rc<Self>) -> Record {
        Record::Case(this)
    }
}
