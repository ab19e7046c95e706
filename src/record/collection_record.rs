use super::{AttributeRecord, CaseRecord, Record, Registrable};
use crate::error::RegistryError;
use crate::registry::IdentityRegistry;
use crate::types::{FastMap, RecordId, RecordType};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionProps {
    pub guid: Option<RecordId>,
    pub id: Option<RecordId>,
    pub name: SmolStr,
    /// Legacy compatibility flag: set by callers whose cases carry valid
    /// parent links.
    pub are_parent_child_links_configured: bool,
}

impl CollectionProps {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Storage side of a collection: its attribute and case lists plus the
/// derived per-parent ordinal state. Mutated only through
/// [`Collection`](crate::Collection).
#[derive(Debug)]
pub struct CollectionRecord {
    id: RecordId,
    guid: Option<RecordId>,
    name: SmolStr,
    parent_child_links_configured: Cell<bool>,
    destroyed: Cell<bool>,
    pub(crate) attrs: RefCell<Vec<Rc<AttributeRecord>>>,
    pub(crate) cases: RefCell<Vec<Rc<CaseRecord>>>,
    /// case id → ordinal within its parent group
    pub(crate) case_id_to_index_map: RefCell<FastMap<RecordId, usize>>,
    /// parent id (`None` = root group) → live cases in that group
    pub(crate) case_counts: RefCell<FastMap<Option<RecordId>, usize>>,
}

impl CollectionRecord {
    pub fn new(props: CollectionProps) -> Self {
        Self {
            id: props.id.unwrap_or(RecordId::UNASSIGNED),
            guid: props.guid,
            name: props.name,
            parent_child_links_configured: Cell::new(props.are_parent_child_links_configured),
            destroyed: Cell::new(false),
            attrs: RefCell::new(Vec::new()),
            cases: RefCell::new(Vec::new()),
            case_id_to_index_map: RefCell::new(FastMap::default()),
            case_counts: RefCell::new(FastMap::default()),
        }
    }

    /// Builds the collection record and registers it.
    pub fn create(
        registry: &mut IdentityRegistry,
        props: CollectionProps,
    ) -> Result<Rc<Self>, RegistryError> {
        registry.register(Self::new(props))
    }

    #[inline]
    pub fn id(&self) -> RecordId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    #[inline]
    pub fn are_parent_child_links_configured(&self) -> bool {
        self.parent_child_links_configured.get()
    }

    pub fn set_parent_child_links_configured(&self, configured: bool) {
        self.parent_child_links_configured.set(configured);
    }

    pub fn destroy(&self) {
        self.destroyed.set(true);
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    pub fn to_props(&self) -> CollectionProps {
        CollectionProps {
            guid: self.guid,
            id: Some(self.id),
            name: self.name.clone(),
            are_parent_child_links_configured: self.are_parent_child_links_configured(),
        }
    }
}

impl Registrable for CollectionRecord {
    const RECORD_TYPE: RecordType = RecordType::Collection;

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
        Record::Collection(this)
    }
}
