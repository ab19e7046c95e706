use super::{Record, Registrable};
use crate::error::RegistryError;
use crate::registry::IdentityRegistry;
use crate::types::{RecordId, RecordType};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeProps {
    pub guid: Option<RecordId>,
    pub id: Option<RecordId>,
    /// Owning collection. Overwritten by `Collection::create_attribute`.
    pub collection: Option<RecordId>,
    pub name: SmolStr,
}

impl AttributeProps {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A named column of a collection. Names are not required to be unique.
#[derive(Debug)]
pub struct AttributeRecord {
    id: RecordId,
    guid: Option<RecordId>,
    collection: RecordId,
    name: SmolStr,
    destroyed: Cell<bool>,
}

impl AttributeRecord {
    pub fn new(props: AttributeProps) -> Self {
        Self {
            id: props.id.unwrap_or(RecordId::UNASSIGNED),
            guid: props.guid,
            collection: props.collection.unwrap_or(RecordId::UNASSIGNED),
            name: props.name,
            destroyed: Cell::new(false),
        }
    }

    /// Builds the attribute and registers it.
    pub fn create(
        registry: &mut IdentityRegistry,
        props: AttributeProps,
    ) -> Result<Rc<Self>, RegistryError> {
        registry.register(Self::new(props))
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
    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn destroy(&self) {
        self.destroyed.set(true);
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    pub fn to_props(&self) -> AttributeProps {
        AttributeProps {
            guid: self.guid,
            id: Some(self.id),
            collection: Some(self.collection),
            name: self.name.clone(),
        }
    }
}

impl Registrable for AttributeRecord {
    const RECORD_TYPE: RecordType = RecordType::Attribute;

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
        Record::Attribute(this)
    }
}
