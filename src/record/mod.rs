pub mod attribute;
pub mod case;
pub mod collection_record;

pub use attribute::{AttributeProps, AttributeRecord};
pub use case::{CaseProps, CaseRecord};
pub use collection_record::{CollectionProps, CollectionRecord};

use crate::types::{RecordId, RecordType};
use std::rc::Rc;

// ─── Registrable ────────────────────────────────────────────────────────────

/// A record kind the [`IdentityRegistry`](crate::IdentityRegistry) can store.
///
/// The registry reads the preferred ids, writes back the allocated one and
/// then freezes the record behind an `Rc`.
pub trait Registrable: Sized {
    const RECORD_TYPE: RecordType;

    /// Client-supplied stable id, tried first during allocation.
    fn guid(&self) -> Option<RecordId>;

    /// Current id; `RecordId::UNASSIGNED` before registration.
    fn id(&self) -> RecordId;

    fn assign_id(&mut self, id: RecordId);

    fn into_record(this: Rc<Self>) -> Record;
}

// ─── Record ─────────────────────────────────────────────────────────────────

/// Any registered record, tagged by kind.
#[derive(Debug, Clone)]
pub enum Record {
    Attribute(Rc<AttributeRecord>),
    Case(Rc<CaseRecord>),
    Collection(Rc<CollectionRecord>),
}

impl Record {
    pub fn id(&self) -> RecordId {
        match self {
            Record::Attribute(a) => a.id(),
            Record::Case(c) => c.id(),
            Record::Collection(c) => c.id(),
        }
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            Record::Attribute(_) => RecordType::Attribute,
            Record::Case(_) => RecordType::Case,
            Record::Collection(_) => RecordType::Collection,
        }
    }

    /// Marks the underlying record destroyed. Does not touch the registry.
    pub fn destroy(&self) {
        match self {
            Record::Attribute(a) => a.destroy(),
            Record::Case(c) => c.destroy(),
            Record::Collection(c) => c.destroy(),
        }
    }

    pub fn is_destroyed(&self) -> bool {
        match self {
            Record::Attribute(a) => a.is_destroyed(),
            Record::Case(c) => c.is_destroyed(),
            Record::Collection(c) => c.is_destroyed(),
        }
    }

    pub fn as_attribute(&self) -> Option<&Rc<AttributeRecord>> {
        match self {
            Record::Attribute(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_case(&self) -> Option<&Rc<CaseRecord>> {
        match self {
            Record::Case(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Rc<CollectionRecord>> {
        match self {
            Record::Collection(c) => Some(c),
            _ => None,
        }
    }

    /// True when both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Record) -> bool {
        match (self, other) {
            (Record::Attribute(a), Record::Attribute(b)) => Rc::ptr_eq(a, b),
            (Record::Case(a), Record::Case(b)) => Rc::ptr_eq(a, b),
            (Record::Collection(a), Record::Collection(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Rc<AttributeRecord>> for Record {
    fn from(a: Rc<AttributeRecord>) -> Self {
        Record::Attribute(a)
    }
}

impl From<Rc<CaseRecord>> for Record {
    fn from(c: Rc<CaseRecord>) -> Self {
        Record::Case(c)
    }
}

impl From<Rc<CollectionRecord>> for Record {
    fn from(c: Rc<CollectionRecord>) -> Self {
        Record::Collection(c)
    }
}
