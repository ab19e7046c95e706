use super::IdentityRegistry;
use crate::record::Record;
use crate::types::RecordId;
use tracing::error;

/// Either a record handle or an id that still has to be looked up.
#[derive(Debug, Clone)]
pub enum RecordRef {
    Resolved(Record),
    Pending(RecordId),
}

impl RecordRef {
    pub fn id(&self) -> RecordId {
        match self {
            RecordRef::Resolved(record) => record.id(),
            RecordRef::Pending(id) => *id,
        }
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            RecordRef::Resolved(record) => Some(record),
            RecordRef::Pending(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, RecordRef::Resolved(_))
    }
}

impl From<Record> for RecordRef {
    fn from(record: Record) -> Self {
        RecordRef::Resolved(record)
    }
}

impl From<RecordId> for RecordRef {
    fn from(id: RecordId) -> Self {
        RecordRef::Pending(id)
    }
}

impl IdentityRegistry {
    /// Turns a pending id into a record handle. Resolved references pass
    /// through untouched.
    ///
    /// An id with no live record is logged and handed back as `Pending`.
    /// Partially loaded documents rely on this; callers must handle both
    /// variants.
    pub fn resolve(&self, reference: RecordRef) -> RecordRef {
        match reference {
            RecordRef::Resolved(_) => reference,
            RecordRef::Pending(id) => match self.find(None, id) {
                Some(record) => RecordRef::Resolved(record.clone()),
                None => {
                    error!(%id, "Could not resolve reference");
                    RecordRef::Pending(id)
                }
            },
        }
    }
}
