//! Id registry and per-parent case indexing for hierarchical data documents.
//!
//! [`IdentityRegistry`] hands out process-unique [`RecordId`]s and resolves
//! them back to records. [`Collection`] owns a collection's attributes and
//! cases and keeps each case's ordinal within its parent group consistent
//! as cases come and go.

pub mod collection;
pub mod error;
pub mod factory;
pub mod hierarchy;
pub mod record;
pub mod registry;
pub mod types;

pub use collection::{Collection, CollectionSnapshot};
pub use error::{ModelError, RegistryError};
pub use factory::{FactoryFn, RecordFactory};
pub use hierarchy::SchemaHierarchy;
pub use record::{
    AttributeProps, AttributeRecord, CaseProps, CaseRecord, CollectionProps, CollectionRecord, Record,
    Registrable,
};
pub use registry::{IdentityRegistry, RecordRef};
pub use types::{FastHashSet, FastMap, RecordId, RecordType, RegistryConfig};
