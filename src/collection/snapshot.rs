use super::Collection;
use crate::error::RegistryError;
use crate::record::{AttributeProps, CaseProps, CollectionProps};
use crate::registry::IdentityRegistry;
use crate::types::{FastMap, RecordId};
use serde::{Deserialize, Serialize};

/// Everything needed to rebuild a collection with the same ids and the same
/// ordinals: live records only, in stored order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub collection: CollectionProps,
    pub attributes: Vec<AttributeProps>,
    pub cases: Vec<CaseProps>,
}

impl Collection {
    pub fn snapshot(&self) -> CollectionSnapshot {
        CollectionSnapshot {
            collection: self.record.to_props(),
            attributes: self
                .record
                .attrs
                .borrow()
                .iter()
                .filter(|a| !a.is_destroyed())
                .map(|a| a.to_props())
                .collect(),
            cases: self
                .record
                .cases
                .borrow()
                .iter()
                .filter(|c| !c.is_destroyed())
                .map(|c| c.to_props())
                .collect(),
        }
    }

    /// Recreates a snapshotted collection in `registry`.
    ///
    /// Recorded ids are requested ahead of any `guid`, so ids come back
    /// unchanged wherever the target registry has them free. Replaying cases
    /// in stored order reproduces their ordinals.
    pub fn restore(registry: &mut IdentityRegistry, snapshot: CollectionSnapshot) -> Result<Self, RegistryError> {
        Self::restore_remapped(registry, snapshot, &mut FastMap::default())
    }

    /// Like [`Collection::restore`], but threads an old id → new id map
    /// through the replay.
    ///
    /// Case parents are looked up in `remap` before the case is created, and
    /// every record restored here adds its own entry. Restoring parent
    /// collections before their children with one shared map keeps parent
    /// links valid when ids had to be reallocated.
    pub fn restore_remapped(
        registry: &mut IdentityRegistry,
        snapshot: CollectionSnapshot,
        remap: &mut FastMap<RecordId, RecordId>,
    ) -> Result<Self, RegistryError> {
        let mut collection_props = snapshot.collection;
        let old_collection = take_recorded_id(&mut collection_props.id, &mut collection_props.guid);
        let collection = Collection::create(registry, collection_props)?;
        if let Some(old) = old_collection {
            remap.insert(old, collection.id());
        }

        for mut props in snapshot.attributes {
            let old = take_recorded_id(&mut props.id, &mut props.guid);
            let attr = collection.create_attribute(registry, props)?;
            if let Some(old) = old {
                remap.insert(old, attr.id());
            }
        }
        for mut props in snapshot.cases {
            let old = take_recorded_id(&mut props.id, &mut props.guid);
            if let Some(parent) = props.parent {
                props.parent = Some(remap.get(&parent).copied().unwrap_or(parent));
            }
            let case = collection.create_case(registry, props)?;
            if let Some(old) = old {
                remap.insert(old, case.id());
            }
        }
        Ok(collection)
    }
}

/// A recorded id wins over the guid; returns the id for remapping.
fn take_recorded_id(id: &mut Option<RecordId>, guid: &mut Option<RecordId>) -> Option<RecordId> {
    if id.is_some() {
        *guid = None;
    }
    *id
}
