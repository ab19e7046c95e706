use crate::error::ModelError;
use crate::record::{
    AttributeProps, AttributeRecord, CaseProps, CaseRecord, CollectionProps, CollectionRecord, Record,
};
use crate::registry::IdentityRegistry;
use crate::types::{FastMap, RecordType};
use serde_json::Value;

/// Builds and registers a record of one kind from loosely typed properties.
pub type FactoryFn = fn(&mut IdentityRegistry, Value) -> Result<Record, ModelError>;

// ─── RecordFactory ──────────────────────────────────────────────────────────

/// Type tag → constructor table used by import code that only knows a
/// record's class name.
///
/// Records built here are registered but not attached to any collection's
/// lists; use [`Collection`](crate::Collection) for indexed cases.
#[derive(Debug, Clone)]
pub struct RecordFactory {
    factories: FastMap<RecordType, FactoryFn>,
}

impl Default for RecordFactory {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl RecordFactory {
    pub fn empty() -> Self {
        Self {
            factories: FastMap::default(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut factory = Self::empty();
        factory.register_factory(RecordType::Attribute, create_attribute);
        factory.register_factory(RecordType::Case, create_case);
        factory.register_factory(RecordType::Collection, create_collection);
        factory
    }

    /// Installs `f` for `record_type`, returning the one it replaced.
    pub fn register_factory(&mut self, record_type: RecordType, f: FactoryFn) -> Option<FactoryFn> {
        self.factories.insert(record_type, f)
    }

    pub fn supports(&self, record_type: RecordType) -> bool {
        self.factories.contains_key(&record_type)
    }

    /// Creates a record from a class name such as `"DG.Case"`.
    pub fn create(
        &self,
        registry: &mut IdentityRegistry,
        class_name: &str,
        props: Value,
    ) -> Result<Record, ModelError> {
        let record_type = RecordType::from_class_name(class_name)
            .ok_or_else(|| ModelError::UnknownRecordType(class_name.to_string()))?;
        self.create_typed(registry, record_type, props)
    }

    pub fn create_typed(
        &self,
        registry: &mut IdentityRegistry,
        record_type: RecordType,
        props: Value,
    ) -> Result<Record, ModelError> {
        let f = self
            .factories
            .get(&record_type)
            .ok_or(ModelError::MissingFactory(record_type))?;
        f(registry, props)
    }
}

fn create_attribute(registry: &mut IdentityRegistry, props: Value) -> Result<Record, ModelError> {
    let props: AttributeProps = serde_json::from_value(props)?;
    Ok(AttributeRecord::create(registry, props)?.into())
}

fn create_case(registry: &mut IdentityRegistry, props: Value) -> Result<Record, ModelError> {
    let props: CaseProps = serde_json::from_value(props)?;
    Ok(CaseRecord::create(registry, props)?.into())
}

fn create_collection(registry: &mut IdentityRegistry, props: Value) -> Result<Record, ModelError> {
    let props: CollectionProps = serde_json::from_value(props)?;
    Ok(CollectionRecord::create(registry, props)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordId;
    use serde_json::json;

    #[test]
    fn test_create_from_namespaced_class_name() {
        let factory = RecordFactory::with_builtins();
        let mut registry = IdentityRegistry::new();

        let record = factory
            .create(&mut registry, "DG.Attribute", json!({ "name": "mass", "guid": 12 }))
            .unwrap();

        assert_eq!(record.record_type(), RecordType::Attribute);
        assert_eq!(record.id(), RecordId::new(12));
        let attr = registry.find_attribute(RecordId::new(12)).unwrap();
        assert_eq!(attr.name(), "mass");
    }

    #[test]
    fn test_create_case_with_parent() {
        let factory = RecordFactory::default();
        let mut registry = IdentityRegistry::new();

        let record = factory.create(&mut registry, "Case", json!({ "parent": 5 })).unwrap();

        let case = record.as_case().unwrap();
        assert_eq!(case.parent(), Some(RecordId::new(5)));
        assert!(registry.contains(case.id()));
    }

    #[test]
    fn test_unknown_class_name() {
        let factory = RecordFactory::with_builtins();
        let mut registry = IdentityRegistry::new();
        let err = factory.create(&mut registry, "DG.Document", json!({})).unwrap_err();
        assert!(matches!(err, ModelError::UnknownRecordType(name) if name == "DG.Document"));
    }

    #[test]
    fn test_missing_factory() {
        let factory = RecordFactory::empty();
        let mut registry = IdentityRegistry::new();
        let err = factory.create(&mut registry, "DG.Case", json!({})).unwrap_err();
        assert!(matches!(err, ModelError::MissingFactory(RecordType::Case)));
        assert!(!factory.supports(RecordType::Case));
    }

    #[test]
    fn test_invalid_props_register_nothing() {
        let factory = RecordFactory::with_builtins();
        let mut registry = IdentityRegistry::new();
        let err = factory
            .create(&mut registry, "Collection", json!({ "name": 3 }))
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidProps(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_override_factory() {
        fn always_case(registry: &mut IdentityRegistry, _props: Value) -> Result<Record, ModelError> {
            Ok(CaseRecord::create(registry, CaseProps::default())?.into())
        }

        let mut factory = RecordFactory::with_builtins();
        assert!(factory.register_factory(RecordType::Attribute, always_case).is_some());
        let mut registry = IdentityRegistry::new();
        let record = factory.create(&mut registry, "Attribute", json!({})).unwrap();
        assert_eq!(record.record_type(), RecordType::Case);
    }
}
