use crate::model::{
    collection::CollectionMapping,
    embedded::EmbeddedValueMapping,
    identifiable::IdentifiableTypeMapping,
};
use std::{collections::BTreeMap, sync::Arc};

///
/// EntityHierarchy
///
/// One entity inheritance tree. Exactly one root entity per hierarchy;
/// mapped-superclasses may sit above the root as ancestors, never as
/// siblings.
///

#[derive(Clone, Debug)]
pub struct EntityHierarchy {
    pub root_entity: String,
}

///
/// BootModel
///
/// The assembled boot metadata graph, keyed by managed name throughout.
///

#[derive(Debug, Default)]
pub struct BootModel {
    pub types: BTreeMap<String, IdentifiableTypeMapping>,
    pub embeddables: BTreeMap<String, Arc<EmbeddedValueMapping>>,
    pub collections: BTreeMap<String, Arc<CollectionMapping>>,
    pub hierarchies: Vec<EntityHierarchy>,
}

impl BootModel {
    #[must_use]
    pub fn get_type(&self, managed_name: &str) -> Option<&IdentifiableTypeMapping> {
        self.types.get(managed_name)
    }

    #[must_use]
    pub fn entity(&self, managed_name: &str) -> Option<&IdentifiableTypeMapping> {
        self.types.get(managed_name).filter(|t| t.is_entity())
    }

    /// Walk from `start` to the top of the physical inheritance chain.
    #[must_use]
    pub fn root_root(&self, start: &str) -> String {
        let mut current = start.to_string();
        while let Some(super_name) = self
            .types
            .get(&current)
            .and_then(IdentifiableTypeMapping::super_type)
        {
            current = super_name.to_string();
        }
        current
    }
}
