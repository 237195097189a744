use crate::{
    descriptor::{
        BasicAttribute, EmbeddedTypeDescriptor, EntityDescriptor, ForeignKeyDescriptor,
        MappedSuperclassDescriptor, PersistentCollectionDescriptor,
    },
    error::RuntimeModelError,
    graph::RootGraph,
};
use std::{collections::BTreeMap, sync::Arc};

///
/// InFlightRuntimeModel
///
/// Descriptor registries while runtime-model creation is still running.
/// Owned and mutated by the creation process on the single boot thread.
///

#[derive(Debug, Default)]
pub struct InFlightRuntimeModel {
    entities: BTreeMap<String, Arc<EntityDescriptor>>,
    entity_names: BTreeMap<String, String>,
    mapped_superclasses: BTreeMap<String, Arc<MappedSuperclassDescriptor>>,
    embeddables: BTreeMap<String, Arc<EmbeddedTypeDescriptor>>,
    collections: BTreeMap<String, Arc<PersistentCollectionDescriptor>>,
}

impl InFlightRuntimeModel {
    pub fn register_entity(&mut self, descriptor: Arc<EntityDescriptor>) {
        self.entity_names.insert(
            descriptor.entity_name().to_string(),
            descriptor.managed_name().to_string(),
        );
        self.entities
            .insert(descriptor.managed_name().to_string(), descriptor);
    }

    pub fn register_mapped_superclass(&mut self, descriptor: Arc<MappedSuperclassDescriptor>) {
        self.mapped_superclasses
            .insert(descriptor.managed_name().to_string(), descriptor);
    }

    pub fn register_embeddable(&mut self, descriptor: Arc<EmbeddedTypeDescriptor>) {
        self.embeddables
            .insert(descriptor.managed_name().to_string(), descriptor);
    }

    pub fn register_collection(&mut self, descriptor: Arc<PersistentCollectionDescriptor>) {
        self.collections
            .insert(descriptor.role().to_string(), descriptor);
    }

    #[must_use]
    pub fn entity(&self, managed_name: &str) -> Option<Arc<EntityDescriptor>> {
        self.entities.get(managed_name).cloned()
    }

    /// Lookup by managed name or entity logical name.
    #[must_use]
    pub fn entity_by_any_name(&self, name: &str) -> Option<Arc<EntityDescriptor>> {
        self.entity(name).or_else(|| {
            self.entity_names
                .get(name)
                .and_then(|managed| self.entity(managed))
        })
    }

    #[must_use]
    pub fn mapped_superclass(&self, managed_name: &str) -> Option<Arc<MappedSuperclassDescriptor>> {
        self.mapped_superclasses.get(managed_name).cloned()
    }

    #[must_use]
    pub fn embeddable(&self, managed_name: &str) -> Option<Arc<EmbeddedTypeDescriptor>> {
        self.embeddables.get(managed_name).cloned()
    }

    #[must_use]
    pub fn collection(&self, role: &str) -> Option<Arc<PersistentCollectionDescriptor>> {
        self.collections.get(role).cloned()
    }

    #[must_use]
    pub fn embeddable_descriptors(&self) -> Vec<Arc<EmbeddedTypeDescriptor>> {
        self.embeddables.values().cloned().collect()
    }

    #[must_use]
    pub fn collection_descriptors(&self) -> Vec<Arc<PersistentCollectionDescriptor>> {
        self.collections.values().cloned().collect()
    }

    /// Identifier attribute for a type, walking up the hierarchy when the
    /// type inherits it.
    #[must_use]
    pub fn identifier_attribute(&self, managed_name: &str) -> Option<BasicAttribute> {
        let mut current = Some(managed_name.to_string());
        while let Some(name) = current {
            if let Some(entity) = self.entities.get(&name) {
                if let Some(id) = entity.identifier_attribute() {
                    return Some(id.clone());
                }
                current = entity.super_type().map(ToString::to_string);
            } else if let Some(mapped) = self.mapped_superclasses.get(&name) {
                if let Some(id) = mapped.identifier_attribute() {
                    return Some(id.clone());
                }
                current = mapped.super_type().map(ToString::to_string);
            } else {
                return None;
            }
        }
        None
    }

    pub(crate) fn freeze(
        self,
        foreign_keys: BTreeMap<String, ForeignKeyDescriptor>,
        entity_graphs: BTreeMap<String, RootGraph>,
    ) -> RuntimeModel {
        RuntimeModel {
            entities: self.entities,
            entity_names: self.entity_names,
            mapped_superclasses: self.mapped_superclasses,
            embeddables: self.embeddables,
            collections: self.collections,
            foreign_keys,
            entity_graphs,
        }
    }
}

///
/// RuntimeModel
///
/// The frozen, queryable metamodel. Effectively immutable after boot; read
/// concurrently by request-serving threads without locking.
///

#[derive(Debug)]
pub struct RuntimeModel {
    entities: BTreeMap<String, Arc<EntityDescriptor>>,
    entity_names: BTreeMap<String, String>,
    mapped_superclasses: BTreeMap<String, Arc<MappedSuperclassDescriptor>>,
    embeddables: BTreeMap<String, Arc<EmbeddedTypeDescriptor>>,
    collections: BTreeMap<String, Arc<PersistentCollectionDescriptor>>,
    foreign_keys: BTreeMap<String, ForeignKeyDescriptor>,
    entity_graphs: BTreeMap<String, RootGraph>,
}

impl RuntimeModel {
    #[must_use]
    pub fn find_entity_descriptor(&self, name: &str) -> Option<Arc<EntityDescriptor>> {
        self.entities.get(name).cloned().or_else(|| {
            self.entity_names
                .get(name)
                .and_then(|managed| self.entities.get(managed).cloned())
        })
    }

    pub fn get_entity_descriptor(
        &self,
        name: &str,
    ) -> Result<Arc<EntityDescriptor>, RuntimeModelError> {
        self.find_entity_descriptor(name)
            .ok_or_else(|| RuntimeModelError::UnknownReference {
                kind: "entity",
                name: name.to_string(),
                referenced_from: "runtime model".to_string(),
            })
    }

    #[must_use]
    pub fn mapped_superclass(&self, managed_name: &str) -> Option<Arc<MappedSuperclassDescriptor>> {
        self.mapped_superclasses.get(managed_name).cloned()
    }

    #[must_use]
    pub fn embeddable(&self, managed_name: &str) -> Option<Arc<EmbeddedTypeDescriptor>> {
        self.embeddables.get(managed_name).cloned()
    }

    #[must_use]
    pub fn collection(&self, role: &str) -> Option<Arc<PersistentCollectionDescriptor>> {
        self.collections.get(role).cloned()
    }

    #[must_use]
    pub fn foreign_key(&self, role: &str) -> Option<&ForeignKeyDescriptor> {
        self.foreign_keys.get(role)
    }

    #[must_use]
    pub fn entity_graph(&self, name: &str) -> Option<&RootGraph> {
        self.entity_graphs.get(name)
    }

    #[must_use]
    pub fn entity_descriptors(&self) -> impl Iterator<Item = &Arc<EntityDescriptor>> {
        self.entities.values()
    }

    /// Identifier attribute for a type, walking up the hierarchy when the
    /// type inherits it.
    #[must_use]
    pub fn identifier_attribute(&self, managed_name: &str) -> Option<BasicAttribute> {
        let mut current = Some(managed_name.to_string());
        while let Some(name) = current {
            if let Some(entity) = self.entities.get(&name) {
                if let Some(id) = entity.identifier_attribute() {
                    return Some(id.clone());
                }
                current = entity.super_type().map(ToString::to_string);
            } else if let Some(mapped) = self.mapped_superclasses.get(&name) {
                if let Some(id) = mapped.identifier_attribute() {
                    return Some(id.clone());
                }
                current = mapped.super_type().map(ToString::to_string);
            } else {
                return None;
            }
        }
        None
    }
}
