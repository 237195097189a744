use crate::{class_details::ClassDetails, error::RegistryError};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

///
/// ClassDetailsRegistry
///
/// Single source of truth from managed-type name to [`ClassDetails`], plus a
/// reverse super-type → direct-subtypes index for hierarchy walking.
///
/// Writes happen on the single boot thread; the concurrent-safe interior only
/// exists so embedding scenarios can read from several bootstrap threads.
/// Concurrent resolution of one unregistered name converges on a single
/// winning descriptor.
///

#[derive(Debug, Default)]
pub struct ClassDetailsRegistry {
    classes: RwLock<HashMap<String, Arc<ClassDetails>>>,
    direct_subtypes: RwLock<HashMap<String, Vec<Arc<ClassDetails>>>>,
}

impl ClassDetailsRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Nullable lookup, no side effect.
    #[must_use]
    pub fn find_managed_class(&self, name: &str) -> Option<Arc<ClassDetails>> {
        self.classes
            .read()
            .expect("class registry lock poisoned while reading")
            .get(name)
            .cloned()
    }

    /// Lookup that treats absence as a modeling failure.
    pub fn get_managed_class(&self, name: &str) -> Result<Arc<ClassDetails>, RegistryError> {
        self.find_managed_class(name)
            .ok_or_else(|| RegistryError::UnknownManagedClass {
                name: name.to_string(),
            })
    }

    /// Find-or-create. The builder runs at most once per winning resolution;
    /// a racing thread's redundant descriptor is discarded, never registered
    /// alongside the winner.
    pub fn resolve_managed_class(
        &self,
        name: &str,
        builder: impl FnOnce(&str) -> Arc<ClassDetails>,
    ) -> Arc<ClassDetails> {
        if let Some(existing) = self.find_managed_class(name) {
            return existing;
        }

        let mut classes = self
            .classes
            .write()
            .expect("class registry lock poisoned while resolving");
        if let Some(existing) = classes.get(name) {
            return existing.clone();
        }

        let created = builder(name);
        classes.insert(name.to_string(), created.clone());
        drop(classes);

        self.index_subtype(&created);
        created
    }

    /// Find-or-create with the fallback builder: a bare, delayed-lifecycle
    /// descriptor carrying only the name (dotted names double as the type
    /// name).
    pub fn resolve_managed_class_default(&self, name: &str) -> Arc<ClassDetails> {
        self.resolve_managed_class(name, |name| {
            let mut builder = ClassDetails::builder(name);
            if name.contains('.') {
                builder = builder.class_name(name);
            }
            builder.build()
        })
    }

    /// Register by name, maintaining the reverse subtype index. Re-registering
    /// a name replaces the previous descriptor and its subtype-index entry
    /// rather than duplicating it.
    pub fn add_managed_class(&self, class_details: Arc<ClassDetails>) {
        let previous = self
            .classes
            .write()
            .expect("class registry lock poisoned while adding")
            .insert(class_details.name().to_string(), class_details.clone());

        if let Some(previous) = previous
            && let Some(super_name) = previous.super_class()
        {
            let mut index = self
                .direct_subtypes
                .write()
                .expect("subtype index lock poisoned while removing");
            if let Some(entries) = index.get_mut(super_name) {
                entries.retain(|c| c.name() != previous.name());
            }
        }

        self.index_subtype(&class_details);
    }

    /// Direct subtypes of a registered super-type, in registration order.
    #[must_use]
    pub fn get_direct_subtypes(&self, super_name: &str) -> Vec<Arc<ClassDetails>> {
        self.direct_subtypes
            .read()
            .expect("subtype index lock poisoned while reading")
            .get(super_name)
            .cloned()
            .unwrap_or_default()
    }

    /// All registered classes, sorted by name for deterministic iteration.
    #[must_use]
    pub fn all_managed_classes(&self) -> Vec<Arc<ClassDetails>> {
        let mut all: Vec<_> = self
            .classes
            .read()
            .expect("class registry lock poisoned while listing")
            .values()
            .cloned()
            .collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    fn index_subtype(&self, class_details: &Arc<ClassDetails>) {
        let Some(super_name) = class_details.super_class() else {
            return;
        };
        let mut index = self
            .direct_subtypes
            .write()
            .expect("subtype index lock poisoned while indexing");
        let entries = index.entry(super_name.to_string()).or_default();
        entries.retain(|c| c.name() != class_details.name());
        entries.push(class_details.clone());
    }
}
