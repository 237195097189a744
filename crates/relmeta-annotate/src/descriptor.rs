use crate::{
    error::RegistryError,
    value::{AnnotationValue, TypeName},
};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

///
/// AttributeDescriptor
///
/// One attribute of an annotation type: its name and declared default.
/// The explicit table replaces per-access reflective extraction; values are
/// pulled from usages by name against this table.
///

#[derive(Clone, Debug)]
pub struct AttributeDescriptor {
    pub name: String,
    pub default: Option<AnnotationValue>,
}

///
/// AnnotationDescriptor
///
/// Describes an annotation *type*: identity, attribute table, and repeatable
/// linkage. Immutable once constructed; built once per annotation type and
/// cached in the descriptor registry.
///

#[derive(Debug)]
pub struct AnnotationDescriptor {
    annotation_type: TypeName,
    attributes: Vec<AttributeDescriptor>,
    repeatable_container: Option<TypeName>,
    container_element: Option<TypeName>,
}

impl AnnotationDescriptor {
    #[must_use]
    pub fn builder(annotation_type: impl Into<TypeName>) -> AnnotationDescriptorBuilder {
        AnnotationDescriptorBuilder {
            annotation_type: annotation_type.into(),
            attributes: Vec::new(),
            repeatable_container: None,
            container_element: None,
        }
    }

    #[must_use]
    pub const fn annotation_type(&self) -> &TypeName {
        &self.annotation_type
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    /// The container type this annotation repeats under, if repeatable.
    #[must_use]
    pub const fn repeatable_container(&self) -> Option<&TypeName> {
        self.repeatable_container.as_ref()
    }

    /// The repeated element type, if this annotation is itself a container.
    #[must_use]
    pub const fn container_element(&self) -> Option<&TypeName> {
        self.container_element.as_ref()
    }

    #[must_use]
    pub const fn is_repeatable(&self) -> bool {
        self.repeatable_container.is_some()
    }

    #[must_use]
    pub const fn is_container(&self) -> bool {
        self.container_element.is_some()
    }
}

///
/// AnnotationDescriptorBuilder
///

pub struct AnnotationDescriptorBuilder {
    annotation_type: TypeName,
    attributes: Vec<AttributeDescriptor>,
    repeatable_container: Option<TypeName>,
    container_element: Option<TypeName>,
}

impl AnnotationDescriptorBuilder {
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, default: Option<AnnotationValue>) -> Self {
        self.attributes.push(AttributeDescriptor {
            name: name.into(),
            default,
        });
        self
    }

    /// Mark the annotation repeatable under `container`.
    #[must_use]
    pub fn repeatable_in(mut self, container: impl Into<TypeName>) -> Self {
        self.repeatable_container = Some(container.into());
        self
    }

    /// Mark the annotation as the container for repeated `element` usages.
    #[must_use]
    pub fn container_of(mut self, element: impl Into<TypeName>) -> Self {
        self.container_element = Some(element.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Arc<AnnotationDescriptor> {
        Arc::new(AnnotationDescriptor {
            annotation_type: self.annotation_type,
            attributes: self.attributes,
            repeatable_container: self.repeatable_container,
            container_element: self.container_element,
        })
    }
}

///
/// AnnotationDescriptorRegistry
///
/// One authoritative descriptor cache per boot context, passed by reference
/// through the binding pipeline. Concurrent reads are tolerated; writes only
/// happen while a boot is assembling its descriptor set.
///

#[derive(Debug, Default)]
pub struct AnnotationDescriptorRegistry {
    descriptors: RwLock<HashMap<TypeName, Arc<AnnotationDescriptor>>>,
}

impl AnnotationDescriptorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, descriptor: Arc<AnnotationDescriptor>) {
        self.descriptors
            .write()
            .expect("descriptor registry lock poisoned while registering")
            .insert(descriptor.annotation_type().clone(), descriptor);
    }

    #[must_use]
    pub fn find(&self, name: &TypeName) -> Option<Arc<AnnotationDescriptor>> {
        self.descriptors
            .read()
            .expect("descriptor registry lock poisoned while reading")
            .get(name)
            .cloned()
    }

    pub fn require(&self, name: &str) -> Result<Arc<AnnotationDescriptor>, RegistryError> {
        let name = TypeName::from(name);
        self.find(&name)
            .ok_or(RegistryError::UnknownAnnotationType { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_table_lookup() {
        let desc = AnnotationDescriptor::builder("Widget")
            .attribute("name", Some(AnnotationValue::str("")))
            .attribute("size", Some(AnnotationValue::Int(1)))
            .build();

        assert_eq!(desc.attribute("size").unwrap().name, "size");
        assert!(desc.attribute("missing").is_none());
        assert!(!desc.is_repeatable());
        assert!(!desc.is_container());
    }

    #[test]
    fn registry_round_trip() {
        let registry = AnnotationDescriptorRegistry::new();
        registry.register(AnnotationDescriptor::builder("Widget").build());

        assert!(registry.find(&TypeName::from("Widget")).is_some());
        assert!(registry.require("Nope").is_err());
    }
}
