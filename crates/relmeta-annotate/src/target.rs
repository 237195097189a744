use crate::{
    descriptor::AnnotationDescriptor,
    error::AccessError,
    usage::AnnotationUsage,
    value::TypeName,
};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};

/// Marker annotations describing annotation usage itself; they carry no
/// modeling value and are dropped during classification.
const META_ANNOTATIONS: [&str; 5] = ["Target", "Retention", "Documented", "Inherited", "Repeatable"];

#[must_use]
pub fn is_meta_annotation(name: &TypeName) -> bool {
    META_ANNOTATIONS.contains(&name.as_str())
}

///
/// TargetKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TargetKind {
    AnnotationType,
    Class,
    Field,
    Method,
    Package,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AnnotationType => "annotation",
            Self::Class => "class",
            Self::Field => "field",
            Self::Method => "method",
            Self::Package => "package",
        };
        write!(f, "{label}")
    }
}

///
/// UsageMap
///
/// Annotation-type → usages, with repeatable-container forms pre-flattened.
/// Invariant: nothing is ever stored under a container type's key, so the
/// container type is not directly queryable.
///

#[derive(Debug, Default)]
pub struct UsageMap {
    by_type: HashMap<TypeName, Vec<Arc<AnnotationUsage>>>,
}

impl UsageMap {
    /// Classify one raw usage into the map.
    ///
    /// 1. Meta-annotations are skipped.
    /// 2. A repeatable element is stored under its own type as a singleton:
    ///    an element and its container cannot both decorate one target, so a
    ///    directly-seen element is alone.
    /// 3. A container has its nested `value` array flattened under the
    ///    registered element type.
    /// 4. Anything else is a singleton under its own type.
    ///
    /// A usage already registered for the same type key is silently replaced.
    /// That replacement semantic is ambiguous in the source model
    /// (ignore? log? fail?) and is deliberately kept as observed.
    pub fn classify(&mut self, usage: Arc<AnnotationUsage>) {
        let descriptor = usage.descriptor().clone();
        let annotation_type = descriptor.annotation_type();

        if is_meta_annotation(annotation_type) {
            return;
        }

        if descriptor.is_repeatable() {
            self.by_type
                .insert(annotation_type.clone(), vec![usage]);
            return;
        }

        if let Some(element_type) = descriptor.container_element() {
            let flattened = usage
                .find_value("value")
                .ok()
                .flatten()
                .map(crate::value::AnnotationValue::nested_usages)
                .unwrap_or_default();
            self.by_type.insert(element_type.clone(), flattened);
            return;
        }

        self.by_type.insert(annotation_type.clone(), vec![usage]);
    }

    #[must_use]
    pub fn of_type(&self, annotation_type: &TypeName) -> Vec<Arc<AnnotationUsage>> {
        self.by_type
            .get(annotation_type)
            .cloned()
            .unwrap_or_default()
    }
}

///
/// Usages
///
/// Lifecycle variants behind one read contract: `Eager` is computed at
/// construction from a raw usage list (reflective sources); `Delayed`
/// accumulates incrementally via [`Usages::apply`] (XML synthesis, where the
/// annotation set is not known upfront).
///

#[derive(Debug)]
pub enum Usages {
    Eager(UsageMap),
    Delayed(RwLock<UsageMap>),
}

impl Usages {
    #[must_use]
    pub fn eager(raw: impl IntoIterator<Item = Arc<AnnotationUsage>>) -> Self {
        let mut map = UsageMap::default();
        for usage in raw {
            map.classify(usage);
        }
        Self::Eager(map)
    }

    #[must_use]
    pub fn delayed() -> Self {
        Self::Delayed(RwLock::new(UsageMap::default()))
    }

    #[must_use]
    pub fn of_type(&self, annotation_type: &TypeName) -> Vec<Arc<AnnotationUsage>> {
        match self {
            Self::Eager(map) => map.of_type(annotation_type),
            Self::Delayed(map) => map
                .read()
                .expect("delayed usage map lock poisoned while reading")
                .of_type(annotation_type),
        }
    }

    /// Register a usage on a delayed target. Fails on an eager target, whose
    /// usage set was fixed at construction.
    pub fn apply(&self, usage: Arc<AnnotationUsage>, target: &str) -> Result<(), AccessError> {
        match self {
            Self::Eager(_) => Err(AccessError::ImmutableTarget {
                annotation: usage.annotation_type().clone(),
                target: target.to_string(),
            }),
            Self::Delayed(map) => {
                map.write()
                    .expect("delayed usage map lock poisoned while applying")
                    .classify(usage);
                Ok(())
            }
        }
    }
}

///
/// AnnotationTarget
///
/// The carries-annotations capability. Implemented by every program-element
/// variant (class, field, method, package, annotation type); downstream
/// binders read all mapping metadata through this trait alone.
///

pub trait AnnotationTarget {
    fn target_kind(&self) -> TargetKind;

    /// Human-readable identity for error messages.
    fn target_name(&self) -> String;

    fn usages(&self) -> &Usages;

    /// All usages of an annotation type, repeated or singular. Container
    /// forms were flattened at classification, so querying a container type
    /// yields nothing.
    fn get_usages(&self, descriptor: &AnnotationDescriptor) -> Vec<Arc<AnnotationUsage>> {
        self.usages().of_type(descriptor.annotation_type())
    }

    /// The single usage of a non-repeatable annotation type, or `None`.
    /// More than one usage for a type not modeled as repeatable is an access
    /// error.
    fn get_usage(
        &self,
        descriptor: &AnnotationDescriptor,
    ) -> Result<Option<Arc<AnnotationUsage>>, AccessError> {
        let mut usages = self.get_usages(descriptor);
        if usages.len() > 1 && !descriptor.is_repeatable() {
            return Err(AccessError::MultipleUsages {
                annotation: descriptor.annotation_type().clone(),
                target: self.target_name(),
            });
        }
        Ok(usages.pop())
    }

    /// First usage whose `attribute` value equals `name`. The lookup
    /// primitive for named-graph, named-query, and similar by-name
    /// annotations.
    fn get_named_usage(
        &self,
        descriptor: &AnnotationDescriptor,
        name: &str,
        attribute: &str,
    ) -> Result<Option<Arc<AnnotationUsage>>, AccessError> {
        for usage in self.get_usages(descriptor) {
            if usage.string_value(attribute)? == name {
                return Ok(Some(usage));
            }
        }
        Ok(None)
    }

    /// Register a usage on a delayed-lifecycle target.
    fn apply(&self, usage: Arc<AnnotationUsage>) -> Result<(), AccessError> {
        self.usages().apply(usage, &self.target_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        descriptor::AnnotationDescriptor,
        usage::AnnotationUsage,
        value::AnnotationValue,
    };

    struct Probe {
        usages: Usages,
    }

    impl AnnotationTarget for Probe {
        fn target_kind(&self) -> TargetKind {
            TargetKind::Class
        }

        fn target_name(&self) -> String {
            "class Probe".to_string()
        }

        fn usages(&self) -> &Usages {
            &self.usages
        }
    }

    fn element_descriptor() -> Arc<AnnotationDescriptor> {
        AnnotationDescriptor::builder("Tag")
            .attribute("name", Some(AnnotationValue::str("")))
            .repeatable_in("Tags")
            .build()
    }

    fn container_descriptor() -> Arc<AnnotationDescriptor> {
        AnnotationDescriptor::builder("Tags")
            .attribute("value", Some(AnnotationValue::List(Vec::new())))
            .container_of("Tag")
            .build()
    }

    fn tag(name: &str) -> Arc<AnnotationUsage> {
        AnnotationUsage::builder(element_descriptor())
            .value("name", AnnotationValue::str(name))
            .unwrap()
            .build()
    }

    #[test]
    fn container_usages_flatten_to_elements() {
        let container = AnnotationUsage::builder(container_descriptor())
            .value(
                "value",
                AnnotationValue::List(vec![
                    AnnotationValue::Nested(tag("a")),
                    AnnotationValue::Nested(tag("b")),
                ]),
            )
            .unwrap()
            .build();

        let probe = Probe {
            usages: Usages::eager([container]),
        };

        let elements = probe.get_usages(&element_descriptor());
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].string_value("name").unwrap(), "a");
        assert_eq!(elements[1].string_value("name").unwrap(), "b");

        // The container type itself is never queryable.
        assert!(probe.get_usages(&container_descriptor()).is_empty());
    }

    #[test]
    fn direct_repeatable_element_is_a_singleton() {
        let probe = Probe {
            usages: Usages::eager([tag("solo")]),
        };
        let elements = probe.get_usages(&element_descriptor());
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].string_value("name").unwrap(), "solo");
    }

    #[test]
    fn meta_annotations_are_skipped() {
        let meta = AnnotationUsage::builder(
            AnnotationDescriptor::builder("Retention").build(),
        )
        .build();
        let probe = Probe {
            usages: Usages::eager([meta]),
        };
        assert!(
            probe
                .get_usages(&AnnotationDescriptor::builder("Retention").build())
                .is_empty()
        );
    }

    #[test]
    fn named_usage_scans_by_attribute() {
        let container = AnnotationUsage::builder(container_descriptor())
            .value(
                "value",
                AnnotationValue::List(vec![
                    AnnotationValue::Nested(tag("first")),
                    AnnotationValue::Nested(tag("second")),
                ]),
            )
            .unwrap()
            .build();
        let probe = Probe {
            usages: Usages::eager([container]),
        };

        let found = probe
            .get_named_usage(&element_descriptor(), "second", "name")
            .unwrap()
            .unwrap();
        assert_eq!(found.string_value("name").unwrap(), "second");

        assert!(
            probe
                .get_named_usage(&element_descriptor(), "third", "name")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn apply_on_delayed_replaces_silently() {
        let single = AnnotationDescriptor::builder("Mark")
            .attribute("name", Some(AnnotationValue::str("")))
            .build();
        let probe = Probe {
            usages: Usages::delayed(),
        };

        let first = AnnotationUsage::builder(single.clone())
            .value("name", AnnotationValue::str("one"))
            .unwrap()
            .build();
        let second = AnnotationUsage::builder(single.clone())
            .value("name", AnnotationValue::str("two"))
            .unwrap()
            .build();

        probe.apply(first).unwrap();
        probe.apply(second).unwrap();

        let usages = probe.get_usages(&single);
        assert_eq!(usages.len(), 1);
        assert_eq!(usages[0].string_value("name").unwrap(), "two");
    }

    #[test]
    fn apply_on_eager_is_rejected() {
        let single = AnnotationDescriptor::builder("Mark").build();
        let probe = Probe {
            usages: Usages::eager([]),
        };
        assert!(matches!(
            probe.apply(AnnotationUsage::builder(single).build()),
            Err(AccessError::ImmutableTarget { .. })
        ));
    }

    #[test]
    fn multiple_singular_usages_fail_on_get_usage() {
        // Two distinct non-repeatable usages cannot coexist through classify
        // (same key replaces), so force the state through separate types and
        // a hand-built map to cover the guard.
        let single = AnnotationDescriptor::builder("Mark").build();
        let mut map = UsageMap::default();
        map.by_type.insert(
            single.annotation_type().clone(),
            vec![
                AnnotationUsage::builder(single.clone()).build(),
                AnnotationUsage::builder(single.clone()).build(),
            ],
        );
        let probe = Probe {
            usages: Usages::Eager(map),
        };
        assert!(matches!(
            probe.get_usage(&single),
            Err(AccessError::MultipleUsages { .. })
        ));
    }
}
