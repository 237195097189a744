//! Property coverage for repeatable-annotation flattening.

use proptest::prelude::*;
use relmeta_annotate::prelude::*;
use std::sync::Arc;

fn element_descriptor() -> Arc<AnnotationDescriptor> {
    AnnotationDescriptor::builder("Label")
        .attribute("name", Some(AnnotationValue::str("")))
        .repeatable_in("Labels")
        .build()
}

fn container_descriptor() -> Arc<AnnotationDescriptor> {
    AnnotationDescriptor::builder("Labels")
        .attribute("value", Some(AnnotationValue::List(Vec::new())))
        .container_of("Label")
        .build()
}

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

proptest! {
    /// flatten(container(elements)) == elements, for any non-empty list.
    #[test]
    fn container_flattening_round_trips(names in prop::collection::vec("[a-z]{1,12}", 1..16)) {
        let elements: Vec<_> = names
            .iter()
            .map(|name| {
                AnnotationUsage::builder(element_descriptor())
                    .value("name", AnnotationValue::str(name.clone()))
                    .unwrap()
                    .build()
            })
            .collect();

        let container = AnnotationUsage::builder(container_descriptor())
            .value(
                "value",
                AnnotationValue::List(
                    elements.iter().cloned().map(AnnotationValue::Nested).collect(),
                ),
            )
            .unwrap()
            .build();

        let probe = Probe { usages: Usages::eager([container]) };

        let flattened = probe.get_usages(&element_descriptor());
        prop_assert_eq!(flattened.len(), names.len());
        for (usage, name) in flattened.iter().zip(&names) {
            prop_assert_eq!(usage.string_value("name").unwrap(), name.as_str());
        }

        // The container type never answers queries of its own.
        prop_assert!(probe.get_usages(&container_descriptor()).is_empty());
    }
}
