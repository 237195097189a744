use crate::error::BootError;
use relmeta_annotate::{usage::AnnotationUsage, value::TypeName};
use std::{collections::BTreeMap, sync::Arc};

///
/// GeneratorKind
///

#[derive(Clone, Debug, PartialEq)]
pub enum GeneratorKind {
    Sequence {
        sequence_name: String,
        initial_value: i64,
        allocation_size: i64,
    },
    Table {
        table: String,
    },
    Generic {
        strategy: String,
    },
}

///
/// GeneratorRegistration
///

#[derive(Clone, Debug)]
pub struct GeneratorRegistration {
    pub name: String,
    pub kind: GeneratorKind,
}

///
/// ConverterRegistration
///

#[derive(Clone, Debug)]
pub struct ConverterRegistration {
    pub class_name: TypeName,
    pub auto_apply: bool,
}

///
/// TypeContribution
///

#[derive(Clone, Debug)]
pub struct TypeContribution {
    pub class_name: TypeName,
    pub descriptor: String,
}

///
/// NamedQueryDefinition
///

#[derive(Clone, Debug)]
pub struct NamedQueryDefinition {
    pub name: String,
    pub query: String,
}

///
/// NamedGraphDefinition
///
/// A named entity-graph declaration, held as its raw usage until the runtime
/// model exists to apply it against.
///

#[derive(Clone, Debug)]
pub struct NamedGraphDefinition {
    pub name: String,
    pub entity_name: String,
    pub usage: Arc<AnnotationUsage>,
}

///
/// InFlightMetadataCollector
///
/// Accumulates global registrations during boot. One instance per boot
/// context, passed by reference through the pipeline; never a process-wide
/// singleton.
///

#[derive(Debug, Default)]
pub struct InFlightMetadataCollector {
    type_contributions: Vec<TypeContribution>,
    converters: BTreeMap<String, ConverterRegistration>,
    generators: BTreeMap<String, GeneratorRegistration>,
    named_queries: BTreeMap<String, NamedQueryDefinition>,
    entity_graphs: BTreeMap<String, NamedGraphDefinition>,
}

impl InFlightMetadataCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type_contribution(&mut self, contribution: TypeContribution) {
        self.type_contributions.push(contribution);
    }

    pub fn add_converter(&mut self, registration: ConverterRegistration) -> Result<(), BootError> {
        let key = registration.class_name.to_string();
        if self.converters.insert(key.clone(), registration).is_some() {
            return Err(BootError::Duplicate {
                kind: "converter",
                name: key,
            });
        }
        Ok(())
    }

    pub fn add_generator(&mut self, registration: GeneratorRegistration) -> Result<(), BootError> {
        let key = registration.name.clone();
        if self.generators.insert(key.clone(), registration).is_some() {
            return Err(BootError::Duplicate {
                kind: "id generator",
                name: key,
            });
        }
        Ok(())
    }

    pub fn add_named_query(&mut self, definition: NamedQueryDefinition) -> Result<(), BootError> {
        let key = definition.name.clone();
        if self.named_queries.insert(key.clone(), definition).is_some() {
            return Err(BootError::Duplicate {
                kind: "named query",
                name: key,
            });
        }
        Ok(())
    }

    pub fn add_entity_graph(&mut self, definition: NamedGraphDefinition) -> Result<(), BootError> {
        let key = definition.name.clone();
        if self.entity_graphs.insert(key.clone(), definition).is_some() {
            return Err(BootError::Duplicate {
                kind: "named entity graph",
                name: key,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn type_contributions(&self) -> &[TypeContribution] {
        &self.type_contributions
    }

    #[must_use]
    pub fn converters(&self) -> impl Iterator<Item = &ConverterRegistration> {
        self.converters.values()
    }

    #[must_use]
    pub fn generator(&self, name: &str) -> Option<&GeneratorRegistration> {
        self.generators.get(name)
    }

    #[must_use]
    pub fn generators(&self) -> impl Iterator<Item = &GeneratorRegistration> {
        self.generators.values()
    }

    #[must_use]
    pub fn named_queries(&self) -> impl Iterator<Item = &NamedQueryDefinition> {
        self.named_queries.values()
    }

    #[must_use]
    pub fn entity_graphs(&self) -> impl Iterator<Item = &NamedGraphDefinition> {
        self.entity_graphs.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_generator_is_rejected() {
        let mut collector = InFlightMetadataCollector::new();
        collector
            .add_generator(GeneratorRegistration {
                name: "seq".into(),
                kind: GeneratorKind::Sequence {
                    sequence_name: "s1".into(),
                    initial_value: 1,
                    allocation_size: 50,
                },
            })
            .unwrap();

        let duplicate = collector.add_generator(GeneratorRegistration {
            name: "seq".into(),
            kind: GeneratorKind::Generic {
                strategy: "uuid".into(),
            },
        });
        assert!(matches!(duplicate, Err(BootError::Duplicate { .. })));
    }
}
