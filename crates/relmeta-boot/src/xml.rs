//! XML mapping processing.
//!
//! Walks parsed mapping documents and synthesizes the same annotation-usage
//! shapes the reflective pipeline produces, so one binder serves both
//! sources. Anything this layer cannot yet express fails loudly instead of
//! degrading.

use crate::{
    collector::{
        ConverterRegistration, GeneratorKind, GeneratorRegistration, InFlightMetadataCollector,
        TypeContribution,
    },
    document::{
        AccessKind, BasicElement, DocumentRoot, EmbeddableElement, EntityElement,
        EntityMappingsRoot, IdElement, MappingDocument, MappedSuperclassElement, VersionElement,
    },
    error::BootError,
};
use indexmap::IndexMap;
use relmeta_annotate::{
    class_details::{ClassDetails, ClassDetailsBuilder},
    descriptor::AnnotationDescriptorRegistry,
    member::MemberDetails,
    registry::ClassDetailsRegistry,
    standard,
    target::{AnnotationTarget, Usages},
    usage::AnnotationUsage,
    value::AnnotationValue,
};
use std::sync::Arc;
use tracing::debug;

///
/// XmlProcessingOptions
///

#[derive(Clone, Copy, Debug)]
pub struct XmlProcessingOptions {
    pub xml_mappings_enabled: bool,
}

impl Default for XmlProcessingOptions {
    fn default() -> Self {
        Self {
            xml_mappings_enabled: true,
        }
    }
}

///
/// XmlProcessingContext
///
/// Call-scoped bundle of the registries and collector one processing run
/// writes into. Built once per boot, passed by reference.
///

pub struct XmlProcessingContext<'a> {
    pub descriptors: &'a AnnotationDescriptorRegistry,
    pub classes: &'a ClassDetailsRegistry,
    pub collector: &'a mut InFlightMetadataCollector,
    pub options: XmlProcessingOptions,
}

///
/// XmlMappingProcessor
///

pub struct XmlMappingProcessor;

enum ClassElement<'d> {
    Entity(&'d EntityElement),
    MappedSuperclass(&'d MappedSuperclassElement),
    Embeddable(&'d EmbeddableElement),
}

/// Pairing of one XML-declared managed type with its document context.
/// Exists only for the duration of a processing run.
struct ClassBinding<'d> {
    name: String,
    origin: &'d str,
    document_access: Option<AccessKind>,
    element: ClassElement<'d>,
}

impl XmlMappingProcessor {
    /// Process every mapping document into synthesized class details and
    /// usages. No-op when XML mapping support is disabled or there is
    /// nothing to process.
    pub fn process_xml_mappings(
        documents: &[MappingDocument],
        ctx: &mut XmlProcessingContext<'_>,
    ) -> Result<(), BootError> {
        if !ctx.options.xml_mappings_enabled || documents.is_empty() {
            return Ok(());
        }

        for document in documents {
            let root = match &document.root {
                DocumentRoot::EntityMappings(root) => root,
                DocumentRoot::Legacy => {
                    return Err(BootError::unsupported(
                        "legacy-format mapping document",
                        &document.origin,
                    ));
                }
            };

            debug!(origin = %document.origin, "processing xml mapping document");
            process_globals(root, ctx)?;

            // Collected without inheritance-order sorting; a subclass may be
            // processed before its declared superclass is registered.
            let bindings = collect_class_bindings(document, root);
            for binding in bindings.into_values() {
                process_class_binding(&binding, ctx)?;
            }
        }

        Ok(())
    }
}

// Globals must land before per-class binding can reference them:
// type contributions, then converters, then id generators
// (sequence, table, generic), in that fixed order.
fn process_globals(
    root: &EntityMappingsRoot,
    ctx: &mut XmlProcessingContext<'_>,
) -> Result<(), BootError> {
    for registration in &root.type_registrations {
        ctx.collector.add_type_contribution(TypeContribution {
            class_name: qualify(root.package.as_deref(), &registration.class).into(),
            descriptor: registration.descriptor.clone(),
        });
    }

    for converter in &root.converters {
        ctx.collector.add_converter(ConverterRegistration {
            class_name: qualify(root.package.as_deref(), &converter.class).into(),
            auto_apply: converter.auto_apply,
        })?;
    }

    for generator in &root.sequence_generators {
        ctx.collector.add_generator(GeneratorRegistration {
            name: generator.name.clone(),
            kind: GeneratorKind::Sequence {
                sequence_name: generator
                    .sequence_name
                    .clone()
                    .unwrap_or_else(|| generator.name.clone()),
                initial_value: generator.initial_value.unwrap_or(1),
                allocation_size: generator.allocation_size.unwrap_or(50),
            },
        })?;
    }

    for generator in &root.table_generators {
        ctx.collector.add_generator(GeneratorRegistration {
            name: generator.name.clone(),
            kind: GeneratorKind::Table {
                table: generator.table.clone().unwrap_or_default(),
            },
        })?;
    }

    for generator in &root.generic_generators {
        ctx.collector.add_generator(GeneratorRegistration {
            name: generator.name.clone(),
            kind: GeneratorKind::Generic {
                strategy: generator.strategy.clone(),
            },
        })?;
    }

    Ok(())
}

fn collect_class_bindings<'d>(
    document: &'d MappingDocument,
    root: &'d EntityMappingsRoot,
) -> IndexMap<String, ClassBinding<'d>> {
    let mut bindings = IndexMap::new();
    let package = root.package.as_deref();

    for embeddable in &root.embeddables {
        let name = qualify(package, &embeddable.class);
        bindings.insert(
            name.clone(),
            ClassBinding {
                name,
                origin: &document.origin,
                document_access: root.access,
                element: ClassElement::Embeddable(embeddable),
            },
        );
    }

    for mapped_superclass in &root.mapped_superclasses {
        let name = qualify(package, &mapped_superclass.class);
        bindings.insert(
            name.clone(),
            ClassBinding {
                name,
                origin: &document.origin,
                document_access: root.access,
                element: ClassElement::MappedSuperclass(mapped_superclass),
            },
        );
    }

    for entity in &root.entities {
        let Some(name) = entity
            .class
            .as_deref()
            .map(|class| qualify(package, class))
            .or_else(|| entity.resolved_name())
        else {
            continue;
        };
        bindings.insert(
            name.clone(),
            ClassBinding {
                name,
                origin: &document.origin,
                document_access: root.access,
                element: ClassElement::Entity(entity),
            },
        );
    }

    bindings
}

fn process_class_binding(
    binding: &ClassBinding<'_>,
    ctx: &mut XmlProcessingContext<'_>,
) -> Result<(), BootError> {
    match binding.element {
        ClassElement::Entity(entity) => process_entity(binding, entity, ctx),
        ClassElement::MappedSuperclass(mapped) => process_mapped_superclass(binding, mapped, ctx),
        ClassElement::Embeddable(embeddable) => process_embeddable(binding, embeddable, ctx),
    }
}

fn process_entity(
    binding: &ClassBinding<'_>,
    entity: &EntityElement,
    ctx: &mut XmlProcessingContext<'_>,
) -> Result<(), BootError> {
    if !entity.secondary_tables.is_empty() {
        return Err(BootError::unsupported(
            "secondary tables via xml",
            binding.origin,
        ));
    }
    if entity.attributes.embedded_id.is_some() {
        return Err(BootError::unsupported(
            "embedded-id mapping via xml",
            binding.origin,
        ));
    }
    if entity.attributes.ids.len() > 1 {
        return Err(BootError::unsupported(
            "composite identifier via xml",
            binding.origin,
        ));
    }

    let class_access = entity.access.or(binding.document_access);
    let details = resolve_class_details(binding, ctx, |builder| {
        let mut builder = builder;
        builder = add_members(builder, &entity.attributes.ids, class_access);
        builder = add_members(builder, &entity.attributes.versions, class_access);
        add_members(builder, &entity.attributes.basics, class_access)
    });

    let entity_name = entity
        .resolved_name()
        .unwrap_or_else(|| binding.name.clone());
    debug!(entity = %entity_name, origin = %binding.origin, "binding xml entity");

    let entity_usage = AnnotationUsage::builder(ctx.descriptors.require(standard::ENTITY)?)
        .value("name", AnnotationValue::str(entity_name))?
        .build();
    details.apply(entity_usage)?;

    if let Some(table) = &entity.table {
        let mut builder = AnnotationUsage::builder(ctx.descriptors.require(standard::TABLE)?);
        if let Some(name) = &table.name {
            builder = builder.value("name", AnnotationValue::str(name.clone()))?;
        }
        if let Some(catalog) = &table.catalog {
            builder = builder.value("catalog", AnnotationValue::str(catalog.clone()))?;
        }
        if let Some(schema) = &table.schema {
            builder = builder.value("schema", AnnotationValue::str(schema.clone()))?;
        }
        details.apply(builder.build())?;

        if let Some(check) = &table.check {
            let usage = AnnotationUsage::builder(ctx.descriptors.require(standard::CHECK)?)
                .value("constraints", AnnotationValue::str(check.clone()))?
                .build();
            details.apply(usage)?;
        }
        if let Some(comment) = &table.comment {
            let usage = AnnotationUsage::builder(ctx.descriptors.require(standard::COMMENT)?)
                .value("value", AnnotationValue::str(comment.clone()))?
                .build();
            details.apply(usage)?;
        }
    }

    for id in &entity.attributes.ids {
        bind_id_attribute(&details, binding, id, ctx)?;
    }
    for version in &entity.attributes.versions {
        bind_version_attribute(&details, binding, version, ctx)?;
    }
    for basic in &entity.attributes.basics {
        bind_basic_attribute(&details, binding, basic, ctx)?;
    }

    Ok(())
}

fn process_mapped_superclass(
    binding: &ClassBinding<'_>,
    mapped: &MappedSuperclassElement,
    ctx: &mut XmlProcessingContext<'_>,
) -> Result<(), BootError> {
    if mapped.attributes.embedded_id.is_some() {
        return Err(BootError::unsupported(
            "embedded-id mapping via xml",
            binding.origin,
        ));
    }
    if mapped.attributes.ids.len() > 1 {
        return Err(BootError::unsupported(
            "composite identifier via xml",
            binding.origin,
        ));
    }

    let class_access = mapped.access.or(binding.document_access);
    let details = resolve_class_details(binding, ctx, |builder| {
        let mut builder = builder;
        builder = add_members(builder, &mapped.attributes.ids, class_access);
        builder = add_members(builder, &mapped.attributes.versions, class_access);
        add_members(builder, &mapped.attributes.basics, class_access)
    });

    details.apply(
        AnnotationUsage::builder(ctx.descriptors.require(standard::MAPPED_SUPERCLASS)?).build(),
    )?;

    for id in &mapped.attributes.ids {
        bind_id_attribute(&details, binding, id, ctx)?;
    }
    for version in &mapped.attributes.versions {
        bind_version_attribute(&details, binding, version, ctx)?;
    }
    for basic in &mapped.attributes.basics {
        bind_basic_attribute(&details, binding, basic, ctx)?;
    }

    Ok(())
}

fn process_embeddable(
    binding: &ClassBinding<'_>,
    embeddable: &EmbeddableElement,
    ctx: &mut XmlProcessingContext<'_>,
) -> Result<(), BootError> {
    if !embeddable.attributes.ids.is_empty() || embeddable.attributes.embedded_id.is_some() {
        return Err(BootError::unsupported(
            "identifier mapping on embeddable via xml",
            binding.origin,
        ));
    }

    let class_access = embeddable.access.or(binding.document_access);
    let details = resolve_class_details(binding, ctx, |builder| {
        add_members(builder, &embeddable.attributes.basics, class_access)
    });

    details
        .apply(AnnotationUsage::builder(ctx.descriptors.require(standard::EMBEDDABLE)?).build())?;

    for basic in &embeddable.attributes.basics {
        bind_basic_attribute(&details, binding, basic, ctx)?;
    }

    Ok(())
}

// Attribute access resolution: the attribute's explicit access if given,
// else the owning class's declared access (itself defaulting through the
// document), else field access.
trait AccessedAttribute {
    fn attribute_name(&self) -> &str;
    fn access_of(&self) -> Option<AccessKind>;
}

impl AccessedAttribute for IdElement {
    fn attribute_name(&self) -> &str {
        &self.name
    }
    fn access_of(&self) -> Option<AccessKind> {
        self.access
    }
}

impl AccessedAttribute for VersionElement {
    fn attribute_name(&self) -> &str {
        &self.name
    }
    fn access_of(&self) -> Option<AccessKind> {
        self.access
    }
}

impl AccessedAttribute for BasicElement {
    fn attribute_name(&self) -> &str {
        &self.name
    }
    fn access_of(&self) -> Option<AccessKind> {
        self.access
    }
}

fn effective_access(attribute: Option<AccessKind>, class: Option<AccessKind>) -> AccessKind {
    attribute.or(class).unwrap_or(AccessKind::Field)
}

fn add_members<A: AccessedAttribute>(
    mut builder: ClassDetailsBuilder,
    attributes: &[A],
    class_access: Option<AccessKind>,
) -> ClassDetailsBuilder {
    for attribute in attributes {
        let member = synthetic_member(
            attribute.attribute_name(),
            effective_access(attribute.access_of(), class_access),
        );
        builder = match member.kind() {
            relmeta_annotate::member::MemberKind::Field => builder.field(member),
            relmeta_annotate::member::MemberKind::Method => builder.method(member),
        };
    }
    builder
}

/// Field-backed or property-backed synthetic member for one attribute node.
fn synthetic_member(attribute: &str, access: AccessKind) -> MemberDetails {
    match access {
        AccessKind::Field => MemberDetails::field(attribute, None, Usages::delayed()),
        AccessKind::Property => {
            MemberDetails::method(accessor_name(attribute), None, Usages::delayed())
        }
    }
}

fn accessor_name(attribute: &str) -> String {
    let mut chars = attribute.chars();
    match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => "get".to_string(),
    }
}

fn resolve_class_details(
    binding: &ClassBinding<'_>,
    ctx: &XmlProcessingContext<'_>,
    populate: impl FnOnce(ClassDetailsBuilder) -> ClassDetailsBuilder,
) -> Arc<ClassDetails> {
    ctx.classes.resolve_managed_class(&binding.name, |name| {
        let mut builder = ClassDetails::builder(name);
        if binding.name.contains('.') {
            builder = builder.class_name(binding.name.as_str());
        }
        populate(builder).build()
    })
}

fn member_of<'c>(
    details: &'c Arc<ClassDetails>,
    binding: &ClassBinding<'_>,
    attribute: &str,
) -> Result<&'c Arc<MemberDetails>, BootError> {
    details
        .find_attribute_member(attribute)
        .ok_or_else(|| BootError::UnknownAttribute {
            class: binding.name.clone(),
            attribute: attribute.to_string(),
            origin: binding.origin.to_string(),
        })
}

fn bind_id_attribute(
    details: &Arc<ClassDetails>,
    binding: &ClassBinding<'_>,
    id: &IdElement,
    ctx: &XmlProcessingContext<'_>,
) -> Result<(), BootError> {
    if id.column.is_some() {
        return Err(BootError::unsupported(
            "identifier column override via xml",
            binding.origin,
        ));
    }

    let member = member_of(details, binding, &id.name)?;
    member.apply(AnnotationUsage::builder(ctx.descriptors.require(standard::ID)?).build())?;
    member.apply(AnnotationUsage::builder(ctx.descriptors.require(standard::BASIC)?).build())?;
    apply_access(member, id.access, ctx)?;
    Ok(())
}

fn bind_version_attribute(
    details: &Arc<ClassDetails>,
    binding: &ClassBinding<'_>,
    version: &VersionElement,
    ctx: &XmlProcessingContext<'_>,
) -> Result<(), BootError> {
    let member = member_of(details, binding, &version.name)?;
    member.apply(AnnotationUsage::builder(ctx.descriptors.require(standard::VERSION)?).build())?;
    member.apply(AnnotationUsage::builder(ctx.descriptors.require(standard::BASIC)?).build())?;
    apply_access(member, version.access, ctx)?;
    Ok(())
}

fn bind_basic_attribute(
    details: &Arc<ClassDetails>,
    binding: &ClassBinding<'_>,
    basic: &BasicElement,
    ctx: &XmlProcessingContext<'_>,
) -> Result<(), BootError> {
    if basic.column.is_some() || basic.formula.is_some() {
        return Err(BootError::unsupported(
            "column/formula override via xml",
            binding.origin,
        ));
    }
    if basic.convert.is_some() {
        return Err(BootError::unsupported(
            "attribute converter via xml",
            binding.origin,
        ));
    }

    let member = member_of(details, binding, &basic.name)?;

    let mut builder = AnnotationUsage::builder(ctx.descriptors.require(standard::BASIC)?);
    if let Some(optional) = basic.optional {
        builder = builder.value("optional", AnnotationValue::Bool(optional))?;
    }
    if let Some(fetch) = basic.fetch {
        let constant = match fetch {
            crate::document::FetchElement::Eager => "EAGER",
            crate::document::FetchElement::Lazy => "LAZY",
        };
        builder = builder.value(
            "fetch",
            AnnotationValue::enum_const(standard::FETCH_TYPE, constant),
        )?;
    }
    member.apply(builder.build())?;

    apply_access(member, basic.access, ctx)?;

    if let Some(locked) = basic.optimistic_lock {
        let usage = AnnotationUsage::builder(ctx.descriptors.require(standard::OPTIMISTIC_LOCK)?)
            .value("excluded", AnnotationValue::Bool(!locked))?
            .build();
        member.apply(usage)?;
    }

    if let Some(enumerated) = basic.enumerated {
        let constant = match enumerated {
            crate::document::EnumeratedElement::Ordinal => "ORDINAL",
            crate::document::EnumeratedElement::String => "STRING",
        };
        let usage = AnnotationUsage::builder(ctx.descriptors.require(standard::ENUMERATED)?)
            .value(
                "value",
                AnnotationValue::enum_const(standard::ENUM_TYPE, constant),
            )?
            .build();
        member.apply(usage)?;
    }

    if basic.lob {
        member.apply(AnnotationUsage::builder(ctx.descriptors.require(standard::LOB)?).build())?;
    }
    if basic.nationalized {
        member.apply(
            AnnotationUsage::builder(ctx.descriptors.require(standard::NATIONALIZED)?).build(),
        )?;
    }

    Ok(())
}

fn apply_access(
    member: &Arc<MemberDetails>,
    access: Option<AccessKind>,
    ctx: &XmlProcessingContext<'_>,
) -> Result<(), BootError> {
    let Some(access) = access else {
        return Ok(());
    };
    let constant = match access {
        AccessKind::Field => "FIELD",
        AccessKind::Property => "PROPERTY",
    };
    let usage = AnnotationUsage::builder(ctx.descriptors.require(standard::ACCESS)?)
        .value(
            "value",
            AnnotationValue::enum_const(standard::ACCESS_TYPE, constant),
        )?
        .build();
    member.apply(usage)?;
    Ok(())
}

fn qualify(package: Option<&str>, class: &str) -> String {
    match package {
        Some(package) if !class.contains('.') => format!("{package}.{class}"),
        _ => class.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{AttributesElement, TableElement};
    use relmeta_annotate::standard::standard_registry;

    fn entity_document() -> MappingDocument {
        MappingDocument {
            origin: "orm.xml".into(),
            root: DocumentRoot::EntityMappings(EntityMappingsRoot {
                entities: vec![EntityElement {
                    class: Some("Customer".into()),
                    table: Some(TableElement {
                        name: Some("T1".into()),
                        ..TableElement::default()
                    }),
                    attributes: AttributesElement {
                        ids: vec![IdElement {
                            name: "id".into(),
                            ..IdElement::default()
                        }],
                        basics: vec![BasicElement {
                            name: "name".into(),
                            optimistic_lock: Some(false),
                            ..BasicElement::default()
                        }],
                        ..AttributesElement::default()
                    },
                    ..EntityElement::default()
                }],
                ..EntityMappingsRoot::default()
            }),
        }
    }

    fn run(documents: &[MappingDocument]) -> Result<ClassDetailsRegistry, BootError> {
        let descriptors = standard_registry();
        let classes = ClassDetailsRegistry::new();
        let mut collector = InFlightMetadataCollector::new();
        let mut ctx = XmlProcessingContext {
            descriptors: &descriptors,
            classes: &classes,
            collector: &mut collector,
            options: XmlProcessingOptions::default(),
        };
        XmlMappingProcessor::process_xml_mappings(documents, &mut ctx)?;
        Ok(classes)
    }

    #[test]
    fn synthesized_usages_match_annotation_shapes() {
        let classes = run(&[entity_document()]).unwrap();
        let descriptors = standard_registry();

        let details = classes.get_managed_class("Customer").unwrap();

        // Class-level synthesis.
        let entity = details
            .get_usage(&*descriptors.require(standard::ENTITY).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(entity.string_value("name").unwrap(), "Customer");

        let table = details
            .get_usage(&*descriptors.require(standard::TABLE).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(table.string_value("name").unwrap(), "T1");

        // Member-level synthesis: @Basic plus @OptimisticLock(excluded).
        let member = details.find_attribute_member("name").unwrap();
        assert!(
            member
                .get_usage(&*descriptors.require(standard::BASIC).unwrap())
                .unwrap()
                .is_some()
        );
        let lock = member
            .get_usage(&*descriptors.require(standard::OPTIMISTIC_LOCK).unwrap())
            .unwrap()
            .unwrap();
        assert!(lock.bool_value("excluded").unwrap());

        // What equivalent real annotations would have produced, for shape
        // comparison: identical usage values, identical defaulted flags.
        let annotation_side = AnnotationUsage::builder(
            descriptors.require(standard::OPTIMISTIC_LOCK).unwrap(),
        )
        .value("excluded", AnnotationValue::Bool(true))
        .unwrap()
        .build();
        assert_eq!(*lock, *annotation_side);

        // The identifier carries @Id + @Basic.
        let id_member = details.find_attribute_member("id").unwrap();
        assert!(
            id_member
                .get_usage(&*descriptors.require(standard::ID).unwrap())
                .unwrap()
                .is_some()
        );
        assert!(
            id_member
                .get_usage(&*descriptors.require(standard::BASIC).unwrap())
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn disabled_processing_is_a_no_op() {
        let descriptors = standard_registry();
        let classes = ClassDetailsRegistry::new();
        let mut collector = InFlightMetadataCollector::new();
        let mut ctx = XmlProcessingContext {
            descriptors: &descriptors,
            classes: &classes,
            collector: &mut collector,
            options: XmlProcessingOptions {
                xml_mappings_enabled: false,
            },
        };
        XmlMappingProcessor::process_xml_mappings(&[entity_document()], &mut ctx).unwrap();
        assert!(classes.find_managed_class("Customer").is_none());
    }

    #[test]
    fn legacy_documents_fail_loudly() {
        let result = run(&[MappingDocument {
            origin: "legacy.hbm.xml".into(),
            root: DocumentRoot::Legacy,
        }]);
        assert!(matches!(result, Err(BootError::Unsupported { .. })));
    }

    #[test]
    fn composite_identifier_fails_fast() {
        let mut document = entity_document();
        if let DocumentRoot::EntityMappings(root) = &mut document.root {
            root.entities[0].attributes.ids.push(IdElement {
                name: "tenant".into(),
                ..IdElement::default()
            });
        }
        assert!(matches!(
            run(&[document]),
            Err(BootError::Unsupported { .. })
        ));
    }

    #[test]
    fn column_override_fails_fast() {
        let mut document = entity_document();
        if let DocumentRoot::EntityMappings(root) = &mut document.root {
            root.entities[0].attributes.basics[0].column =
                Some(crate::document::ColumnElement::default());
        }
        assert!(matches!(
            run(&[document]),
            Err(BootError::Unsupported { .. })
        ));
    }

    #[test]
    fn property_access_synthesizes_accessor_members() {
        let mut document = entity_document();
        if let DocumentRoot::EntityMappings(root) = &mut document.root {
            root.entities[0].access = Some(AccessKind::Property);
        }
        let classes = run(&[document]).unwrap();
        let details = classes.get_managed_class("Customer").unwrap();

        let member = details.find_attribute_member("name").unwrap();
        assert_eq!(member.name(), "getName");
    }

    #[test]
    fn globals_register_before_classes() {
        let document = MappingDocument {
            origin: "globals.xml".into(),
            root: DocumentRoot::EntityMappings(EntityMappingsRoot {
                sequence_generators: vec![crate::document::SequenceGeneratorElement {
                    name: "order_seq".into(),
                    ..crate::document::SequenceGeneratorElement::default()
                }],
                ..EntityMappingsRoot::default()
            }),
        };

        let descriptors = standard_registry();
        let classes = ClassDetailsRegistry::new();
        let mut collector = InFlightMetadataCollector::new();
        let mut ctx = XmlProcessingContext {
            descriptors: &descriptors,
            classes: &classes,
            collector: &mut collector,
            options: XmlProcessingOptions::default(),
        };
        XmlMappingProcessor::process_xml_mappings(&[document], &mut ctx).unwrap();
        assert!(collector.generator("order_seq").is_some());
    }
}
