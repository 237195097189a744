//! Entity-hierarchy binding.
//!
//! Reads the class-details registry — source-agnostic by this point — and
//! assembles the boot model: attribute mappings, identifiable-type tree,
//! embeddables, collections, and per-hierarchy root resolution.

use crate::{
    collector::{InFlightMetadataCollector, NamedGraphDefinition, NamedQueryDefinition},
    error::BootError,
    model::{
        attribute::{
            AttributeMapping, BasicAttributeMapping, EmbeddedAttributeMapping, EnumStorage,
            FetchTiming, PluralAttributeMapping, ToOneAttributeMapping,
        },
        collection::{CollectionElement, CollectionMapping},
        embedded::EmbeddedValueMapping,
        hierarchy::{BootModel, EntityHierarchy},
        identifiable::{
            CacheConfig, CustomSql, EntityMapping, FilterMapping, IdentifiableTypeMapping,
            IdentifierMapping, MappedSuperclassMapping,
        },
        table::{Column, Table},
    },
};
use convert_case::{Case, Casing};
use relmeta_annotate::{
    class_details::ClassDetails,
    descriptor::AnnotationDescriptorRegistry,
    member::MemberDetails,
    registry::ClassDetailsRegistry,
    standard,
    target::AnnotationTarget,
    usage::AnnotationUsage,
};
use relmeta_error::ErrorTree;
use std::{collections::BTreeMap, sync::Arc};
use tracing::debug;

/// Assemble the boot model from every registered managed class.
pub fn bind_boot_model(
    classes: &ClassDetailsRegistry,
    descriptors: &AnnotationDescriptorRegistry,
    collector: &mut InFlightMetadataCollector,
) -> Result<BootModel, BootError> {
    let binder = Binder {
        classes,
        descriptors,
    };
    binder.bind(collector)
}

struct Binder<'a> {
    classes: &'a ClassDetailsRegistry,
    descriptors: &'a AnnotationDescriptorRegistry,
}

impl Binder<'_> {
    fn bind(&self, collector: &mut InFlightMetadataCollector) -> Result<BootModel, BootError> {
        let mut model = BootModel::default();

        for details in self.classes.all_managed_classes() {
            if self.has_usage(&details, standard::ENTITY)? {
                let entity = self.bind_entity(&details, collector, &mut model)?;
                model.types.insert(
                    entity.managed_name.clone(),
                    IdentifiableTypeMapping::Entity(Arc::new(entity)),
                );
            } else if self.has_usage(&details, standard::MAPPED_SUPERCLASS)? {
                let mapped = self.bind_mapped_superclass(&details, &mut model)?;
                model.types.insert(
                    mapped.managed_name.clone(),
                    IdentifiableTypeMapping::MappedSuperclass(Arc::new(mapped)),
                );
            } else if self.has_usage(&details, standard::EMBEDDABLE)? {
                let embeddable = self.bind_embeddable(&details, &mut model)?;
                model
                    .embeddables
                    .insert(embeddable.managed_name.clone(), Arc::new(embeddable));
            }
        }

        self.resolve_hierarchies(&mut model)?;
        validate_boot_model(&model).map_err(BootError::Validation)?;

        Ok(model)
    }

    fn has_usage(&self, target: &Arc<ClassDetails>, annotation: &str) -> Result<bool, BootError> {
        Ok(target
            .get_usage(&*self.descriptors.require(annotation)?)?
            .is_some())
    }

    fn bind_entity(
        &self,
        details: &Arc<ClassDetails>,
        collector: &mut InFlightMetadataCollector,
        model: &mut BootModel,
    ) -> Result<EntityMapping, BootError> {
        let entity_usage = details
            .get_usage(&*self.descriptors.require(standard::ENTITY)?)?
            .ok_or_else(|| BootError::Hierarchy(format!("{} is not an entity", details.name())))?;

        let entity_name = match entity_usage.string_value("name")? {
            "" => simple_name(details.name()).to_string(),
            explicit => explicit.to_string(),
        };
        debug!(entity = %entity_name, class = %details.name(), "binding entity");

        let table = self.bind_table(details, &entity_name)?;
        let bound = self.bind_attributes(details, &entity_name, model)?;

        collect_named_declarations(self.descriptors, details, &entity_name, collector)?;

        Ok(EntityMapping {
            managed_name: details.name().to_string(),
            entity_name,
            table,
            is_abstract: details.is_abstract(),
            identifier: bound.identifier,
            version: bound.version,
            attributes: bound.attributes,
            super_type: self.managed_super_type(details),
            sub_types: Vec::new(),
            cache: self.bind_cache(details)?,
            custom_insert: self.bind_custom_sql(details, standard::SQL_INSERT)?,
            custom_update: self.bind_custom_sql(details, standard::SQL_UPDATE)?,
            custom_delete: self.bind_custom_sql(details, standard::SQL_DELETE)?,
            filters: self.bind_filters(details)?,
        })
    }

    fn bind_mapped_superclass(
        &self,
        details: &Arc<ClassDetails>,
        model: &mut BootModel,
    ) -> Result<MappedSuperclassMapping, BootError> {
        let owner = simple_name(details.name()).to_string();
        let bound = self.bind_attributes(details, &owner, model)?;
        Ok(MappedSuperclassMapping {
            managed_name: details.name().to_string(),
            identifier: bound.identifier,
            version: bound.version,
            attributes: bound.attributes,
            super_type: self.managed_super_type(details),
            sub_types: Vec::new(),
        })
    }

    fn bind_embeddable(
        &self,
        details: &Arc<ClassDetails>,
        model: &mut BootModel,
    ) -> Result<EmbeddedValueMapping, BootError> {
        let owner = simple_name(details.name()).to_string();
        let bound = self.bind_attributes(details, &owner, model)?;
        if bound.identifier.is_some() {
            return Err(BootError::Hierarchy(format!(
                "embeddable '{}' declares an identifier",
                details.name()
            )));
        }
        Ok(EmbeddedValueMapping {
            managed_name: details.name().to_string(),
            attributes: bound.attributes,
        })
    }

    fn bind_table(
        &self,
        details: &Arc<ClassDetails>,
        entity_name: &str,
    ) -> Result<Table, BootError> {
        let mut table = match details.get_usage(&*self.descriptors.require(standard::TABLE)?)? {
            Some(usage) => {
                let name = match usage.string_value("name")? {
                    "" => default_table_name(entity_name),
                    explicit => explicit.to_string(),
                };
                Table {
                    name,
                    catalog: non_empty(usage.string_value("catalog")?),
                    schema: non_empty(usage.string_value("schema")?),
                    check: None,
                    comment: None,
                }
            }
            None => Table::named(default_table_name(entity_name)),
        };

        if let Some(check) = details.get_usage(&*self.descriptors.require(standard::CHECK)?)? {
            table.check = Some(check.string_value("constraints")?.to_string());
        }
        if let Some(comment) = details.get_usage(&*self.descriptors.require(standard::COMMENT)?)? {
            table.comment = Some(comment.string_value("value")?.to_string());
        }

        Ok(table)
    }

    fn bind_attributes(
        &self,
        details: &Arc<ClassDetails>,
        owner_name: &str,
        model: &mut BootModel,
    ) -> Result<BoundAttributes, BootError> {
        let mut bound = BoundAttributes::default();

        for (attribute, member) in attribute_members(details) {
            if member
                .get_usage(&*self.descriptors.require(standard::EMBEDDED_ID)?)?
                .is_some()
            {
                return Err(BootError::unsupported(
                    "embedded-id mapping",
                    details.name(),
                ));
            }

            let is_id = member
                .get_usage(&*self.descriptors.require(standard::ID)?)?
                .is_some();
            let is_version = member
                .get_usage(&*self.descriptors.require(standard::VERSION)?)?
                .is_some();

            if member
                .get_usage(&*self.descriptors.require(standard::EMBEDDED)?)?
                .is_some()
            {
                let embeddable = member
                    .member_type()
                    .map(ToString::to_string)
                    .ok_or_else(|| BootError::Hierarchy(format!(
                        "embedded attribute '{attribute}' on '{}' has no resolvable type",
                        details.name()
                    )))?;
                bound.attributes.push(AttributeMapping::Embedded(
                    EmbeddedAttributeMapping {
                        name: attribute,
                        embeddable,
                    },
                ));
                continue;
            }

            if let Some(to_one) =
                member.get_usage(&*self.descriptors.require(standard::MANY_TO_ONE)?)?
            {
                bound.attributes.push(AttributeMapping::ToOne(
                    self.bind_to_one(details, &attribute, &member, &to_one)?,
                ));
                continue;
            }

            if let Some(one_to_many) =
                member.get_usage(&*self.descriptors.require(standard::ONE_TO_MANY)?)?
            {
                let plural = self.bind_one_to_many(
                    owner_name,
                    &attribute,
                    &member,
                    &one_to_many,
                    model,
                )?;
                bound.attributes.push(AttributeMapping::Plural(plural));
                continue;
            }

            if let Some(element_collection) =
                member.get_usage(&*self.descriptors.require(standard::ELEMENT_COLLECTION)?)?
            {
                let plural = self.bind_element_collection(
                    owner_name,
                    &attribute,
                    &member,
                    &element_collection,
                    model,
                )?;
                bound.attributes.push(AttributeMapping::Plural(plural));
                continue;
            }

            let Some(basic_usage) =
                member.get_usage(&*self.descriptors.require(standard::BASIC)?)?
            else {
                continue;
            };

            let basic = self.bind_basic(&attribute, &member, &basic_usage)?;

            if is_id {
                if bound.identifier.is_some() {
                    return Err(BootError::unsupported(
                        "composite identifier",
                        details.name(),
                    ));
                }
                bound.identifier = Some(IdentifierMapping {
                    attribute: basic,
                    generator: None,
                });
            } else if is_version {
                bound.version = Some(basic);
            } else {
                bound.attributes.push(AttributeMapping::Basic(basic));
            }
        }

        Ok(bound)
    }

    fn bind_basic(
        &self,
        attribute: &str,
        member: &Arc<MemberDetails>,
        usage: &Arc<AnnotationUsage>,
    ) -> Result<BasicAttributeMapping, BootError> {
        let mut mapping =
            BasicAttributeMapping::new(attribute, Column::named(attribute.to_case(Case::Snake)));

        mapping.optional = usage.bool_value("optional")?;
        mapping.fetch = fetch_timing(usage.enum_value("fetch")?);
        mapping.attribute_type = member.member_type().cloned();

        if let Some(lock) =
            member.get_usage(&*self.descriptors.require(standard::OPTIMISTIC_LOCK)?)?
        {
            mapping.optimistic_locked = !lock.bool_value("excluded")?;
        }
        if let Some(enumerated) =
            member.get_usage(&*self.descriptors.require(standard::ENUMERATED)?)?
        {
            mapping.enumerated = Some(match enumerated.enum_value("value")? {
                "STRING" => EnumStorage::Named,
                _ => EnumStorage::Ordinal,
            });
        }
        mapping.lob = member
            .get_usage(&*self.descriptors.require(standard::LOB)?)?
            .is_some();
        mapping.nationalized = member
            .get_usage(&*self.descriptors.require(standard::NATIONALIZED)?)?
            .is_some();

        Ok(mapping)
    }

    fn bind_to_one(
        &self,
        details: &Arc<ClassDetails>,
        attribute: &str,
        member: &Arc<MemberDetails>,
        usage: &Arc<AnnotationUsage>,
    ) -> Result<ToOneAttributeMapping, BootError> {
        let target_entity = match usage.string_value("targetEntity")? {
            "" => member
                .member_type()
                .map(ToString::to_string)
                .ok_or_else(|| BootError::Hierarchy(format!(
                    "to-one attribute '{attribute}' on '{}' has no resolvable target",
                    details.name()
                )))?,
            explicit => explicit.to_string(),
        };

        let join_column = match member
            .get_usage(&*self.descriptors.require(standard::JOIN_COLUMN)?)?
        {
            Some(join) => match join.string_value("name")? {
                "" => default_join_column(attribute),
                explicit => explicit.to_string(),
            },
            None => default_join_column(attribute),
        };

        Ok(ToOneAttributeMapping {
            name: attribute.to_string(),
            target_entity,
            fetch: fetch_timing(usage.enum_value("fetch")?),
            optional: usage.bool_value("optional")?,
            join_column: Column::named(join_column),
        })
    }

    fn bind_one_to_many(
        &self,
        owner_name: &str,
        attribute: &str,
        member: &Arc<MemberDetails>,
        usage: &Arc<AnnotationUsage>,
        model: &mut BootModel,
    ) -> Result<PluralAttributeMapping, BootError> {
        let role = format!("{owner_name}.{attribute}");
        let target = match usage.string_value("targetEntity")? {
            "" => member.member_type().map(ToString::to_string),
            explicit => Some(explicit.to_string()),
        }
        .ok_or_else(|| {
            BootError::Hierarchy(format!("collection '{role}' has no resolvable element type"))
        })?;
        let mapped_by = non_empty(usage.string_value("mappedBy")?);

        let table = if mapped_by.is_some() {
            None
        } else {
            Some(Table::named(format!(
                "{}_{}",
                owner_name.to_case(Case::Snake),
                attribute.to_case(Case::Snake)
            )))
        };

        model.collections.insert(
            role.clone(),
            Arc::new(CollectionMapping {
                role: role.clone(),
                owner_entity: owner_name.to_string(),
                attribute: attribute.to_string(),
                element: CollectionElement::Entity {
                    entity_name: target,
                    mapped_by,
                },
                table,
                cache: None,
            }),
        );

        Ok(PluralAttributeMapping {
            name: attribute.to_string(),
            role,
            fetch: fetch_timing(usage.enum_value("fetch")?),
        })
    }

    fn bind_element_collection(
        &self,
        owner_name: &str,
        attribute: &str,
        member: &Arc<MemberDetails>,
        usage: &Arc<AnnotationUsage>,
        model: &mut BootModel,
    ) -> Result<PluralAttributeMapping, BootError> {
        let role = format!("{owner_name}.{attribute}");

        model.collections.insert(
            role.clone(),
            Arc::new(CollectionMapping {
                role: role.clone(),
                owner_entity: owner_name.to_string(),
                attribute: attribute.to_string(),
                element: CollectionElement::Basic {
                    attribute_type: member.member_type().cloned(),
                },
                table: Some(Table::named(format!(
                    "{}_{}",
                    owner_name.to_case(Case::Snake),
                    attribute.to_case(Case::Snake)
                ))),
                cache: None,
            }),
        );

        Ok(PluralAttributeMapping {
            name: attribute.to_string(),
            role,
            fetch: fetch_timing(usage.enum_value("fetch")?),
        })
    }

    fn bind_cache(&self, details: &Arc<ClassDetails>) -> Result<Option<CacheConfig>, BootError> {
        let cacheable = details.get_usage(&*self.descriptors.require(standard::CACHEABLE)?)?;
        let cache = details.get_usage(&*self.descriptors.require(standard::CACHE)?)?;

        if cacheable.is_none() && cache.is_none() {
            return Ok(None);
        }
        if let Some(cacheable) = &cacheable
            && !cacheable.bool_value("value")?
        {
            return Ok(None);
        }

        let mut config = CacheConfig::default();
        if let Some(cache) = cache {
            config.region = non_empty(cache.string_value("region")?);
            config.concurrency = Some(cache.enum_value("usage")?.to_string());
        }
        Ok(Some(config))
    }

    fn bind_custom_sql(
        &self,
        details: &Arc<ClassDetails>,
        annotation: &str,
    ) -> Result<Option<CustomSql>, BootError> {
        let Some(usage) = details.get_usage(&*self.descriptors.require(annotation)?)? else {
            return Ok(None);
        };
        Ok(Some(CustomSql {
            sql: usage.string_value("sql")?.to_string(),
            callable: usage.bool_value("callable")?,
        }))
    }

    fn bind_filters(&self, details: &Arc<ClassDetails>) -> Result<Vec<FilterMapping>, BootError> {
        let mut filters = Vec::new();
        for usage in details.get_usages(&*self.descriptors.require(standard::FILTER)?) {
            filters.push(FilterMapping {
                name: usage.string_value("name")?.to_string(),
                condition: usage.string_value("condition")?.to_string(),
            });
        }
        Ok(filters)
    }

    /// Nearest registered super-type that is itself a managed identifiable
    /// type. Plain (unmanaged) classes in the chain are skipped.
    fn managed_super_type(&self, details: &Arc<ClassDetails>) -> Option<String> {
        let mut current = details.super_class().map(ToString::to_string);
        while let Some(name) = current {
            match self.classes.find_managed_class(&name) {
                Some(super_details) => {
                    let identifiable = self
                        .has_usage(&super_details, standard::ENTITY)
                        .unwrap_or(false)
                        || self
                            .has_usage(&super_details, standard::MAPPED_SUPERCLASS)
                            .unwrap_or(false);
                    if identifiable {
                        return Some(name);
                    }
                    current = super_details.super_class().map(ToString::to_string);
                }
                None => return None,
            }
        }
        None
    }

    fn resolve_hierarchies(&self, model: &mut BootModel) -> Result<(), BootError> {
        // Wire sub-type links from the super-type references.
        let mut sub_links: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, mapping) in &model.types {
            if let Some(super_name) = mapping.super_type() {
                sub_links
                    .entry(super_name.to_string())
                    .or_default()
                    .push(name.clone());
            }
        }

        let mut rebuilt = BTreeMap::new();
        for (name, mapping) in &model.types {
            let subs = sub_links.remove(name).unwrap_or_default();
            let rebuilt_mapping = match mapping {
                IdentifiableTypeMapping::Entity(entity) => {
                    let mut entity = (**entity).clone();
                    entity.sub_types = subs;
                    IdentifiableTypeMapping::Entity(Arc::new(entity))
                }
                IdentifiableTypeMapping::MappedSuperclass(mapped) => {
                    let mut mapped = (**mapped).clone();
                    mapped.sub_types = subs;
                    IdentifiableTypeMapping::MappedSuperclass(Arc::new(mapped))
                }
            };
            rebuilt.insert(name.clone(), rebuilt_mapping);
        }
        model.types = rebuilt;

        // A hierarchy root is an entity with no entity ancestor.
        let mut hierarchies = Vec::new();
        for (name, mapping) in &model.types {
            if !mapping.is_entity() {
                continue;
            }
            let mut has_entity_ancestor = false;
            let mut current = mapping.super_type().map(ToString::to_string);
            while let Some(super_name) = current {
                match model.types.get(&super_name) {
                    Some(super_mapping) => {
                        if super_mapping.is_entity() {
                            has_entity_ancestor = true;
                            break;
                        }
                        current = super_mapping.super_type().map(ToString::to_string);
                    }
                    None => break,
                }
            }
            if !has_entity_ancestor {
                hierarchies.push(EntityHierarchy {
                    root_entity: name.clone(),
                });
            }
        }
        model.hierarchies = hierarchies;

        Ok(())
    }
}

#[derive(Default)]
struct BoundAttributes {
    identifier: Option<IdentifierMapping>,
    version: Option<BasicAttributeMapping>,
    attributes: Vec<AttributeMapping>,
}

/// Persistent attribute name → backing member; fields shadow same-named
/// accessors.
fn attribute_members(details: &Arc<ClassDetails>) -> Vec<(String, Arc<MemberDetails>)> {
    let mut seen = BTreeMap::new();
    let mut ordered = Vec::new();

    for field in details.fields() {
        let name = field.attribute_name().to_string();
        if seen.insert(name.clone(), ()).is_none() {
            ordered.push((name, field.clone()));
        }
    }
    for method in details.methods() {
        let name = relmeta_annotate::member::decapitalize(method.attribute_name());
        if seen.insert(name.clone(), ()).is_none() {
            ordered.push((name, method.clone()));
        }
    }

    ordered
}

fn collect_named_declarations(
    descriptors: &AnnotationDescriptorRegistry,
    details: &Arc<ClassDetails>,
    entity_name: &str,
    collector: &mut InFlightMetadataCollector,
) -> Result<(), BootError> {
    for usage in details.get_usages(&*descriptors.require(standard::NAMED_ENTITY_GRAPH)?) {
        let name = match usage.string_value("name")? {
            "" => entity_name.to_string(),
            explicit => explicit.to_string(),
        };
        collector.add_entity_graph(NamedGraphDefinition {
            name,
            entity_name: entity_name.to_string(),
            usage,
        })?;
    }

    for usage in details.get_usages(&*descriptors.require(standard::NAMED_QUERY)?) {
        collector.add_named_query(NamedQueryDefinition {
            name: usage.string_value("name")?.to_string(),
            query: usage.string_value("query")?.to_string(),
        })?;
    }

    Ok(())
}

fn validate_boot_model(model: &BootModel) -> Result<(), ErrorTree> {
    let mut errs = ErrorTree::new();

    for hierarchy in &model.hierarchies {
        // The root, or one of its mapped-superclass ancestors, must declare
        // an identifier.
        let mut current = Some(hierarchy.root_entity.clone());
        let mut found_id = false;
        while let Some(name) = current {
            match model.types.get(&name) {
                Some(IdentifiableTypeMapping::Entity(entity)) => {
                    if entity.identifier.is_some() {
                        found_id = true;
                        break;
                    }
                    current = entity.super_type.clone();
                }
                Some(IdentifiableTypeMapping::MappedSuperclass(mapped)) => {
                    if mapped.identifier.is_some() {
                        found_id = true;
                        break;
                    }
                    current = mapped.super_type.clone();
                }
                None => break,
            }
        }
        if !found_id {
            errs.add_route(
                hierarchy.root_entity.clone(),
                "entity hierarchy has no identifier attribute",
            );
        }
    }

    errs.result()
}

fn fetch_timing(constant: &str) -> FetchTiming {
    if constant == "LAZY" {
        FetchTiming::Lazy
    } else {
        FetchTiming::Eager
    }
}

fn default_table_name(entity_name: &str) -> String {
    entity_name.to_case(Case::Snake)
}

fn default_join_column(attribute: &str) -> String {
    format!("{}_id", attribute.to_case(Case::Snake))
}

fn simple_name(managed_name: &str) -> &str {
    managed_name
        .rsplit(['.', ':'])
        .next()
        .unwrap_or(managed_name)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relmeta_annotate::{class_details::ClassDetails, standard::standard_registry, target::Usages};

    fn basic_member(
        descriptors: &AnnotationDescriptorRegistry,
        name: &str,
    ) -> relmeta_annotate::member::MemberDetails {
        let usage = AnnotationUsage::builder(descriptors.require(standard::BASIC).unwrap()).build();
        relmeta_annotate::member::MemberDetails::field(name, None, Usages::eager([usage]))
    }

    fn id_member(
        descriptors: &AnnotationDescriptorRegistry,
        name: &str,
    ) -> relmeta_annotate::member::MemberDetails {
        let id = AnnotationUsage::builder(descriptors.require(standard::ID).unwrap()).build();
        let basic = AnnotationUsage::builder(descriptors.require(standard::BASIC).unwrap()).build();
        relmeta_annotate::member::MemberDetails::field(name, None, Usages::eager([id, basic]))
    }

    fn register_entity(
        classes: &ClassDetailsRegistry,
        descriptors: &AnnotationDescriptorRegistry,
        name: &str,
        super_class: Option<&str>,
        with_id: bool,
    ) {
        let entity_usage = AnnotationUsage::builder(descriptors.require(standard::ENTITY).unwrap())
            .build();
        let mut builder = ClassDetails::builder(name).usages(Usages::eager([entity_usage]));
        if with_id {
            builder = builder.field(id_member(descriptors, "id"));
        }
        builder = builder.field(basic_member(descriptors, "name"));
        if let Some(super_class) = super_class {
            builder = builder.super_class(super_class);
        }
        classes.add_managed_class(builder.build());
    }

    #[test]
    fn binds_entity_with_defaulted_table_name() {
        let descriptors = standard_registry();
        let classes = ClassDetailsRegistry::new();
        register_entity(&classes, &descriptors, "CustomerOrder", None, true);

        let mut collector = InFlightMetadataCollector::new();
        let model = bind_boot_model(&classes, &descriptors, &mut collector).unwrap();

        let entity = model
            .types
            .get("CustomerOrder")
            .and_then(IdentifiableTypeMapping::as_entity)
            .unwrap();
        assert_eq!(entity.table.name, "customer_order");
        assert!(entity.identifier.is_some());
        assert_eq!(entity.attributes.len(), 1);
    }

    #[test]
    fn hierarchy_roots_are_entities_without_entity_ancestors() {
        let descriptors = standard_registry();
        let classes = ClassDetailsRegistry::new();
        register_entity(&classes, &descriptors, "Animal", None, true);
        register_entity(&classes, &descriptors, "Dog", Some("Animal"), false);

        let mut collector = InFlightMetadataCollector::new();
        let model = bind_boot_model(&classes, &descriptors, &mut collector).unwrap();

        assert_eq!(model.hierarchies.len(), 1);
        assert_eq!(model.hierarchies[0].root_entity, "Animal");

        let root = model.types.get("Animal").unwrap();
        assert_eq!(root.sub_types(), &["Dog".to_string()]);
    }

    #[test]
    fn missing_identifier_fails_validation() {
        let descriptors = standard_registry();
        let classes = ClassDetailsRegistry::new();
        register_entity(&classes, &descriptors, "Orphan", None, false);

        let mut collector = InFlightMetadataCollector::new();
        let result = bind_boot_model(&classes, &descriptors, &mut collector);
        assert!(matches!(result, Err(BootError::Validation(_))));
    }
}
