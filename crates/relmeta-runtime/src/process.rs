//! Runtime model creation.
//!
//! The central multi-pass builder. Descriptor creation walks each hierarchy
//! up to its physical root and back down; attribute initialization runs
//! top-down; embeddables, collections, and deferred navigable work complete
//! in fixed-point loops that treat a zero-progress pass as a fatal circular
//! dependency.

use crate::{
    cache::{CacheAccess, RegionConfigMap, RegionConfigSink},
    descriptor::{
        EmbeddedTypeDescriptor, EntityDescriptor, ForeignKeyDescriptor,
        MappedSuperclassDescriptor, PersistentCollectionDescriptor,
    },
    error::RuntimeModelError,
    graph::{AttributeNode, RootGraph, SubGraph},
    model::{InFlightRuntimeModel, RuntimeModel},
    typesys::{AnsiDialect, Dialect, TypeConfiguration},
};
use relmeta_annotate::usage::AnnotationUsage;
use relmeta_boot::{
    collector::InFlightMetadataCollector,
    model::{
        hierarchy::{BootModel, EntityHierarchy},
        identifiable::{CacheConfig, IdentifiableTypeMapping},
        table::Column,
    },
};
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};
use tracing::debug;

///
/// RuntimeCreationContext
///
/// Capabilities the creation process consumes: the dialect and the type
/// configuration. Built once per boot and passed by reference.
///

pub struct RuntimeCreationContext {
    pub dialect: Box<dyn Dialect>,
    pub types: TypeConfiguration,
}

impl RuntimeCreationContext {
    #[must_use]
    pub fn standard() -> Self {
        let dialect = Box::new(AnsiDialect);
        let types = TypeConfiguration::standard(dialect.as_ref());
        Self { dialect, types }
    }

    #[must_use]
    pub fn with_dialect(dialect: Box<dyn Dialect>) -> Self {
        let types = TypeConfiguration::standard(dialect.as_ref());
        Self { dialect, types }
    }
}

///
/// NavigableTask
///
/// Deferred finalization work discovered during attribute initialization.
/// Tasks are retried in the same fixed-point fashion as pending descriptors.
///

#[derive(Debug)]
pub(crate) enum NavigableTask {
    ResolveForeignKey {
        source: String,
        attribute: String,
        target: String,
        join_column: Column,
    },
}

impl NavigableTask {
    fn describe(&self) -> String {
        match self {
            Self::ResolveForeignKey {
                source, attribute, ..
            } => format!("{source}.{attribute}"),
        }
    }

    /// `Ok(Some)` on success, `Ok(None)` when the dependency is not ready.
    fn attempt(
        &self,
        model: &InFlightRuntimeModel,
    ) -> Result<Option<ForeignKeyDescriptor>, RuntimeModelError> {
        match self {
            Self::ResolveForeignKey {
                source,
                attribute,
                target,
                join_column,
            } => {
                let Some(target_descriptor) = model.entity_by_any_name(target) else {
                    return Err(RuntimeModelError::UnknownReference {
                        kind: "entity",
                        name: target.clone(),
                        referenced_from: source.clone(),
                    });
                };
                if !target_descriptor.is_finished() {
                    return Ok(None);
                }
                let Some(identifier) =
                    model.identifier_attribute(target_descriptor.managed_name())
                else {
                    return Ok(None);
                };
                Ok(Some(ForeignKeyDescriptor {
                    role: format!("{source}.{attribute}"),
                    column: join_column.clone(),
                    target_entity: target_descriptor.managed_name().to_string(),
                    target_column: identifier.column,
                }))
            }
        }
    }
}

///
/// RuntimeModelCreationProcess
///

pub struct RuntimeModelCreationProcess<'a> {
    boot: &'a BootModel,
    collector: &'a InFlightMetadataCollector,
}

impl<'a> RuntimeModelCreationProcess<'a> {
    #[must_use]
    pub const fn new(boot: &'a BootModel, collector: &'a InFlightMetadataCollector) -> Self {
        Self { boot, collector }
    }

    pub fn execute(
        self,
        ctx: &RuntimeCreationContext,
        region_sink: &mut dyn RegionConfigSink,
    ) -> Result<RuntimeModel, RuntimeModelError> {
        let mut in_flight = InFlightRuntimeModel::default();
        let mut regions = RegionConfigMap::default();

        self.create_identifiable_descriptors(&mut in_flight, &mut regions)?;
        self.create_value_descriptors(&mut in_flight, &mut regions);

        debug!("finishing identifiable types");
        let mut tasks: Vec<NavigableTask> = Vec::new();
        for hierarchy in &self.boot.hierarchies {
            let root_root = self.boot.root_root(&hierarchy.root_entity);
            self.finish_subtree(&root_root, &in_flight, ctx, &mut tasks)?;
        }

        debug!("completing embeddables and collections");
        self.complete_value_descriptors(&in_flight, ctx, &mut tasks)?;

        debug!(tasks = tasks.len(), "finalizing navigables");
        let foreign_keys = finalize_navigables(tasks, &in_flight)?;

        debug!("applying named entity graphs");
        let entity_graphs = self.apply_entity_graphs(&in_flight)?;

        debug!("priming cache regions");
        region_sink.prime(regions.build_all());

        Ok(in_flight.freeze(foreign_keys, entity_graphs))
    }

    /// Create a runtime descriptor for every identifiable type: per
    /// hierarchy, root first, then *upward* through mapped-superclass
    /// ancestors to the top of the physical chain, then *downward* across
    /// every registered subtype. The boot tree is only reachable root-down,
    /// so the top must be located before the whole tree can be built from
    /// it.
    fn create_identifiable_descriptors(
        &self,
        in_flight: &mut InFlightRuntimeModel,
        regions: &mut RegionConfigMap,
    ) -> Result<(), RuntimeModelError> {
        let hierarchy_roots: BTreeSet<&str> = self
            .boot
            .hierarchies
            .iter()
            .map(|h| h.root_entity.as_str())
            .collect();

        let mut processed = BTreeSet::new();
        for hierarchy in &self.boot.hierarchies {
            if !processed.insert(hierarchy.root_entity.clone()) {
                return Err(RuntimeModelError::EncounteredTwice {
                    root: hierarchy.root_entity.clone(),
                });
            }
            debug!(root = %hierarchy.root_entity, "creating hierarchy descriptors");

            self.create_descriptor(&hierarchy.root_entity, hierarchy, in_flight, regions)?;

            let mut current = hierarchy.root_entity.clone();
            while let Some(super_name) = self
                .boot
                .types
                .get(&current)
                .and_then(|t| t.super_type().map(ToString::to_string))
            {
                self.create_descriptor(&super_name, hierarchy, in_flight, regions)?;
                current = super_name;
            }

            let root_root = current;
            self.create_subtree(&root_root, hierarchy, &hierarchy_roots, in_flight, regions)?;
        }

        Ok(())
    }

    fn create_subtree(
        &self,
        name: &str,
        hierarchy: &EntityHierarchy,
        hierarchy_roots: &BTreeSet<&str>,
        in_flight: &mut InFlightRuntimeModel,
        regions: &mut RegionConfigMap,
    ) -> Result<(), RuntimeModelError> {
        // Another hierarchy's root hanging off a shared mapped-superclass is
        // created by its own hierarchy entry, exactly once.
        if name != hierarchy.root_entity && hierarchy_roots.contains(name) {
            return Ok(());
        }

        self.create_descriptor(name, hierarchy, in_flight, regions)?;

        let sub_types = self
            .boot
            .types
            .get(name)
            .map(|t| t.sub_types().to_vec())
            .unwrap_or_default();
        for sub in sub_types {
            self.create_subtree(&sub, hierarchy, hierarchy_roots, in_flight, regions)?;
        }
        Ok(())
    }

    fn create_descriptor(
        &self,
        name: &str,
        hierarchy: &EntityHierarchy,
        in_flight: &mut InFlightRuntimeModel,
        regions: &mut RegionConfigMap,
    ) -> Result<(), RuntimeModelError> {
        if in_flight.entity(name).is_some() || in_flight.mapped_superclass(name).is_some() {
            return Ok(());
        }

        match self.boot.types.get(name) {
            Some(IdentifiableTypeMapping::Entity(mapping)) => {
                if let Some(cache) = &mapping.cache {
                    let region = cache
                        .region
                        .clone()
                        .unwrap_or_else(|| self.root_entity_name(hierarchy));
                    register_region(regions, &region, cache, |builder| {
                        builder.add_entity_role(&mapping.entity_name);
                    });
                }
                in_flight.register_entity(EntityDescriptor::new(
                    mapping.clone(),
                    hierarchy.root_entity.clone(),
                ));
                Ok(())
            }
            Some(IdentifiableTypeMapping::MappedSuperclass(mapping)) => {
                in_flight
                    .register_mapped_superclass(MappedSuperclassDescriptor::new(mapping.clone()));
                Ok(())
            }
            None => Err(RuntimeModelError::UnknownReference {
                kind: "managed type",
                name: name.to_string(),
                referenced_from: hierarchy.root_entity.clone(),
            }),
        }
    }

    fn root_entity_name(&self, hierarchy: &EntityHierarchy) -> String {
        self.boot
            .types
            .get(&hierarchy.root_entity)
            .and_then(IdentifiableTypeMapping::as_entity)
            .map_or_else(
                || hierarchy.root_entity.clone(),
                |entity| entity.entity_name.clone(),
            )
    }

    fn create_value_descriptors(
        &self,
        in_flight: &mut InFlightRuntimeModel,
        regions: &mut RegionConfigMap,
    ) {
        for mapping in self.boot.embeddables.values() {
            in_flight.register_embeddable(EmbeddedTypeDescriptor::new(mapping.clone()));
        }
        for mapping in self.boot.collections.values() {
            if let Some(cache) = &mapping.cache {
                let region = cache.region.clone().unwrap_or_else(|| mapping.role.clone());
                register_region(regions, &region, cache, |builder| {
                    builder.add_collection_role(&mapping.role);
                });
            }
            in_flight.register_collection(PersistentCollectionDescriptor::new(mapping.clone()));
        }
    }

    /// Finish-initialize a type and its subtypes, parents before children.
    fn finish_subtree(
        &self,
        name: &str,
        in_flight: &InFlightRuntimeModel,
        ctx: &RuntimeCreationContext,
        tasks: &mut Vec<NavigableTask>,
    ) -> Result<(), RuntimeModelError> {
        if let Some(entity) = in_flight.entity(name) {
            entity.finish_initialization(in_flight, ctx, tasks)?;
        } else if let Some(mapped) = in_flight.mapped_superclass(name) {
            mapped.finish_initialization(in_flight, ctx, tasks)?;
        }

        let sub_types = self
            .boot
            .types
            .get(name)
            .map(|t| t.sub_types().to_vec())
            .unwrap_or_default();
        for sub in sub_types {
            self.finish_subtree(&sub, in_flight, ctx, tasks)?;
        }
        Ok(())
    }

    /// Iterative fixed point over pending embeddables and collections. An
    /// item leaves the pending set once its finish call reports success; a
    /// full pass that removes nothing while items remain is a fatal circular
    /// dependency, never partial success.
    fn complete_value_descriptors(
        &self,
        in_flight: &InFlightRuntimeModel,
        ctx: &RuntimeCreationContext,
        tasks: &mut Vec<NavigableTask>,
    ) -> Result<(), RuntimeModelError> {
        let mut pending_embeddables = in_flight.embeddable_descriptors();
        let mut pending_collections = in_flight.collection_descriptors();

        loop {
            if pending_embeddables.is_empty() && pending_collections.is_empty() {
                return Ok(());
            }
            let before = pending_embeddables.len() + pending_collections.len();

            let mut next_embeddables = Vec::new();
            for descriptor in pending_embeddables {
                if !descriptor.finish_initialization(in_flight, ctx, tasks)? {
                    next_embeddables.push(descriptor);
                }
            }

            let mut next_collections = Vec::new();
            for descriptor in pending_collections {
                if !descriptor.finish_initialization(in_flight, ctx)? {
                    next_collections.push(descriptor);
                }
            }

            let after = next_embeddables.len() + next_collections.len();
            if after == before {
                let pending = next_embeddables
                    .iter()
                    .map(|d| d.managed_name().to_string())
                    .chain(next_collections.iter().map(|d| d.role().to_string()))
                    .collect();
                return Err(RuntimeModelError::NonConvergent { pending });
            }

            pending_embeddables = next_embeddables;
            pending_collections = next_collections;
        }
    }

    /// Apply named entity-graph definitions against the finished descriptors.
    fn apply_entity_graphs(
        &self,
        in_flight: &InFlightRuntimeModel,
    ) -> Result<BTreeMap<String, RootGraph>, RuntimeModelError> {
        let mut graphs = BTreeMap::new();

        for definition in self.collector.entity_graphs() {
            let Some(entity) = in_flight.entity_by_any_name(&definition.entity_name) else {
                return Err(RuntimeModelError::UnknownGraphEntity {
                    entity: definition.entity_name.clone(),
                    graph: definition.name.clone(),
                });
            };

            let nodes = build_graph_nodes(
                &definition.usage,
                &definition.usage,
                "attributeNodes",
                &mut Vec::new(),
            )?;
            graphs.insert(
                definition.name.clone(),
                RootGraph {
                    name: definition.name.clone(),
                    entity_name: entity.entity_name().to_string(),
                    nodes,
                },
            );
        }

        Ok(graphs)
    }
}

fn register_region(
    regions: &mut RegionConfigMap,
    region: &str,
    cache: &CacheConfig,
    add_role: impl FnOnce(&mut crate::cache::CacheRegionConfigBuilder),
) {
    let builder = regions.builder_for(region);
    if let Some(concurrency) = &cache.concurrency {
        builder.set_access(CacheAccess::from_strategy(concurrency));
    }
    add_role(builder);
}

/// Navigable finalization queue: retry until drained; zero progress across a
/// full pass with work remaining is fatal.
fn finalize_navigables(
    tasks: Vec<NavigableTask>,
    in_flight: &InFlightRuntimeModel,
) -> Result<BTreeMap<String, ForeignKeyDescriptor>, RuntimeModelError> {
    let mut queue = tasks;
    let mut resolved = BTreeMap::new();

    loop {
        if queue.is_empty() {
            return Ok(resolved);
        }
        let before = queue.len();

        let mut next = Vec::new();
        for task in queue {
            match task.attempt(in_flight)? {
                Some(fk) => {
                    resolved.insert(fk.role.clone(), fk);
                }
                None => next.push(task),
            }
        }

        if next.len() == before {
            return Err(RuntimeModelError::NonConvergent {
                pending: next.iter().map(NavigableTask::describe).collect(),
            });
        }
        queue = next;
    }
}

// Attribute nodes and subgraph references resolve by name against the owning
// graph declaration's subgraph list, recursively.
fn build_graph_nodes(
    nodes_source: &Arc<AnnotationUsage>,
    graph_usage: &Arc<AnnotationUsage>,
    nodes_attribute: &str,
    visiting: &mut Vec<String>,
) -> Result<BTreeMap<String, AttributeNode>, RuntimeModelError> {
    let mut nodes = BTreeMap::new();

    for node in nodes_source.nested_usages(nodes_attribute)? {
        let attribute = node.string_value("value")?.to_string();
        let subgraph_name = node.string_value("subgraph")?.to_string();
        let subgraph = if subgraph_name.is_empty() {
            None
        } else {
            build_subgraph(graph_usage, &subgraph_name, visiting)?
        };
        nodes.insert(
            attribute.clone(),
            AttributeNode {
                attribute,
                subgraph,
            },
        );
    }

    Ok(nodes)
}

fn build_subgraph(
    graph_usage: &Arc<AnnotationUsage>,
    name: &str,
    visiting: &mut Vec<String>,
) -> Result<Option<SubGraph>, RuntimeModelError> {
    // Self-referential subgraphs terminate here instead of recursing.
    if visiting.iter().any(|v| v == name) {
        return Ok(None);
    }

    let mut found = None;
    for subgraph in graph_usage.nested_usages("subgraphs")? {
        if subgraph.string_value("name")? == name {
            found = Some(subgraph);
            break;
        }
    }
    let Some(subgraph) = found else {
        return Ok(None);
    };

    visiting.push(name.to_string());
    let nodes = build_graph_nodes(&subgraph, graph_usage, "attributeNodes", visiting)?;
    visiting.pop();

    Ok(Some(SubGraph {
        name: name.to_string(),
        nodes,
    }))
}
