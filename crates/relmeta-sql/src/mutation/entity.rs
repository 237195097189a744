//! Entity-level mutation construction.
//!
//! Chooses between the generated builders and the author's custom SQL based
//! on the descriptor's overrides. Custom SQL is handed through verbatim; the
//! generated path derives column order from the descriptor's attribute
//! order.

use crate::mutation::{
    CustomSqlMutationBuilder, StandardTableDeleteBuilder, StandardTableInsertBuilder,
    StandardTableUpdateBuilder, TableMutation,
};
use relmeta_runtime::descriptor::{EntityDescriptor, RuntimeAttribute};
use tracing::trace;

/// Insert for one entity table: values in attribute order (LOBs re-sorted by
/// the builder), version initialized, identifier as the key column.
#[must_use]
pub fn insert_for_entity(entity: &EntityDescriptor) -> Box<dyn TableMutation> {
    if let Some(custom) = entity.custom_insert() {
        trace!(entity = %entity.entity_name(), "using custom insert sql");
        let mut builder =
            CustomSqlMutationBuilder::insert(entity.table().name.clone(), 0, custom.sql.clone());
        builder.set_callable(custom.callable);
        return Box::new(builder.build());
    }

    let mut builder = StandardTableInsertBuilder::new(entity.table().name.clone(), 0);
    for attribute in entity.attributes() {
        let Some(column) = attribute.column() else {
            continue;
        };
        if is_lob(attribute) {
            builder.add_values_lob_column(column.name.clone());
        } else {
            builder.add_values_column(column.name.clone());
        }
    }
    if let Some(version) = entity.version_attribute() {
        builder.add_values_column(version.column.name.clone());
    }
    if let Some(identifier) = entity.identifier_attribute() {
        builder.add_key_column(identifier.column.name.clone());
    }
    Box::new(builder.build())
}

/// Update for one entity table: SET side in attribute order, WHERE side
/// restricted by identifier then version.
#[must_use]
pub fn update_for_entity(entity: &EntityDescriptor) -> Box<dyn TableMutation> {
    if let Some(custom) = entity.custom_update() {
        trace!(entity = %entity.entity_name(), "using custom update sql");
        let mut builder =
            CustomSqlMutationBuilder::update(entity.table().name.clone(), 0, custom.sql.clone());
        builder.set_callable(custom.callable);
        return Box::new(builder.build());
    }

    let mut builder = StandardTableUpdateBuilder::new(entity.table().name.clone(), 0);
    for attribute in entity.attributes() {
        let Some(column) = attribute.column() else {
            continue;
        };
        if is_lob(attribute) {
            builder.add_values_lob_column(column.name.clone());
        } else {
            builder.add_values_column(column.name.clone());
        }
    }
    if let Some(version) = entity.version_attribute() {
        builder.add_values_column(version.column.name.clone());
    }
    if let Some(identifier) = entity.identifier_attribute() {
        builder.add_primary_key_column(identifier.column.name.clone());
    }
    if let Some(version) = entity.version_attribute() {
        builder.set_version_column(version.column.name.clone());
    }
    Box::new(builder.build())
}

/// Delete for one entity table: identifier restriction, then version last so
/// a version mismatch is the final predicate.
#[must_use]
pub fn delete_for_entity(entity: &EntityDescriptor) -> Box<dyn TableMutation> {
    if let Some(custom) = entity.custom_delete() {
        trace!(entity = %entity.entity_name(), "using custom delete sql");
        let mut builder =
            CustomSqlMutationBuilder::delete(entity.table().name.clone(), 0, custom.sql.clone());
        builder.set_callable(custom.callable);
        return Box::new(builder.build());
    }

    let mut builder = StandardTableDeleteBuilder::new(entity.table().name.clone(), 0);
    if let Some(identifier) = entity.identifier_attribute() {
        builder.add_primary_key_column(identifier.column.name.clone());
    }
    if let Some(version) = entity.version_attribute() {
        builder.set_version_column(version.column.name.clone());
    }
    Box::new(builder.build())
}

const fn is_lob(attribute: &RuntimeAttribute) -> bool {
    match attribute {
        RuntimeAttribute::Basic(basic) => basic.lob,
        _ => false,
    }
}
