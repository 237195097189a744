use crate::{
    error::RuntimeModelError,
    model::InFlightRuntimeModel,
    process::RuntimeCreationContext,
    typesys::{JdbcTypeCode, jdbc_codes},
};
use relmeta_boot::model::{
    collection::{CollectionElement, CollectionMapping},
    table::{Column, Table},
};
use std::sync::{Arc, OnceLock};

///
/// ResolvedCollectionElement
///

#[derive(Clone, Debug)]
pub enum ResolvedCollectionElement {
    Basic { jdbc_code: JdbcTypeCode },
    Entity { managed_name: String },
}

///
/// CollectionRuntimeState
///

#[derive(Clone, Debug)]
pub struct CollectionRuntimeState {
    pub element: ResolvedCollectionElement,
    pub key_column: Column,
    pub table: Option<Table>,
}

///
/// PersistentCollectionDescriptor
///
/// Runtime descriptor for one collection role. Completion waits on the owner
/// and (for entity elements) the target entity being finished.
///

#[derive(Debug)]
pub struct PersistentCollectionDescriptor {
    boot: Arc<CollectionMapping>,
    state: OnceLock<CollectionRuntimeState>,
}

impl PersistentCollectionDescriptor {
    #[must_use]
    pub fn new(boot: Arc<CollectionMapping>) -> Arc<Self> {
        Arc::new(Self {
            boot,
            state: OnceLock::new(),
        })
    }

    #[must_use]
    pub fn role(&self) -> &str {
        &self.boot.role
    }

    #[must_use]
    pub fn owner_entity(&self) -> &str {
        &self.boot.owner_entity
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.get().is_some()
    }

    #[must_use]
    pub fn state(&self) -> Option<&CollectionRuntimeState> {
        self.state.get()
    }

    /// Attempt completion; `Ok(false)` means owner or element side is not
    /// finished yet and the attempt should be retried.
    pub(crate) fn finish_initialization(
        &self,
        model: &InFlightRuntimeModel,
        ctx: &RuntimeCreationContext,
    ) -> Result<bool, RuntimeModelError> {
        if self.is_finished() {
            return Ok(true);
        }

        let Some(owner) = model.entity_by_any_name(&self.boot.owner_entity) else {
            return Err(RuntimeModelError::UnknownReference {
                kind: "entity",
                name: self.boot.owner_entity.clone(),
                referenced_from: self.boot.role.clone(),
            });
        };
        if !owner.is_finished() {
            return Ok(false);
        }

        let element = match &self.boot.element {
            CollectionElement::Basic { attribute_type } => ResolvedCollectionElement::Basic {
                jdbc_code: attribute_type
                    .as_ref()
                    .and_then(|t| ctx.types.java_types.resolve_descriptor(t))
                    .map_or(jdbc_codes::VARCHAR, |d| d.recommended_jdbc_code),
            },
            CollectionElement::Entity { entity_name, .. } => {
                let Some(target) = model.entity_by_any_name(entity_name) else {
                    return Err(RuntimeModelError::UnknownReference {
                        kind: "entity",
                        name: entity_name.clone(),
                        referenced_from: self.boot.role.clone(),
                    });
                };
                if !target.is_finished() {
                    return Ok(false);
                }
                ResolvedCollectionElement::Entity {
                    managed_name: target.managed_name().to_string(),
                }
            }
        };

        let state = CollectionRuntimeState {
            element,
            key_column: Column::named(format!("{}_id", owner.table().name)),
            table: self.boot.table.clone(),
        };
        self.state.set(state).ok();
        Ok(true)
    }
}
