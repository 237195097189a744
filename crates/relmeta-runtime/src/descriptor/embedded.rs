use crate::{
    descriptor::attribute::{RuntimeAttribute, resolve_attributes},
    error::RuntimeModelError,
    model::InFlightRuntimeModel,
    process::{NavigableTask, RuntimeCreationContext},
};
use relmeta_boot::model::embedded::EmbeddedValueMapping;
use std::sync::{Arc, OnceLock};

///
/// EmbeddedTypeDescriptor
///
/// Runtime descriptor for an embeddable value type. Because embeddables nest,
/// finishing one can depend on another being finished first; the creation
/// process retries pending descriptors until a fixed point.
///

#[derive(Debug)]
pub struct EmbeddedTypeDescriptor {
    boot: Arc<EmbeddedValueMapping>,
    state: OnceLock<Vec<RuntimeAttribute>>,
}

impl EmbeddedTypeDescriptor {
    #[must_use]
    pub fn new(boot: Arc<EmbeddedValueMapping>) -> Arc<Self> {
        Arc::new(Self {
            boot,
            state: OnceLock::new(),
        })
    }

    #[must_use]
    pub fn managed_name(&self) -> &str {
        &self.boot.managed_name
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.get().is_some()
    }

    #[must_use]
    pub fn attributes(&self) -> &[RuntimeAttribute] {
        self.state.get().map_or(&[], Vec::as_slice)
    }

    /// Attempt completion. `Ok(true)` removes this descriptor from the
    /// pending set; `Ok(false)` means a nested embeddable is not finished
    /// yet and the attempt should be retried.
    pub(crate) fn finish_initialization(
        &self,
        model: &InFlightRuntimeModel,
        ctx: &RuntimeCreationContext,
        tasks: &mut Vec<NavigableTask>,
    ) -> Result<bool, RuntimeModelError> {
        if self.is_finished() {
            return Ok(true);
        }

        let Some(attributes) = resolve_attributes(
            &self.boot.managed_name,
            &self.boot.attributes,
            model,
            ctx,
            tasks,
            true,
        )?
        else {
            return Ok(false);
        };

        self.state.set(attributes).ok();
        Ok(true)
    }
}
