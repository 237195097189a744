use relmeta_runtime::descriptor::EntityDescriptor;
use std::collections::BTreeSet;

///
/// CascadingFetchProfile
///
/// Internal fetch profiles activated during cascade handling. Statement
/// caches key off this, so the set is closed and hashable.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CascadingFetchProfile {
    Merge,
    Refresh,
}

///
/// AppliedGraph
///
/// An entity graph influencing the current load. Graph-shaped loads are
/// call-specific and never statement-cached.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppliedGraph {
    pub name: String,
}

///
/// LoadQueryInfluencers
///
/// Session state that changes the shape of a load statement: enabled
/// filters, an active internal fetch profile, an applied entity graph.
///

#[derive(Clone, Debug, Default)]
pub struct LoadQueryInfluencers {
    pub enabled_filters: BTreeSet<String>,
    pub internal_fetch_profile: Option<CascadingFetchProfile>,
    pub effective_entity_graph: Option<AppliedGraph>,
}

impl LoadQueryInfluencers {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    pub fn enable_filter(&mut self, name: impl Into<String>) {
        self.enabled_filters.insert(name.into());
    }

    /// Whether any enabled filter applies to the entity. Filter-affected
    /// loads must never share cached statements across sessions.
    #[must_use]
    pub fn affects_with_filters(&self, entity: &EntityDescriptor) -> bool {
        entity
            .filters()
            .iter()
            .any(|f| self.enabled_filters.contains(&f.name))
    }

    /// Filters applying to the entity, in declaration order.
    #[must_use]
    pub fn enabled_filter_conditions<'e>(
        &self,
        entity: &'e EntityDescriptor,
    ) -> Vec<&'e str> {
        entity
            .filters()
            .iter()
            .filter(|f| self.enabled_filters.contains(&f.name))
            .map(|f| f.condition.as_str())
            .collect()
    }
}
