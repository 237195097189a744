//! Second-level cache region configuration.
//!
//! Region configurations are accumulated while descriptors register and
//! delivered to the cache layer in one priming pass at the end of runtime
//! model creation. The cache implementation itself lives elsewhere; this is
//! only the configuration sink boundary.

use std::collections::BTreeMap;

///
/// CacheAccess
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CacheAccess {
    ReadOnly,
    #[default]
    ReadWrite,
    NonstrictReadWrite,
    Transactional,
}

impl CacheAccess {
    /// Parse a concurrency-strategy constant; unknown strategies fall back
    /// to read-write.
    #[must_use]
    pub fn from_strategy(strategy: &str) -> Self {
        match strategy {
            "READ_ONLY" => Self::ReadOnly,
            "NONSTRICT_READ_WRITE" => Self::NonstrictReadWrite,
            "TRANSACTIONAL" => Self::Transactional,
            _ => Self::ReadWrite,
        }
    }
}

///
/// CacheRegionConfig
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CacheRegionConfig {
    pub region_name: String,
    pub access: CacheAccess,
    pub entity_roles: Vec<String>,
    pub natural_id_roles: Vec<String>,
    pub collection_roles: Vec<String>,
}

///
/// CacheRegionConfigBuilder
///
/// One builder per distinct region name, shared across every entity,
/// natural-id, and collection registration targeting that region.
///

#[derive(Debug)]
pub struct CacheRegionConfigBuilder {
    region_name: String,
    access: CacheAccess,
    entity_roles: Vec<String>,
    natural_id_roles: Vec<String>,
    collection_roles: Vec<String>,
}

impl CacheRegionConfigBuilder {
    #[must_use]
    pub fn new(region_name: impl Into<String>) -> Self {
        Self {
            region_name: region_name.into(),
            access: CacheAccess::default(),
            entity_roles: Vec::new(),
            natural_id_roles: Vec::new(),
            collection_roles: Vec::new(),
        }
    }

    pub const fn set_access(&mut self, access: CacheAccess) {
        self.access = access;
    }

    pub fn add_entity_role(&mut self, role: impl Into<String>) {
        self.entity_roles.push(role.into());
    }

    pub fn add_natural_id_role(&mut self, role: impl Into<String>) {
        self.natural_id_roles.push(role.into());
    }

    pub fn add_collection_role(&mut self, role: impl Into<String>) {
        self.collection_roles.push(role.into());
    }

    #[must_use]
    pub fn build(self) -> CacheRegionConfig {
        CacheRegionConfig {
            region_name: self.region_name,
            access: self.access,
            entity_roles: self.entity_roles,
            natural_id_roles: self.natural_id_roles,
            collection_roles: self.collection_roles,
        }
    }
}

///
/// RegionConfigMap
///

#[derive(Debug, Default)]
pub struct RegionConfigMap {
    builders: BTreeMap<String, CacheRegionConfigBuilder>,
}

impl RegionConfigMap {
    pub fn builder_for(&mut self, region_name: &str) -> &mut CacheRegionConfigBuilder {
        self.builders
            .entry(region_name.to_string())
            .or_insert_with(|| CacheRegionConfigBuilder::new(region_name))
    }

    #[must_use]
    pub fn build_all(self) -> Vec<CacheRegionConfig> {
        self.builders
            .into_values()
            .map(CacheRegionConfigBuilder::build)
            .collect()
    }
}

///
/// RegionConfigSink
///
/// The cache layer's intake. Primed exactly once per boot.
///

pub trait RegionConfigSink {
    fn prime(&mut self, configs: Vec<CacheRegionConfig>);
}

///
/// CollectingRegionSink
/// Default sink that just retains what it was primed with.
///

#[derive(Debug, Default)]
pub struct CollectingRegionSink {
    pub configs: Vec<CacheRegionConfig>,
}

impl RegionConfigSink for CollectingRegionSink {
    fn prime(&mut self, configs: Vec<CacheRegionConfig>) {
        self.configs = configs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_are_shared_per_region() {
        let mut map = RegionConfigMap::default();
        map.builder_for("shared").add_entity_role("Customer");
        map.builder_for("shared").add_collection_role("Customer.orders");
        map.builder_for("other").add_entity_role("Order");

        let mut configs = map.build_all();
        configs.sort_by(|a, b| a.region_name.cmp(&b.region_name));

        assert_eq!(configs.len(), 2);
        assert_eq!(configs[1].region_name, "shared");
        assert_eq!(configs[1].entity_roles, vec!["Customer".to_string()]);
        assert_eq!(
            configs[1].collection_roles,
            vec!["Customer.orders".to_string()]
        );
    }
}
