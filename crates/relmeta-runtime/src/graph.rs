//! Applied entity graphs.
//!
//! Named graph declarations are collected during boot as raw usages; once
//! every entity descriptor exists they are applied into these structures.

use std::collections::BTreeMap;

///
/// AttributeNode
///

#[derive(Clone, Debug, Default)]
pub struct AttributeNode {
    pub attribute: String,
    pub subgraph: Option<SubGraph>,
}

///
/// SubGraph
///

#[derive(Clone, Debug, Default)]
pub struct SubGraph {
    pub name: String,
    pub nodes: BTreeMap<String, AttributeNode>,
}

///
/// RootGraph
///

#[derive(Clone, Debug)]
pub struct RootGraph {
    pub name: String,
    pub entity_name: String,
    pub nodes: BTreeMap<String, AttributeNode>,
}

impl RootGraph {
    #[must_use]
    pub fn node(&self, attribute: &str) -> Option<&AttributeNode> {
        self.nodes.get(attribute)
    }
}
