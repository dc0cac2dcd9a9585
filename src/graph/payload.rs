//! Top-level page-data payload
//!
//! Every `__data.json` response is `{ "type": "data", "nodes": [...] }`.
//! Each node may carry its own pool in `data` and a `uses` block that says
//! which client-side logic the node feeds. Skipped nodes arrive as `null` or
//! as `{ "type": "skip" }` and simply have no pool.

use super::pool::Pool;
use serde::Deserialize;

/// Decoded page-data response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub nodes: Vec<Option<Node>>,
}

/// One element of `nodes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub uses: Option<Uses>,
    #[serde(default)]
    pub data: Option<Pool>,
}

/// Capability flags of a node
///
/// Only `search_params` matters here: a node that declares it is the one
/// the catalog page rebuilds when the query string changes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Uses {
    #[serde(default)]
    pub search_params: Option<Vec<String>>,
}

impl Payload {
    /// Parse a payload from its JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Present nodes with their position in `nodes`, in payload order
    pub fn nodes(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| node.as_ref().map(|n| (i, n)))
    }
}

impl Node {
    /// Whether this node participates in search-parameter handling
    pub fn uses_search_params(&self) -> bool {
        self.uses
            .as_ref()
            .is_some_and(|uses| uses.search_params.is_some())
    }

    /// The node's pool, if it has a non-empty one
    pub fn pool(&self) -> Option<&Pool> {
        self.data.as_ref().filter(|pool| !pool.is_empty())
    }
}
