//! Node locator
//!
//! Finds the first record in a payload that satisfies a structural
//! predicate. Nodes are scanned in payload order and, within a node, cells
//! in pool order; the first match wins. That order decides which node is
//! authoritative when several could match, so it must not change.
//!
//! Absence is not an error here: [`locate`] returns `None` and each stage
//! maps that to its own failure.

use super::payload::{Node, Payload};
use super::pool::{Pool, Record};

/// Which cells of an eligible node a predicate inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellScope {
    /// Only cell 0, the node's root descriptor
    Root,
    /// Every cell, in order
    All,
}

/// Structural predicate over records
pub trait RecordPredicate {
    /// Whether a node is eligible at all
    fn accepts_node(&self, _node: &Node) -> bool {
        true
    }

    fn scope(&self) -> CellScope {
        CellScope::All
    }

    fn matches(&self, pool: &Pool, record: &Record) -> bool;
}

impl<F> RecordPredicate for F
where
    F: Fn(&Pool, &Record) -> bool,
{
    fn matches(&self, pool: &Pool, record: &Record) -> bool {
        self(pool, record)
    }
}

/// A matched record together with the pool it must be resolved against
#[derive(Debug, Clone, Copy)]
pub struct Located<'a> {
    pub node_index: usize,
    pub cell_index: usize,
    pub pool: &'a Pool,
    pub record: &'a Record,
}

/// First record satisfying `predicate`, in node order then pool order
pub fn locate<'a, P>(payload: &'a Payload, predicate: &P) -> Option<Located<'a>>
where
    P: RecordPredicate + ?Sized,
{
    payload
        .nodes()
        .filter(|(_, node)| predicate.accepts_node(node))
        .filter_map(|(node_index, node)| node.pool().map(|pool| (node_index, pool)))
        .find_map(|(node_index, pool)| {
            let limit = match predicate.scope() {
                CellScope::Root => 1,
                CellScope::All => pool.len(),
            };
            pool.cells()
                .take(limit)
                .filter_map(|(i, cell)| cell.as_record().map(|record| (i, record)))
                .find(|(_, record)| predicate.matches(pool, record))
                .map(|(cell_index, record)| Located {
                    node_index,
                    cell_index,
                    pool,
                    record,
                })
        })
}

/// Catalog root: a search-params node whose first cell points at a results array
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchRoot;

impl RecordPredicate for SearchRoot {
    fn accepts_node(&self, node: &Node) -> bool {
        node.uses_search_params()
    }

    fn scope(&self) -> CellScope {
        CellScope::Root
    }

    fn matches(&self, pool: &Pool, record: &Record) -> bool {
        pool.field(record, "results")
            .is_ok_and(|cell| cell.as_array().is_some())
    }
}

/// Media descriptor: has `episodes` and a `slug` pointing at the queried slug
#[derive(Debug, Clone, Copy)]
pub struct MediaWithSlug<'s> {
    pub slug: &'s str,
}

impl RecordPredicate for MediaWithSlug<'_> {
    fn matches(&self, pool: &Pool, record: &Record) -> bool {
        record.contains_key("episodes")
            && pool
                .field(record, "slug")
                .is_ok_and(|cell| cell.as_str() == Some(self.slug))
    }
}

/// Episode page descriptor: any record carrying an `embeds` field
#[derive(Debug, Clone, Copy, Default)]
pub struct HasEmbeds;

impl RecordPredicate for HasEmbeds {
    fn matches(&self, _pool: &Pool, record: &Record) -> bool {
        record.contains_key("embeds")
    }
}
