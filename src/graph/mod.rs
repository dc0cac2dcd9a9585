//! Flattened page-data graph decoding.
//!
//! The site serializes page data as a pool of cells per node, where
//! composites reference other cells by index instead of nesting them.
//!
//! # Architecture
//!
//! ```text
//! Payload ──► Node ──► Pool ──► Cell
//!                 ▲              │
//!                 └── locator ◄──┘ (structural predicates over records)
//! ```
//!
//! - **pool**: one-hop pointer resolution with typed narrowing helpers.
//! - **payload**: the `nodes` envelope and per-node capability flags.
//! - **locator**: first-match search for the record a stage needs.

pub mod locator;
pub mod payload;
pub mod pool;

pub use locator::{locate, CellScope, HasEmbeds, Located, MediaWithSlug, RecordPredicate, SearchRoot};
pub use payload::{Node, Payload, Uses};
pub use pool::{Cell, CellKind, Pool, Record, ResolveError};
