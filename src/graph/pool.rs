//! Pool resolver for flattened page-data graphs
//!
//! A pool is the flat, ordered sequence of cells owned by one payload node.
//! Composite cells do not embed their children: an array holds integer
//! pointers into the same pool and a record maps field names to pointers.
//! Every dereference in the crate goes through [`Pool`], so a bad pointer or
//! an unexpected shape becomes a [`ResolveError`] instead of a panic.
//!
//! Resolution is always one hop at a time. Nothing here walks the graph
//! recursively, so a cyclic pool cannot cause unbounded work.

use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;

/// A record cell: field name to slot (usually a pointer)
pub type Record = IndexMap<String, Cell>;

/// One cell of a pool
///
/// Inside composites, integers are pointers. A record field may also carry
/// an inline value, which callers that accept it read via
/// [`Pool::field_or_inline`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Cell>),
    Record(Record),
}

/// Shape names used in type-mismatch reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Record,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKind::Null => "null",
            CellKind::Bool => "bool",
            CellKind::Number => "number",
            CellKind::String => "string",
            CellKind::Array => "array",
            CellKind::Record => "record",
        };
        f.write_str(name)
    }
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Null => CellKind::Null,
            Cell::Bool(_) => CellKind::Bool,
            Cell::Number(_) => CellKind::Number,
            Cell::String(_) => CellKind::String,
            Cell::Array(_) => CellKind::Array,
            Cell::Record(_) => CellKind::Record,
        }
    }

    /// Interpret this cell as a pointer (a non-negative integer)
    pub fn as_pointer(&self) -> Option<usize> {
        match self {
            Cell::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n <= usize::MAX as f64 => {
                Some(*n as usize)
            }
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Cell]> {
        match self {
            Cell::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Cell::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Non-empty string, as the site treats empty strings as absent
    pub fn as_present_str(&self) -> Option<&str> {
        self.as_str().filter(|s| !s.is_empty())
    }

    /// Render an identifier cell (string or number) for use in a URL
    ///
    /// Empty strings and zero are treated as absent.
    pub fn as_identifier(&self) -> Option<String> {
        match self {
            Cell::String(s) if !s.is_empty() => Some(s.clone()),
            Cell::Number(n) if *n != 0.0 && n.is_finite() => Some(format!("{}", n)),
            _ => None,
        }
    }
}

/// Why a resolution failed
///
/// Every variant is recoverable; callers generally treat "absent" and
/// "wrong shape" alike.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("pointer {index} out of range (pool has {len} cells)")]
    OutOfRange { index: usize, len: usize },

    #[error("cell {index} is {found}, expected {expected}")]
    TypeMismatch {
        index: usize,
        expected: CellKind,
        found: CellKind,
    },

    #[error("record has no field '{0}'")]
    MissingField(String),

    #[error("field '{0}' is not a pointer")]
    NotAPointer(String),
}

/// Ordered sequence of cells owned by a single node
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Pool(Vec<Cell>);

impl Pool {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cells in pool order
    pub fn cells(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.0.iter().enumerate()
    }

    /// Cell at `index`
    pub fn resolve(&self, index: usize) -> Result<&Cell, ResolveError> {
        self.0.get(index).ok_or(ResolveError::OutOfRange {
            index,
            len: self.0.len(),
        })
    }

    /// Follow a pointer slot one hop
    pub fn deref(&self, slot: &Cell) -> Result<&Cell, ResolveError> {
        match slot.as_pointer() {
            Some(index) => self.resolve(index),
            None => Err(ResolveError::NotAPointer(slot.kind().to_string())),
        }
    }

    pub fn expect_number(&self, index: usize) -> Result<f64, ResolveError> {
        let cell = self.resolve(index)?;
        cell.as_number()
            .ok_or_else(|| mismatch(index, CellKind::Number, cell))
    }

    pub fn expect_str(&self, index: usize) -> Result<&str, ResolveError> {
        let cell = self.resolve(index)?;
        cell.as_str()
            .ok_or_else(|| mismatch(index, CellKind::String, cell))
    }

    pub fn expect_array(&self, index: usize) -> Result<&[Cell], ResolveError> {
        let cell = self.resolve(index)?;
        cell.as_array()
            .ok_or_else(|| mismatch(index, CellKind::Array, cell))
    }

    pub fn expect_record(&self, index: usize) -> Result<&Record, ResolveError> {
        let cell = self.resolve(index)?;
        cell.as_record()
            .ok_or_else(|| mismatch(index, CellKind::Record, cell))
    }

    /// Pointer stored in `record[name]`
    pub fn field_pointer(&self, record: &Record, name: &str) -> Result<usize, ResolveError> {
        let slot = record
            .get(name)
            .ok_or_else(|| ResolveError::MissingField(name.to_string()))?;
        slot.as_pointer()
            .ok_or_else(|| ResolveError::NotAPointer(name.to_string()))
    }

    /// Cell that `record[name]` points at
    pub fn field(&self, record: &Record, name: &str) -> Result<&Cell, ResolveError> {
        self.resolve(self.field_pointer(record, name)?)
    }

    /// Like [`Pool::field`], but an inline non-numeric value is returned as is
    pub fn field_or_inline<'a>(
        &'a self,
        record: &'a Record,
        name: &str,
    ) -> Result<&'a Cell, ResolveError> {
        let slot = record
            .get(name)
            .ok_or_else(|| ResolveError::MissingField(name.to_string()))?;
        match slot {
            Cell::Number(_) => self.deref(slot),
            inline => Ok(inline),
        }
    }

    /// Resolve a pointer array into the cells it references, in order
    ///
    /// Entries that are not pointers or point out of range come back as
    /// errors so the caller decides whether to skip them.
    pub fn resolve_all<'a>(
        &'a self,
        pointers: &'a [Cell],
    ) -> impl Iterator<Item = Result<&'a Cell, ResolveError>> + 'a {
        pointers.iter().map(move |slot| self.deref(slot))
    }
}

impl From<Vec<Cell>> for Pool {
    fn from(cells: Vec<Cell>) -> Self {
        Self(cells)
    }
}

fn mismatch(index: usize, expected: CellKind, found: &Cell) -> ResolveError {
    ResolveError::TypeMismatch {
        index,
        expected,
        found: found.kind(),
    }
}
