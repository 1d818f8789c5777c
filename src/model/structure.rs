//! Structure descriptors — the typed, shaped "schema" of a catalog entry.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Error, Result};
use super::{ByteOrder, Dtype, Kind};

/// Ordered extents of an array. Empty means zero-dimensional (a scalar).
pub type Shape = SmallVec<[usize; 4]>;

// ============================================================================
// ArrayStructure
// ============================================================================

/// Full description of an array-shaped catalog entry: element kind, bytes per
/// element, byte order, and shape.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct ArrayStructure {
    pub kind: Kind,
    /// Bytes per element.
    pub item_width: usize,
    pub order: ByteOrder,
    pub shape: Shape,
}

/// Logical equality: kind, item width, shape. Byte order is a transport
/// detail — it only matters when raw bytes are compared directly.
impl PartialEq for ArrayStructure {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.item_width == other.item_width
            && self.shape == other.shape
    }
}

impl ArrayStructure {
    /// Build a structure for a supported dtype, or fail fast on an
    /// unsupported one.
    pub fn from_dtype(dtype: &Dtype, shape: &[usize]) -> Result<Self> {
        let kind = Kind::from_dtype(dtype)?;
        Ok(Self {
            kind,
            item_width: dtype.size,
            order: dtype.order,
            shape: Shape::from_slice(shape),
        })
    }

    /// The dtype this structure describes.
    pub fn dtype(&self) -> Dtype {
        Dtype {
            kind: self.kind.to_source(),
            size: self.item_width,
            order: self.order,
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// True for zero-dimensional (scalar) entries.
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// Number of elements; the product of an empty shape is 1.
    pub fn element_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// Exact byte length a buffer with this structure must have.
    pub fn nbytes(&self) -> usize {
        self.item_width * self.element_count()
    }
}

// ============================================================================
// TableStructure
// ============================================================================

/// One field of a tabular entry: a named 1-d column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: Kind,
    pub item_width: usize,
    pub order: ByteOrder,
}

impl Column {
    pub fn dtype(&self) -> Dtype {
        Dtype {
            kind: self.kind.to_source(),
            size: self.item_width,
            order: self.order,
        }
    }

    /// Byte length of this column at the given row count.
    pub fn nbytes(&self, rows: usize) -> usize {
        self.item_width * rows
    }
}

/// Description of a tabular catalog entry: ordered columns, shared row count.
///
/// Tabular data shares the catalog and the row-range slicing contract with
/// arrays; nothing beyond that (no per-column selection, no dataframe
/// semantics).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStructure {
    pub columns: Vec<Column>,
    pub row_count: usize,
}

impl TableStructure {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Total byte length of the concatenated column buffers.
    pub fn nbytes(&self) -> usize {
        self.columns.iter().map(|c| c.nbytes(self.row_count)).sum()
    }
}

// ============================================================================
// Structure — the family union
// ============================================================================

/// Structure descriptor of any catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Structure {
    Array(ArrayStructure),
    Table(TableStructure),
}

impl Structure {
    pub fn family(&self) -> &'static str {
        match self {
            Structure::Array(_) => "array",
            Structure::Table(_) => "table",
        }
    }

    /// Exact byte length a data block with this structure must carry.
    pub fn nbytes(&self) -> usize {
        match self {
            Structure::Array(s) => s.nbytes(),
            Structure::Table(s) => s.nbytes(),
        }
    }

    pub fn as_array(&self) -> Result<&ArrayStructure> {
        match self {
            Structure::Array(s) => Ok(s),
            Structure::Table(_) => Err(Error::TypeError {
                expected: "array structure".into(),
                got: "table structure".into(),
            }),
        }
    }

    pub fn as_table(&self) -> Result<&TableStructure> {
        match self {
            Structure::Table(s) => Ok(s),
            Structure::Array(_) => Err(Error::TypeError {
                expected: "table structure".into(),
                got: "array structure".into(),
            }),
        }
    }
}
