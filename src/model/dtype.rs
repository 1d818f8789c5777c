//! Source-level dtypes — what a numeric-array collaborator reports.
//!
//! [`SourceKind`] is deliberately *open*: it covers everything a source can
//! hold, including element kinds this crate refuses to serve (datetime,
//! variable-length unicode, arbitrary objects). The closed supported set lives
//! in [`Kind`](super::Kind); the mapping between the two is total and fails
//! fast on anything unsupported.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Byte order of the underlying buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// The byte order this process writes.
    pub const NATIVE: ByteOrder = if cfg!(target_endian = "big") {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    };
}

/// Element category as reported by a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Bool,
    Int,
    UInt,
    Float,
    Complex,
    /// Fixed-width byte strings; the dtype size is the declared string length.
    Bytes,
    /// Fixed-width unicode strings. Deferred — rejected at adapter construction.
    Unicode,
    /// Deferred — rejected at adapter construction.
    Datetime,
    /// Deferred — rejected at adapter construction.
    Timedelta,
    /// Arbitrary objects. Deferred — rejected at adapter construction.
    Object,
}

/// Full element description of a source buffer: category, bytes per element,
/// byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dtype {
    pub kind: SourceKind,
    /// Bytes per element.
    pub size: usize,
    pub order: ByteOrder,
}

impl Dtype {
    /// A dtype in native byte order.
    pub const fn new(kind: SourceKind, size: usize) -> Self {
        Self {
            kind,
            size,
            order: ByteOrder::NATIVE,
        }
    }

    pub const fn bool() -> Self {
        Self::new(SourceKind::Bool, 1)
    }

    pub const fn int(size: usize) -> Self {
        Self::new(SourceKind::Int, size)
    }

    pub const fn uint(size: usize) -> Self {
        Self::new(SourceKind::UInt, size)
    }

    pub const fn float(size: usize) -> Self {
        Self::new(SourceKind::Float, size)
    }

    pub const fn complex(size: usize) -> Self {
        Self::new(SourceKind::Complex, size)
    }

    /// Fixed-width byte strings of the given length.
    pub const fn bytes(width: usize) -> Self {
        Self::new(SourceKind::Bytes, width)
    }

    /// Fixed-width unicode strings (4 bytes per code point). Unsupported by
    /// adapters; constructible so sources holding it can be represented.
    pub const fn unicode(chars: usize) -> Self {
        Self::new(SourceKind::Unicode, chars * 4)
    }

    /// 64-bit datetime. Unsupported by adapters.
    pub const fn datetime64() -> Self {
        Self::new(SourceKind::Datetime, 8)
    }

    /// 64-bit timedelta. Unsupported by adapters.
    pub const fn timedelta64() -> Self {
        Self::new(SourceKind::Timedelta, 8)
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SourceKind::Bool => write!(f, "bool"),
            SourceKind::Int => write!(f, "int{}", self.size * 8),
            SourceKind::UInt => write!(f, "uint{}", self.size * 8),
            SourceKind::Float => write!(f, "float{}", self.size * 8),
            SourceKind::Complex => write!(f, "complex{}", self.size * 8),
            SourceKind::Bytes => write!(f, "bytes{}", self.size),
            SourceKind::Unicode => write!(f, "unicode{}", self.size / 4),
            SourceKind::Datetime => write!(f, "datetime64"),
            SourceKind::Timedelta => write!(f, "timedelta64"),
            SourceKind::Object => write!(f, "object"),
        }
    }
}
