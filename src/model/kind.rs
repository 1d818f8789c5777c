//! The closed set of element kinds this catalog serves.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};
use super::{Dtype, SourceKind};

/// Supported element kind of a catalog entry.
///
/// This is the closed counterpart of the open [`SourceKind`]: every dtype a
/// source can report either maps to exactly one `Kind` or is rejected with
/// [`Error::UnsupportedKind`] at adapter construction. There is no fallthrough
/// to a generic byte-blob kind — a 3-byte fixed string stays a 3-byte fixed
/// string, a datetime is refused outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Bool,
    Int,
    UInt,
    Float,
    Complex,
    FixedBytes,
}

impl Kind {
    /// Whether `width` (bytes per element) is a legal item width for this kind.
    pub fn valid_width(self, width: usize) -> bool {
        match self {
            Kind::Bool => width == 1,
            Kind::Int | Kind::UInt => matches!(width, 1 | 2 | 4 | 8),
            Kind::Float => matches!(width, 4 | 8),
            Kind::Complex => matches!(width, 8 | 16),
            Kind::FixedBytes => width > 0,
        }
    }

    /// Total mapping from a source dtype to a supported kind.
    ///
    /// Fails with [`Error::UnsupportedKind`] for the deferred source kinds
    /// (unicode, datetime, timedelta, object) and with
    /// [`Error::InvalidStructure`] for a width that is illegal for an
    /// otherwise-supported kind.
    pub fn from_dtype(dtype: &Dtype) -> Result<Kind> {
        let kind = match dtype.kind {
            SourceKind::Bool => Kind::Bool,
            SourceKind::Int => Kind::Int,
            SourceKind::UInt => Kind::UInt,
            SourceKind::Float => Kind::Float,
            SourceKind::Complex => Kind::Complex,
            SourceKind::Bytes => Kind::FixedBytes,
            SourceKind::Unicode
            | SourceKind::Datetime
            | SourceKind::Timedelta
            | SourceKind::Object => {
                return Err(Error::UnsupportedKind {
                    dtype: dtype.to_string(),
                });
            }
        };
        if !kind.valid_width(dtype.size) {
            return Err(Error::InvalidStructure(format!(
                "item width {} is not valid for kind {kind}",
                dtype.size
            )));
        }
        Ok(kind)
    }

    /// The source kind this supported kind corresponds to.
    pub fn to_source(self) -> SourceKind {
        match self {
            Kind::Bool => SourceKind::Bool,
            Kind::Int => SourceKind::Int,
            Kind::UInt => SourceKind::UInt,
            Kind::Float => SourceKind::Float,
            Kind::Complex => SourceKind::Complex,
            Kind::FixedBytes => SourceKind::Bytes,
        }
    }
}

impl TryFrom<&Dtype> for Kind {
    type Error = Error;

    fn try_from(dtype: &Dtype) -> Result<Kind> {
        Kind::from_dtype(dtype)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::UInt => "uint",
            Kind::Float => "float",
            Kind::Complex => "complex",
            Kind::FixedBytes => "fixed-width bytes",
        };
        write!(f, "{name}")
    }
}
