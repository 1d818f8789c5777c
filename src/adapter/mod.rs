//! # Adapter Trait
//!
//! This is THE contract between the catalog and anything that holds data.
//! An adapter wraps exactly one data object, captures its structure at
//! construction, and is the only entity that reads raw bytes out of it.
//!
//! ## Implementations
//!
//! | Adapter | Module | Description |
//! |---------|--------|-------------|
//! | `ArrayAdapter` | `array` | One n-dimensional (or 0-d scalar) array |
//! | `TableAdapter` | `table` | Ordered named 1-d columns, sliced by row |

pub mod array;
pub mod table;

use serde::{Deserialize, Serialize};

use crate::model::{Metadata, Structure};
use crate::slice::Slice;
use crate::{Error, Result};

pub use array::ArrayAdapter;
pub use table::TableAdapter;

// ============================================================================
// Block
// ============================================================================

/// One read result: the structure of the selected region plus its bytes,
/// contiguous row-major (tables: column buffers concatenated in column
/// order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub structure: Structure,
    pub data: Vec<u8>,
}

impl Block {
    /// Check the byte-length invariant: the buffer holds exactly as many
    /// bytes as the structure declares.
    pub fn validate(&self) -> Result<()> {
        let expected = self.structure.nbytes();
        if self.data.len() != expected {
            return Err(Error::StructureMismatch {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Adapter Trait
// ============================================================================

/// The universal data-holder contract.
///
/// Adapters are immutable once constructed and `read` is a pure function of
/// the wrapped data and the slice, so concurrent reads from any number of
/// callers are safe without coordination.
pub trait Adapter: Send + Sync + 'static {
    /// The full-extent structure descriptor. Pure, no side effects.
    fn structure(&self) -> Structure;

    /// User metadata captured at construction.
    fn metadata(&self) -> &Metadata;

    /// Read the selected region as a fresh contiguous buffer together with
    /// the structure of exactly that region.
    fn read(&self, slice: &Slice) -> Result<Block>;
}
