//! Array adapter — wraps one in-memory array.

use tracing::trace;

use crate::model::{Array, ArrayStructure, Metadata, Structure};
use crate::slice::{gather, Slice};
use crate::Result;

use super::{Adapter, Block};

/// Wraps one n-dimensional array behind the [`Adapter`] contract.
///
/// The structure descriptor is captured once, at construction; construction
/// fails with `UnsupportedKind` when the source dtype is outside the
/// supported set, so every live `ArrayAdapter` is servable.
pub struct ArrayAdapter {
    structure: ArrayStructure,
    data: Vec<u8>,
    metadata: Metadata,
}

impl ArrayAdapter {
    pub fn from_array(array: Array) -> Result<Self> {
        Self::with_metadata(array, Metadata::new())
    }

    pub fn with_metadata(array: Array, metadata: Metadata) -> Result<Self> {
        let structure = array.structure()?;
        Ok(Self {
            structure,
            data: array.into_data(),
            metadata,
        })
    }
}

impl Adapter for ArrayAdapter {
    fn structure(&self) -> Structure {
        Structure::Array(self.structure.clone())
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn read(&self, slice: &Slice) -> Result<Block> {
        let resolved = slice.resolve(&self.structure.shape)?;
        let data = gather(&self.data, &self.structure.shape, self.structure.item_width, &resolved);
        let structure = ArrayStructure {
            shape: resolved.shape().into(),
            ..self.structure.clone()
        };
        trace!(
            shape = ?structure.shape,
            nbytes = data.len(),
            "read array block"
        );
        Ok(Block {
            structure: Structure::Array(structure),
            data,
        })
    }
}
