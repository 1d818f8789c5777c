//! Table adapter — ordered named 1-d columns sliced by row.

use tracing::trace;

use crate::model::{Array, Column, Metadata, Structure, TableStructure};
use crate::slice::{gather, Slice};
use crate::{Error, Result};

use super::{Adapter, Block};

/// Wraps one tabular block: named 1-d columns sharing a row count.
///
/// Tables share the catalog and the slicing contract with arrays; a slice
/// selects rows and applies to every column. Anything further (per-column
/// selection, joins, dataframe semantics) is out of scope.
pub struct TableAdapter {
    structure: TableStructure,
    columns: Vec<Vec<u8>>,
    metadata: Metadata,
}

impl TableAdapter {
    pub fn from_columns(columns: Vec<(String, Array)>) -> Result<Self> {
        Self::with_metadata(columns, Metadata::new())
    }

    pub fn with_metadata(columns: Vec<(String, Array)>, metadata: Metadata) -> Result<Self> {
        let Some(row_count) = columns.first().map(|(_, a)| a.element_count()) else {
            return Err(Error::InvalidStructure(
                "a table needs at least one column".into(),
            ));
        };

        let mut fields = Vec::with_capacity(columns.len());
        let mut buffers = Vec::with_capacity(columns.len());
        for (name, array) in columns {
            if array.ndim() != 1 {
                return Err(Error::InvalidStructure(format!(
                    "column {name:?} is {}-dimensional, columns must be 1-d",
                    array.ndim()
                )));
            }
            if array.element_count() != row_count {
                return Err(Error::InvalidStructure(format!(
                    "column {name:?} has {} rows, expected {row_count}",
                    array.element_count()
                )));
            }
            let structure = array.structure()?;
            fields.push(Column {
                name,
                kind: structure.kind,
                item_width: structure.item_width,
                order: structure.order,
            });
            buffers.push(array.into_data());
        }

        Ok(Self {
            structure: TableStructure {
                columns: fields,
                row_count,
            },
            columns: buffers,
            metadata,
        })
    }
}

impl Adapter for TableAdapter {
    fn structure(&self) -> Structure {
        Structure::Table(self.structure.clone())
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn read(&self, slice: &Slice) -> Result<Block> {
        if slice.dims().len() > 1 {
            return Err(Error::InvalidSlice(
                "tabular data is sliced along rows only".into(),
            ));
        }
        let shape = [self.structure.row_count];
        let resolved = slice.resolve(&shape)?;
        let rows = resolved.dims[0].count;

        let mut data = Vec::new();
        for (column, buffer) in self.structure.columns.iter().zip(&self.columns) {
            data.extend_from_slice(&gather(buffer, &shape, column.item_width, &resolved));
        }
        trace!(rows, nbytes = data.len(), "read table block");

        Ok(Block {
            structure: Structure::Table(TableStructure {
                columns: self.structure.columns.clone(),
                row_count: rows,
            }),
            data,
        })
    }
}
