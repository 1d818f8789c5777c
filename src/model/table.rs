//! Tabular values materialized on the client side.

use crate::{Error, Result};
use super::{Array, TableStructure};

/// An ordered set of named 1-d columns sharing one row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<(String, Array)>,
}

impl Table {
    /// Rebuild a table from its structure and the concatenated column
    /// buffers, as produced by `TableAdapter::read`.
    pub fn from_wire(structure: &TableStructure, data: Vec<u8>) -> Result<Table> {
        let expected = structure.nbytes();
        if data.len() != expected {
            return Err(Error::StructureMismatch {
                expected,
                actual: data.len(),
            });
        }
        let mut columns = Vec::with_capacity(structure.columns.len());
        let mut offset = 0usize;
        for column in &structure.columns {
            let nbytes = column.nbytes(structure.row_count);
            let chunk = data[offset..offset + nbytes].to_vec();
            offset += nbytes;
            let array =
                Array::from_raw_parts(column.dtype(), vec![structure.row_count], chunk)?;
            columns.push((column.name.clone(), array));
        }
        Ok(Table { columns })
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, a)| a.element_count())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn column(&self, name: &str) -> Result<&Array> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Array)> {
        self.columns.iter().map(|(n, a)| (n.as_str(), a))
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{ByteOrder, Column, Kind};

    use super::*;

    #[test]
    fn test_from_wire_splits_columns() {
        let structure = TableStructure {
            columns: vec![
                Column {
                    name: "x".into(),
                    kind: Kind::UInt,
                    item_width: 1,
                    order: ByteOrder::NATIVE,
                },
                Column {
                    name: "y".into(),
                    kind: Kind::UInt,
                    item_width: 2,
                    order: ByteOrder::NATIVE,
                },
            ],
            row_count: 2,
        };
        let mut data = vec![7u8, 8];
        for v in [100u16, 200] {
            data.extend_from_slice(&v.to_ne_bytes());
        }

        let table = Table::from_wire(&structure, data).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("x").unwrap().to_vec::<u8>().unwrap(), vec![7, 8]);
        assert_eq!(
            table.column("y").unwrap().to_vec::<u16>().unwrap(),
            vec![100, 200]
        );
        assert!(table.column("z").is_err());
    }

    #[test]
    fn test_from_wire_validates_length() {
        let structure = TableStructure {
            columns: vec![Column {
                name: "x".into(),
                kind: Kind::UInt,
                item_width: 4,
                order: ByteOrder::NATIVE,
            }],
            row_count: 3,
        };
        assert!(matches!(
            Table::from_wire(&structure, vec![0; 10]),
            Err(Error::StructureMismatch {
                expected: 12,
                actual: 10,
            })
        ));
    }
}
