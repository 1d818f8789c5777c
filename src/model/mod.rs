//! The data model: dtypes, kinds, structure descriptors, and the native
//! array/table values that cross every boundary in this crate.

mod array;
mod dtype;
mod kind;
mod metadata;
mod structure;
mod table;

pub use array::{Array, Element};
pub use dtype::{ByteOrder, Dtype, SourceKind};
pub use kind::Kind;
pub use metadata::{metadata, Metadata};
pub use structure::{ArrayStructure, Column, Shape, Structure, TableStructure};
pub use table::Table;
