//! # trellis-rs — Structure-Preserving Data Catalog
//!
//! A hierarchical catalog of named, typed, shaped numeric data with a client
//! that retrieves slices of it bit-for-bit and dtype-for-dtype intact —
//! whether the catalog sits in the same process or behind a serialization
//! boundary.
//!
//! ## Design Principles
//!
//! 1. **Closed kinds at the boundary**: every source dtype maps to exactly one
//!    supported [`Kind`] or fails fast — nothing is silently coerced
//! 2. **Trait-first**: [`Adapter`] is the contract between the catalog and any
//!    data holder; [`Transport`] is the contract between client and boundary
//! 3. **Immutable after construction**: trees and adapters never mutate, so
//!    concurrent reads need no coordination
//! 4. **The codec path is indistinguishable**: a client over [`CodecTransport`]
//!    must behave exactly like one over [`LocalTransport`]
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis_rs::{from_tree, Array, Entry, Tree};
//!
//! # fn example() -> trellis_rs::Result<()> {
//! let tree = Tree::from_entries([
//!     ("temperature", Entry::array(Array::from_vec(vec![20.5f32, 21.0, 19.8]))?),
//! ]);
//!
//! let client = from_tree(tree);
//! let array = client.get("temperature")?.read_full()?;
//! assert_eq!(array.to_vec::<f32>()?, vec![20.5, 21.0, 19.8]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Components
//!
//! | Component | Module | Description |
//! |-----------|--------|-------------|
//! | Structures | `model` | Dtypes, kinds, array/table structure descriptors |
//! | Adapters | `adapter` | Wrap one data object behind the slicing contract |
//! | Tree | `tree` | Ordered name → adapter/subtree catalog |
//! | Client | `client` | Path resolution + fidelity-preserving reads |
//! | Codec | `codec` | Lossless (structure, bytes) ↔ wire round trip |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod slice;
pub mod adapter;
pub mod tree;
pub mod client;
pub mod codec;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Array, ArrayStructure, ByteOrder, Column, Dtype, Element, Kind, Metadata,
    Shape, SourceKind, Structure, Table, TableStructure,
};

// ============================================================================
// Re-exports: Slicing
// ============================================================================

pub use slice::{DimRange, Slice};

// ============================================================================
// Re-exports: Adapters and catalog
// ============================================================================

pub use adapter::{Adapter, ArrayAdapter, Block, TableAdapter};
pub use tree::{Entry, Tree};

// ============================================================================
// Re-exports: Client and codec
// ============================================================================

pub use client::{
    from_tree, from_tree_with_codec, Client, CodecTransport, LocalTransport,
    NodeHandle, NodeKind, Transport,
};
pub use codec::{Codec, JsonWireCodec};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported dtype {dtype}: supported kinds are bool, int, uint, float, complex, and fixed-width bytes")]
    UnsupportedKind { dtype: String },

    #[error("no entry at {0:?}")]
    NotFound(String),

    #[error("selector {selector} out of range on axis {axis}: extent is {extent}")]
    OutOfRange {
        axis: usize,
        selector: String,
        extent: usize,
    },

    #[error("structure mismatch: declared {expected} bytes, got {actual}")]
    StructureMismatch { expected: usize, actual: usize },

    #[error("entry {name:?} is {actual}, not {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },

    #[error("invalid structure: {0}")]
    InvalidStructure(String),

    #[error("invalid slice: {0}")]
    InvalidSlice(String),

    #[error("malformed wire frame: {0}")]
    MalformedFrame(String),

    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
