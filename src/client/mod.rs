//! Consumer-facing access: path resolution and fidelity-preserving reads.
//!
//! A [`Client`] talks to the catalog through a [`Transport`]. Two transports
//! ship:
//!
//! | Transport | Description |
//! |-----------|-------------|
//! | [`LocalTransport`] | Direct adapter reads — the reference behavior |
//! | [`CodecTransport`] | Adds a full encode/decode round trip per fetch |
//!
//! A client over `CodecTransport` must be behaviorally indistinguishable from
//! one over `LocalTransport` for every operation: same values, same kind,
//! same item width, same shape. That property is what the serialization
//! boundary is tested against.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::adapter::{Adapter, Block};
use crate::codec::Codec;
use crate::model::{Array, Metadata, Structure, Table};
use crate::slice::Slice;
use crate::tree::{Entry, Tree};
use crate::{Error, Result};

// ============================================================================
// Transport Trait
// ============================================================================

/// What a resolved path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Container,
    Array,
    Table,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Container => "container",
            NodeKind::Array => "array",
            NodeKind::Table => "table",
        }
    }
}

/// The boundary contract between a client and a catalog.
///
/// All operations are synchronous single calls with no partial state visible
/// to callers; a remote implementation confines its blocking here.
pub trait Transport: Send + Sync + 'static {
    fn node_kind(&self, path: &[String]) -> Result<NodeKind>;

    /// Structure of the leaf at `path`. Containers have no structure.
    fn structure(&self, path: &[String]) -> Result<Structure>;

    fn metadata(&self, path: &[String]) -> Result<Metadata>;

    /// Child names of the container at `path`, in catalog order.
    fn list(&self, path: &[String]) -> Result<Vec<String>>;

    /// Read a slice of the leaf at `path`.
    fn fetch(&self, path: &[String], slice: &Slice) -> Result<Block>;
}

fn join(path: &[String]) -> String {
    path.join("/")
}

// ============================================================================
// LocalTransport
// ============================================================================

enum Located<'a> {
    Tree(&'a Tree),
    Adapter(&'a Arc<dyn Adapter>),
}

/// Direct, in-process access to a [`Tree`]. This is the reference
/// implementation every other transport is measured against.
pub struct LocalTransport {
    tree: Arc<Tree>,
}

impl LocalTransport {
    pub fn new(tree: Tree) -> Self {
        Self { tree: Arc::new(tree) }
    }

    fn locate(&self, path: &[String]) -> Result<Located<'_>> {
        let mut current = self.tree.as_ref();
        for (depth, name) in path.iter().enumerate() {
            let entry = current
                .get(name)
                .ok_or_else(|| Error::NotFound(join(&path[..=depth])))?;
            match entry {
                Entry::Tree(subtree) => current = subtree.as_ref(),
                Entry::Adapter(adapter) => {
                    if depth + 1 == path.len() {
                        return Ok(Located::Adapter(adapter));
                    }
                    // descending *through* a leaf
                    return Err(Error::WrongKind {
                        name: join(&path[..=depth]),
                        expected: "container",
                        actual: adapter.structure().family(),
                    });
                }
            }
        }
        Ok(Located::Tree(current))
    }

    fn adapter(&self, path: &[String]) -> Result<&Arc<dyn Adapter>> {
        match self.locate(path)? {
            Located::Adapter(adapter) => Ok(adapter),
            Located::Tree(_) => Err(Error::WrongKind {
                name: join(path),
                expected: "array or table",
                actual: "container",
            }),
        }
    }
}

impl Transport for LocalTransport {
    fn node_kind(&self, path: &[String]) -> Result<NodeKind> {
        match self.locate(path)? {
            Located::Tree(_) => Ok(NodeKind::Container),
            Located::Adapter(adapter) => Ok(match adapter.structure() {
                Structure::Array(_) => NodeKind::Array,
                Structure::Table(_) => NodeKind::Table,
            }),
        }
    }

    fn structure(&self, path: &[String]) -> Result<Structure> {
        Ok(self.adapter(path)?.structure())
    }

    fn metadata(&self, path: &[String]) -> Result<Metadata> {
        match self.locate(path)? {
            Located::Tree(tree) => Ok(tree.metadata().clone()),
            Located::Adapter(adapter) => Ok(adapter.metadata().clone()),
        }
    }

    fn list(&self, path: &[String]) -> Result<Vec<String>> {
        match self.locate(path)? {
            Located::Tree(tree) => Ok(tree.names().map(String::from).collect()),
            Located::Adapter(adapter) => Err(Error::WrongKind {
                name: join(path),
                expected: "container",
                actual: adapter.structure().family(),
            }),
        }
    }

    fn fetch(&self, path: &[String], slice: &Slice) -> Result<Block> {
        debug!(path = %join(path), "fetching block");
        self.adapter(path)?.read(slice)
    }
}

// ============================================================================
// CodecTransport
// ============================================================================

/// A [`LocalTransport`] with a full wire round trip on every fetch — the
/// in-process stand-in for a remote boundary.
pub struct CodecTransport {
    inner: LocalTransport,
    codec: Box<dyn Codec>,
}

impl CodecTransport {
    pub fn new(tree: Tree, codec: impl Codec) -> Self {
        Self {
            inner: LocalTransport::new(tree),
            codec: Box::new(codec),
        }
    }
}

impl Transport for CodecTransport {
    fn node_kind(&self, path: &[String]) -> Result<NodeKind> {
        self.inner.node_kind(path)
    }

    fn structure(&self, path: &[String]) -> Result<Structure> {
        self.inner.structure(path)
    }

    fn metadata(&self, path: &[String]) -> Result<Metadata> {
        self.inner.metadata(path)
    }

    fn list(&self, path: &[String]) -> Result<Vec<String>> {
        self.inner.list(path)
    }

    fn fetch(&self, path: &[String], slice: &Slice) -> Result<Block> {
        let block = self.inner.fetch(path, slice)?;
        let wire = self.codec.encode(&block)?;
        debug!(path = %join(path), wire_len = wire.len(), "round-tripping block");
        self.codec.decode(&wire)
    }
}

// ============================================================================
// Client
// ============================================================================

struct ClientInner {
    transport: Box<dyn Transport>,
    // structures are immutable server-side, so cache them per path
    structures: RwLock<HashMap<Vec<String>, Structure>>,
}

/// The primary entry point: a handle on the root of a catalog.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

/// Build a client bound directly to a local tree — no boundary involved.
pub fn from_tree(tree: Tree) -> Client {
    Client::from_transport(LocalTransport::new(tree))
}

/// Build a client whose every read round-trips through `codec`, exactly as a
/// remote deployment would.
pub fn from_tree_with_codec(tree: Tree, codec: impl Codec) -> Client {
    Client::from_transport(CodecTransport::new(tree, codec))
}

impl Client {
    pub fn from_transport(transport: impl Transport) -> Client {
        Client {
            inner: Arc::new(ClientInner {
                transport: Box::new(transport),
                structures: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Descend one level from the root.
    pub fn get(&self, name: &str) -> Result<NodeHandle> {
        self.root().get(name)
    }

    /// A handle on the catalog root.
    pub fn root(&self) -> NodeHandle {
        NodeHandle {
            inner: Arc::clone(&self.inner),
            path: Vec::new(),
        }
    }

    /// Top-level entry names, in catalog order.
    pub fn list(&self) -> Result<Vec<String>> {
        self.inner.transport.list(&[])
    }

    pub fn metadata(&self) -> Result<Metadata> {
        self.inner.transport.metadata(&[])
    }
}

// ============================================================================
// NodeHandle
// ============================================================================

/// A resolved reference to one name within the catalog.
///
/// The handle owns no data; reads materialize fresh arrays from the
/// transport's blocks.
#[derive(Clone)]
pub struct NodeHandle {
    inner: Arc<ClientInner>,
    path: Vec<String>,
}

impl std::fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeHandle")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl NodeHandle {
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Descend one level. Fails eagerly when the child does not exist.
    pub fn get(&self, name: &str) -> Result<NodeHandle> {
        let mut path = self.path.clone();
        path.push(name.to_string());
        self.inner.transport.node_kind(&path)?;
        Ok(NodeHandle {
            inner: Arc::clone(&self.inner),
            path,
        })
    }

    pub fn kind(&self) -> Result<NodeKind> {
        self.inner.transport.node_kind(&self.path)
    }

    /// Structure of this entry, cached after the first call.
    pub fn structure(&self) -> Result<Structure> {
        if let Some(structure) = self.inner.structures.read().get(&self.path) {
            return Ok(structure.clone());
        }
        let structure = self.inner.transport.structure(&self.path)?;
        self.inner
            .structures
            .write()
            .insert(self.path.clone(), structure.clone());
        Ok(structure)
    }

    pub fn metadata(&self) -> Result<Metadata> {
        self.inner.transport.metadata(&self.path)
    }

    /// Child names, in catalog order.
    pub fn list(&self) -> Result<Vec<String>> {
        self.inner.transport.list(&self.path)
    }

    /// Read a slice of an array entry.
    ///
    /// The returned array's kind, item width, shape, and every element are
    /// identical to what the adapter's own `read` yields — the client is a
    /// transparent proxy.
    pub fn read(&self, slice: impl Into<Slice>) -> Result<Array> {
        let block = self.inner.transport.fetch(&self.path, &slice.into())?;
        block.validate()?;
        match block.structure {
            Structure::Array(structure) => Array::from_wire(&structure, block.data),
            Structure::Table(_) => Err(Error::WrongKind {
                name: join(&self.path),
                expected: "array",
                actual: "table",
            }),
        }
    }

    /// Read the whole entry — the full range on every dimension; for a
    /// zero-dimensional entry, the scalar itself.
    pub fn read_full(&self) -> Result<Array> {
        self.read(Slice::all())
    }

    /// Read a row range of a table entry.
    pub fn read_table(&self, rows: impl Into<Slice>) -> Result<Table> {
        let block = self.inner.transport.fetch(&self.path, &rows.into())?;
        block.validate()?;
        match block.structure {
            Structure::Table(structure) => Table::from_wire(&structure, block.data),
            Structure::Array(_) => Err(Error::WrongKind {
                name: join(&self.path),
                expected: "table",
                actual: "array",
            }),
        }
    }
}
