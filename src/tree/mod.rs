//! The catalog: an ordered mapping from names to adapters and nested trees.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::adapter::{Adapter, ArrayAdapter, TableAdapter};
use crate::model::{Array, Metadata};
use crate::{Error, Result};

// ============================================================================
// Entry
// ============================================================================

/// One catalog value: a data adapter or a nested tree.
#[derive(Clone)]
pub enum Entry {
    Adapter(Arc<dyn Adapter>),
    Tree(Arc<Tree>),
}

impl Entry {
    /// Auto-wrap an array into an [`ArrayAdapter`].
    ///
    /// Fails with `UnsupportedKind` when the array's dtype is outside the
    /// supported set — unsupported data cannot enter a catalog.
    pub fn array(array: Array) -> Result<Entry> {
        Ok(Entry::Adapter(Arc::new(ArrayAdapter::from_array(array)?)))
    }

    pub fn array_with_metadata(array: Array, metadata: Metadata) -> Result<Entry> {
        Ok(Entry::Adapter(Arc::new(ArrayAdapter::with_metadata(
            array, metadata,
        )?)))
    }

    /// Auto-wrap named columns into a [`TableAdapter`].
    pub fn table(columns: Vec<(String, Array)>) -> Result<Entry> {
        Ok(Entry::Adapter(Arc::new(TableAdapter::from_columns(columns)?)))
    }

    /// Wrap a custom adapter implementation.
    pub fn adapter(adapter: impl Adapter) -> Entry {
        Entry::Adapter(Arc::new(adapter))
    }

    /// "array", "table", or "container".
    pub fn family(&self) -> &'static str {
        match self {
            Entry::Adapter(a) => a.structure().family(),
            Entry::Tree(_) => "container",
        }
    }
}

impl From<Tree> for Entry {
    fn from(tree: Tree) -> Entry {
        Entry::Tree(Arc::new(tree))
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Adapter(a) => f.debug_tuple("Adapter").field(&a.structure().family()).finish(),
            Entry::Tree(t) => f.debug_tuple("Tree").field(&t.len()).finish(),
        }
    }
}

// ============================================================================
// Tree
// ============================================================================

/// An ordered name → entry catalog.
///
/// Names are unique; building from an iterator with duplicate names keeps the
/// *last* value under the *first* insertion position, matching mapping-literal
/// semantics. Iteration order is insertion order; lookups are
/// order-insensitive. Trees are constructed once and never mutated — sharing
/// one across threads needs no locks.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    entries: IndexMap<String, Entry>,
    metadata: Metadata,
}

impl Tree {
    pub fn from_entries<I, K>(entries: I) -> Tree
    where
        I: IntoIterator<Item = (K, Entry)>,
        K: Into<String>,
    {
        let mut map = IndexMap::new();
        for (name, entry) in entries {
            // IndexMap::insert overwrites in place: last write wins
            map.insert(name.into(), entry);
        }
        Tree {
            entries: map,
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Tree {
        self.metadata = metadata;
        self
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Like [`get`](Tree::get), failing with `NotFound` naming the entry.
    pub fn resolve(&self, name: &str) -> Result<&Entry> {
        self.get(name).ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
