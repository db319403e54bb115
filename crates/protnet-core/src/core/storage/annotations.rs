use super::row::RowTable;
use crate::core::models::annotation::{AnnotationValue, Annotations};
use crate::core::models::ids::NodeId;
use std::collections::BTreeSet;

/// Sparse row-major store of an annotation map per pair.
///
/// Shares the row layout and symmetry handling of
/// [`WeightMatrix`](super::weights::WeightMatrix); each occupied cell holds an
/// independent key/value map instead of a scalar.
#[derive(Debug, Clone)]
pub struct AnnotationMatrix {
    table: RowTable<Annotations>,
    symmetrical: bool,
}

impl AnnotationMatrix {
    pub fn new(symmetrical: bool) -> Self {
        Self {
            table: RowTable::default(),
            symmetrical,
        }
    }

    #[inline]
    fn resolve(&self, x: NodeId, y: NodeId) -> (NodeId, NodeId) {
        if self.symmetrical && y < x { (y, x) } else { (x, y) }
    }

    /// Installs `key = value` on the cell, creating the cell if needed.
    ///
    /// # Return
    ///
    /// `true` if the cell itself was created, regardless of whether `key`
    /// was new within an existing cell.
    pub fn add(&mut self, x: NodeId, y: NodeId, key: impl Into<String>, value: AnnotationValue) -> bool {
        let (row, col) = self.resolve(x, y);
        let (cell, created) = self
            .table
            .row_mut_or_grow(row)
            .get_or_insert_with(col, Annotations::new);
        cell.insert(key.into(), value);
        created
    }

    /// Installs a batch of entries on one cell. Returns whether the cell was created.
    ///
    /// An empty batch does not create a cell.
    pub fn add_all<K, I>(&mut self, x: NodeId, y: NodeId, entries: I) -> bool
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AnnotationValue)>,
    {
        let mut entries = entries.into_iter().peekable();
        if entries.peek().is_none() {
            return false;
        }
        let (row, col) = self.resolve(x, y);
        let (cell, created) = self
            .table
            .row_mut_or_grow(row)
            .get_or_insert_with(col, Annotations::new);
        cell.extend(entries.map(|(k, v)| (k.into(), v)));
        created
    }

    pub fn get(&self, x: NodeId, y: NodeId, key: &str) -> Option<&AnnotationValue> {
        self.get_all(x, y).and_then(|cell| cell.get(key))
    }

    pub fn get_all(&self, x: NodeId, y: NodeId) -> Option<&Annotations> {
        let (row, col) = self.resolve(x, y);
        self.table.row(row).and_then(|r| r.get(col))
    }

    pub fn contains(&self, x: NodeId, y: NodeId) -> bool {
        let (row, col) = self.resolve(x, y);
        self.table.row(row).is_some_and(|r| r.contains(col))
    }

    /// Removes the whole cell.
    pub fn delete(&mut self, x: NodeId, y: NodeId) -> bool {
        let (row, col) = self.resolve(x, y);
        self.table
            .row_mut(row)
            .is_some_and(|r| r.remove(col).is_some())
    }

    /// Removes one key; the cell is dropped once its map is empty.
    pub fn remove_single(&mut self, x: NodeId, y: NodeId, key: &str) -> Option<AnnotationValue> {
        let (row, col) = self.resolve(x, y);
        let row = self.table.row_mut(row)?;
        let cell = row.get_mut(col)?;
        let removed = cell.remove(key)?;
        if cell.is_empty() {
            row.remove(col);
        }
        Some(removed)
    }

    pub fn partners(&self, row: NodeId) -> Vec<NodeId> {
        self.table
            .row(row)
            .map_or_else(Vec::new, |r| r.columns().to_vec())
    }

    /// Every key used by any cell, sorted.
    pub fn keys(&self) -> BTreeSet<String> {
        self.table
            .occupied()
            .flat_map(|(_, row)| row.values().iter())
            .flat_map(|cell| cell.keys().cloned())
            .collect()
    }
}
