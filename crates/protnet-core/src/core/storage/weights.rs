use super::row::RowTable;
use crate::core::models::ids::NodeId;

/// Sparse row-major store of one `f32` weight per pair.
///
/// With `symmetrical` set, `(x, y)` and `(y, x)` resolve to the same cell at
/// `(min, max)`; otherwise pairs are stored verbatim. `NaN` is returned for
/// absent cells and must never be stored.
#[derive(Debug, Clone)]
pub struct WeightMatrix {
    table: RowTable<f32>,
    symmetrical: bool,
}

impl WeightMatrix {
    pub fn new(symmetrical: bool) -> Self {
        Self {
            table: RowTable::default(),
            symmetrical,
        }
    }

    pub fn is_symmetrical(&self) -> bool {
        self.symmetrical
    }

    #[inline]
    fn resolve(&self, x: NodeId, y: NodeId) -> (NodeId, NodeId) {
        if self.symmetrical && y < x { (y, x) } else { (x, y) }
    }

    /// Stores `value`, returning the previous weight or `NaN` for a new cell.
    pub fn set(&mut self, x: NodeId, y: NodeId, value: f32) -> f32 {
        debug_assert!(!value.is_nan(), "NaN is reserved for absent weights");
        let (row, col) = self.resolve(x, y);
        self.table
            .row_mut_or_grow(row)
            .insert(col, value)
            .unwrap_or(f32::NAN)
    }

    pub fn get(&self, x: NodeId, y: NodeId) -> f32 {
        let (row, col) = self.resolve(x, y);
        self.table
            .row(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(f32::NAN)
    }

    pub fn contains(&self, x: NodeId, y: NodeId) -> bool {
        let (row, col) = self.resolve(x, y);
        self.table.row(row).is_some_and(|r| r.contains(col))
    }

    pub fn delete(&mut self, x: NodeId, y: NodeId) -> bool {
        let (row, col) = self.resolve(x, y);
        self.table
            .row_mut(row)
            .is_some_and(|r| r.remove(col).is_some())
    }

    /// Adds `delta` to the cell, inserting `delta` if it is absent.
    ///
    /// # Return
    ///
    /// The resulting weight.
    pub fn add(&mut self, x: NodeId, y: NodeId, delta: f32) -> f32 {
        let (row, col) = self.resolve(x, y);
        let (cell, created) = self.table.row_mut_or_grow(row).get_or_insert_with(col, || delta);
        if !created {
            *cell += delta;
        }
        *cell
    }

    /// Column ids of `row`, parallel to [`values`](Self::values).
    pub fn partners(&self, row: NodeId) -> Vec<NodeId> {
        self.table
            .row(row)
            .map_or_else(Vec::new, |r| r.columns().to_vec())
    }

    pub fn values(&self, row: NodeId) -> Vec<f32> {
        self.table
            .row(row)
            .map_or_else(Vec::new, |r| r.values().to_vec())
    }

    /// Multiplies every stored weight by `factor`.
    ///
    /// Leaves the matrix untouched and returns `false` if any product would be
    /// `NaN`, which is reserved for absent cells.
    pub fn scale(&mut self, factor: f32) -> bool {
        let degenerates = self
            .table
            .occupied()
            .any(|(_, row)| row.values().iter().any(|v| (v * factor).is_nan()));
        if degenerates {
            return false;
        }
        for row in self.table.rows_mut() {
            for value in row.values_mut() {
                *value *= factor;
            }
        }
        true
    }

    /// Number of stored cells.
    pub fn len(&self) -> usize {
        self.table.occupied().map(|(_, row)| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.table.occupied().next().is_none()
    }
}
