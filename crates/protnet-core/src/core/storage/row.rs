use crate::core::models::ids::NodeId;

/// Capacity increment of a single row.
pub const ROW_GROWTH_STEP: usize = 50;
/// Capacity increment of the row index when an unseen, larger node is addressed.
pub const INDEX_GROWTH_STEP: usize = 5_000;

/// One sparse row: ascending column ids with a parallel value array.
///
/// Lookups are binary searches; inserts and removals shift the tail. Capacity
/// grows and shrinks in [`ROW_GROWTH_STEP`] increments, which suits rows that
/// are small and see far more lookups than deletions.
#[derive(Debug, Clone)]
pub struct SparseRow<T> {
    columns: Vec<NodeId>,
    values: Vec<T>,
}

impl<T> Default for SparseRow<T> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T> SparseRow<T> {
    #[inline]
    fn position(&self, column: NodeId) -> Result<usize, usize> {
        self.columns.binary_search(&column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: NodeId) -> bool {
        self.position(column).is_ok()
    }

    pub fn get(&self, column: NodeId) -> Option<&T> {
        self.position(column).ok().map(|i| &self.values[i])
    }

    pub fn get_mut(&mut self, column: NodeId) -> Option<&mut T> {
        match self.position(column) {
            Ok(i) => Some(&mut self.values[i]),
            Err(_) => None,
        }
    }

    /// Inserts or overwrites a cell, returning the previous value.
    pub fn insert(&mut self, column: NodeId, value: T) -> Option<T> {
        match self.position(column) {
            Ok(i) => Some(std::mem::replace(&mut self.values[i], value)),
            Err(i) => {
                self.reserve_step();
                self.columns.insert(i, column);
                self.values.insert(i, value);
                None
            }
        }
    }

    /// Returns the cell for `column`, creating it with `make` when absent.
    ///
    /// The flag is `true` when the cell was created by this call.
    pub fn get_or_insert_with(&mut self, column: NodeId, make: impl FnOnce() -> T) -> (&mut T, bool) {
        match self.position(column) {
            Ok(i) => (&mut self.values[i], false),
            Err(i) => {
                self.reserve_step();
                self.columns.insert(i, column);
                self.values.insert(i, make());
                (&mut self.values[i], true)
            }
        }
    }

    pub fn remove(&mut self, column: NodeId) -> Option<T> {
        let i = self.position(column).ok()?;
        self.columns.remove(i);
        let value = self.values.remove(i);
        self.shrink_at_step();
        Some(value)
    }

    pub fn columns(&self) -> &[NodeId] {
        &self.columns
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.columns.iter().copied().zip(self.values.iter())
    }

    pub fn capacity(&self) -> usize {
        self.columns.capacity()
    }

    fn reserve_step(&mut self) {
        if self.columns.len() == self.columns.capacity() {
            self.columns.reserve_exact(ROW_GROWTH_STEP);
            self.values.reserve_exact(ROW_GROWTH_STEP);
        }
    }

    fn shrink_at_step(&mut self) {
        let len = self.columns.len();
        if len % ROW_GROWTH_STEP == 0 && self.columns.capacity() >= len + ROW_GROWTH_STEP {
            self.columns.shrink_to(len);
            self.values.shrink_to(len);
        }
    }
}

/// Row-major table of [`SparseRow`]s indexed directly by node id.
///
/// The index only ever grows, in [`INDEX_GROWTH_STEP`] increments, so existing
/// rows are never re-indexed.
#[derive(Debug, Clone)]
pub struct RowTable<T> {
    rows: Vec<SparseRow<T>>,
}

impl<T> Default for RowTable<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> RowTable<T> {
    pub fn row(&self, row: NodeId) -> Option<&SparseRow<T>> {
        self.rows.get(row as usize)
    }

    pub fn row_mut(&mut self, row: NodeId) -> Option<&mut SparseRow<T>> {
        self.rows.get_mut(row as usize)
    }

    /// Mutable access to a row, growing the index when `row` lies beyond it.
    pub fn row_mut_or_grow(&mut self, row: NodeId) -> &mut SparseRow<T> {
        let needed = row as usize + 1;
        if needed > self.rows.len() {
            let new_len = needed.div_ceil(INDEX_GROWTH_STEP) * INDEX_GROWTH_STEP;
            self.rows.resize_with(new_len, SparseRow::default);
        }
        &mut self.rows[row as usize]
    }

    /// Number of addressable rows.
    pub fn index_len(&self) -> usize {
        self.rows.len()
    }

    /// Non-empty rows in ascending row order.
    pub fn occupied(&self) -> impl Iterator<Item = (NodeId, &SparseRow<T>)> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_empty())
            .map(|(i, row)| (i as NodeId, row))
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut SparseRow<T>> {
        self.rows.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sparse_row {
        use super::*;

        #[test]
        fn inserts_keep_columns_sorted() {
            let mut row = SparseRow::default();
            for column in [9, 2, 5, 1] {
                row.insert(column, column * 10);
            }
            assert_eq!(row.columns(), &[1, 2, 5, 9]);
            assert_eq!(row.values(), &[10, 20, 50, 90]);
        }

        #[test]
        fn insert_overwrites_and_returns_previous() {
            let mut row = SparseRow::default();
            assert_eq!(row.insert(3, "a"), None);
            assert_eq!(row.insert(3, "b"), Some("a"));
            assert_eq!(row.get(3), Some(&"b"));
            assert_eq!(row.len(), 1);
        }

        #[test]
        fn get_or_insert_with_reports_creation() {
            let mut row: SparseRow<Vec<u8>> = SparseRow::default();
            let (cell, created) = row.get_or_insert_with(4, Vec::new);
            cell.push(1);
            assert!(created);
            let (cell, created) = row.get_or_insert_with(4, Vec::new);
            assert!(!created);
            assert_eq!(cell, &vec![1]);
        }

        #[test]
        fn capacity_grows_in_row_steps() {
            let mut row = SparseRow::default();
            row.insert(0, ());
            assert_eq!(row.capacity(), ROW_GROWTH_STEP);
            for column in 1..=ROW_GROWTH_STEP as NodeId {
                row.insert(column, ());
            }
            assert_eq!(row.capacity(), 2 * ROW_GROWTH_STEP);
        }

        #[test]
        fn capacity_shrinks_when_crossing_a_step_boundary() {
            let mut row = SparseRow::default();
            for column in 0..=ROW_GROWTH_STEP as NodeId {
                row.insert(column, ());
            }
            assert_eq!(row.capacity(), 2 * ROW_GROWTH_STEP);

            row.remove(0);
            assert_eq!(row.len(), ROW_GROWTH_STEP);
            assert!(row.capacity() < 2 * ROW_GROWTH_STEP);
        }

        #[test]
        fn remove_missing_column_is_none() {
            let mut row: SparseRow<u8> = SparseRow::default();
            assert_eq!(row.remove(1), None);
        }
    }

    mod row_table {
        use super::*;

        #[test]
        fn index_grows_in_large_steps() {
            let mut table: RowTable<()> = RowTable::default();
            assert_eq!(table.index_len(), 0);
            table.row_mut_or_grow(0);
            assert_eq!(table.index_len(), INDEX_GROWTH_STEP);
            table.row_mut_or_grow(INDEX_GROWTH_STEP as NodeId);
            assert_eq!(table.index_len(), 2 * INDEX_GROWTH_STEP);
        }

        #[test]
        fn reads_beyond_the_index_are_absent() {
            let table: RowTable<f32> = RowTable::default();
            assert!(table.row(1_000_000).is_none());
        }

        #[test]
        fn occupied_skips_empty_rows() {
            let mut table = RowTable::default();
            table.row_mut_or_grow(3).insert(1, 1.0_f32);
            table.row_mut_or_grow(7).insert(2, 2.0_f32);
            let rows: Vec<NodeId> = table.occupied().map(|(r, _)| r).collect();
            assert_eq!(rows, vec![3, 7]);
        }
    }
}
