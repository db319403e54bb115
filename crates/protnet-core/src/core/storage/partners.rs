use super::row::RowTable;
use crate::core::models::ids::NodeId;

/// Existence-only adjacency between nodes.
///
/// Links are always stored on both endpoints, regardless of whether the owning
/// network is directed: the index answers "is there any relationship between
/// `x` and `y`", which drives neighbor enumeration and traversal.
#[derive(Debug, Clone, Default)]
pub struct PartnerIndex {
    table: RowTable<()>,
}

impl PartnerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links `x` and `y` in both directions (a single entry for a self-loop).
    ///
    /// # Return
    ///
    /// `true` if the link did not exist before.
    pub fn set(&mut self, x: NodeId, y: NodeId) -> bool {
        let created = self.table.row_mut_or_grow(x).insert(y, ()).is_none();
        if x != y {
            self.table.row_mut_or_grow(y).insert(x, ());
        }
        created
    }

    pub fn get(&self, x: NodeId, y: NodeId) -> bool {
        self.table.row(x).is_some_and(|row| row.contains(y))
    }

    /// Removes the `x -> y` entry and, when `both` is set, the `y -> x` entry.
    ///
    /// # Return
    ///
    /// `true` if the `x -> y` entry existed.
    pub fn delete(&mut self, x: NodeId, y: NodeId, both: bool) -> bool {
        let removed = self
            .table
            .row_mut(x)
            .is_some_and(|row| row.remove(y).is_some());
        if both && x != y {
            if let Some(row) = self.table.row_mut(y) {
                row.remove(x);
            }
        }
        removed
    }

    /// Sorted copy of the partners of `x`; empty for unknown nodes.
    pub fn partners(&self, x: NodeId) -> Vec<NodeId> {
        self.partners_slice(x).to_vec()
    }

    pub(crate) fn partners_slice(&self, x: NodeId) -> &[NodeId] {
        self.table.row(x).map_or(&[] as &[NodeId], |row| row.columns())
    }

    pub fn degree(&self, x: NodeId) -> usize {
        self.table.row(x).map_or(0, |row| row.len())
    }

    /// Nodes with at least one partner, ascending. This is the root set for
    /// edge enumeration.
    pub fn first_partners(&self) -> Vec<NodeId> {
        self.table.occupied().map(|(node, _)| node).collect()
    }

    pub fn index_len(&self) -> usize {
        self.table.index_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_links_both_endpoints() {
        let mut index = PartnerIndex::new();
        assert!(index.set(1, 2));
        assert!(index.get(1, 2));
        assert!(index.get(2, 1));
        assert!(!index.set(2, 1), "reverse link already exists");
    }

    #[test]
    fn self_loop_is_stored_once() {
        let mut index = PartnerIndex::new();
        index.set(4, 4);
        assert_eq!(index.partners(4), vec![4]);
        assert_eq!(index.degree(4), 1);
    }

    #[test]
    fn partners_are_sorted_copies() {
        let mut index = PartnerIndex::new();
        index.set(5, 9);
        index.set(5, 1);
        index.set(5, 3);

        let mut snapshot = index.partners(5);
        assert_eq!(snapshot, vec![1, 3, 9]);
        snapshot.clear();
        assert_eq!(index.partners(5), vec![1, 3, 9]);
    }

    #[test]
    fn delete_one_or_both_directions() {
        let mut index = PartnerIndex::new();
        index.set(1, 2);

        assert!(index.delete(1, 2, false));
        assert!(!index.get(1, 2));
        assert!(index.get(2, 1));

        index.set(1, 2);
        assert!(index.delete(2, 1, true));
        assert!(!index.get(1, 2));
        assert!(!index.get(2, 1));
    }

    #[test]
    fn unknown_nodes_degrade_to_absence() {
        let mut index = PartnerIndex::new();
        assert!(!index.get(100_000, 1));
        assert!(index.partners(100_000).is_empty());
        assert!(!index.delete(100_000, 1, true));
    }

    #[test]
    fn first_partners_lists_connected_nodes() {
        let mut index = PartnerIndex::new();
        index.set(3, 7);
        index.set(7, 12);
        index.delete(3, 7, true);
        assert_eq!(index.first_partners(), vec![7, 12]);
    }

    #[test]
    fn large_ids_grow_the_index() {
        let mut index = PartnerIndex::new();
        index.set(12_345, 1);
        assert!(index.index_len() > 12_345);
        assert!(index.get(1, 12_345));
    }
}
