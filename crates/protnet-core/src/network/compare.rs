use super::graph::Network;
use crate::core::models::ids::NodeId;

fn same_weight(x: f32, y: f32) -> bool {
    (x.is_nan() && y.is_nan()) || x == y
}

impl Network {
    /// Whether both networks hold the same edges with the same weights.
    ///
    /// Annotations are ignored. Missing weights compare equal to each other.
    pub fn equal_scores(&self, other: &Network) -> bool {
        self.same_edges_by(other, |a, b| {
            same_weight(self.edge_weight(a, b), other.edge_weight(a, b))
        })
    }

    fn same_edges_by(&self, other: &Network, mut payload_matches: impl FnMut(NodeId, NodeId) -> bool) -> bool {
        if self.is_directed() != other.is_directed() || self.edge_count() != other.edge_count() {
            return false;
        }
        self.canonical_pairs()
            .all(|(a, b)| other.has_payload(a, b) && payload_matches(a, b))
    }
}

/// Structural equality: same directedness and the same edges with equal
/// weights and annotations. Iteration mode and storage capacity are ignored.
impl PartialEq for Network {
    fn eq(&self, other: &Self) -> bool {
        self.same_edges_by(other, |a, b| {
            same_weight(self.edge_weight(a, b), other.edge_weight(a, b))
                && self.annotations.get_all(a, b) == other.annotations.get_all(a, b)
        })
    }
}
