use super::graph::Network;
use crate::core::models::annotation::{AnnotationValue, Annotations};
use crate::core::models::ids::NodeId;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Key under which an edge's weight is exposed to an [`EdgePredicate`].
pub const RESERVED_WEIGHT_KEY: &str = "weight";

/// Boolean condition over an edge's full attribute set.
///
/// The attribute map holds the edge's annotations plus, for weighted edges,
/// the weight under [`RESERVED_WEIGHT_KEY`].
pub trait EdgePredicate {
    fn matches(&self, attributes: &Annotations) -> bool;
}

impl<F> EdgePredicate for F
where
    F: Fn(&Annotations) -> bool,
{
    fn matches(&self, attributes: &Annotations) -> bool {
        self(attributes)
    }
}

impl Network {
    /// Builds a new network from the edges satisfying `predicate`.
    #[instrument(level = "debug", skip_all)]
    pub fn filtered_network(&self, predicate: &impl EdgePredicate) -> Network {
        self.rebuild_with(|network, a, b| {
            let mut attributes = network.edge_annotations(a, b);
            let weight = network.edge_weight(a, b);
            if !weight.is_nan() {
                attributes.insert(
                    RESERVED_WEIGHT_KEY.to_string(),
                    AnnotationValue::from(weight),
                );
            }
            predicate.matches(&attributes)
        })
    }

    /// Keeps edges touching `proteins`.
    ///
    /// With `full_coverage` both endpoints must be in the set, otherwise one suffices.
    pub fn restrict_to_proteins(&self, proteins: &HashSet<NodeId>, full_coverage: bool) -> Network {
        self.rebuild_with(|_, a, b| {
            let (has_a, has_b) = (proteins.contains(&a), proteins.contains(&b));
            if full_coverage { has_a && has_b } else { has_a || has_b }
        })
    }

    /// Keeps weighted edges with `weight >= threshold` (`keep_above`) or
    /// `weight <= threshold`. Unweighted edges are always dropped.
    pub fn cut_off_network(&self, threshold: f32, keep_above: bool) -> Network {
        self.rebuild_with(|network, a, b| {
            let weight = network.edge_weight(a, b);
            if weight.is_nan() {
                return false;
            }
            if keep_above { weight >= threshold } else { weight <= threshold }
        })
    }

    fn rebuild_with(&self, mut keep: impl FnMut(&Network, NodeId, NodeId) -> bool) -> Network {
        let mut result = self.empty_like();
        for (a, b) in self.canonical_pairs() {
            if keep(self, a, b) {
                self.copy_edge_into(&mut result, a, b);
            }
        }
        debug!(
            "Rebuilt network keeps {} of {} edges.",
            result.edge_count(),
            self.edge_count()
        );
        result
    }
}
