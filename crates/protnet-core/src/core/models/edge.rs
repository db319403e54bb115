use super::annotation::{AnnotationValue, Annotations};
use super::ids::NodeId;

/// A detached snapshot of one edge.
///
/// Edges are produced by neighbor queries and iteration. They own copies of
/// the weight and annotations, so later mutation of the network does not
/// affect them.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// Stored weight, `NaN` when the edge carries no numeric weight.
    pub weight: f32,
    pub annotations: Annotations,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId, weight: f32, annotations: Annotations) -> Self {
        Self {
            source,
            target,
            weight,
            annotations,
        }
    }

    pub fn has_weight(&self) -> bool {
        !self.weight.is_nan()
    }

    /// Returns the weight, or `None` for unweighted edges.
    pub fn weight(&self) -> Option<f32> {
        self.has_weight().then_some(self.weight)
    }

    pub fn annotation(&self, key: &str) -> Option<&AnnotationValue> {
        self.annotations.get(key)
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Returns the endpoint opposite to `node`, if `node` is an endpoint at all.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.source {
            Some(self.target)
        } else if node == self.target {
            Some(self.source)
        } else {
            None
        }
    }
}
