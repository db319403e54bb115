use super::error::NetworkError;
use super::iter::{EdgeIter, EdgePairs};
use crate::core::models::annotation::{AnnotationValue, Annotations};
use crate::core::models::edge::Edge;
use crate::core::models::ids::NodeId;
use crate::core::storage::annotations::AnnotationMatrix;
use crate::core::storage::partners::PartnerIndex;
use crate::core::storage::weights::WeightMatrix;
use std::collections::BTreeSet;
use tracing::warn;

/// A sparse network of pairwise protein relationships.
///
/// Each edge may carry a numeric weight, a set of typed annotations, or both.
/// Directedness is fixed at construction. In an undirected network `(a, b)` and
/// `(b, a)` are the same edge; in a directed network they are independent.
///
/// Internally the network keeps three stores in step:
///
/// - a [`PartnerIndex`] that records, symmetrically, that *some* relationship
///   exists between two nodes;
/// - a [`WeightMatrix`] and an [`AnnotationMatrix`] that hold the payload and
///   honor directedness.
///
/// Nodes are not created explicitly; a node exists once it is an endpoint of a
/// stored edge.
#[derive(Debug, Clone)]
pub struct Network {
    directed: bool,
    pub(super) partners: PartnerIndex,
    pub(super) weights: WeightMatrix,
    pub(super) annotations: AnnotationMatrix,
    proteins: BTreeSet<NodeId>,
    edge_count: usize,
    iterate_edges_twice: bool,
}

impl Default for Network {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Network {
    /// Creates an empty network.
    ///
    /// # Arguments
    ///
    /// * `directed` - Whether `(a, b)` and `(b, a)` are distinct edges.
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            partners: PartnerIndex::new(),
            weights: WeightMatrix::new(!directed),
            annotations: AnnotationMatrix::new(!directed),
            proteins: BTreeSet::new(),
            edge_count: 0,
            iterate_edges_twice: false,
        }
    }

    pub fn new_undirected() -> Self {
        Self::new(false)
    }

    pub fn new_directed() -> Self {
        Self::new(true)
    }

    /// Creates an empty network with the same directedness and iteration mode.
    pub(crate) fn empty_like(&self) -> Self {
        let mut network = Self::new(self.directed);
        network.iterate_edges_twice = self.iterate_edges_twice;
        network
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn node_count(&self) -> usize {
        self.proteins.len()
    }

    /// Every node that has been an endpoint of an edge, ascending.
    pub fn proteins(&self) -> Vec<NodeId> {
        self.proteins.iter().copied().collect()
    }

    pub fn contains_protein(&self, node: NodeId) -> bool {
        self.proteins.contains(&node)
    }

    pub(crate) fn protein_set(&self) -> &BTreeSet<NodeId> {
        &self.proteins
    }

    pub(crate) fn max_protein(&self) -> Option<NodeId> {
        self.proteins.last().copied()
    }

    /// Whether undirected edges are reported once per endpoint during iteration.
    pub fn iterate_edges_twice(&self) -> bool {
        self.iterate_edges_twice
    }

    /// Makes iteration and [`edges_array`](Self::edges_array) report each
    /// undirected edge once per endpoint. Has no effect on directed networks.
    pub fn set_iterate_edges_twice(&mut self, twice: bool) {
        self.iterate_edges_twice = twice;
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Sets the weight of edge `(a, b)`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidValue`] if `weight` is `NaN`, which is
    /// reserved to mean "no weight".
    pub fn set_edge(&mut self, a: NodeId, b: NodeId, weight: f32) -> Result<(), NetworkError> {
        if weight.is_nan() {
            return Err(NetworkError::InvalidValue(format!(
                "edge ({a}, {b}) cannot be assigned a NaN weight"
            )));
        }
        self.store_weight(a, b, weight);
        Ok(())
    }

    /// Adds `delta` to the weight of `(a, b)`, creating the edge if needed.
    ///
    /// # Return
    ///
    /// The resulting weight.
    pub fn add_to_edge(&mut self, a: NodeId, b: NodeId, delta: f32) -> Result<f32, NetworkError> {
        if delta.is_nan() {
            return Err(NetworkError::InvalidValue(format!(
                "cannot add NaN to the weight of edge ({a}, {b})"
            )));
        }
        let current = self.weights.get(a, b);
        if !current.is_nan() && (current + delta).is_nan() {
            return Err(NetworkError::InvalidValue(format!(
                "adding {delta} to weight {current} of edge ({a}, {b}) yields NaN"
            )));
        }
        let existed = self.has_payload(a, b);
        self.partners.set(a, b);
        let result = self.weights.add(a, b, delta);
        self.register(a, b);
        self.track_existence(existed, true);
        Ok(result)
    }

    /// Sets one annotation on edge `(a, b)`, creating the edge if needed.
    pub fn set_edge_annotation(
        &mut self,
        a: NodeId,
        b: NodeId,
        key: &str,
        value: impl Into<AnnotationValue>,
    ) {
        let existed = self.has_payload(a, b);
        self.partners.set(a, b);
        self.annotations.add(a, b, key, value.into());
        self.register(a, b);
        self.track_existence(existed, true);
    }

    /// Validates `items` as a list annotation and stores it on `(a, b)`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidType`] if an item is itself a list.
    pub fn set_edge_annotation_list(
        &mut self,
        a: NodeId,
        b: NodeId,
        key: &str,
        items: Vec<AnnotationValue>,
    ) -> Result<(), NetworkError> {
        let value = AnnotationValue::list(items)?;
        self.set_edge_annotation(a, b, key, value);
        Ok(())
    }

    /// Sets a batch of annotations on `(a, b)` in one step.
    ///
    /// An empty batch leaves the network untouched.
    pub fn set_edge_annotations<K, I>(&mut self, a: NodeId, b: NodeId, entries: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AnnotationValue)>,
    {
        let mut entries = entries.into_iter().peekable();
        if entries.peek().is_none() {
            return;
        }
        let existed = self.has_payload(a, b);
        self.partners.set(a, b);
        self.annotations.add_all(a, b, entries);
        self.register(a, b);
        self.track_existence(existed, true);
    }

    /// Removes one annotation key from `(a, b)`.
    ///
    /// The edge disappears entirely if this was its last payload.
    pub fn remove_edge_annotation(
        &mut self,
        a: NodeId,
        b: NodeId,
        key: &str,
    ) -> Option<AnnotationValue> {
        let removed = self.annotations.remove_single(a, b, key)?;
        if !self.has_payload(a, b) {
            self.unlink(a, b);
            self.track_existence(true, false);
        }
        Some(removed)
    }

    /// Removes the weight and all annotations of `(a, b)`.
    ///
    /// # Return
    ///
    /// `true` if the edge existed.
    pub fn delete_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        let had_weight = self.weights.delete(a, b);
        let had_annotations = self.annotations.delete(a, b);
        let removed = had_weight || had_annotations;
        if removed {
            self.unlink(a, b);
            self.track_existence(true, false);
        }
        removed
    }

    /// Multiplies every stored weight by `factor`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidValue`] for a non-finite factor, or when
    /// any product would be `NaN` (an infinite weight scaled by zero). Weights
    /// are left untouched on error.
    pub fn scalar_multiplication(&mut self, factor: f32) -> Result<(), NetworkError> {
        if !factor.is_finite() {
            return Err(NetworkError::InvalidValue(format!(
                "scaling factor must be finite, got {factor}"
            )));
        }
        if !self.weights.scale(factor) {
            return Err(NetworkError::InvalidValue(format!(
                "scaling by {factor} would turn an infinite weight into NaN"
            )));
        }
        Ok(())
    }

    /// Weight write without the sentinel check, for values known not to be `NaN`.
    pub(crate) fn store_weight(&mut self, a: NodeId, b: NodeId, weight: f32) {
        let existed = self.has_payload(a, b);
        self.partners.set(a, b);
        self.weights.set(a, b, weight);
        self.register(a, b);
        self.track_existence(existed, true);
    }

    /// Drops the adjacency link after `(a, b)` lost its payload.
    ///
    /// In a directed network the link survives while `(b, a)` still carries payload.
    fn unlink(&mut self, a: NodeId, b: NodeId) {
        if self.directed && self.has_payload(b, a) {
            return;
        }
        self.partners.delete(a, b, true);
    }

    /// The single place where the edge counter changes.
    fn track_existence(&mut self, existed: bool, exists: bool) {
        match (existed, exists) {
            (false, true) => self.edge_count += 1,
            (true, false) => self.edge_count -= 1,
            _ => {}
        }
    }

    fn register(&mut self, a: NodeId, b: NodeId) {
        self.proteins.insert(a);
        self.proteins.insert(b);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub(crate) fn has_payload(&self, a: NodeId, b: NodeId) -> bool {
        self.weights.contains(a, b) || self.annotations.contains(a, b)
    }

    /// Whether edge `(a, b)` carries a weight, an annotation or both.
    ///
    /// Always symmetric for undirected networks.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.has_payload(a, b)
    }

    /// Whether any relationship exists between `a` and `b`, in either direction.
    pub fn are_linked(&self, a: NodeId, b: NodeId) -> bool {
        self.partners.get(a, b)
    }

    /// Weight of `(a, b)`, `NaN` when no weight has been set.
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> f32 {
        self.weights.get(a, b)
    }

    pub fn edge_annotation(&self, a: NodeId, b: NodeId, key: &str) -> Option<&AnnotationValue> {
        self.annotations.get(a, b, key)
    }

    /// Copy of the annotations of `(a, b)`; empty when there are none.
    pub fn edge_annotations(&self, a: NodeId, b: NodeId) -> Annotations {
        self.annotations.get_all(a, b).cloned().unwrap_or_default()
    }

    /// Snapshot of edge `(a, b)`, if it exists.
    pub fn edge(&self, a: NodeId, b: NodeId) -> Option<Edge> {
        self.has_payload(a, b).then(|| self.snapshot(a, b))
    }

    pub(crate) fn snapshot(&self, source: NodeId, target: NodeId) -> Edge {
        Edge::new(
            source,
            target,
            self.weights.get(source, target),
            self.edge_annotations(source, target),
        )
    }

    /// All nodes linked to `node` in either direction, ascending.
    pub fn neighbor_array(&self, node: NodeId) -> Vec<NodeId> {
        self.partners.partners(node)
    }

    /// Number of distinct nodes linked to `node`.
    pub fn degree(&self, node: NodeId) -> usize {
        self.partners.degree(node)
    }

    /// Edges touching `node`.
    ///
    /// In an undirected network every edge has `node` as its source. In a
    /// directed network both outgoing and incoming edges are reported with
    /// their real orientation.
    pub fn neighbors(&self, node: NodeId) -> Vec<Edge> {
        let mut edges = Vec::new();
        for &partner in self.partners.partners_slice(node) {
            if !self.directed {
                edges.push(self.snapshot(node, partner));
                continue;
            }
            if self.has_payload(node, partner) {
                edges.push(self.snapshot(node, partner));
            }
            if partner != node && self.has_payload(partner, node) {
                edges.push(self.snapshot(partner, node));
            }
        }
        edges
    }

    /// Outgoing (`from_node = true`) or incoming edges of `node`.
    ///
    /// On an undirected network this behaves like [`neighbors`](Self::neighbors).
    pub fn directed_neighbors(&self, node: NodeId, from_node: bool) -> Vec<Edge> {
        if !self.directed {
            warn!(
                "Directed neighbor query for node {} on an undirected network; returning all neighbors.",
                node
            );
            return self.neighbors(node);
        }
        self.partners
            .partners_slice(node)
            .iter()
            .filter_map(|&partner| {
                let (source, target) = if from_node {
                    (node, partner)
                } else {
                    (partner, node)
                };
                self.has_payload(source, target)
                    .then(|| self.snapshot(source, target))
            })
            .collect()
    }

    /// Nodes reachable over one outgoing edge (all partners when undirected).
    pub(crate) fn successors(&self, node: NodeId) -> Vec<NodeId> {
        let partners = self.partners.partners_slice(node);
        if !self.directed {
            return partners.to_vec();
        }
        partners
            .iter()
            .copied()
            .filter(|&partner| self.has_payload(node, partner))
            .collect()
    }

    /// Every edge as a `(source, target)` pair.
    ///
    /// Undirected edges appear once with the smaller id first, or in both
    /// orientations when [`iterate_edges_twice`](Self::iterate_edges_twice) is
    /// set. Directed edges appear once per stored direction.
    pub fn edges_array(&self) -> Vec<(NodeId, NodeId)> {
        EdgePairs::new(self, self.iterate_edges_twice).collect()
    }

    /// Pairs in canonical order, one per stored edge, ignoring the iteration mode.
    pub(crate) fn canonical_pairs(&self) -> EdgePairs<'_> {
        EdgePairs::new(self, false)
    }

    /// Lazily iterates edge snapshots.
    pub fn iter(&self) -> EdgeIter<'_> {
        EdgeIter::new(EdgePairs::new(self, self.iterate_edges_twice))
    }

    /// Sorted set of annotation keys used by any edge.
    pub fn annotation_keys(&self) -> BTreeSet<String> {
        self.annotations.keys()
    }

    /// A compacted deep copy containing only the live edges.
    pub fn copy(&self) -> Network {
        let mut copy = self.empty_like();
        for (a, b) in self.canonical_pairs() {
            self.copy_edge_into(&mut copy, a, b);
        }
        copy
    }

    /// Copies the payload of `(a, b)` into `target` under the same ids.
    pub(crate) fn copy_edge_into(&self, target: &mut Network, a: NodeId, b: NodeId) {
        let weight = self.weights.get(a, b);
        if !weight.is_nan() {
            target.store_weight(a, b, weight);
        }
        if let Some(annotations) = self.annotations.get_all(a, b) {
            target.set_edge_annotations(a, b, annotations.clone());
        }
    }
}

impl<'a> IntoIterator for &'a Network {
    type Item = Edge;
    type IntoIter = EdgeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
