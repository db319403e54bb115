use super::config::RewiringConfig;
use super::error::NetworkError;
use super::graph::Network;
use crate::core::models::annotation::Annotations;
use crate::core::models::ids::NodeId;
use rand::{Rng, thread_rng};
use tracing::{debug, instrument, warn};

/// Weight and annotations lifted off an edge while it is being moved.
struct EdgePayload {
    weight: f32,
    annotations: Option<Annotations>,
}

impl Network {
    /// Degree-preserving randomization by double edge swaps.
    ///
    /// Two distinct edges `(a, b)` and `(c, d)` are drawn uniformly; undirected
    /// edges are randomly reoriented. The draw is rejected unless all four
    /// endpoints differ and neither `a`/`d` nor `c`/`b` are linked yet. Accepted
    /// draws replace the pair by `(a, d)` and `(c, b)`, each carrying the
    /// payload of the edge it replaces.
    ///
    /// `count` defaults to ten swaps per edge. The loop has no attempt bound;
    /// use [`randomize_with`](Self::randomize_with) to set one.
    ///
    /// # Return
    ///
    /// The number of successful swaps.
    pub fn randomize_by_rewiring(&mut self, count: Option<usize>, rng: &mut impl Rng) -> usize {
        let config = RewiringConfig::default();
        let count = count.unwrap_or(config.swaps_per_edge * self.edge_count());
        self.rewire(count, None, rng)
    }

    /// Rewires `swaps_per_edge * edge_count` times, giving up after
    /// `max_attempts` draws when set.
    pub fn randomize_with(&mut self, config: &RewiringConfig, rng: &mut impl Rng) -> usize {
        let count = config.swaps_per_edge * self.edge_count();
        self.rewire(count, config.max_attempts, rng)
    }

    /// [`randomize_by_rewiring`](Self::randomize_by_rewiring) with default count
    /// and the thread-local generator.
    pub fn randomize(&mut self) -> usize {
        self.randomize_by_rewiring(None, &mut thread_rng())
    }

    #[instrument(level = "debug", skip(self, rng), fields(edges = self.edge_count()))]
    fn rewire(&mut self, count: usize, max_attempts: Option<usize>, rng: &mut impl Rng) -> usize {
        let mut edges: Vec<(NodeId, NodeId)> = self.canonical_pairs().collect();
        if edges.len() < 2 {
            warn!(
                "Cannot rewire a network with {} edge(s); at least two are required.",
                edges.len()
            );
            return 0;
        }

        let mut swaps = 0;
        let mut attempts = 0;
        while swaps < count {
            if max_attempts.is_some_and(|max| attempts >= max) {
                warn!(
                    "Rewiring stopped after {} attempts with {} of {} swaps done.",
                    attempts, swaps, count
                );
                break;
            }
            attempts += 1;

            let i = rng.gen_range(0..edges.len());
            let j = rng.gen_range(0..edges.len());
            if i == j {
                continue;
            }
            let (a, b) = self.orient(edges[i], rng);
            let (c, d) = self.orient(edges[j], rng);
            if !self.can_swap(a, b, c, d) {
                continue;
            }

            let first = self.take_payload(a, b);
            let second = self.take_payload(c, d);
            self.put_payload(a, d, first);
            self.put_payload(c, b, second);
            edges[i] = (a, d);
            edges[j] = (c, b);
            swaps += 1;
        }

        debug!("Completed {} swaps in {} attempts.", swaps, attempts);
        swaps
    }

    fn orient(&self, (a, b): (NodeId, NodeId), rng: &mut impl Rng) -> (NodeId, NodeId) {
        if !self.is_directed() && rng.gen_bool(0.5) {
            (b, a)
        } else {
            (a, b)
        }
    }

    fn can_swap(&self, a: NodeId, b: NodeId, c: NodeId, d: NodeId) -> bool {
        let distinct = a != b && a != c && a != d && b != c && b != d && c != d;
        if !distinct || self.are_linked(a, d) || self.are_linked(c, b) {
            return false;
        }
        // A reciprocal edge keeps the old link alive, which would change degrees.
        !self.is_directed() || (!self.has_payload(b, a) && !self.has_payload(d, c))
    }

    fn take_payload(&mut self, a: NodeId, b: NodeId) -> EdgePayload {
        let payload = EdgePayload {
            weight: self.edge_weight(a, b),
            annotations: self.annotations.get_all(a, b).cloned(),
        };
        self.delete_edge(a, b);
        payload
    }

    fn put_payload(&mut self, a: NodeId, b: NodeId, payload: EdgePayload) {
        if !payload.weight.is_nan() {
            self.store_weight(a, b, payload.weight);
        }
        if let Some(annotations) = payload.annotations {
            self.set_edge_annotations(a, b, annotations);
        }
    }

    /// Uniform random network with exactly `edge_count` edges over nodes
    /// `0..node_count`, weights drawn from `[0, 1)`. Self-loops are never drawn.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidArgument`] if `edge_count` exceeds the
    /// number of distinct node pairs, or `node_count` does not fit a [`NodeId`].
    #[instrument(level = "debug", skip(rng))]
    pub fn random_network(
        node_count: usize,
        edge_count: usize,
        directed: bool,
        rng: &mut impl Rng,
    ) -> Result<Network, NetworkError> {
        let bound = NodeId::try_from(node_count).map_err(|_| {
            NetworkError::InvalidArgument(format!("{node_count} nodes exceed the id range"))
        })?;
        let ordered_pairs = node_count.saturating_mul(node_count.saturating_sub(1));
        let capacity = if directed { ordered_pairs } else { ordered_pairs / 2 };
        if edge_count > capacity {
            return Err(NetworkError::InvalidArgument(format!(
                "{edge_count} edges requested but only {capacity} pairs exist among {node_count} nodes"
            )));
        }

        let mut network = Network::new(directed);
        while network.edge_count() < edge_count {
            let a = rng.gen_range(0..bound);
            let b = rng.gen_range(0..bound);
            if a == b || network.has_edge(a, b) {
                continue;
            }
            network.store_weight(a, b, rng.r#gen::<f32>());
        }
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::annotation::AnnotationValue;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn create_ring(size: NodeId, directed: bool) -> Network {
        let mut network = Network::new(directed);
        for node in 0..size {
            network.set_edge(node, (node + 1) % size, node as f32).unwrap();
            network.set_edge(node, (node + 3) % size, 0.5).unwrap();
        }
        network
    }

    fn degrees(network: &Network) -> Vec<usize> {
        network.proteins().into_iter().map(|n| network.degree(n)).collect()
    }

    fn recount(network: &Network) -> usize {
        network.canonical_pairs().count()
    }

    mod rewiring {
        use super::*;

        #[test]
        fn preserves_degrees_and_edge_count() {
            let mut network = create_ring(12, false);
            let before_degrees = degrees(&network);
            let before_edges = network.edge_count();

            let mut rng = StdRng::seed_from_u64(7);
            let swaps = network.randomize_by_rewiring(Some(50), &mut rng);

            assert_eq!(swaps, 50);
            assert_eq!(degrees(&network), before_degrees);
            assert_eq!(network.edge_count(), before_edges);
            assert_eq!(recount(&network), before_edges);
        }

        #[test]
        fn preserves_degrees_on_directed_networks() {
            let mut network = create_ring(12, true);
            let before_degrees = degrees(&network);
            let before_edges = network.edge_count();

            let mut rng = StdRng::seed_from_u64(11);
            network.randomize_by_rewiring(Some(30), &mut rng);

            assert_eq!(degrees(&network), before_degrees);
            assert_eq!(network.edge_count(), before_edges);
        }

        #[test]
        fn moved_edges_keep_their_payload() {
            let mut network = Network::new_undirected();
            network.set_edge(1, 2, 0.25).unwrap();
            network.set_edge_annotation(1, 2, "method", "tap");
            network.set_edge(3, 4, 0.75).unwrap();

            let mut rng = StdRng::seed_from_u64(3);
            assert_eq!(network.randomize_by_rewiring(Some(1), &mut rng), 1);

            let mut weights: Vec<f32> = network.iter().map(|e| e.weight).collect();
            weights.sort_by(f32::total_cmp);
            assert_eq!(weights, vec![0.25, 0.75]);

            let tagged: Vec<_> = network
                .iter()
                .filter(|e| e.annotation("method") == Some(&AnnotationValue::from("tap")))
                .collect();
            assert_eq!(tagged.len(), 1);
            assert_eq!(tagged[0].weight, 0.25);
            assert!(!network.has_edge(1, 2));
            assert!(!network.has_edge(3, 4));
        }

        #[test]
        fn same_seed_gives_same_result() {
            let mut first = create_ring(10, false);
            let mut second = create_ring(10, false);
            first.randomize_by_rewiring(Some(20), &mut StdRng::seed_from_u64(42));
            second.randomize_by_rewiring(Some(20), &mut StdRng::seed_from_u64(42));
            assert_eq!(first.edges_array(), second.edges_array());
        }

        #[test]
        fn fewer_than_two_edges_is_a_no_op() {
            let mut network = Network::new_undirected();
            network.set_edge(1, 2, 1.0).unwrap();
            let mut rng = StdRng::seed_from_u64(1);
            assert_eq!(network.randomize_by_rewiring(Some(5), &mut rng), 0);
            assert!(network.has_edge(1, 2));
        }

        #[test]
        fn max_attempts_bounds_impossible_requests() {
            // A triangle has no valid swap: every pair of edges shares a node.
            let mut network = Network::new_undirected();
            for (a, b) in [(1, 2), (2, 3), (1, 3)] {
                network.set_edge(a, b, 1.0).unwrap();
            }
            let config = RewiringConfig::default().with_max_attempts(200);
            let swaps = network.randomize_with(&config, &mut StdRng::seed_from_u64(5));
            assert_eq!(swaps, 0);
            assert_eq!(network.edges_array(), vec![(1, 2), (1, 3), (2, 3)]);
        }

        #[test]
        fn default_count_is_ten_swaps_per_edge() {
            let mut network = create_ring(16, false);
            let expected = 10 * network.edge_count();
            let swaps = network.randomize_by_rewiring(None, &mut StdRng::seed_from_u64(9));
            assert_eq!(swaps, expected);
        }
    }

    mod random_network {
        use super::*;

        #[test]
        fn has_requested_size_and_unit_weights() {
            let mut rng = StdRng::seed_from_u64(21);
            let network = Network::random_network(20, 40, false, &mut rng).unwrap();
            assert_eq!(network.edge_count(), 40);
            assert!(network.proteins().iter().all(|&n| n < 20));
            assert!(network.iter().all(|e| (0.0..1.0).contains(&e.weight)));
            assert!(network.iter().all(|e| !e.is_self_loop()));
        }

        #[test]
        fn complete_graph_is_reachable() {
            let mut rng = StdRng::seed_from_u64(2);
            let network = Network::random_network(5, 20, true, &mut rng).unwrap();
            assert_eq!(network.edge_count(), 20);
            assert!(network.is_directed());
        }

        #[test]
        fn rejects_too_many_edges() {
            let mut rng = StdRng::seed_from_u64(2);
            let result = Network::random_network(4, 7, false, &mut rng);
            assert!(matches!(result, Err(NetworkError::InvalidArgument(_))));
        }
    }
}
