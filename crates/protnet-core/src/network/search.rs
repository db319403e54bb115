use super::graph::Network;
use crate::core::models::ids::NodeId;
use std::collections::VecDeque;
use tracing::{instrument, trace};

/// Visitor invoked once per visited node, in visitation order.
///
/// Returning `false` stops the traversal.
pub trait SearchCallback {
    fn visit(&mut self, node: NodeId) -> bool;
}

impl<F> SearchCallback for F
where
    F: FnMut(NodeId) -> bool,
{
    fn visit(&mut self, node: NodeId) -> bool {
        self(node)
    }
}

/// Which end of the frontier the next node is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Last in, first out: depth-first.
    Stack,
    /// First in, first out: breadth-first.
    Queue,
}

impl Network {
    /// Depth-first traversal from `start`. See [`traverse`](Self::traverse).
    pub fn depth_first_search(&self, start: NodeId, callback: &mut impl SearchCallback) -> usize {
        self.traverse(start, TraversalOrder::Stack, callback)
    }

    /// Breadth-first traversal from `start`. See [`traverse`](Self::traverse).
    pub fn breadth_first_search(&self, start: NodeId, callback: &mut impl SearchCallback) -> usize {
        self.traverse(start, TraversalOrder::Queue, callback)
    }

    /// Visits every node reachable from `start` exactly once.
    ///
    /// Undirected networks are walked along all partners; directed networks
    /// along outgoing edges only. Partners are expanded in ascending id order.
    /// `start` itself is always visited, even when it has no edges.
    ///
    /// # Return
    ///
    /// The number of nodes handed to the callback.
    #[instrument(level = "debug", skip(self, callback))]
    pub fn traverse(
        &self,
        start: NodeId,
        order: TraversalOrder,
        callback: &mut impl SearchCallback,
    ) -> usize {
        let bound = self.max_protein().map_or(0, |max| max as usize + 1);
        if start as usize >= bound {
            // Above every known node, so `start` has no edges.
            callback.visit(start);
            return 1;
        }
        let mut visited = vec![false; bound];
        let mut frontier = VecDeque::from([start]);
        let mut visit_count = 0;

        loop {
            let next = match order {
                TraversalOrder::Stack => frontier.pop_back(),
                TraversalOrder::Queue => frontier.pop_front(),
            };
            let Some(node) = next else { break };
            if visited[node as usize] {
                continue;
            }
            visited[node as usize] = true;
            visit_count += 1;

            if !callback.visit(node) {
                trace!("Traversal stopped by callback at node {}", node);
                break;
            }

            let successors = self.successors(node);
            let unvisited = |n: &&NodeId| !visited[**n as usize];
            match order {
                // Reversed so the smallest partner is popped first.
                TraversalOrder::Stack => frontier.extend(successors.iter().rev().filter(unvisited)),
                TraversalOrder::Queue => frontier.extend(successors.iter().filter(unvisited)),
            }
        }

        visit_count
    }

    /// Partitions the nodes into weakly connected components.
    ///
    /// Components are sorted internally and ordered by their smallest node.
    pub fn connected_components(&self) -> Vec<Vec<NodeId>> {
        let bound = self.max_protein().map_or(0, |max| max as usize + 1);
        let mut assigned = vec![false; bound];
        let mut components = Vec::new();

        for &seed in self.protein_set() {
            if assigned[seed as usize] {
                continue;
            }
            assigned[seed as usize] = true;
            let mut component = vec![seed];
            let mut queue = VecDeque::from([seed]);
            while let Some(node) = queue.pop_front() {
                for &partner in self.partners.partners_slice(node) {
                    if !assigned[partner as usize] {
                        assigned[partner as usize] = true;
                        component.push(partner);
                        queue.push_back(partner);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }

        components
    }
}
