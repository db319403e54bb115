use super::config::{CombinationRules, CombinationType, WeightMergePolicy};
use super::error::NetworkError;
use super::graph::Network;
use crate::core::models::annotation::{Annotations, merge_annotations};
use crate::core::models::ids::{NodeId, canonical_pair};
use crate::core::registry::NodeRegistry;
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use tracing::{debug, instrument};

/// Old-to-new id translation produced by node merging.
#[derive(Debug, Default)]
struct NodeMapping {
    redirects: HashMap<NodeId, NodeId>,
    merged: BTreeSet<NodeId>,
}

impl NodeMapping {
    fn resolve(&self, id: NodeId) -> NodeId {
        self.redirects.get(&id).copied().unwrap_or(id)
    }

    fn is_absorbed(&self, id: NodeId) -> bool {
        self.redirects.contains_key(&id)
    }
}

/// Payload one input contributes to an output pair.
#[derive(Debug, Default)]
struct SidePayload {
    weight_sum: f32,
    weight_count: u32,
    annotations: Annotations,
}

impl SidePayload {
    fn absorb(&mut self, weight: f32, annotations: Option<&Annotations>) {
        if !weight.is_nan() {
            self.weight_sum += weight;
            self.weight_count += 1;
        }
        if let Some(annotations) = annotations {
            merge_annotations(&mut self.annotations, annotations);
        }
    }

    fn weight(&self, policy: WeightMergePolicy) -> Option<f32> {
        if self.weight_count == 0 {
            return None;
        }
        Some(match policy {
            WeightMergePolicy::Add => self.weight_sum,
            WeightMergePolicy::Average | WeightMergePolicy::AnnotateWithKeys => {
                self.weight_sum / self.weight_count as f32
            }
        })
    }
}

impl Network {
    /// Combines this network with `other` into a new network.
    ///
    /// The result is directed only if both inputs are. The node set is the
    /// union ([`CombinationType::Merge`]) or intersection
    /// ([`CombinationType::Intersect`]) of both inputs' nodes. Edges of both
    /// inputs are re-inserted, and payloads meeting on the same pair are
    /// combined according to the rules' [`WeightMergePolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidArgument`] if the rules carry a mapping
    /// network, which needs a registry; see
    /// [`combine_with_mapping`](Self::combine_with_mapping).
    pub fn combine_with(&self, other: &Network, rules: &CombinationRules) -> Result<Network, NetworkError> {
        if rules.mapping.is_some() {
            return Err(NetworkError::InvalidArgument(
                "node merging needs a registry, use combine_with_mapping".to_string(),
            ));
        }
        self.assemble(other, rules, NodeMapping::default())
    }

    /// [`combine_with`](Self::combine_with), merging mapped nodes first.
    ///
    /// Nodes connected through the rules' mapping network are merged into a
    /// new node registered under their joined labels; merged originals no
    /// longer appear in the result. Without a mapping the registry is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidArgument`] if the mapping network is
    /// directed, or if the registry hands out an id for a merged node that is
    /// already a node of either input outside the merged group.
    pub fn combine_with_mapping(
        &self,
        other: &Network,
        rules: &CombinationRules,
        registry: &mut impl NodeRegistry,
    ) -> Result<Network, NetworkError> {
        let mapping = match &rules.mapping {
            Some(mapping) if mapping.is_directed() => {
                return Err(NetworkError::InvalidArgument(
                    "combination mapping network must be undirected".to_string(),
                ));
            }
            Some(mapping) => self.merge_mapped_nodes(other, mapping, &rules.merge_separator, registry)?,
            None => NodeMapping::default(),
        };
        self.assemble(other, rules, mapping)
    }

    #[instrument(level = "debug", skip_all, fields(combination = ?rules.combination, policy = ?rules.weight_merge))]
    fn assemble(
        &self,
        other: &Network,
        rules: &CombinationRules,
        mapping: NodeMapping,
    ) -> Result<Network, NetworkError> {
        let directed = self.is_directed() && other.is_directed();

        let nodes_a: BTreeSet<NodeId> = self.protein_set().iter().map(|&n| mapping.resolve(n)).collect();
        let nodes_b: BTreeSet<NodeId> = other.protein_set().iter().map(|&n| mapping.resolve(n)).collect();
        let nodes: BTreeSet<NodeId> = match rules.combination {
            CombinationType::Merge => nodes_a.union(&nodes_b).copied().collect(),
            CombinationType::Intersect => nodes_a.intersection(&nodes_b).copied().collect(),
        };

        let mut pairs: BTreeMap<(NodeId, NodeId), [SidePayload; 2]> = BTreeMap::new();
        for (side, input) in [self, other].into_iter().enumerate() {
            for (a, b) in input.canonical_pairs() {
                let (new_a, new_b) = (mapping.resolve(a), mapping.resolve(b));
                // Edges inside a merged group collapse into the merged node.
                if new_a == new_b && a != b {
                    continue;
                }
                if !nodes.contains(&new_a) || !nodes.contains(&new_b) {
                    continue;
                }
                let key = if directed { (new_a, new_b) } else { canonical_pair(new_a, new_b) };
                pairs.entry(key).or_default()[side]
                    .absorb(input.edge_weight(a, b), input.annotations.get_all(a, b));
            }
        }

        let mut result = Network::new(directed);
        for ((a, b), [first, second]) in pairs {
            let weights = (first.weight(rules.weight_merge), second.weight(rules.weight_merge));
            match rules.weight_merge {
                WeightMergePolicy::Average => {
                    if let Some(weight) = match weights {
                        (Some(x), Some(y)) => Some((x + y) / 2.0),
                        (x, y) => x.or(y),
                    } {
                        result.set_edge(a, b, weight)?;
                    }
                }
                WeightMergePolicy::Add => {
                    if let Some(weight) = match weights {
                        (Some(x), Some(y)) => Some(x + y),
                        (x, y) => x.or(y),
                    } {
                        result.set_edge(a, b, weight)?;
                    }
                }
                WeightMergePolicy::AnnotateWithKeys => {}
            }

            let mut annotations = first.annotations;
            merge_annotations(&mut annotations, &second.annotations);
            result.set_edge_annotations(a, b, annotations);

            // Weight keys are written last so input annotations cannot shadow them.
            if rules.weight_merge == WeightMergePolicy::AnnotateWithKeys {
                if let Some(x) = weights.0 {
                    result.set_edge_annotation(a, b, &rules.first_weight_key, x);
                }
                if let Some(y) = weights.1 {
                    result.set_edge_annotation(a, b, &rules.second_weight_key, y);
                }
            }
        }

        debug!(
            "Combined networks of {} and {} edges into {} edges over {} nodes ({} merged).",
            self.edge_count(),
            other.edge_count(),
            result.edge_count(),
            nodes.len(),
            mapping.merged.len()
        );
        Ok(result)
    }

    /// Merges every group of nodes that the mapping connects across both inputs.
    ///
    /// Groups are seeded from nodes present in both the mapping and `self`,
    /// and grown transitively over mapping edges through nodes of either input.
    fn merge_mapped_nodes(
        &self,
        other: &Network,
        mapping: &Network,
        separator: &str,
        registry: &mut impl NodeRegistry,
    ) -> Result<NodeMapping, NetworkError> {
        let in_inputs = |n: NodeId| self.contains_protein(n) || other.contains_protein(n);
        let mut result = NodeMapping::default();

        for &seed in mapping.protein_set() {
            if !self.contains_protein(seed) || result.is_absorbed(seed) {
                continue;
            }

            let mut involved = BTreeSet::from([seed]);
            let mut queue = VecDeque::from([seed]);
            while let Some(node) = queue.pop_front() {
                for &partner in mapping.partners.partners_slice(node) {
                    if in_inputs(partner) && involved.insert(partner) {
                        queue.push_back(partner);
                    }
                }
            }
            if involved.len() < 2 {
                continue;
            }

            let label = involved
                .iter()
                .map(|&id| registry.label(id).unwrap_or_else(|| id.to_string()))
                .join(separator);
            let merged_id = registry.register(&label);
            if in_inputs(merged_id) && !involved.contains(&merged_id) {
                return Err(NetworkError::InvalidArgument(format!(
                    "merged node '{label}' was registered as {merged_id}, which is already a node of the inputs"
                )));
            }

            let mut merged_annotations = Annotations::new();
            for &id in &involved {
                merge_annotations(&mut merged_annotations, &registry.node_annotations(id));
            }
            for (key, value) in merged_annotations {
                registry.set_node_annotation(merged_id, &key, value);
            }

            debug!("Merged {} mapped nodes into '{}' ({}).", involved.len(), label, merged_id);
            for id in involved {
                result.redirects.insert(id, merged_id);
            }
            result.merged.insert(merged_id);
        }

        Ok(result)
    }
}
