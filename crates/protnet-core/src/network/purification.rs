use super::error::NetworkError;
use super::graph::Network;
use crate::core::models::ids::NodeId;
use std::collections::BTreeMap;
use tracing::debug;

/// One pull-down: a bait protein and the preys co-purified with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurificationExperiment {
    pub bait: NodeId,
    pub preys: Vec<NodeId>,
}

/// Ordered list of purification experiments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurificationData {
    experiments: Vec<PurificationExperiment>,
}

impl PurificationData {
    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PurificationExperiment> {
        self.experiments.iter()
    }

    /// Bait of every experiment, in experiment order. Repeats when unpooled.
    pub fn baits(&self) -> Vec<NodeId> {
        self.experiments.iter().map(|e| e.bait).collect()
    }
}

impl<'a> IntoIterator for &'a PurificationData {
    type Item = &'a PurificationExperiment;
    type IntoIter = std::slice::Iter<'a, PurificationExperiment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Network {
    /// Reads every directed edge as a bait → prey observation.
    ///
    /// With `pool_baits` each source node yields one experiment holding all of
    /// its targets; otherwise every edge is its own single-prey experiment.
    /// Experiments are ordered by bait, preys ascending.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidState`] on an undirected network, where
    /// edges have no bait side.
    pub fn derive_purification_data(&self, pool_baits: bool) -> Result<PurificationData, NetworkError> {
        if !self.is_directed() {
            return Err(NetworkError::InvalidState(
                "purification data requires a directed network".to_string(),
            ));
        }

        let experiments: Vec<PurificationExperiment> = if pool_baits {
            let mut pooled: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
            for (bait, prey) in self.canonical_pairs() {
                pooled.entry(bait).or_default().push(prey);
            }
            pooled
                .into_iter()
                .map(|(bait, preys)| PurificationExperiment { bait, preys })
                .collect()
        } else {
            self.canonical_pairs()
                .map(|(bait, prey)| PurificationExperiment { bait, preys: vec![prey] })
                .collect()
        };

        debug!(
            "Derived {} purification experiments from {} edges (pooled: {}).",
            experiments.len(),
            self.edge_count(),
            pool_baits
        );
        Ok(PurificationData { experiments })
    }
}
