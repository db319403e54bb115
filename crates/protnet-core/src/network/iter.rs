use super::graph::Network;
use crate::core::models::edge::Edge;
use crate::core::models::ids::NodeId;

/// Single-pass walk over the stored edges as `(source, target)` pairs.
///
/// Roots are the nodes that had at least one partner when the walk started;
/// each root's partner row is scanned in ascending order.
pub struct EdgePairs<'a> {
    network: &'a Network,
    twice: bool,
    roots: std::vec::IntoIter<NodeId>,
    current: Option<(NodeId, &'a [NodeId])>,
    position: usize,
}

impl<'a> EdgePairs<'a> {
    pub(crate) fn new(network: &'a Network, twice: bool) -> Self {
        Self {
            network,
            twice,
            roots: network.partners.first_partners().into_iter(),
            current: None,
            position: 0,
        }
    }

    fn emits(&self, source: NodeId, target: NodeId) -> bool {
        if self.network.is_directed() {
            self.network.has_payload(source, target)
        } else {
            self.twice || source <= target
        }
    }
}

impl Iterator for EdgePairs<'_> {
    type Item = (NodeId, NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((source, partners)) = self.current {
                while let Some(&target) = partners.get(self.position) {
                    self.position += 1;
                    if self.emits(source, target) {
                        return Some((source, target));
                    }
                }
            }
            let root = self.roots.next()?;
            self.current = Some((root, self.network.partners.partners_slice(root)));
            self.position = 0;
        }
    }
}

/// Lazy iterator of [`Edge`] snapshots, see [`Network::iter`].
pub struct EdgeIter<'a> {
    pairs: EdgePairs<'a>,
}

impl<'a> EdgeIter<'a> {
    pub(crate) fn new(pairs: EdgePairs<'a>) -> Self {
        Self { pairs }
    }
}

impl Iterator for EdgeIter<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        let (source, target) = self.pairs.next()?;
        Some(self.pairs.network.snapshot(source, target))
    }
}
