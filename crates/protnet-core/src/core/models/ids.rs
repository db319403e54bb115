/// Externally assigned protein identifier.
///
/// Identifiers are dense-ish non-negative integers handed out by the caller's
/// name registry; the network never creates or destroys them explicitly.
pub type NodeId = u32;

/// Returns the `(min, max)` ordering of a pair, the storage key of an undirected edge.
#[inline]
pub fn canonical_pair(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}
