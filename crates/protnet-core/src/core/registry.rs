use super::models::annotation::{AnnotationValue, Annotations};
use super::models::ids::NodeId;
use std::collections::HashMap;

/// Boundary to the service that maps protein names to node ids.
///
/// The network never parses names itself. It only needs labels and per-node
/// annotations when nodes are merged during a mapped combination.
pub trait NodeRegistry {
    /// Returns the label registered for `id`, if any.
    fn label(&self, id: NodeId) -> Option<String>;

    /// Returns the id for `label`, registering it when unseen.
    fn register(&mut self, label: &str) -> NodeId;

    /// Returns a copy of the node-level annotations of `id`.
    fn node_annotations(&self, id: NodeId) -> Annotations;

    fn set_node_annotation(&mut self, id: NodeId, key: &str, value: AnnotationValue);
}

/// A registry that keeps every label and node annotation in memory.
///
/// Ids are handed out densely from zero in registration order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    labels: Vec<String>,
    ids: HashMap<String, NodeId>,
    annotations: HashMap<NodeId, Annotations>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id_of(&self, label: &str) -> Option<NodeId> {
        self.ids.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl NodeRegistry for InMemoryRegistry {
    fn label(&self, id: NodeId) -> Option<String> {
        self.labels.get(id as usize).cloned()
    }

    fn register(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }
        let id = self.labels.len() as NodeId;
        self.labels.push(label.to_string());
        self.ids.insert(label.to_string(), id);
        id
    }

    fn node_annotations(&self, id: NodeId) -> Annotations {
        self.annotations.get(&id).cloned().unwrap_or_default()
    }

    fn set_node_annotation(&mut self, id: NodeId, key: &str, value: AnnotationValue) {
        self.annotations
            .entry(id)
            .or_default()
            .insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent_and_dense() {
        let mut registry = InMemoryRegistry::new();
        assert_eq!(registry.register("YAL001C"), 0);
        assert_eq!(registry.register("YBR002W"), 1);
        assert_eq!(registry.register("YAL001C"), 0);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.label(1).as_deref(), Some("YBR002W"));
        assert_eq!(registry.id_of("YBR002W"), Some(1));
        assert!(registry.label(7).is_none());
    }

    #[test]
    fn node_annotations_round_trip() {
        let mut registry = InMemoryRegistry::new();
        let id = registry.register("P1");
        assert!(registry.node_annotations(id).is_empty());

        registry.set_node_annotation(id, "organism", "yeast".into());
        assert_eq!(
            registry.node_annotations(id).get("organism"),
            Some(&AnnotationValue::from("yeast"))
        );
    }
}
