//! DOM queries: by id, by class, closest ancestor.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find the first node whose element id equals `id`.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, data)| data.id.as_deref() == Some(id))
            .map(|(node_id, _)| node_id)
    }

    /// All nodes carrying `class`, in arena order.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(|data| data.has_class(class))
    }

    /// All nodes matching `predicate`, in arena order.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, data)| predicate(data))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    /// Descendants of `scope` (excluding `scope`) carrying `class`, in tree order.
    pub fn query_within(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .skip(1)
            .filter(|&id| self.get(id).is_some_and(|data| data.has_class(class)))
            .collect()
    }

    /// The nearest node carrying `class`, starting at `start` itself and
    /// walking up through its ancestors.
    pub fn closest(&self, start: NodeId, class: &str) -> Option<NodeId> {
        if !self.contains(start) {
            return None;
        }
        std::iter::once(start)
            .chain(self.ancestors(start))
            .find(|&id| self.get(id).is_some_and(|data| data.has_class(class)))
    }
}
