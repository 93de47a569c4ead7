//! Node and layer types for the layered proximity graph.

use serde::{Deserialize, Serialize};

/// Position of a node within a single layer.
///
/// A thin newtype so the adjacency plumbing cannot silently mix positions
/// with raw integers from another layer. Positions are append-only and stay
/// valid for the life of the index — there is no deletion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeIndex(pub u64);

impl NodeIndex {
    /// The position as a plain `usize`, for slice indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in one layer of the graph.
///
/// Each inserted vector owns a node in every layer it participates in; the
/// copies are stitched together by `layer_below`, which names the node's
/// counterpart in the next layer (the one holding the same payload). Nodes
/// of the final layer carry `None` — externalized as `-1` in the state
/// document.
#[derive(Debug, Clone)]
pub struct LayerNode {
    /// The vector payload, owned by the node.
    pub vector: Vec<f64>,
    /// Connections to other nodes of the same layer.
    pub connections: Vec<NodeIndex>,
    /// Counterpart in the next layer, or `None` at the final layer.
    pub layer_below: Option<NodeIndex>,
}

impl LayerNode {
    /// Create an unconnected node.
    pub fn new(vector: Vec<f64>, layer_below: Option<NodeIndex>) -> Self {
        Self {
            vector,
            connections: Vec::new(),
            layer_below,
        }
    }

    /// Whether `target` is already listed as a connection.
    #[inline]
    pub fn has_connection(&self, target: NodeIndex) -> bool {
        self.connections.contains(&target)
    }
}

/// One layer: an append-only sequence of nodes addressed by [`NodeIndex`].
pub type Layer = Vec<LayerNode>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_unconnected() {
        let node = LayerNode::new(vec![1.0, 2.0], Some(NodeIndex(3)));
        assert!(node.connections.is_empty());
        assert_eq!(node.layer_below, Some(NodeIndex(3)));
        assert_eq!(node.vector, vec![1.0, 2.0]);
    }

    #[test]
    fn test_has_connection() {
        let mut node = LayerNode::new(vec![0.0], None);
        node.connections.push(NodeIndex(1));
        node.connections.push(NodeIndex(4));
        assert!(node.has_connection(NodeIndex(4)));
        assert!(!node.has_connection(NodeIndex(2)));
    }

    #[test]
    fn test_node_index_ordering() {
        assert!(NodeIndex(1) < NodeIndex(2));
        assert_eq!(NodeIndex(7).index(), 7usize);
    }
}
