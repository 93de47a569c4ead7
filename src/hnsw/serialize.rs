//! Portable JSON state codec.
//!
//! The document's field names are a stable external interface — hosts parse
//! them directly, so they are pinned here with `serde` renames:
//!
//! ```json
//! {
//!   "version": 1,
//!   "L": 5,
//!   "mL": 0.62,
//!   "efc": 10,
//!   "maxConnections": 16,
//!   "index": [
//!     [ { "vector": [1.0, 2.0], "connections": [1], "layerBelow": 0 } ]
//!   ]
//! }
//! ```
//!
//! `layerBelow` is `-1` for nodes of the final layer. On read, `version`
//! defaults to 1, `efc` to 10 and `maxConnections` to 16 — older documents
//! omit them. Connection indices are not range-checked at load time; search
//! skips dangling ones. A binary codec is declared for hosts that expect
//! the symbols but is not implemented.

use serde::{Deserialize, Serialize};

use super::index::{HnswIndex, DEFAULT_EF_CONSTRUCTION, DEFAULT_MAX_CONNECTIONS};
use super::node::{Layer, LayerNode, NodeIndex};
use crate::error::IndexError;

/// Current document version; readers treat a missing `version` as 1.
pub const FORMAT_VERSION: u32 = 1;

fn default_version() -> u32 {
    FORMAT_VERSION
}

fn default_efc() -> usize {
    DEFAULT_EF_CONSTRUCTION
}

fn default_max_connections() -> usize {
    DEFAULT_MAX_CONNECTIONS
}

fn default_layer_below() -> i64 {
    -1
}

#[derive(Debug, Serialize, Deserialize)]
struct StateDocument {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(rename = "L")]
    layer_count: usize,
    #[serde(rename = "mL")]
    ml: f64,
    #[serde(default = "default_efc")]
    efc: usize,
    #[serde(rename = "maxConnections", default = "default_max_connections")]
    max_connections: usize,
    index: Vec<Vec<NodeDocument>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeDocument {
    vector: Vec<f64>,
    connections: Vec<NodeIndex>,
    #[serde(rename = "layerBelow", default = "default_layer_below")]
    layer_below: i64,
}

impl HnswIndex {
    /// Serialize the complete index state as a JSON document.
    pub fn to_json(&self) -> String {
        let doc = StateDocument {
            version: FORMAT_VERSION,
            layer_count: self.layer_count(),
            ml: self.ml(),
            efc: self.ef_construction(),
            max_connections: self.max_connections(),
            index: self
                .layers()
                .iter()
                .map(|layer| layer.iter().map(node_document).collect())
                .collect(),
        };
        serde_json::to_string(&doc).expect("state document serialization cannot fail")
    }

    /// Rebuild an index from a JSON state document.
    ///
    /// `L`, `mL` and `index` are required; `index` must hold exactly `L`
    /// layers. After loading, every node's connection list is pruned back
    /// under the connection cap, so over-full documents come out legal.
    pub fn from_json(text: &str) -> Result<Self, IndexError> {
        let doc: StateDocument = serde_json::from_str(text)
            .map_err(|err| IndexError::MalformedDocument(err.to_string()))?;

        if doc.layer_count == 0 {
            return Err(IndexError::MalformedDocument(
                "`L` must be at least 1".to_string(),
            ));
        }
        if doc.index.len() != doc.layer_count {
            return Err(IndexError::MalformedDocument(format!(
                "`index` holds {} layers, expected L = {}",
                doc.index.len(),
                doc.layer_count
            )));
        }

        let layers: Vec<Layer> = doc
            .index
            .into_iter()
            .map(|layer| layer.into_iter().map(layer_node).collect())
            .collect();

        HnswIndex::from_parts(
            doc.layer_count,
            doc.ml,
            doc.efc,
            doc.max_connections,
            layers,
        )
    }

    /// Binary codec placeholder; always fails with [`IndexError::Unsupported`].
    pub fn to_binary(&self) -> Result<Vec<u8>, IndexError> {
        Err(IndexError::Unsupported("binary serialization"))
    }

    /// Binary codec placeholder; always fails with [`IndexError::Unsupported`].
    pub fn from_binary(_binary: &[u8]) -> Result<Self, IndexError> {
        Err(IndexError::Unsupported("binary deserialization"))
    }
}

fn node_document(node: &LayerNode) -> NodeDocument {
    NodeDocument {
        vector: node.vector.clone(),
        connections: node.connections.clone(),
        layer_below: node.layer_below.map_or(-1, |below| below.0 as i64),
    }
}

fn layer_node(doc: NodeDocument) -> LayerNode {
    LayerNode {
        vector: doc.vector,
        connections: doc.connections,
        // Any negative value maps to the "no layer below" sentinel.
        layer_below: if doc.layer_below < 0 {
            None
        } else {
            Some(NodeIndex(doc.layer_below as u64))
        },
    }
}
