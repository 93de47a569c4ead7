//! HNSW (Hierarchical Navigable Small World) index engine.
//!
//! A fixed stack of `L` layers over one set of vectors. The layers walked
//! first are sparse routing layers; the layer walked last holds every
//! inserted vector, in insertion order, and is where search results come
//! from. A node's `layer_below` pointer names its counterpart (same vector)
//! in the next layer, so a descent never loses its position.
//!
//! ```text
//! layer 0:  ○──────────────────○          (sparse, routing)
//!           │                  │
//! layer 1:  ●────○─────────────●          (denser)
//!           │    │             │
//! layer 2:  ●────●────●────●───●          (full: every vector)
//! ```

mod index;
mod node;
mod serialize;
mod visited;

pub use index::{
    HnswIndex, IndexStats, DEFAULT_EF_CONSTRUCTION, DEFAULT_LAYER_COUNT,
    DEFAULT_LAYER_MULTIPLIER, DEFAULT_MAX_CONNECTIONS,
};
pub use node::{Layer, LayerNode, NodeIndex};
pub use serialize::FORMAT_VERSION;
