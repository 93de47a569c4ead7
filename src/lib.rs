//! Stratum: an embeddable HNSW approximate-nearest-neighbor index
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HnswIndex façade                       │
//! │        insert · search · to_json/from_json · stats          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Layered proximity graph                     │
//! │   routing layers first, full layer last, descent pointers   │
//! │   two-heap beam search · neighbor selection · pruning       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │             Euclidean distance kernel (f64)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is deliberately small and host-agnostic: no I/O, no logging,
//! no global state, single-threaded. Everything an embedder needs — a native
//! service, a WASM page, a managed-runtime binding — goes through the
//! [`HnswIndex`] façade, and the complete index state round-trips through a
//! portable JSON document for transport across host boundaries.

pub mod distance;
pub mod error;
pub mod hnsw;

pub use error::IndexError;
pub use hnsw::{HnswIndex, IndexStats, Layer, LayerNode, NodeIndex, FORMAT_VERSION};
