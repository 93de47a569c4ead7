//! Core HNSW index: parameters, layered graph, insertion, and search.
//!
//! # Algorithm overview
//!
//! **Insert**: draw a top layer for the new vector, then walk the layers in
//! ascending order. Layers before the drawn one only route (beam-1 greedy
//! descent); from the drawn layer onward the vector gets a node, wired to
//! its nearest neighbors found by a beam-`efc` search and kept under the
//! connection cap by pruning.
//!
//! **Search**: start at position 0 of the first layer, beam-search each
//! layer, follow the best node's descent pointer, and return the final
//! layer's neighbors once the pointer runs out.
//!
//! Layer numbering follows the wire format: layer 0 is the first layer
//! walked (the sparse routing end) and the last layer holds every inserted
//! vector, in insertion order — a node's position there is its public id.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::node::{Layer, LayerNode, NodeIndex};
use super::visited::VisitedSet;
use crate::distance::squared_euclidean;
use crate::error::IndexError;

/// Default layer count (`L`).
pub const DEFAULT_LAYER_COUNT: usize = 5;
/// Default layer-assignment multiplier (`mL`).
pub const DEFAULT_LAYER_MULTIPLIER: f64 = 0.62;
/// Default construction beam width (`efc`).
pub const DEFAULT_EF_CONSTRUCTION: usize = 10;
/// Default per-node connection cap.
pub const DEFAULT_MAX_CONNECTIONS: usize = 16;

/// Candidate for expansion during layer search (min-heap by distance).
#[derive(Clone, Copy)]
struct Candidate {
    index: NodeIndex,
    distance: f64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap behavior (smaller distance = higher priority)
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Kept neighbor during layer search (max-heap, worst on top).
#[derive(Clone, Copy)]
struct SearchResult {
    index: NodeIndex,
    distance: f64,
}

impl PartialEq for SearchResult {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl Eq for SearchResult {}

impl Ord for SearchResult {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .partial_cmp(&other.distance)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for SearchResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// HNSW index over `f64` vectors under Euclidean distance.
///
/// The index owns its layers, its nodes, and its RNG. It is single-threaded
/// by design: `insert` mutates, `search` and the codec are read-only, and
/// callers wanting concurrency wrap it in their own reader-writer
/// discipline.
pub struct HnswIndex {
    layer_count: usize,
    ml: f64,
    ef_construction: usize,
    max_connections: usize,
    layers: Vec<Layer>,
    /// Layer-assignment RNG; per-instance so tests can pin behavior.
    rng: StdRng,
}

impl Default for HnswIndex {
    fn default() -> Self {
        Self::new(
            DEFAULT_LAYER_COUNT,
            DEFAULT_LAYER_MULTIPLIER,
            DEFAULT_EF_CONSTRUCTION,
            DEFAULT_MAX_CONNECTIONS,
        )
    }
}

impl HnswIndex {
    /// Create an empty index with a non-deterministic seed.
    ///
    /// # Parameters
    /// - `layer_count`: number of layers (`L`), clamped up to 1
    /// - `ml`: layer-assignment multiplier; larger values push more nodes
    ///   into routing layers
    /// - `ef_construction`: beam width used while wiring an insert
    /// - `max_connections`: per-node connection cap, clamped up to 1
    pub fn new(layer_count: usize, ml: f64, ef_construction: usize, max_connections: usize) -> Self {
        Self::with_seed(
            layer_count,
            ml,
            ef_construction,
            max_connections,
            rand::random(),
        )
    }

    /// Create an empty index with a deterministic RNG seed.
    pub fn with_seed(
        layer_count: usize,
        ml: f64,
        ef_construction: usize,
        max_connections: usize,
        seed: u64,
    ) -> Self {
        let layer_count = layer_count.max(1);
        Self {
            layer_count,
            ml,
            ef_construction,
            max_connections: max_connections.max(1),
            layers: vec![Vec::new(); layer_count],
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Reconstruct an index from loaded parts (used by the state codec).
    ///
    /// Every node is re-pruned so the connection cap holds even when the
    /// document was over-full.
    pub(crate) fn from_parts(
        layer_count: usize,
        ml: f64,
        ef_construction: usize,
        max_connections: usize,
        layers: Vec<Layer>,
    ) -> Result<Self, IndexError> {
        let mut index = Self {
            layer_count: layer_count.max(1),
            ml,
            ef_construction,
            max_connections: max_connections.max(1),
            layers,
            rng: StdRng::seed_from_u64(rand::random()),
        };
        for layer in &mut index.layers {
            for position in 0..layer.len() {
                prune_connections(layer, NodeIndex(position as u64), index.max_connections)?;
            }
        }
        Ok(index)
    }

    /// Number of layers (`L`).
    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Layer-assignment multiplier (`mL`).
    pub fn ml(&self) -> f64 {
        self.ml
    }

    /// Construction beam width (`efc`).
    pub fn ef_construction(&self) -> usize {
        self.ef_construction
    }

    /// Per-node connection cap.
    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// The layers themselves, first-walked first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of vectors in the index (nodes of the final, full layer).
    pub fn len(&self) -> usize {
        self.layers.last().map_or(0, Vec::len)
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draw the top layer for a new node: `⌊−ln(u)·mL⌋` over `u ∈ (0, 1]`,
    /// clamped into the layer range. Most draws land on 0, a vanishing
    /// fraction on high layers.
    fn random_layer(&mut self) -> usize {
        let mut u: f64 = self.rng.gen();
        if u <= 0.0 {
            u = f64::MIN_POSITIVE;
        }
        let level = (-u.ln() * self.ml).floor() as usize;
        level.min(self.layer_count - 1)
    }

    /// Insert a vector into the index.
    ///
    /// Fails with [`IndexError::DimensionMismatch`] when the vector's length
    /// disagrees with what the index already stores; the check runs before
    /// any layer is touched, so a failed insert leaves the index unchanged.
    pub fn insert(&mut self, vector: &[f64]) -> Result<(), IndexError> {
        if let Some(stored) = self.layers.iter().find_map(|layer| layer.first()) {
            if stored.vector.len() != vector.len() {
                return Err(IndexError::DimensionMismatch {
                    expected: stored.vector.len(),
                    actual: vector.len(),
                });
            }
        }

        let top = self.random_layer();
        let mut start = Some(NodeIndex(0));
        let mut visited = VisitedSet::new();

        for n in 0..self.layer_count {
            // Position the counterpart will occupy in the next layer once
            // this walk reaches it.
            let below = if n + 1 < self.layer_count {
                Some(NodeIndex(self.layers[n + 1].len() as u64))
            } else {
                None
            };

            if self.layers[n].is_empty() {
                self.layers[n].push(LayerNode::new(vector.to_vec(), below));
                continue;
            }

            if n < top {
                // Routing layer: refine the entry, link nothing.
                let found = search_layer(&self.layers[n], start, vector, 1, &mut visited)?;
                start = found
                    .first()
                    .map(|&(_, index)| index)
                    .or(Some(NodeIndex(0)));
            } else {
                let found = search_layer(
                    &self.layers[n],
                    start,
                    vector,
                    self.ef_construction,
                    &mut visited,
                )?;
                let selected: Vec<NodeIndex> = found
                    .iter()
                    .take(self.max_connections)
                    .map(|&(_, index)| index)
                    .collect();

                let layer = &mut self.layers[n];
                let new_index = NodeIndex(layer.len() as u64);
                let mut node = LayerNode::new(vector.to_vec(), below);
                node.connections = selected.clone();
                layer.push(node);
                prune_connections(layer, new_index, self.max_connections)?;

                for &neighbor in &selected {
                    if neighbor.index() >= layer.len() {
                        continue;
                    }
                    if !layer[neighbor.index()].has_connection(new_index) {
                        layer[neighbor.index()].connections.push(new_index);
                    }
                    prune_connections(layer, neighbor, self.max_connections)?;
                    if !layer[neighbor.index()].has_connection(new_index) {
                        // The neighbor could not keep the back-edge; drop the
                        // forward edge so the pair stays roughly symmetric.
                        layer[new_index.index()]
                            .connections
                            .retain(|&connection| connection != neighbor);
                    }
                }
                prune_connections(layer, new_index, self.max_connections)?;

                // Descend through the entry node's pointer for the next layer.
                start = match start {
                    Some(entry) if entry.index() < layer.len() => layer[entry.index()].layer_below,
                    _ => None,
                };
            }
        }

        Ok(())
    }

    /// Find the `ef` nearest stored vectors to `query`.
    ///
    /// Returns `(distance, node index)` pairs sorted ascending by true
    /// Euclidean distance; the index is the node's position in the final
    /// layer, i.e. its insertion order. An empty index or `ef == 0` yields
    /// an empty result. Fails with [`IndexError::DimensionMismatch`] when
    /// the query length disagrees with stored vectors.
    pub fn search(&self, query: &[f64], ef: usize) -> Result<Vec<(f64, NodeIndex)>, IndexError> {
        if self.layers.is_empty() || self.layers[0].is_empty() {
            return Ok(Vec::new());
        }

        let mut visited = VisitedSet::new();
        let mut best = Some(NodeIndex(0));

        for layer in &self.layers {
            let found = search_layer(layer, best, query, ef, &mut visited)?;
            let top = match found.first() {
                Some(&(_, index)) => index,
                None => continue,
            };
            match layer[top.index()].layer_below {
                Some(below) => best = Some(below),
                None => {
                    // Final layer reached: re-run the beam from the best node
                    // and surface true Euclidean distances.
                    let out = search_layer(layer, Some(top), query, ef, &mut visited)?;
                    return Ok(out
                        .into_iter()
                        .map(|(distance, index)| (distance.sqrt(), index))
                        .collect());
                }
            }
        }
        Ok(Vec::new())
    }

    /// Per-layer occupancy and edge totals, plus the tuning parameters.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            layer_counts: self.layers.iter().map(Vec::len).collect(),
            total_connections: self
                .layers
                .iter()
                .flat_map(|layer| layer.iter())
                .map(|node| node.connections.len())
                .sum(),
            layer_count: self.layer_count,
            ef_construction: self.ef_construction,
            max_connections: self.max_connections,
        }
    }
}

/// Statistics about an index.
#[derive(Debug, Clone)]
pub struct IndexStats {
    /// Node count per layer, first-walked first.
    pub layer_counts: Vec<usize>,
    /// Total directed connection count across all layers.
    pub total_connections: usize,
    pub layer_count: usize,
    pub ef_construction: usize,
    pub max_connections: usize,
}

/// Beam search within one layer from `entry`.
///
/// Returns up to `ef` `(squared distance, index)` pairs sorted ascending.
/// An empty layer or `ef == 0` yields an empty result; a missing or
/// out-of-range entry is an [`IndexError::InvalidEntry`]. Connection indices
/// pointing outside the layer are skipped, so imperfect documents still
/// search.
pub(crate) fn search_layer(
    layer: &Layer,
    entry: Option<NodeIndex>,
    query: &[f64],
    ef: usize,
    visited: &mut VisitedSet,
) -> Result<Vec<(f64, NodeIndex)>, IndexError> {
    if layer.is_empty() || ef == 0 {
        return Ok(Vec::new());
    }
    let entry = match entry {
        Some(entry) if entry.index() < layer.len() => entry,
        other => {
            return Err(IndexError::InvalidEntry {
                entry: other.map_or(u64::MAX, |entry| entry.0),
                len: layer.len(),
            })
        }
    };

    visited.reset(layer.len());
    visited.insert(entry.index());
    let entry_distance = squared_euclidean(&layer[entry.index()].vector, query)?;

    // Candidates to expand (min-heap) and kept neighbors (max-heap, worst
    // on top for O(1) admission checks).
    let mut candidates: BinaryHeap<Candidate> = BinaryHeap::with_capacity(ef + 1);
    let mut results: BinaryHeap<SearchResult> = BinaryHeap::with_capacity(ef + 1);
    candidates.push(Candidate {
        index: entry,
        distance: entry_distance,
    });
    results.push(SearchResult {
        index: entry,
        distance: entry_distance,
    });

    while let Some(current) = candidates.pop() {
        if let Some(worst) = results.peek() {
            // No unexpanded candidate can improve a full result set.
            if results.len() >= ef && current.distance > worst.distance {
                break;
            }
        }

        for &neighbor in &layer[current.index.index()].connections {
            if neighbor.index() >= layer.len() {
                continue; // dangling index from an imperfect document
            }
            if !visited.insert(neighbor.index()) {
                continue;
            }
            let distance = squared_euclidean(&layer[neighbor.index()].vector, query)?;
            let admit = results.len() < ef
                || results
                    .peek()
                    .map_or(false, |worst| distance < worst.distance);
            if admit {
                candidates.push(Candidate {
                    index: neighbor,
                    distance,
                });
                results.push(SearchResult {
                    index: neighbor,
                    distance,
                });
                if results.len() > ef {
                    results.pop();
                }
            }
        }
    }

    let mut out: Vec<(f64, NodeIndex)> = results
        .into_iter()
        .map(|result| (result.distance, result.index))
        .collect();
    out.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });
    Ok(out)
}

/// Trim a node's connection list to the `max_connections` closest entries,
/// sorted ascending by distance from the node's own vector, deduplicated.
/// Self references and indices outside the layer are dropped outright.
pub(crate) fn prune_connections(
    layer: &mut Layer,
    node_index: NodeIndex,
    max_connections: usize,
) -> Result<(), IndexError> {
    if node_index.index() >= layer.len() || layer[node_index.index()].connections.is_empty() {
        return Ok(());
    }

    let mut scored: Vec<(f64, NodeIndex)> =
        Vec::with_capacity(layer[node_index.index()].connections.len());
    for &connection in &layer[node_index.index()].connections {
        if connection == node_index || connection.index() >= layer.len() {
            continue;
        }
        scored.push((
            squared_euclidean(
                &layer[node_index.index()].vector,
                &layer[connection.index()].vector,
            )?,
            connection,
        ));
    }

    if scored.is_empty() {
        layer[node_index.index()].connections.clear();
        return Ok(());
    }

    // Ties break on position so pruning is fully deterministic.
    scored.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });
    scored.truncate(max_connections);

    let mut kept: Vec<NodeIndex> = Vec::with_capacity(scored.len());
    for (_, connection) in scored {
        if !kept.contains(&connection) {
            kept.push(connection);
        }
    }
    layer[node_index.index()].connections = kept;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_index(seed: u64) -> HnswIndex {
        HnswIndex::with_seed(
            DEFAULT_LAYER_COUNT,
            DEFAULT_LAYER_MULTIPLIER,
            DEFAULT_EF_CONSTRUCTION,
            DEFAULT_MAX_CONNECTIONS,
            seed,
        )
    }

    /// A single layer of 1-dimensional nodes at the given coordinates,
    /// chain-connected in both directions.
    fn chain_layer(coords: &[f64]) -> Layer {
        let mut layer: Layer = coords
            .iter()
            .map(|&x| LayerNode::new(vec![x], None))
            .collect();
        for i in 0..layer.len() {
            if i > 0 {
                layer[i].connections.push(NodeIndex(i as u64 - 1));
            }
            if i + 1 < layer.len() {
                layer[i].connections.push(NodeIndex(i as u64 + 1));
            }
        }
        layer
    }

    #[test]
    fn test_search_layer_empty_layer() {
        let layer: Layer = Vec::new();
        let mut visited = VisitedSet::new();
        let out = search_layer(&layer, Some(NodeIndex(0)), &[1.0], 3, &mut visited).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_search_layer_ef_zero() {
        let layer = chain_layer(&[0.0, 1.0]);
        let mut visited = VisitedSet::new();
        let out = search_layer(&layer, Some(NodeIndex(0)), &[1.0], 0, &mut visited).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_search_layer_invalid_entry() {
        let layer = chain_layer(&[0.0, 1.0]);
        let mut visited = VisitedSet::new();
        let err = search_layer(&layer, Some(NodeIndex(5)), &[1.0], 1, &mut visited).unwrap_err();
        match err {
            IndexError::InvalidEntry { entry, len } => {
                assert_eq!(entry, 5);
                assert_eq!(len, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            search_layer(&layer, None, &[1.0], 1, &mut visited),
            Err(IndexError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn test_search_layer_single_node() {
        let layer = chain_layer(&[4.0]);
        let mut visited = VisitedSet::new();
        let out = search_layer(&layer, Some(NodeIndex(0)), &[1.0], 3, &mut visited).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].1, NodeIndex(0));
        assert_eq!(out[0].0, 9.0); // squared
    }

    #[test]
    fn test_search_layer_wide_beam_finds_all() {
        let layer = chain_layer(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let mut visited = VisitedSet::new();
        let out = search_layer(&layer, Some(NodeIndex(0)), &[2.2], 10, &mut visited).unwrap();
        assert_eq!(out.len(), 5);
        assert_eq!(out[0].1, NodeIndex(2));
        for pair in out.windows(2) {
            assert!(pair[0].0 <= pair[1].0, "distances must be non-decreasing");
        }
    }

    #[test]
    fn test_search_layer_narrow_beam_caps_results() {
        let layer = chain_layer(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let mut visited = VisitedSet::new();
        let out = search_layer(&layer, Some(NodeIndex(0)), &[0.0], 2, &mut visited).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].1, NodeIndex(0));
        assert_eq!(out[1].1, NodeIndex(1));
    }

    #[test]
    fn test_search_layer_skips_dangling_connections() {
        let mut layer = chain_layer(&[0.0, 1.0]);
        layer[0].connections.push(NodeIndex(99));
        let mut visited = VisitedSet::new();
        let out = search_layer(&layer, Some(NodeIndex(0)), &[0.5], 4, &mut visited).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_search_layer_rejects_mismatched_query() {
        let layer = chain_layer(&[0.0, 1.0]);
        let mut visited = VisitedSet::new();
        assert!(matches!(
            search_layer(&layer, Some(NodeIndex(0)), &[0.0, 0.0], 2, &mut visited),
            Err(IndexError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_random_layer_within_bounds() {
        let mut index = small_index(7);
        for _ in 0..1000 {
            let level = index.random_layer();
            assert!(level < index.layer_count());
        }
    }

    #[test]
    fn test_first_insert_populates_every_layer() {
        let mut index = small_index(1);
        index.insert(&[1.0, 2.0, 3.0]).unwrap();
        for (n, layer) in index.layers().iter().enumerate() {
            assert_eq!(layer.len(), 1);
            if n + 1 < index.layer_count() {
                assert_eq!(layer[0].layer_below, Some(NodeIndex(0)));
            } else {
                assert_eq!(layer[0].layer_below, None);
            }
        }
    }

    #[test]
    fn test_insert_rejects_mismatch_without_mutation() {
        let mut index = small_index(2);
        index.insert(&[1.0, 2.0, 3.0]).unwrap();
        let before = index.stats();
        let err = index.insert(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, IndexError::DimensionMismatch { .. }));
        let after = index.stats();
        assert_eq!(before.layer_counts, after.layer_counts);
        assert_eq!(before.total_connections, after.total_connections);
    }

    #[test]
    fn test_search_empty_index() {
        let index = small_index(3);
        assert!(index.search(&[1.0, 2.0], 5).unwrap().is_empty());
    }

    #[test]
    fn test_search_ef_zero() {
        let mut index = small_index(4);
        index.insert(&[1.0]).unwrap();
        assert!(index.search(&[1.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_exact_hit_single_vector() {
        let mut index = small_index(5);
        index.insert(&[1.0, 2.0, 3.0]).unwrap();
        let out = index.search(&[1.0, 2.0, 3.0], 1).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].1, NodeIndex(0));
        assert!(out[0].0.abs() <= 1e-9);
    }

    #[test]
    fn test_search_returns_euclidean_distances() {
        let mut index = small_index(6);
        index.insert(&[0.0, 0.0]).unwrap();
        index.insert(&[3.0, 4.0]).unwrap();
        let out = index.search(&[0.0, 0.0], 2).unwrap();
        assert_eq!(out.len(), 2);
        assert!((out[1].0 - 5.0).abs() <= 1e-9, "got {}", out[1].0);
    }

    #[test]
    fn test_degree_bound_under_small_cap() {
        let mut index = HnswIndex::with_seed(5, 0.62, 10, 2, 8);
        for i in 0..25 {
            let x = f64::from(i);
            index.insert(&[x.sin(), x.cos(), x / 10.0]).unwrap();
        }
        for layer in index.layers() {
            for (position, node) in layer.iter().enumerate() {
                assert!(node.connections.len() <= 2);
                assert!(!node.connections.contains(&NodeIndex(position as u64)));
            }
        }
    }

    #[test]
    fn test_same_seed_same_graph() {
        let vectors: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![f64::from(i), f64::from(i * 2)])
            .collect();
        let mut a = small_index(42);
        let mut b = small_index(42);
        for v in &vectors {
            a.insert(v).unwrap();
            b.insert(v).unwrap();
        }
        let (sa, sb) = (a.stats(), b.stats());
        assert_eq!(sa.layer_counts, sb.layer_counts);
        assert_eq!(sa.total_connections, sb.total_connections);
        assert_eq!(
            a.search(&[7.5, 15.0], 3).unwrap(),
            b.search(&[7.5, 15.0], 3).unwrap()
        );
    }

    #[test]
    fn test_prune_keeps_closest_sorted() {
        let mut layer = chain_layer(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        layer[0].connections = vec![
            NodeIndex(4),
            NodeIndex(1),
            NodeIndex(3),
            NodeIndex(2),
        ];
        prune_connections(&mut layer, NodeIndex(0), 2).unwrap();
        assert_eq!(layer[0].connections, vec![NodeIndex(1), NodeIndex(2)]);
    }

    #[test]
    fn test_prune_drops_self_and_dangling() {
        let mut layer = chain_layer(&[0.0, 1.0]);
        layer[0].connections = vec![NodeIndex(0), NodeIndex(7), NodeIndex(1)];
        prune_connections(&mut layer, NodeIndex(0), 4).unwrap();
        assert_eq!(layer[0].connections, vec![NodeIndex(1)]);
    }

    #[test]
    fn test_prune_clears_when_nothing_valid() {
        let mut layer = chain_layer(&[0.0]);
        layer[0].connections = vec![NodeIndex(0), NodeIndex(9)];
        prune_connections(&mut layer, NodeIndex(0), 4).unwrap();
        assert!(layer[0].connections.is_empty());
    }

    #[test]
    fn test_prune_deduplicates() {
        let mut layer = chain_layer(&[0.0, 1.0, 2.0]);
        layer[0].connections = vec![NodeIndex(1), NodeIndex(1), NodeIndex(2)];
        prune_connections(&mut layer, NodeIndex(0), 4).unwrap();
        assert_eq!(layer[0].connections, vec![NodeIndex(1), NodeIndex(2)]);
    }

    #[test]
    fn test_prune_out_of_range_node_is_noop() {
        let mut layer = chain_layer(&[0.0]);
        prune_connections(&mut layer, NodeIndex(5), 4).unwrap();
        assert_eq!(layer.len(), 1);
    }
}
