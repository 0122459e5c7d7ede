//! Single-source shortest paths with decrease-key
//!
//! Dijkstra's algorithm is the standard workload for heaps with `decrease_key`:
//! every vertex is pushed once, and a shorter tentative distance lowers the
//! priority of the existing entry instead of pushing a duplicate.
//!
//! # Example
//!
//! ```rust
//! use self_adjusting_heaps::dijkstra::{shortest_paths, Graph};
//! use self_adjusting_heaps::smooth::SmoothHeap;
//!
//! let mut graph = Graph::new(4);
//! graph.add_edge(0, 1, 5).unwrap();
//! graph.add_edge(0, 2, 1).unwrap();
//! graph.add_edge(2, 1, 2).unwrap();
//!
//! let dist = shortest_paths::<SmoothHeap<_, _>>(&graph, 0);
//! assert_eq!(dist, vec![Some(0), Some(3), Some(1), None]);
//! ```

use std::collections::hash_map::Entry;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::traits::DecreaseKeyHeap;

/// Vertex index outside the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexOutOfRange(pub usize);

impl fmt::Display for VertexOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vertex {} is out of range", self.0)
    }
}

impl std::error::Error for VertexOutOfRange {}

/// Directed graph with non-negative edge weights, stored as adjacency lists
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Vec<Vec<(usize, u64)>>,
    edges: usize,
}

impl Graph {
    /// Creates a graph with vertices `0..vertices` and no edges
    pub fn new(vertices: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertices],
            edges: 0,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Adds the edge `from -> to`. Parallel edges and self-loops are allowed.
    pub fn add_edge(
        &mut self,
        from: usize,
        to: usize,
        weight: u64,
    ) -> Result<(), VertexOutOfRange> {
        if to >= self.adjacency.len() {
            return Err(VertexOutOfRange(to));
        }
        let list = self.adjacency.get_mut(from).ok_or(VertexOutOfRange(from))?;
        list.push((to, weight));
        self.edges += 1;
        Ok(())
    }

    /// Outgoing edges of `vertex` as `(target, weight)`; empty for unknown vertices
    pub fn neighbors(&self, vertex: usize) -> &[(usize, u64)] {
        self.adjacency.get(vertex).map_or(&[], Vec::as_slice)
    }
}

/// Distances from `source` to every vertex, `None` where unreachable.
///
/// An out-of-range `source` yields a result with every entry `None`.
/// Distances saturate at `u64::MAX` instead of overflowing.
pub fn shortest_paths<H>(graph: &Graph, source: usize) -> Vec<Option<u64>>
where
    H: DecreaseKeyHeap<usize, u64>,
{
    let n = graph.vertex_count();
    let mut dist: Vec<Option<u64>> = vec![None; n];
    if source >= n {
        return dist;
    }

    let mut heap = H::new();
    // tentative distances of vertices still in the heap
    let mut open: FxHashMap<usize, (H::Handle, u64)> = FxHashMap::default();
    open.insert(source, (heap.push_with_handle(0, source), 0));

    while let Some((d, u)) = heap.pop() {
        open.remove(&u);
        dist[u] = Some(d);

        for &(v, w) in graph.neighbors(u) {
            if dist[v].is_some() {
                continue;
            }
            let candidate = d.saturating_add(w);
            match open.entry(v) {
                Entry::Vacant(slot) => {
                    slot.insert((heap.push_with_handle(candidate, v), candidate));
                }
                Entry::Occupied(mut slot) => {
                    let (handle, current) = slot.get_mut();
                    if candidate < *current && heap.decrease_key(handle, candidate).is_ok() {
                        *current = candidate;
                    }
                }
            }
        }
    }

    dist
}
