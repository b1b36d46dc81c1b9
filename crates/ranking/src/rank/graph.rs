//! Directed book graph for rank computation
//!
//! Nodes keep their insertion order so rank vectors and summation order
//! stay deterministic for a fixed input. Self-loop edges are dropped and
//! duplicate ordered edges collapse to one at insertion time.

use shelfrank_common::errors::{AppError, Result};
use shelfrank_common::models::BookId;
use std::collections::HashMap;

/// In-memory directed graph over books
#[derive(Debug, Clone, Default)]
pub struct BookGraph {
    /// Node ids in insertion order
    nodes: Vec<BookId>,

    /// Node id -> position in `nodes`
    index: HashMap<BookId, usize>,

    /// Adjacency list: node position -> positions it points to
    outgoing: Vec<Vec<usize>>,

    /// Reverse adjacency: node position -> positions pointing at it
    incoming: Vec<Vec<usize>>,

    /// Count of retained (cleaned) edges
    edge_count: usize,
}

impl BookGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from an explicit node set and edge list
    ///
    /// Fails with `InvalidGraph` on duplicate node ids or on an edge whose
    /// endpoint is outside the node set. Self-loops and duplicate edges
    /// are cleaned, not rejected.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = BookId>,
        edges: impl IntoIterator<Item = (BookId, BookId)>,
    ) -> Result<Self> {
        let mut graph = Self::new();

        for id in nodes {
            if graph.index.contains_key(&id) {
                return Err(AppError::InvalidGraph {
                    message: format!("duplicate node id {}", id),
                });
            }
            graph.register_node(id);
        }

        for (from, to) in edges {
            let from_pos = graph.position(from).ok_or_else(|| AppError::InvalidGraph {
                message: format!("edge references unknown node {}", from),
            })?;
            let to_pos = graph.position(to).ok_or_else(|| AppError::InvalidGraph {
                message: format!("edge references unknown node {}", to),
            })?;
            graph.link(from_pos, to_pos);
        }

        Ok(graph)
    }

    /// Add a node; already-known ids are left untouched
    pub fn add_node(&mut self, id: BookId) -> usize {
        match self.index.get(&id) {
            Some(&pos) => pos,
            None => self.register_node(id),
        }
    }

    /// Add a directed edge, registering unseen endpoints
    pub fn add_edge(&mut self, from: BookId, to: BookId) {
        let from_pos = self.add_node(from);
        let to_pos = self.add_node(to);
        self.link(from_pos, to_pos);
    }

    fn register_node(&mut self, id: BookId) -> usize {
        let pos = self.nodes.len();
        self.nodes.push(id);
        self.index.insert(id, pos);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        pos
    }

    fn link(&mut self, from_pos: usize, to_pos: usize) {
        // Self-loops carry no rank mass; parallel edges carry no extra weight
        if from_pos == to_pos || self.outgoing[from_pos].contains(&to_pos) {
            return;
        }
        self.outgoing[from_pos].push(to_pos);
        self.incoming[to_pos].push(from_pos);
        self.edge_count += 1;
    }

    /// Node ids in insertion order
    pub fn nodes(&self) -> &[BookId] {
        &self.nodes
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Count of retained edges after cleaning
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Position of a node id, if present
    pub fn position(&self, id: BookId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Out-degree of the node at `pos`
    pub fn out_degree(&self, pos: usize) -> usize {
        self.outgoing[pos].len()
    }

    /// Positions of nodes with an edge into `pos`, in insertion order
    pub fn in_neighbors(&self, pos: usize) -> &[usize] {
        &self.incoming[pos]
    }

    /// Positions of nodes with no outgoing edges
    pub fn dangling_positions(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&pos| self.outgoing[pos].is_empty())
            .collect()
    }
}
