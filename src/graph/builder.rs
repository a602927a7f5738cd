//! Incremental construction of a friendship graph

use crate::error::{AnalysisError, Result};
use crate::graph::FriendshipGraph;

/// Builder for a FriendshipGraph over a fixed number of users
pub struct GraphBuilder {
    /// Number of users
    node_count: usize,

    /// Adjacency lists for each user
    adjacency_lists: Vec<Vec<u32>>,
}

impl GraphBuilder {
    /// Create a builder for `node_count` users with no friendships
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            adjacency_lists: vec![Vec::new(); node_count],
        }
    }

    /// Declare `friends(src, dst)`
    pub fn add_edge(&mut self, src: usize, dst: usize) -> Result<&mut Self> {
        for id in [src, dst] {
            if id >= self.node_count {
                return Err(AnalysisError::UserOutOfRange {
                    id,
                    count: self.node_count,
                });
            }
        }

        self.adjacency_lists[src].push(dst as u32);
        Ok(self)
    }

    /// Declare the friendship in both directions
    pub fn add_mutual(&mut self, a: usize, b: usize) -> Result<&mut Self> {
        self.add_edge(a, b)?;
        self.add_edge(b, a)
    }

    /// Build the compressed graph
    pub fn build(mut self) -> FriendshipGraph {
        let edge_count: usize = self.adjacency_lists.iter().map(Vec::len).sum();
        let mut graph = FriendshipGraph::with_capacity(self.node_count, edge_count);

        graph.offsets.push(0);
        for list in &mut self.adjacency_lists {
            // Sort for binary search; repeated declarations collapse to one edge
            list.sort_unstable();
            list.dedup();
            graph.edges.extend_from_slice(list);
            graph.offsets.push(graph.edges.len() as u32);
        }

        graph
    }
}
