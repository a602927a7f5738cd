//! Compressed adjacency representation of the friendship relation

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Directed friendship relation stored as sorted adjacency lists
///
/// `friends(i, j)` is an entry `j` in the list of `i`. The relation is not
/// required to be symmetric, and self-loops are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendshipGraph {
    /// Number of users in the graph
    pub node_count: usize,

    /// Offset array: offsets[i] to offsets[i+1] is the friend range of user i
    pub offsets: Vec<u32>,

    /// Concatenated, per-user sorted friend lists
    pub edges: Vec<u32>,
}

impl FriendshipGraph {
    /// Create an empty graph with pre-allocated capacity
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            node_count,
            offsets: Vec::with_capacity(node_count + 1),
            edges: Vec::with_capacity(edge_count),
        }
    }

    /// Graph with no users
    pub fn empty() -> Self {
        Self {
            node_count: 0,
            offsets: vec![0],
            edges: Vec::new(),
        }
    }

    /// Build from a dense square adjacency matrix, `rows[i][j] == friends(i, j)`
    pub fn from_matrix(rows: &[Vec<bool>]) -> Result<Self> {
        let node_count = rows.len();
        let mut graph = Self::with_capacity(node_count, 0);

        graph.offsets.push(0);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != node_count {
                log::debug!("Adjacency row {} has {} entries", i, row.len());
                return Err(AnalysisError::MatrixShape {
                    rows: node_count,
                    cols: row.len(),
                    expected: node_count,
                });
            }

            // Row order already yields ascending friend ids
            graph.edges.extend(
                row.iter()
                    .enumerate()
                    .filter(|(_, is_friend)| **is_friend)
                    .map(|(j, _)| j as u32),
            );
            graph.offsets.push(graph.edges.len() as u32);
        }

        Ok(graph)
    }

    /// Friend set F(u): every `j` with `friends(u, j)`, ascending
    ///
    /// Panics if `user` is not a valid identifier.
    pub fn friend_set(&self, user: usize) -> &[u32] {
        let start = self.offsets[user] as usize;
        let end = self.offsets[user + 1] as usize;
        &self.edges[start..end]
    }

    /// Check whether `friends(src, dst)` holds
    pub fn has_edge(&self, src: usize, dst: usize) -> bool {
        self.friend_set(src).binary_search(&(dst as u32)).is_ok()
    }

    /// Check whether the relation holds in both directions
    pub fn is_mutual(&self, a: usize, b: usize) -> bool {
        self.has_edge(a, b) && self.has_edge(b, a)
    }

    /// Number of friends declared by `user`
    pub fn out_degree(&self, user: usize) -> usize {
        let start = self.offsets[user] as usize;
        let end = self.offsets[user + 1] as usize;
        end - start
    }

    /// Total number of declared friendships
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of unordered pairs `{a, b}`, `a != b`, friended in both directions
    pub fn mutual_pair_count(&self) -> usize {
        (0..self.node_count)
            .map(|src| {
                self.friend_set(src)
                    .iter()
                    .filter(|&&dst| (dst as usize) > src && self.has_edge(dst as usize, src))
                    .count()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[u8]]) -> Vec<Vec<bool>> {
        rows.iter()
            .map(|row| row.iter().map(|&v| v == 1).collect())
            .collect()
    }

    #[test]
    fn test_friend_sets_are_ascending() {
        let graph = FriendshipGraph::from_matrix(&matrix(&[
            &[0, 1, 1],
            &[1, 0, 0],
            &[0, 0, 0],
        ]))
        .unwrap();

        assert_eq!(graph.node_count, 3);
        assert_eq!(graph.friend_set(0), &[1, 2]);
        assert_eq!(graph.friend_set(1), &[0]);
        assert!(graph.friend_set(2).is_empty());
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_relation_is_directed() {
        let graph = FriendshipGraph::from_matrix(&matrix(&[&[0, 1], &[0, 0]])).unwrap();
        assert!(graph.has_edge(0, 1));
        assert!(!graph.has_edge(1, 0));
        assert!(!graph.is_mutual(0, 1));
        assert_eq!(graph.mutual_pair_count(), 0);
    }

    #[test]
    fn test_self_loop_kept_in_friend_set() {
        let graph = FriendshipGraph::from_matrix(&matrix(&[&[1, 1], &[1, 0]])).unwrap();
        assert_eq!(graph.friend_set(0), &[0, 1]);
        assert!(graph.is_mutual(0, 0));
        assert_eq!(graph.mutual_pair_count(), 1);
    }

    #[test]
    fn test_rejects_ragged_matrix() {
        let err = FriendshipGraph::from_matrix(&matrix(&[&[0, 1], &[1]])).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MatrixShape {
                rows: 2,
                cols: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_empty_graph() {
        let graph = FriendshipGraph::from_matrix(&[]).unwrap();
        assert_eq!(graph, FriendshipGraph::empty());
        assert_eq!(graph.mutual_pair_count(), 0);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_user_panics() {
        let graph = FriendshipGraph::from_matrix(&matrix(&[&[0]])).unwrap();
        graph.friend_set(1);
    }
}
