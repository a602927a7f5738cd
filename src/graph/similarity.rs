//! Strength-of-connection scoring between users

use itertools::{EitherOrBoth, Itertools};
use ndarray::Array2;
use rayon::prelude::*;

use crate::graph::FriendshipGraph;

/// Rosters at or above this size compute matrix rows in parallel
const PARALLEL_ROW_THRESHOLD: usize = 256;

/// Sizes of the union and intersection of two ascending id lists
fn union_intersection_sizes(a: &[u32], b: &[u32]) -> (usize, usize) {
    a.iter()
        .merge_join_by(b.iter(), |x, y| x.cmp(y))
        .fold((0, 0), |(union, inter), item| match item {
            EitherOrBoth::Both(_, _) => (union + 1, inter + 1),
            EitherOrBoth::Left(_) | EitherOrBoth::Right(_) => (union + 1, inter),
        })
}

/// Strength of connection between `u0` and `u1`
///
/// Zero unless each user lists the other as a friend. Otherwise the Jaccard
/// ratio `|F(u0) ∩ F(u1)| / |F(u0) ∪ F(u1)|` of their friend sets.
pub fn strength_of_connection(graph: &FriendshipGraph, u0: usize, u1: usize) -> f32 {
    if !graph.is_mutual(u0, u1) {
        return 0.0;
    }

    // Both friend sets are non-empty here, so the union is too
    let (union, intersection) =
        union_intersection_sizes(graph.friend_set(u0), graph.friend_set(u1));

    intersection as f32 / union as f32
}

/// Dense N×N table of strength-of-connection scores
///
/// Every ordered pair is scored, including `(i, i)`. The matrix is only
/// handed out once all rows are filled and is read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    scores: Array2<f32>,
}

impl SimilarityMatrix {
    /// Score every ordered pair of users in the graph
    pub fn compute(graph: &FriendshipGraph) -> Self {
        let n = graph.node_count;

        let cells: Vec<f32> = if n < PARALLEL_ROW_THRESHOLD {
            log::debug!("Computing {}x{} similarity matrix sequentially", n, n);
            (0..n).flat_map(|i| score_row(graph, i)).collect()
        } else {
            log::debug!("Computing {}x{} similarity matrix with parallel rows", n, n);
            (0..n)
                .into_par_iter()
                .map(|i| score_row(graph, i))
                .flatten_iter()
                .collect()
        };

        let scores = Array2::from_shape_vec((n, n), cells)
            .unwrap_or_else(|_| unreachable!("one score per ordered pair"));

        Self { scores }
    }

    /// Number of users covered by the matrix
    pub fn size(&self) -> usize {
        self.scores.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Score for the ordered pair `(i, j)`
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.scores[[i, j]]
    }

    /// Scores of user `i` against every user, ascending by id
    pub fn row(&self, i: usize) -> impl Iterator<Item = f32> + '_ {
        self.scores.row(i).into_iter().copied()
    }

    /// Copy the matrix out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.scores.rows().into_iter().map(|row| row.to_vec()).collect()
    }
}

fn score_row(graph: &FriendshipGraph, i: usize) -> Vec<f32> {
    (0..graph.node_count)
        .map(|j| strength_of_connection(graph, i, j))
        .collect()
}
