//! Summary statistics over a classification

use serde::{Deserialize, Serialize};

use crate::cluster::Classification;

/// Aggregate figures describing a classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationStats {
    pub user_count: usize,
    pub core_count: usize,

    /// Total entries in the close-friend relation
    pub close_friend_pairs: usize,

    pub max_close_friends: usize,

    /// Mean close-friend count per user, 0 for an empty roster
    pub avg_close_friends: f64,

    /// Users counted among their own close friends
    pub self_close_friends: usize,
}

/// Calculate statistics for a classification
pub fn calculate_stats(classification: &Classification) -> ClassificationStats {
    let user_count = classification.len();

    let counts: Vec<usize> = (0..user_count)
        .map(|user| classification.close_friend_count(user))
        .collect();
    let close_friend_pairs: usize = counts.iter().sum();

    let avg_close_friends = if user_count == 0 {
        0.0
    } else {
        close_friend_pairs as f64 / user_count as f64
    };

    ClassificationStats {
        user_count,
        core_count: classification.core_count(),
        close_friend_pairs,
        max_close_friends: counts.iter().copied().max().unwrap_or(0),
        avg_close_friends,
        self_close_friends: (0..user_count)
            .filter(|&user| classification.is_close_friend(user, user))
            .count(),
    }
}
