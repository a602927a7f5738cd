//! Threshold-based close-friend and core-user detection

use rayon::prelude::*;

use crate::cluster::Classification;
use crate::config::Thresholds;
use crate::graph::SimilarityMatrix;

/// Rosters at or above this size classify users in parallel
const PARALLEL_USER_THRESHOLD: usize = 256;

/// `similarity(i, j) > ths`, strictly
pub fn is_close_friend(matrix: &SimilarityMatrix, i: usize, j: usize, ths: f32) -> bool {
    matrix.get(i, j) > ths
}

/// More than `thc` close friends, strictly
pub fn is_core_user(close_friend_count: usize, thc: usize) -> bool {
    close_friend_count > thc
}

/// Every `j` that is a close friend of `user`, ascending
///
/// `j == user` is evaluated like any other pair, so a user whose self score
/// clears the threshold counts as its own close friend.
pub fn close_friends_of(matrix: &SimilarityMatrix, user: usize, ths: f32) -> Vec<usize> {
    matrix
        .row(user)
        .enumerate()
        .filter(|&(_, score)| score > ths)
        .map(|(j, _)| j)
        .collect()
}

/// Classify every user against both thresholds
pub fn classify(matrix: &SimilarityMatrix, thresholds: &Thresholds) -> Classification {
    let n = matrix.size();
    log::info!(
        "Classifying {} users (ths = {}, thc = {})",
        n,
        thresholds.similarity,
        thresholds.close_friends
    );

    let close_friends: Vec<Vec<usize>> = if n < PARALLEL_USER_THRESHOLD {
        (0..n)
            .map(|user| close_friends_of(matrix, user, thresholds.similarity))
            .collect()
    } else {
        (0..n)
            .into_par_iter()
            .map(|user| close_friends_of(matrix, user, thresholds.similarity))
            .collect()
    };

    let core: Vec<bool> = close_friends
        .iter()
        .map(|friends| is_core_user(friends.len(), thresholds.close_friends))
        .collect();

    let classification = Classification {
        thresholds: *thresholds,
        close_friends,
        core,
    };

    log::info!(
        "Found {} core users out of {}",
        classification.core_count(),
        n
    );

    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;
    use crate::graph::FriendshipGraph;
    use proptest::prelude::*;

    fn triangle_matrix() -> SimilarityMatrix {
        let mut builder = GraphBuilder::new(3);
        builder.add_mutual(0, 1).unwrap();
        builder.add_mutual(1, 2).unwrap();
        builder.add_mutual(0, 2).unwrap();
        SimilarityMatrix::compute(&builder.build())
    }

    #[test]
    fn test_triangle_users_are_core() {
        let matrix = triangle_matrix();
        let classification = classify(&matrix, &Thresholds::new(0.3, 0).unwrap());

        assert!(is_close_friend(&matrix, 0, 1, 0.3));
        assert_eq!(classification.close_friends(0), &[1, 2]);
        assert!(classification.is_core(0));
        assert_eq!(classification.core_users().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_threshold_comparisons_are_strict() {
        let matrix = triangle_matrix();
        let ths = matrix.get(0, 1);

        assert!(!is_close_friend(&matrix, 0, 1, ths));
        assert!(!is_core_user(2, 2));
        assert!(is_core_user(3, 2));

        let classification = classify(&matrix, &Thresholds::new(0.3, 2).unwrap());
        assert_eq!(classification.close_friend_count(0), 2);
        assert_eq!(classification.core_count(), 0);
    }

    #[test]
    fn test_user_can_be_own_close_friend() {
        // u0 lists itself and is mutual with u1, so similarity(0, 0) = 1
        let mut builder = GraphBuilder::new(2);
        builder.add_edge(0, 0).unwrap().add_mutual(0, 1).unwrap();
        let matrix = SimilarityMatrix::compute(&builder.build());

        let classification = classify(&matrix, &Thresholds::new(0.5, 0).unwrap());
        assert!(classification.is_close_friend(0, 0));
        assert_eq!(classification.close_friends(0), &[0]);
        assert!(classification.is_core(0));
    }

    #[test]
    fn test_negative_threshold_admits_zero_scores() {
        let matrix = triangle_matrix();
        let classification = classify(&matrix, &Thresholds::new(-1.0, 2).unwrap());
        assert_eq!(classification.close_friends(0), &[0, 1, 2]);
        assert!(classification.is_core(0));
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = SimilarityMatrix::compute(&FriendshipGraph::empty());
        let classification = classify(&matrix, &Thresholds::new(0.1, 0).unwrap());
        assert!(classification.is_empty());
        assert_eq!(classification.core_users().count(), 0);
    }

    fn arb_matrix() -> impl Strategy<Value = SimilarityMatrix> {
        (0usize..7).prop_flat_map(|n| {
            prop::collection::vec(prop::collection::vec(any::<bool>(), n), n).prop_map(|rows| {
                SimilarityMatrix::compute(&FriendshipGraph::from_matrix(&rows).unwrap())
            })
        })
    }

    proptest! {
        #[test]
        fn prop_lower_thc_never_shrinks_core_set(
            matrix in arb_matrix(),
            ths in 0.0f32..1.0,
            thc in 0usize..6,
        ) {
            let high = classify(&matrix, &Thresholds::new(ths, thc + 1).unwrap());
            let low = classify(&matrix, &Thresholds::new(ths, thc).unwrap());
            for user in high.core_users() {
                prop_assert!(low.is_core(user));
            }
        }

        #[test]
        fn prop_higher_ths_never_grows_close_friends(
            matrix in arb_matrix(),
            ths in 0.0f32..1.0,
            delta in 0.0f32..0.5,
        ) {
            let low = classify(&matrix, &Thresholds::new(ths, 0).unwrap());
            let high = classify(&matrix, &Thresholds::new(ths + delta, 0).unwrap());
            for user in 0..matrix.size() {
                prop_assert!(high.close_friend_count(user) <= low.close_friend_count(user));
            }
        }
    }
}
