//! Configuration for roster capacity and classification thresholds

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Size limits enforced when a roster is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    /// Maximum number of users in one roster
    pub max_users: usize,

    /// Maximum number of tags a single user may carry
    pub max_tags_per_user: usize,

    /// Maximum length of one tag, in bytes
    pub max_tag_length: usize,
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            max_users: 50,
            max_tags_per_user: 10,
            max_tag_length: 20,
        }
    }
}

impl Capacity {
    /// Create a capacity with custom limits
    pub fn new(max_users: usize, max_tags_per_user: usize, max_tag_length: usize) -> Self {
        Self {
            max_users,
            max_tags_per_user,
            max_tag_length,
        }
    }
}

/// The two scalar thresholds that drive classification for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// `ths`: similarity must be strictly greater for a close friend
    pub similarity: f32,

    /// `thc`: close-friend count must be strictly greater for a core user
    pub close_friends: usize,
}

impl Thresholds {
    /// Create thresholds, rejecting a similarity threshold that is NaN or infinite
    pub fn new(similarity: f32, close_friends: usize) -> Result<Self> {
        if !similarity.is_finite() {
            return Err(AnalysisError::InvalidThreshold(format!(
                "similarity threshold must be finite, got {}",
                similarity
            )));
        }

        Ok(Self {
            similarity,
            close_friends,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity_matches_roster_limits() {
        let capacity = Capacity::default();
        assert_eq!(capacity.max_users, 50);
        assert_eq!(capacity.max_tags_per_user, 10);
        assert_eq!(capacity.max_tag_length, 20);
    }

    #[test]
    fn test_thresholds_reject_nan() {
        assert!(matches!(
            Thresholds::new(f32::NAN, 1),
            Err(AnalysisError::InvalidThreshold(_))
        ));
        assert!(Thresholds::new(f32::INFINITY, 1).is_err());
    }

    #[test]
    fn test_thresholds_accept_negative_similarity() {
        let thresholds = Thresholds::new(-0.5, 0).unwrap();
        assert_eq!(thresholds.similarity, -0.5);
        assert_eq!(thresholds.close_friends, 0);
    }
}
