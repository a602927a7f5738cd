//! Close-friend classification and core-user communities

pub mod detection;
pub mod metrics;

use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::topics::TagSet;

/// Close-friend relation and core-user set for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Thresholds the classification was computed with
    pub thresholds: Thresholds,

    /// close_friends[i]: every j with similarity(i, j) > ths, ascending
    close_friends: Vec<Vec<usize>>,

    /// core[i]: whether user i has more than thc close friends
    core: Vec<bool>,
}

impl Classification {
    /// Number of users classified
    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// Close friends of `user`, ascending by id
    pub fn close_friends(&self, user: usize) -> &[usize] {
        &self.close_friends[user]
    }

    pub fn close_friend_count(&self, user: usize) -> usize {
        self.close_friends[user].len()
    }

    pub fn is_close_friend(&self, user: usize, other: usize) -> bool {
        self.close_friends[user].binary_search(&other).is_ok()
    }

    pub fn is_core(&self, user: usize) -> bool {
        self.core[user]
    }

    /// Core users in ascending id order
    pub fn core_users(&self) -> impl Iterator<Item = usize> + '_ {
        self.core
            .iter()
            .enumerate()
            .filter(|(_, is_core)| **is_core)
            .map(|(user, _)| user)
    }

    pub fn core_count(&self) -> usize {
        self.core.iter().filter(|is_core| **is_core).count()
    }
}

/// Community report for one core user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    /// The core user the community is centred on
    pub core_user: usize,

    /// The core user's close friends, ascending
    pub close_friends: Vec<usize>,

    /// Tags of the core user and all close friends, sorted and unique
    pub tags: TagSet,
}
