//! User roster model and input handling

pub mod preprocessing;
pub mod roster;

use serde::{Deserialize, Serialize};

use crate::config::{Capacity, Thresholds};
use crate::error::{AnalysisError, Result};
use crate::graph::FriendshipGraph;

/// One member of the network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier, also the user's index in the roster
    pub id: usize,

    /// Enrollment year, carried through but not used by any analysis
    pub year: i32,

    /// Tags in the order they were read
    pub tags: Vec<String>,
}

impl User {
    pub fn new(id: usize, year: i32, tags: Vec<String>) -> Self {
        Self { id, year, tags }
    }
}

/// Users indexed by identifier, validated against a capacity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    users: Vec<User>,
}

impl Roster {
    /// Validate and index users
    ///
    /// Identifiers must cover exactly `0..N-1`, in any input order.
    pub fn new(mut users: Vec<User>, capacity: &Capacity) -> Result<Self> {
        let count = users.len();
        if count > capacity.max_users {
            return Err(AnalysisError::TooManyUsers {
                count,
                max: capacity.max_users,
            });
        }

        let mut seen = vec![false; count];
        for user in &users {
            if user.id >= count {
                return Err(AnalysisError::UserOutOfRange { id: user.id, count });
            }
            if std::mem::replace(&mut seen[user.id], true) {
                return Err(AnalysisError::DuplicateUser(user.id));
            }
            validate_tags(user, capacity)?;
        }

        users.sort_unstable_by_key(|user| user.id);
        log::debug!("Validated roster of {} users", count);

        Ok(Self { users })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// User with identifier `id`; panics if out of range
    pub fn user(&self, id: usize) -> &User {
        &self.users[id]
    }

    pub fn get(&self, id: usize) -> Option<&User> {
        self.users.get(id)
    }

    /// Users in ascending identifier order
    pub fn users(&self) -> &[User] {
        &self.users
    }
}

fn validate_tags(user: &User, capacity: &Capacity) -> Result<()> {
    if user.tags.len() > capacity.max_tags_per_user {
        return Err(AnalysisError::TooManyTags {
            user: user.id,
            count: user.tags.len(),
            max: capacity.max_tags_per_user,
        });
    }

    for tag in &user.tags {
        let reason = if tag.is_empty() {
            Some("tag is empty".to_string())
        } else if tag.len() > capacity.max_tag_length {
            Some(format!("longer than {} bytes", capacity.max_tag_length))
        } else if tag.contains(char::is_whitespace) {
            Some("tag contains whitespace".to_string())
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(AnalysisError::InvalidTag {
                user: user.id,
                tag: tag.clone(),
                reason,
            });
        }
    }

    Ok(())
}

/// Everything one analysis run consumes
#[derive(Debug, Clone)]
pub struct Dataset {
    pub roster: Roster,
    pub graph: FriendshipGraph,
    pub thresholds: Thresholds,
}

impl Dataset {
    /// Pair a roster with its graph, rejecting a graph of a different size
    pub fn new(roster: Roster, graph: FriendshipGraph, thresholds: Thresholds) -> Result<Self> {
        if graph.node_count != roster.len() {
            return Err(AnalysisError::MatrixShape {
                rows: graph.node_count,
                cols: graph.node_count,
                expected: roster.len(),
            });
        }

        Ok(Self {
            roster,
            graph,
            thresholds,
        })
    }
}
