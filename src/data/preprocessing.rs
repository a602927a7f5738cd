//! Roster statistics computed before analysis

use crate::data::{Roster, User};

/// User with the largest number of tags
///
/// Ties go to the lowest identifier. Returns `None` when no user has any tag.
pub fn largest_tag_user(roster: &Roster) -> Option<&User> {
    let mut largest: Option<&User> = None;

    for user in roster.users() {
        let best = largest.map_or(0, |u| u.tags.len());
        if user.tags.len() > best {
            largest = Some(user);
        }
    }

    largest
}

/// Total number of tags across all users
pub fn total_tag_count(roster: &Roster) -> usize {
    roster.users().iter().map(|user| user.tags.len()).sum()
}
