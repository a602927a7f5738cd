//! Sorted, duplicate-free tag collections

use serde::{Deserialize, Serialize};

/// Ordered set of tags kept in ascending byte-lexicographic order
///
/// Insertion is a binary search followed by an in-place insert, which is
/// linear in the collection size. Rosters are small, so this keeps tags in
/// one contiguous vector that renders without any extra sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag at its sorted position unless it is already present
    ///
    /// Returns `true` if the tag was added.
    pub fn insert(&mut self, tag: &str) -> bool {
        match self.tags.binary_search_by(|probe| probe.as_str().cmp(tag)) {
            Ok(_) => false,
            Err(pos) => {
                self.tags.insert(pos, tag.to_string());
                true
            }
        }
    }

    /// Insert every tag in order
    pub fn extend<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            self.insert(tag.as_ref());
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags
            .binary_search_by(|probe| probe.as_str().cmp(tag))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate tags in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        set.extend(iter);
        set
    }
}
