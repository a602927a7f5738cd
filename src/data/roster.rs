//! Reader for the plain-text roster format
//!
//! ```text
//! u0 2010 #rust #graphs
//! u1 2012 #graphs
//! 0 1
//! 1 0
//! 0.3 1
//! ```
//!
//! User lines come first, then the N×N adjacency matrix of `0`/`1` values,
//! then the similarity threshold and the close-friend count threshold.

use std::path::Path;

use anyhow::Context;

use crate::config::{Capacity, Thresholds};
use crate::data::{Dataset, Roster, User};
use crate::error::{AnalysisError, Result};
use crate::graph::FriendshipGraph;

/// Load and parse a roster file
pub fn load_dataset(path: &str, capacity: &Capacity) -> anyhow::Result<Dataset> {
    log::info!("Reading roster file: {}", path);

    if !Path::new(path).exists() {
        return Err(anyhow::anyhow!("File not found: {}", path));
    }

    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file {}", path))?;

    let dataset = parse_dataset(&input, capacity)
        .with_context(|| format!("invalid roster file {}", path))?;

    Ok(dataset)
}

/// Parse a complete roster document
pub fn parse_dataset(input: &str, capacity: &Capacity) -> Result<Dataset> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .peekable();

    // User section: every leading line that starts with 'u'
    let mut users = Vec::new();
    while let Some((line_no, line)) = lines.next_if(|(_, line)| line.starts_with('u')) {
        users.push(parse_user_line(line_no, line)?);
    }

    let roster = Roster::new(users, capacity)?;
    log::info!("Loaded {} users", roster.len());

    let mut tokens = Tokens {
        inner: lines.flat_map(|(line_no, line)| {
            line.split_whitespace().map(move |token| (line_no, token))
        }),
        last_line: input.lines().count(),
    };

    let n = roster.len();
    let mut rows = Vec::with_capacity(n);
    for _ in 0..n {
        let mut row = Vec::with_capacity(n);
        for _ in 0..n {
            let (line_no, token) = tokens.next("adjacency value")?;
            let is_friend = match token {
                "0" => false,
                "1" => true,
                other => {
                    return Err(AnalysisError::parse(
                        line_no,
                        format!("adjacency value must be 0 or 1, got {:?}", other),
                    ))
                }
            };
            row.push(is_friend);
        }
        rows.push(row);
    }
    let graph = FriendshipGraph::from_matrix(&rows)?;
    log::info!("Loaded friendship matrix with {} declared friendships", graph.edge_count());

    let (line_no, token) = tokens.next("similarity threshold")?;
    let similarity: f32 = token.parse().map_err(|_| {
        AnalysisError::parse(line_no, format!("invalid similarity threshold {:?}", token))
    })?;

    let (line_no, token) = tokens.next("close-friend threshold")?;
    let close_friends: usize = token.parse().map_err(|_| {
        AnalysisError::parse(
            line_no,
            format!("close-friend threshold must be a non-negative integer, got {:?}", token),
        )
    })?;

    if let Some((line_no, token)) = tokens.inner.next() {
        return Err(AnalysisError::parse(
            line_no,
            format!("unexpected trailing input {:?}", token),
        ));
    }

    let thresholds = Thresholds::new(similarity, close_friends)?;
    Dataset::new(roster, graph, thresholds)
}

/// Parse `u<id> <year> #tag ...`
fn parse_user_line(line_no: usize, line: &str) -> Result<User> {
    let mut fields = line.split_whitespace();

    let id = fields
        .next()
        .and_then(|field| field.strip_prefix('u'))
        .and_then(|digits| digits.parse::<usize>().ok())
        .ok_or_else(|| AnalysisError::parse(line_no, "expected user id of the form u<number>"))?;

    let year = fields
        .next()
        .ok_or_else(|| AnalysisError::parse(line_no, "missing enrollment year"))?;
    let year: i32 = year
        .parse()
        .map_err(|_| AnalysisError::parse(line_no, format!("invalid year {:?}", year)))?;

    let tags = fields
        .map(|field| {
            field
                .strip_prefix('#')
                .map(str::to_string)
                .ok_or_else(|| {
                    AnalysisError::parse(line_no, format!("hashtag must start with '#', got {:?}", field))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(User::new(id, year, tags))
}

/// Whitespace tokens tagged with their line number
struct Tokens<I> {
    inner: I,
    last_line: usize,
}

impl<'a, I: Iterator<Item = (usize, &'a str)>> Tokens<I> {
    fn next(&mut self, expected: &str) -> Result<(usize, &'a str)> {
        self.inner.next().ok_or_else(|| {
            AnalysisError::parse(
                self.last_line,
                format!("unexpected end of input, expected {}", expected),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
u0 2010 #zeta #alpha
u1 2012 #alpha #beta
u2 2015 #music
0 1 1
1 0 1
1 1 0
0.3 0
";

    #[test]
    fn test_parse_sample() {
        let dataset = parse_dataset(SAMPLE, &Capacity::default()).unwrap();

        assert_eq!(dataset.roster.len(), 3);
        assert_eq!(dataset.roster.user(0).tags, vec!["zeta", "alpha"]);
        assert_eq!(dataset.roster.user(1).year, 2012);
        assert_eq!(dataset.graph.friend_set(0), &[1, 2]);
        assert_eq!(dataset.thresholds.similarity, 0.3);
        assert_eq!(dataset.thresholds.close_friends, 0);
    }

    #[test]
    fn test_parse_user_without_tags() {
        let dataset = parse_dataset("u0 1999\n0\n0.5 1\n", &Capacity::default()).unwrap();
        assert!(dataset.roster.user(0).tags.is_empty());
    }

    #[test]
    fn test_parse_matrix_split_across_lines() {
        let dataset = parse_dataset("u0 1 #a\nu1 1 #b\n0 1 1\n0\n0.1 2", &Capacity::default()).unwrap();
        assert!(dataset.graph.is_mutual(0, 1));
        assert_eq!(dataset.thresholds.close_friends, 2);
    }

    #[test]
    fn test_parse_empty_roster() {
        let dataset = parse_dataset("0.5 0\n", &Capacity::default()).unwrap();
        assert!(dataset.roster.is_empty());
        assert_eq!(dataset.graph.node_count, 0);
    }

    #[test]
    fn test_rejects_non_binary_adjacency() {
        let err = parse_dataset("u0 1 #a\n2\n0.5 0\n", &Capacity::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_rejects_missing_thresholds() {
        let err = parse_dataset("u0 1 #a\n0\n0.5\n", &Capacity::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_rejects_negative_core_threshold() {
        let err = parse_dataset("u0 1 #a\n0\n0.5 -1\n", &Capacity::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { .. }));
    }

    #[test]
    fn test_rejects_trailing_input() {
        let err = parse_dataset("u0 1 #a\n0\n0.5 1\n7\n", &Capacity::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { line: 4, .. }));
    }

    #[test]
    fn test_rejects_tag_without_hash() {
        let err = parse_dataset("u0 1 rust\n0\n0.5 1\n", &Capacity::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_rejects_bad_user_id() {
        let err = parse_dataset("ux 1 #a\n0\n0.5 1\n", &Capacity::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_roster_validation_applies() {
        let err = parse_dataset("u1 1 #a\n0\n0.5 1\n", &Capacity::default()).unwrap_err();
        assert_eq!(err, AnalysisError::UserOutOfRange { id: 1, count: 1 });
    }

    #[test]
    fn test_rejects_nan_threshold() {
        let err = parse_dataset("0\n", &Capacity::default());
        assert!(err.is_err());
        let err = parse_dataset("NaN 1\n", &Capacity::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidThreshold(_)));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_dataset("/nonexistent/roster.txt", &Capacity::default()).is_err());
    }
}
