//! Community summary pipeline
//!
//! Each stage consumes the previous one, so similarity is always complete
//! before classification starts and classification is always complete before
//! any community is summarized:
//!
//! `Pipeline` → `SimilarityStage` → `ClassifiedStage` → `CommunitySummary`

use crate::cluster::detection::classify;
use crate::cluster::{Classification, Community};
use crate::config::Thresholds;
use crate::data::{Dataset, Roster};
use crate::graph::{FriendshipGraph, SimilarityMatrix};
use crate::topics::TagSet;

/// Unclassified input: roster and friendship graph
pub struct Pipeline {
    roster: Roster,
    graph: FriendshipGraph,
}

impl Pipeline {
    pub fn new(roster: Roster, graph: FriendshipGraph) -> Self {
        Self { roster, graph }
    }

    /// Score every ordered pair of users
    pub fn compute_similarity(self) -> SimilarityStage {
        log::info!("Computing strength of connection for {} users", self.roster.len());
        let similarity = SimilarityMatrix::compute(&self.graph);

        SimilarityStage {
            roster: self.roster,
            graph: self.graph,
            similarity,
        }
    }
}

/// Similarity matrix fully computed
pub struct SimilarityStage {
    roster: Roster,
    graph: FriendshipGraph,
    similarity: SimilarityMatrix,
}

impl SimilarityStage {
    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Apply both thresholds to every user
    pub fn classify(self, thresholds: &Thresholds) -> ClassifiedStage {
        let classification = classify(&self.similarity, thresholds);

        ClassifiedStage {
            roster: self.roster,
            graph: self.graph,
            similarity: self.similarity,
            classification,
        }
    }
}

/// Close friends and core users known for every user
pub struct ClassifiedStage {
    roster: Roster,
    graph: FriendshipGraph,
    similarity: SimilarityMatrix,
    classification: Classification,
}

impl ClassifiedStage {
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Build one community per core user, ascending by id
    pub fn summarize(self) -> CommunitySummary {
        let communities: Vec<Community> = self
            .classification
            .core_users()
            .map(|core_user| build_community(&self.roster, &self.classification, core_user))
            .collect();

        log::info!("Summarized {} communities", communities.len());

        CommunitySummary {
            roster: self.roster,
            graph: self.graph,
            similarity: self.similarity,
            classification: self.classification,
            communities,
        }
    }
}

/// Tags of the core user first, then of each close friend in ascending order
fn build_community(roster: &Roster, classification: &Classification, core_user: usize) -> Community {
    let close_friends = classification.close_friends(core_user).to_vec();

    let mut tags = TagSet::new();
    tags.extend(&roster.user(core_user).tags);
    for &friend in &close_friends {
        tags.extend(&roster.user(friend).tags);
    }

    log::debug!(
        "Core user u{}: {} close friends, {} community tags",
        core_user,
        close_friends.len(),
        tags.len()
    );

    Community {
        core_user,
        close_friends,
        tags,
    }
}

/// Terminal state: every derived structure of one run
#[derive(Debug, Clone)]
pub struct CommunitySummary {
    roster: Roster,
    graph: FriendshipGraph,
    similarity: SimilarityMatrix,
    classification: Classification,
    communities: Vec<Community>,
}

impl CommunitySummary {
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn graph(&self) -> &FriendshipGraph {
        &self.graph
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.classification.thresholds
    }

    pub fn is_core(&self, user: usize) -> bool {
        self.classification.is_core(user)
    }

    /// Communities of core users, ascending by core user id
    pub fn communities(&self) -> &[Community] {
        &self.communities
    }
}

/// Run every stage over a dataset with its own thresholds
pub fn run(dataset: Dataset) -> CommunitySummary {
    run_with_thresholds(dataset.roster, dataset.graph, &dataset.thresholds)
}

/// Run every stage with explicit thresholds
pub fn run_with_thresholds(
    roster: Roster,
    graph: FriendshipGraph,
    thresholds: &Thresholds,
) -> CommunitySummary {
    Pipeline::new(roster, graph)
        .compute_similarity()
        .classify(thresholds)
        .summarize()
}
