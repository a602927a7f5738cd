//! Friendship graph representation and similarity scoring

pub mod compressed;
pub mod builder;
pub mod similarity;

pub use compressed::FriendshipGraph;
pub use similarity::{strength_of_connection, SimilarityMatrix};
