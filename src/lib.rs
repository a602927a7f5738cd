//! Core library for the community topic analyzer

pub mod config;
pub mod error;
pub mod data;
pub mod graph;
pub mod cluster;
pub mod topics;
pub mod pipeline;
pub mod report;
pub mod storage;

pub use error::{AnalysisError, Result};
