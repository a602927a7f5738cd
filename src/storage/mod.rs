//! Results persistence module

use anyhow::Result;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::cluster::metrics::calculate_stats;
use crate::data::preprocessing::total_tag_count;
use crate::pipeline::CommunitySummary;

/// Save analysis results to the specified directory
pub fn save_results(summary: &CommunitySummary, output_dir: &str) -> Result<()> {
    log::info!(
        "Saving {} communities to {}",
        summary.communities().len(),
        output_dir
    );

    fs::create_dir_all(output_dir)?;

    save_summary(summary, output_dir)?;
    save_similarity(summary, output_dir)?;
    save_communities(summary, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save run-level counts and thresholds
fn save_summary(summary: &CommunitySummary, output_dir: &str) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let graph = summary.graph();
    let max_declared_friends = (0..graph.node_count)
        .map(|user| graph.out_degree(user))
        .max()
        .unwrap_or(0);

    let summary_json = json!({
        "graph_stats": {
            "user_count": graph.node_count,
            "declared_friendships": graph.edge_count(),
            "mutual_pairs": graph.mutual_pair_count(),
            "max_declared_friends": max_declared_friends,
            "tag_count": total_tag_count(summary.roster()),
        },
        "thresholds": summary.thresholds(),
        "classification_stats": calculate_stats(summary.classification()),
        "core_users": summary.classification().core_users().collect::<Vec<_>>(),
    });

    file.write_all(to_string_pretty(&summary_json)?.as_bytes())?;

    Ok(())
}

/// Save the similarity matrix as nested rows
fn save_similarity(summary: &CommunitySummary, output_dir: &str) -> Result<()> {
    log::info!("Saving similarity matrix");

    let path = Path::new(output_dir).join("similarity.json");
    let mut file = File::create(path)?;

    let matrix_json = json!({
        "size": summary.similarity().size(),
        "rows": summary.similarity().to_rows(),
    });

    file.write_all(to_string_pretty(&matrix_json)?.as_bytes())?;

    Ok(())
}

/// Save one entry per core user community
fn save_communities(summary: &CommunitySummary, output_dir: &str) -> Result<()> {
    log::info!("Saving community information");

    let path = Path::new(output_dir).join("communities.json");
    let mut file = File::create(path)?;

    let communities_json = json!({
        "communities": summary.communities(),
    });

    file.write_all(to_string_pretty(&communities_json)?.as_bytes())?;

    Ok(())
}
