//! Four-stage text report of an analysis run

use itertools::Itertools;

use crate::data::preprocessing::largest_tag_user;
use crate::pipeline::CommunitySummary;

/// Community tags printed per line
pub const TAGS_PER_LINE: usize = 5;

/// Render the full report
pub fn render_report(summary: &CommunitySummary) -> String {
    let mut out = String::new();

    render_roster_stage(&mut out, summary);
    out.push('\n');
    render_pair_stage(&mut out, summary);
    out.push('\n');
    render_matrix_stage(&mut out, summary);
    out.push('\n');
    render_community_stage(&mut out, summary);

    out
}

fn stage_header(out: &mut String, stage: u32) {
    out.push_str(&format!("Stage {}\n==========\n", stage));
}

fn hashtags<'a>(tags: impl IntoIterator<Item = &'a str>) -> String {
    tags.into_iter().map(|tag| format!("#{}", tag)).join(" ")
}

/// Stage 1: roster size and the user with the most tags
fn render_roster_stage(out: &mut String, summary: &CommunitySummary) {
    let roster = summary.roster();
    stage_header(out, 1);
    out.push_str(&format!("Number of users: {}\n", roster.len()));

    if let Some(user) = largest_tag_user(roster) {
        out.push_str(&format!("u{} has the largest number of hashtags:\n", user.id));
        out.push_str(&hashtags(user.tags.iter().map(String::as_str)));
        out.push('\n');
    }
}

/// Stage 2: strength of connection between u0 and u1
fn render_pair_stage(out: &mut String, summary: &CommunitySummary) {
    stage_header(out, 2);

    let similarity = summary.similarity();
    if similarity.size() >= 2 {
        out.push_str(&format!(
            "Strength of connection between u0 and u1: {:4.2}\n",
            similarity.get(0, 1)
        ));
    }
}

/// Stage 3: the full similarity matrix
fn render_matrix_stage(out: &mut String, summary: &CommunitySummary) {
    stage_header(out, 3);

    let similarity = summary.similarity();
    for i in 0..similarity.size() {
        let row = similarity.row(i).map(|score| format!("{:4.2}", score)).join(" ");
        out.push_str(&row);
        out.push('\n');
    }
}

/// Stage 4: one block per core user
fn render_community_stage(out: &mut String, summary: &CommunitySummary) {
    stage_header(out, 4);

    for community in summary.communities() {
        out.push_str(&format!(
            "Stage 4.1. Core user: u{}; close friends:",
            community.core_user
        ));
        for friend in &community.close_friends {
            out.push_str(&format!(" u{}", friend));
        }
        out.push_str("\nStage 4.2. Hashtags:\n");

        for line in &community.tags.iter().chunks(TAGS_PER_LINE) {
            out.push_str(&hashtags(line));
            out.push('\n');
        }
    }
}
