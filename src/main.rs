use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;

use community_topic_analyzer::config::{Capacity, Thresholds};
use community_topic_analyzer::data::roster::{load_dataset, parse_dataset};
use community_topic_analyzer::data::Dataset;
use community_topic_analyzer::{pipeline, report, storage};

#[derive(Parser, Debug)]
#[clap(
    name = "community-topic-analyzer",
    about = "Detect core users and their community topics in a small social network"
)]
struct Cli {
    /// Path to the roster file, or "-" to read standard input
    #[clap(long, default_value = "-")]
    input: String,

    /// Directory for JSON results (skipped when absent)
    #[clap(long)]
    output_dir: Option<String>,

    /// Override the similarity threshold (ths) from the input
    #[clap(long, allow_negative_numbers = true)]
    ths: Option<f32>,

    /// Override the close-friend count threshold (thc) from the input
    #[clap(long)]
    thc: Option<usize>,

    /// Maximum number of users in the roster
    #[clap(long, default_value = "50")]
    max_users: usize,

    /// Maximum number of hashtags per user
    #[clap(long, default_value = "10")]
    max_tags: usize,

    /// Maximum hashtag length
    #[clap(long, default_value = "20")]
    max_tag_length: usize,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn read_input(input: &str, capacity: &Capacity) -> Result<Dataset> {
    if input != "-" {
        return load_dataset(input, capacity);
    }

    log::info!("Reading roster from standard input");
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read standard input")?;

    Ok(parse_dataset(&text, capacity)?)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so the report on stdout stays clean
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let capacity = Capacity::new(args.max_users, args.max_tags, args.max_tag_length);

    // 1. Load roster
    let mut dataset = read_input(&args.input, &capacity)?;
    log::info!(
        "Loaded {} users with {} declared friendships",
        dataset.roster.len(),
        dataset.graph.edge_count()
    );

    if args.ths.is_some() || args.thc.is_some() {
        dataset.thresholds = Thresholds::new(
            args.ths.unwrap_or(dataset.thresholds.similarity),
            args.thc.unwrap_or(dataset.thresholds.close_friends),
        )?;
        log::info!("Using overridden thresholds {:?}", dataset.thresholds);
    }

    // 2. Similarity, classification and community summaries
    let summary = pipeline::run(dataset);

    // 3. Report
    print!("{}", report::render_report(&summary));

    // 4. Save results if requested
    if let Some(output_dir) = &args.output_dir {
        storage::save_results(&summary, output_dir)?;
        log::info!("Analysis complete. Results saved to {}", output_dir);
    }

    Ok(())
}
