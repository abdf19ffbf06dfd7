//! The `run` command: collect, analyze, and export a research run.
//!
//! Fatal failures (missing credentials, rejected authentication, an
//! unreadable research config, zero collected items) abort the run with a
//! distinct error. Per-search failures are handled further down the stack
//! and never surface here.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use redscout_analysis::{analyze, enrich};
use redscout_core::{
    load_app_config_from_env, load_research_config, parse_research_config, ResearchConfig,
};
use redscout_reddit::{collect_items, Pacer, RedditClient};

use crate::export;

pub(crate) async fn run(config_path: Option<&Path>, out_dir: &Path) -> anyhow::Result<()> {
    let app_config =
        load_app_config_from_env().context("loading Reddit credentials from environment")?;

    // RUST_LOG wins when set; the configured level is the default.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(app_config.log_level.clone())),
        )
        .init();

    let research = load_research(config_path)?;

    tracing::info!(
        topic = %research.topic,
        search_terms = research.search_terms.len(),
        subreddits = research.subreddits.len(),
        entities = research.entities_to_track.len(),
        "starting research run"
    );

    let client = RedditClient::connect(&app_config)
        .await
        .context("Reddit authentication failed")?;

    let mut pacer = Pacer::new(Duration::from_millis(app_config.search_delay_ms));
    let mut items = collect_items(&client, &research, &mut pacer, |event| {
        tracing::info!(
            scope = %event.scope,
            term = %event.term,
            new_items = event.new_items,
            "search finished"
        );
    })
    .await;

    if items.is_empty() {
        anyhow::bail!("no results collected for topic '{}'", research.topic);
    }
    tracing::info!(items = items.len(), "collection complete");

    enrich(&mut items, &research);
    let report = analyze(&items, &research);

    let paths = export::write_artifacts(out_dir, &research, &items, &report)
        .context("writing export artifacts")?;

    print_summary(&report);
    println!();
    println!("Sheets:  {}", paths.sheet_dir.display());
    println!("Report:  {}", paths.report_path.display());
    println!("Summary: {}", paths.output_path.display());

    Ok(())
}

fn load_research(path: Option<&Path>) -> anyhow::Result<ResearchConfig> {
    match path {
        Some(p) => Ok(load_research_config(p)?),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading research config from stdin")?;
            Ok(parse_research_config(&buffer)?)
        }
    }
}

fn print_summary(report: &redscout_analysis::AnalysisReport) {
    println!(
        "Collected {} posts and {} comments across {} subreddits.",
        report.engagement.total_posts,
        report.engagement.total_comments,
        report.subreddits.len()
    );
    println!(
        "Sentiment: {} positive, {} negative, {} neutral.",
        report.sentiment.positive, report.sentiment.negative, report.sentiment.neutral
    );
    if let Some((entity, count)) = report.entities.iter().max_by_key(|(_, count)| **count) {
        println!("Most mentioned entity: {entity} ({count} mentions).");
    }
}
