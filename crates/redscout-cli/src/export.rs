//! Export artifacts for a finished research run.
//!
//! A run produces three artifacts under the output directory:
//!
//! * a sheet directory of CSV files (summary, posts, comments, entity
//!   analysis, subreddit stats, top posts, positive highlights),
//! * a markdown report, and
//! * `research_output.json` with the run's headline numbers and paths.
//!
//! Sheet files with nothing to say (no tracked entities matched, no
//! positive highlights) are skipped rather than written empty.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;

use redscout_analysis::AnalysisReport;
use redscout_core::{Item, ItemKind, ResearchConfig, Sentiment};

/// Minimum post score for inclusion in the positive highlights sheet.
const HIGHLIGHT_MIN_SCORE: i64 = 5;

/// Entity rows shown in the markdown report.
const REPORT_ENTITY_ROWS: usize = 15;

/// Subreddit rows shown in the markdown report.
const REPORT_SUBREDDIT_ROWS: usize = 10;

/// Post titles are truncated to this many characters in the report.
const REPORT_TITLE_CHARS: usize = 80;

pub(crate) struct ExportPaths {
    pub sheet_dir: PathBuf,
    pub report_path: PathBuf,
    pub output_path: PathBuf,
}

/// Write all run artifacts under `out_dir` and return their paths.
pub(crate) fn write_artifacts(
    out_dir: &Path,
    config: &ResearchConfig,
    items: &[Item],
    report: &AnalysisReport,
) -> anyhow::Result<ExportPaths> {
    let base = format!(
        "research_{}_{}",
        topic_slug(&config.topic),
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let sheet_dir = out_dir.join(&base);
    fs::create_dir_all(&sheet_dir)
        .with_context(|| format!("creating sheet directory {}", sheet_dir.display()))?;

    write_sheets(&sheet_dir, config, items, report)?;

    let report_path = out_dir.join(format!("{base}.md"));
    fs::write(&report_path, render_report(config, report))
        .with_context(|| format!("writing {}", report_path.display()))?;

    let output_path = out_dir.join("research_output.json");
    let output = run_output(&sheet_dir, &report_path, report)?;
    fs::write(&output_path, output)
        .with_context(|| format!("writing {}", output_path.display()))?;

    Ok(ExportPaths {
        sheet_dir,
        report_path,
        output_path,
    })
}

fn write_sheets(
    dir: &Path,
    config: &ResearchConfig,
    items: &[Item],
    report: &AnalysisReport,
) -> anyhow::Result<()> {
    write_csv(&dir.join("summary.csv"), &summary_sheet(config, report))?;

    let mut posts: Vec<&Item> = items.iter().filter(|i| i.kind == ItemKind::Post).collect();
    posts.sort_by(|a, b| b.score.cmp(&a.score));
    write_csv(&dir.join("posts.csv"), &posts_sheet(&posts))?;

    let mut comments: Vec<&Item> = items
        .iter()
        .filter(|i| i.kind == ItemKind::Comment)
        .collect();
    comments.sort_by(|a, b| b.score.cmp(&a.score));
    write_csv(&dir.join("comments.csv"), &comments_sheet(&comments))?;

    if !report.entities.is_empty() {
        write_csv(&dir.join("entity_analysis.csv"), &entity_sheet(report))?;
    }

    write_csv(&dir.join("subreddit_stats.csv"), &subreddit_sheet(report))?;
    write_csv(&dir.join("top_posts.csv"), &top_posts_sheet(report))?;

    let highlights: Vec<&&Item> = posts
        .iter()
        .filter(|i| i.sentiment == Sentiment::Positive && i.score >= HIGHLIGHT_MIN_SCORE)
        .collect();
    if !highlights.is_empty() {
        let rows: Vec<&Item> = highlights.into_iter().copied().collect();
        write_csv(&dir.join("positive_highlights.csv"), &posts_sheet(&rows))?;
    }

    Ok(())
}

fn summary_sheet(config: &ResearchConfig, report: &AnalysisReport) -> Vec<Vec<String>> {
    vec![
        row(&["Metric", "Value"]),
        vec!["Topic".into(), config.topic.clone()],
        vec![
            "Total posts".into(),
            report.engagement.total_posts.to_string(),
        ],
        vec![
            "Total comments".into(),
            report.engagement.total_comments.to_string(),
        ],
        vec![
            "Subreddits covered".into(),
            report.subreddits.len().to_string(),
        ],
        vec![
            "Date range".into(),
            format!("{} to {}", report.date_range.earliest, report.date_range.latest),
        ],
        vec![
            "Average post score".into(),
            report.engagement.avg_score.to_string(),
        ],
        vec![
            "Total score".into(),
            report.engagement.total_score.to_string(),
        ],
        vec!["Positive items".into(), report.sentiment.positive.to_string()],
        vec!["Negative items".into(), report.sentiment.negative.to_string()],
        vec!["Neutral items".into(), report.sentiment.neutral.to_string()],
    ]
}

fn posts_sheet(posts: &[&Item]) -> Vec<Vec<String>> {
    let mut rows = vec![row(&[
        "id",
        "subreddit",
        "title",
        "author",
        "score",
        "upvote_ratio",
        "num_comments",
        "created",
        "url",
        "search_term",
        "entities",
        "sentiment",
        "text",
    ])];
    for post in posts {
        rows.push(vec![
            post.id.clone(),
            post.subreddit.clone(),
            post.title.clone(),
            post.author.clone(),
            post.score.to_string(),
            post.upvote_ratio.to_string(),
            post.num_comments.to_string(),
            post.created_date(),
            post.url.clone(),
            post.search_term.clone(),
            post.entities_mentioned.join("; "),
            post.sentiment.to_string(),
            post.text.clone(),
        ]);
    }
    rows
}

fn comments_sheet(comments: &[&Item]) -> Vec<Vec<String>> {
    let mut rows = vec![row(&[
        "id",
        "subreddit",
        "parent_title",
        "author",
        "score",
        "created",
        "url",
        "search_term",
        "entities",
        "sentiment",
        "text",
    ])];
    for comment in comments {
        rows.push(vec![
            comment.id.clone(),
            comment.subreddit.clone(),
            comment.parent_title.clone(),
            comment.author.clone(),
            comment.score.to_string(),
            comment.created_date(),
            comment.url.clone(),
            comment.search_term.clone(),
            comment.entities_mentioned.join("; "),
            comment.sentiment.to_string(),
            comment.text.clone(),
        ]);
    }
    rows
}

fn entity_sheet(report: &AnalysisReport) -> Vec<Vec<String>> {
    let mut rows = vec![row(&[
        "Entity",
        "Mentions",
        "Positive",
        "Negative",
        "Neutral",
        "Positive %",
    ])];
    for (entity, mentions) in sorted_entities(report) {
        let breakdown = report.entity_sentiment.get(entity);
        let (positive, negative, neutral) =
            breakdown.map_or((0, 0, 0), |b| (b.positive, b.negative, b.neutral));
        rows.push(vec![
            entity.clone(),
            mentions.to_string(),
            positive.to_string(),
            negative.to_string(),
            neutral.to_string(),
            format!("{:.1}", percent(positive, *mentions)),
        ]);
    }
    rows
}

fn subreddit_sheet(report: &AnalysisReport) -> Vec<Vec<String>> {
    let mut rows = vec![row(&["Subreddit", "Posts", "Avg Score", "Avg Comments"])];
    for stats in &report.subreddits {
        rows.push(vec![
            stats.subreddit.clone(),
            stats.posts.to_string(),
            stats.avg_score.to_string(),
            stats.avg_comments.to_string(),
        ]);
    }
    rows
}

fn top_posts_sheet(report: &AnalysisReport) -> Vec<Vec<String>> {
    let mut rows = vec![row(&[
        "Title",
        "Subreddit",
        "Score",
        "Comments",
        "Sentiment",
        "URL",
    ])];
    for post in &report.top_posts {
        rows.push(vec![
            post.title.clone(),
            post.subreddit.clone(),
            post.score.to_string(),
            post.num_comments.to_string(),
            post.sentiment.to_string(),
            post.url.clone(),
        ]);
    }
    rows
}

fn render_report(config: &ResearchConfig, report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Reddit Research Report: {}", config.topic);
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M"));
    let _ = writeln!(out);

    let _ = writeln!(out, "## Summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "- Total posts: {}", report.engagement.total_posts);
    let _ = writeln!(out, "- Total comments: {}", report.engagement.total_comments);
    let _ = writeln!(out, "- Subreddits covered: {}", report.subreddits.len());
    let _ = writeln!(
        out,
        "- Date range: {} to {}",
        report.date_range.earliest, report.date_range.latest
    );
    let _ = writeln!(out, "- Average post score: {}", report.engagement.avg_score);
    let _ = writeln!(out, "- Total score: {}", report.engagement.total_score);
    let _ = writeln!(out);

    let total = report.sentiment.total();
    let _ = writeln!(out, "## Sentiment");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "- Positive: {} ({:.1}%)",
        report.sentiment.positive,
        percent(report.sentiment.positive, total)
    );
    let _ = writeln!(
        out,
        "- Negative: {} ({:.1}%)",
        report.sentiment.negative,
        percent(report.sentiment.negative, total)
    );
    let _ = writeln!(
        out,
        "- Neutral: {} ({:.1}%)",
        report.sentiment.neutral,
        percent(report.sentiment.neutral, total)
    );
    let _ = writeln!(out);

    if !report.entities.is_empty() {
        let _ = writeln!(out, "## Entities");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Entity | Mentions | Positive | Negative | Neutral |");
        let _ = writeln!(out, "| --- | --- | --- | --- | --- |");
        for (entity, mentions) in sorted_entities(report).into_iter().take(REPORT_ENTITY_ROWS) {
            let breakdown = report.entity_sentiment.get(entity);
            let (positive, negative, neutral) =
                breakdown.map_or((0, 0, 0), |b| (b.positive, b.negative, b.neutral));
            let _ = writeln!(
                out,
                "| {entity} | {mentions} | {positive} | {negative} | {neutral} |"
            );
        }
        let _ = writeln!(out);
    }

    if !report.subreddits.is_empty() {
        let _ = writeln!(out, "## Top Subreddits");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Subreddit | Posts | Avg Score | Avg Comments |");
        let _ = writeln!(out, "| --- | --- | --- | --- |");
        for stats in report.subreddits.iter().take(REPORT_SUBREDDIT_ROWS) {
            let _ = writeln!(
                out,
                "| r/{} | {} | {} | {} |",
                stats.subreddit, stats.posts, stats.avg_score, stats.avg_comments
            );
        }
        let _ = writeln!(out);
    }

    if !report.top_posts.is_empty() {
        let _ = writeln!(out, "## Top Posts");
        let _ = writeln!(out);
        for (index, post) in report.top_posts.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} (r/{}, score {}, {} comments, {}) — {}",
                index + 1,
                truncate_title(&post.title),
                post.subreddit,
                post.score,
                post.num_comments,
                post.sentiment,
                post.url
            );
        }
        let _ = writeln!(out);
    }

    out
}

fn run_output(
    sheet_dir: &Path,
    report_path: &Path,
    report: &AnalysisReport,
) -> anyhow::Result<String> {
    let top_entities: serde_json::Map<String, serde_json::Value> = sorted_entities(report)
        .into_iter()
        .take(5)
        .map(|(entity, mentions)| (entity.clone(), serde_json::Value::from(*mentions)))
        .collect();

    let output = serde_json::json!({
        "sheets_dir": sheet_dir.display().to_string(),
        "report_file": report_path.display().to_string(),
        "total_posts": report.engagement.total_posts,
        "total_comments": report.engagement.total_comments,
        "sentiment": report.sentiment,
        "top_5_entities": top_entities,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Entities ordered by mention count, descending, then name.
fn sorted_entities(report: &AnalysisReport) -> Vec<(&String, &u64)> {
    let mut entities: Vec<(&String, &u64)> = report.entities.iter().collect();
    entities.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    entities
}

/// Derive a filename-safe slug from the research topic: keep word
/// characters, spaces, and hyphens, cap at 30 characters, then turn
/// spaces into underscores.
fn topic_slug(topic: &str) -> String {
    let kept: String = topic
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == ' ')
        .collect();
    kept.chars()
        .take(30)
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() <= REPORT_TITLE_CHARS {
        title.to_string()
    } else {
        let head: String = title.chars().take(REPORT_TITLE_CHARS).collect();
        format!("{head}...")
    }
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = part as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

fn row(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| (*f).to_string()).collect()
}

fn write_csv(path: &Path, rows: &[Vec<String>]) -> anyhow::Result<()> {
    let mut out = String::new();
    for fields in rows {
        let line: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        let _ = writeln!(out, "{}", line.join(","));
    }
    fs::write(path, out).with_context(|| format!("writing {}", path.display()))
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
