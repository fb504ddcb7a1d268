//! CLI output formatting

use crate::controller::GuidedNext;
use crate::core::{PipelineSnapshot, Progress, StatusKind, StepRegistry};
use chrono::{DateTime, Local};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a progress bar over the fixed step count
pub fn create_progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// Format a status kind for display
pub fn format_status_kind(kind: StatusKind) -> String {
    match kind {
        StatusKind::Pending => style("PENDING").dim().to_string(),
        StatusKind::Running => style("RUNNING").yellow().to_string(),
        StatusKind::Ok => style("OK").green().to_string(),
        StatusKind::Error => style("ERROR").red().to_string(),
    }
}

/// Render the stepper: one line per step with selection marker and status
pub fn render_stepper(snapshot: &PipelineSnapshot, registry: &StepRegistry, selected: usize) {
    for step in registry.iter() {
        let marker = if step.ordinal == selected { ">" } else { " " };
        println!(
            "{} {}. {:<16} {:<22} {}",
            marker,
            step.ordinal + 1,
            style(step.title).bold(),
            format_status_kind(snapshot.status_of(step.slug)),
            style(step.description).dim()
        );
    }
}

/// One-line progress summary
pub fn format_progress(progress: &Progress) -> String {
    format!(
        "{} {} of {} steps completed ({}%), {} running",
        INFO,
        style(progress.completed).green(),
        6,
        style(progress.percent).cyan(),
        style(progress.running).yellow()
    )
}

/// Ingest summary line, mirroring the dashboard header
pub fn format_summary(
    snapshot: &PipelineSnapshot,
    prefer_offline: bool,
    refreshed_at: Option<DateTime<Local>>,
) -> String {
    let mode = if prefer_offline { "offline" } else { "automatic" };

    let headline = snapshot
        .step("ingest")
        .and_then(|step| step.metrics.get("total_records"))
        .map(|total| format!("Ingested {} products · mode {}", total, mode))
        .unwrap_or_else(|| "No metrics available".to_string());

    match refreshed_at {
        Some(at) => format!("{} · updated at {}", headline, at.format("%H:%M:%S")),
        None => headline,
    }
}

/// Render the artifact listing grouped by bucket
pub fn render_artifacts(snapshot: &PipelineSnapshot) {
    let mut buckets: Vec<_> = snapshot.artifacts.iter().collect();
    buckets.sort_by_key(|(bucket, _)| bucket.to_owned());

    for (bucket, files) in buckets {
        println!("  {}", style(bucket.to_uppercase()).bold());
        for file in files {
            println!("    {}", file);
        }
    }
}

/// Render the last `limit` trace log entries
pub fn render_log_tail(entries: &[String], limit: usize) {
    let start = entries.len().saturating_sub(limit);
    for entry in &entries[start..] {
        println!("  {}", style(entry).dim());
    }
}

/// Format the guided recommendation
pub fn format_recommendation(next: GuidedNext, registry: &StepRegistry) -> String {
    match next {
        GuidedNext::Step(index) => {
            let step = registry.by_index(index);
            format!(
                "{} Next step: {} ({})",
                SPINNER,
                style(step.title).bold(),
                step.slug
            )
        }
        GuidedNext::Complete => format!("{} All steps completed", CHECK),
    }
}
