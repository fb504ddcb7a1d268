mod cli;
mod controller;
mod core;
mod remote;

use anyhow::{bail, Context, Result};
use cli::commands::{
    NextCommand, PipelineCommand, RunCommand, StatusCommand, StepsCommand, WatchCommand,
};
use cli::output::*;
use cli::{Cli, Command};
use controller::{Controller, GuidedNext};
use remote::{HttpPipelineClient, PipelineService, ServiceConfig};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let config = ServiceConfig::new()
        .with_base_url(cli.url.clone())
        .with_timeout(cli.timeout);
    let client = HttpPipelineClient::new(config).context("Failed to create service client")?;
    let controller = Controller::new(client);

    // Execute command
    match &cli.command {
        Command::Steps(cmd) => list_steps(cmd, &controller)?,
        Command::Status(cmd) => show_status(cmd, &controller).await?,
        Command::Run(cmd) => run_step(cmd, &controller).await?,
        Command::Pipeline(cmd) => run_pipeline(cmd, &controller).await?,
        Command::Next(cmd) => guided_next(cmd, &controller).await?,
        Command::Watch(cmd) => watch(cmd, &controller).await?,
    }

    Ok(())
}

fn list_steps<S: PipelineService>(cmd: &StepsCommand, controller: &Controller<S>) -> Result<()> {
    let registry = controller.registry();

    if cmd.json {
        let steps: Vec<_> = registry
            .iter()
            .map(|step| {
                serde_json::json!({
                    "slug": step.slug,
                    "title": step.title,
                    "description": step.description,
                    "ordinal": step.ordinal,
                })
            })
            .collect();
        let json = serde_json::to_string_pretty(&serde_json::json!({ "steps": steps }))?;
        println!("{}", json);
        return Ok(());
    }

    println!("{} Pipeline steps:", INFO);
    for step in registry.iter() {
        println!(
            "  {}. {:<16} {}",
            step.ordinal + 1,
            style(step.title).bold(),
            style(step.description).dim()
        );
    }
    Ok(())
}

async fn show_status<S: PipelineService>(
    cmd: &StatusCommand,
    controller: &Controller<S>,
) -> Result<()> {
    let refreshed = controller.refresh().await;

    let snapshot = controller.snapshot().await;
    let progress = controller.progress().await;

    if cmd.json {
        let payload = serde_json::json!({
            "refreshed": refreshed,
            "steps": snapshot.steps,
            "artifacts": snapshot.artifacts,
            "progress": progress,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if !refreshed {
        println!("{} Refresh failed; showing last known state", WARN);
    }

    render_stepper(&snapshot, controller.registry(), controller.selected_index());
    println!();
    println!("{}", format_progress(&progress));
    println!(
        "{} {}",
        INFO,
        format_summary(
            &snapshot,
            controller.prefer_offline(),
            controller.refreshed_at().await
        )
    );

    if !snapshot.artifacts.is_empty() {
        println!("\n{} Artifacts:", INFO);
        render_artifacts(&snapshot);
    }

    let log = controller.log_snapshot().await;
    if !log.is_empty() {
        println!("\n{} Trace log:", INFO);
        render_log_tail(&log, 10);
    }
    Ok(())
}

async fn run_step<S: PipelineService>(cmd: &RunCommand, controller: &Controller<S>) -> Result<()> {
    let Some(index) = controller.registry().index_of(&cmd.slug) else {
        bail!("unknown step: {}", cmd.slug);
    };

    controller.select_step(index);
    controller.set_prefer_offline(cmd.offline);

    println!(
        "{} Running step {}",
        ROCKET,
        style(&cmd.slug).bold()
    );
    controller.run_step(&cmd.slug).await;

    report_outcome(controller).await;
    Ok(())
}

async fn run_pipeline<S: PipelineService>(
    cmd: &PipelineCommand,
    controller: &Controller<S>,
) -> Result<()> {
    controller.set_prefer_offline(cmd.offline);

    println!("{} Running whole pipeline", ROCKET);
    controller.run_pipeline().await;

    report_outcome(controller).await;
    Ok(())
}

async fn guided_next<S: PipelineService>(
    cmd: &NextCommand,
    controller: &Controller<S>,
) -> Result<()> {
    controller.set_guided(true);
    controller.set_prefer_offline(cmd.offline);
    controller.refresh().await;

    let Some(next) = controller.recommendation().await else {
        return Ok(());
    };
    println!("{}", format_recommendation(next, controller.registry()));

    if cmd.run {
        controller.guided_run().await;
        report_outcome(controller).await;
    } else if cmd.skip {
        controller.guided_skip().await;
        let step = controller.selected_step();
        println!(
            "{} Selection moved to {} ({})",
            INFO,
            style(step.title).bold(),
            step.slug
        );
    }
    Ok(())
}

async fn watch<S: PipelineService>(cmd: &WatchCommand, controller: &Controller<S>) -> Result<()> {
    let total = controller.registry().count();
    let bar = create_progress_bar(total);

    loop {
        if !controller.refresh().await {
            bar.println(format!("{} Refresh failed; retrying", CROSS));
        }

        let progress = controller.progress().await;
        let next = controller.next_incomplete().await;

        bar.set_position(progress.completed as u64);
        match next {
            GuidedNext::Step(index) => {
                let step = controller.registry().by_index(index);
                bar.set_message(format!(
                    "{} running · next: {}",
                    progress.running, step.title
                ));
            }
            GuidedNext::Complete => {
                bar.finish_with_message("pipeline complete");
                break;
            }
        }

        tokio::time::sleep(std::time::Duration::from_secs(cmd.interval)).await;
    }
    Ok(())
}

/// Print the refreshed state and log tail after a run attempt
async fn report_outcome<S: PipelineService>(controller: &Controller<S>) {
    let snapshot = controller.snapshot().await;
    let progress = controller.progress().await;

    println!();
    render_stepper(&snapshot, controller.registry(), controller.selected_index());
    println!("{}", format_progress(&progress));

    let log = controller.log_snapshot().await;
    render_log_tail(&log, 5);
}
