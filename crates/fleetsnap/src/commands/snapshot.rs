use crate::SnapshotArgs;
use crate::render::{self, OutputFormat};
use anyhow::Context;
use colored::Colorize;
use fleetsnap_config::Settings;
use fleetsnap_core::{AggregatorOptions, FetchLimits, FleetAggregator};

pub async fn handle(args: SnapshotArgs) -> anyhow::Result<()> {
    let settings = super::load_settings()?;
    let format = resolve_format(args.format, &settings)?;
    let options = aggregator_options(&args, &settings);
    // bad page sizes fail before any credentials are resolved
    options.limits.validate()?;

    let connector = super::connect(&args.connect, &settings).await?;
    let aggregator = FleetAggregator::new(&connector, options)?;

    let stdout = std::io::stdout();
    let mut renderer = render::renderer(format, stdout.lock());
    let summary = aggregator
        .run(renderer.as_mut())
        .await
        .context("Snapshot aborted")?;

    if let Some(notice) = unmatched_notice(&summary.unmatched_filters) {
        eprintln!("{}", notice.yellow());
    }
    tracing::info!(clusters = summary.rendered, "Snapshot complete");
    Ok(())
}

/// Names the cluster filters that selected nothing
fn unmatched_notice(filters: &[String]) -> Option<String> {
    if filters.is_empty() {
        return None;
    }
    Some(format!("No cluster matched: {}", filters.join(", ")))
}

fn resolve_format(flag: Option<OutputFormat>, settings: &Settings) -> anyhow::Result<OutputFormat> {
    if let Some(format) = flag {
        return Ok(format);
    }
    match settings.format.as_deref() {
        Some(name) => OutputFormat::parse(name)
            .with_context(|| format!("Unknown format '{}' in settings (expected table or json)", name)),
        None => Ok(OutputFormat::Table),
    }
}

fn aggregator_options(args: &SnapshotArgs, settings: &Settings) -> AggregatorOptions {
    let base = settings.fetch_limits();
    let limits = FetchLimits {
        services: args.services_page.unwrap_or(base.services),
        tasks: args.tasks_page.unwrap_or(base.tasks),
        container_instances: args.instances_page.unwrap_or(base.container_instances),
        ..base
    };

    let clusters = if args.clusters.is_empty() {
        settings.clusters.clone()
    } else {
        args.clusters.clone()
    };

    AggregatorOptions { limits, clusters }
}
