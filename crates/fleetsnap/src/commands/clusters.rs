use crate::ConnectArgs;
use colored::Colorize;
use fleetsnap_core::{FetchLimits, ResourceFetcher, short_name};

pub async fn handle(args: ConnectArgs) -> anyhow::Result<()> {
    let settings = super::load_settings()?;
    let connector = super::connect(&args, &settings).await?;

    let limits = FetchLimits {
        clusters: settings.fetch_limits().clusters,
        ..FetchLimits::default()
    };
    let fetcher = ResourceFetcher::new(&connector, limits)?;
    let clusters = fetcher.list_clusters().await?;

    if clusters.is_empty() {
        println!("{}", "No clusters found".dimmed());
        return Ok(());
    }

    println!("{}", format!("{:<30} {}", "NAME", "ARN").bold());
    println!("{}", "─".repeat(100).dimmed());
    for arn in &clusters {
        let name = short_name(arn).unwrap_or_else(|_| arn.clone());
        println!("{} {}", format!("{:<30}", name).cyan(), arn.dimmed());
    }

    Ok(())
}
