mod commands;
mod render;

use clap::{Args, Parser, Subcommand};
use render::OutputFormat;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fleetsnap")]
#[command(about = "Point-in-time inventory of ECS clusters, services, tasks and instances", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Snapshot every cluster and print it
    Snapshot(SnapshotArgs),
    /// List cluster identities only
    Clusters(ConnectArgs),
    /// Show version information
    Version,
}

/// Credential profile and region
#[derive(Args, Debug, Clone)]
pub struct ConnectArgs {
    /// AWS credential profile
    #[arg(short, long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// AWS region
    #[arg(short, long, env = "AWS_REGION")]
    pub region: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Only snapshot these clusters (name or ARN, repeatable)
    #[arg(short, long = "cluster")]
    pub clusters: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Page size for ListServices (1-100)
    #[arg(long)]
    pub services_page: Option<u32>,

    /// Page size for ListTasks (1-100)
    #[arg(long)]
    pub tasks_page: Option<u32>,

    /// Page size for ListContainerInstances (1-100)
    #[arg(long)]
    pub instances_page: Option<u32>,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,fleetsnap={level},fleetsnap_core={level},fleetsnap_aws={level},fleetsnap_config={level}"
        ))
    });

    // stdout carries the rendered output, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Version => {
            println!("fleetsnap {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Snapshot(args) => {
            commands::snapshot::handle(args).await?;
        }
        Commands::Clusters(args) => {
            commands::clusters::handle(args).await?;
        }
    }

    Ok(())
}
