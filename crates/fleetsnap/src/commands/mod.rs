pub mod clusters;
pub mod snapshot;

use crate::ConnectArgs;
use colored::Colorize;
use fleetsnap_aws::{AwsConnector, ConnectOptions};
use fleetsnap_config::Settings;

/// Load the settings file, if any
pub fn load_settings() -> anyhow::Result<Settings> {
    let (settings, path) = fleetsnap_config::load_settings()?;
    if let Some(path) = path {
        tracing::info!(path = %path.display(), "Loaded settings");
    }
    Ok(settings)
}

/// Connect with flags first, then the settings file, then the SDK defaults
pub async fn connect(args: &ConnectArgs, settings: &Settings) -> anyhow::Result<AwsConnector> {
    let options = ConnectOptions {
        profile: args.profile.clone().or_else(|| settings.profile.clone()),
        region: args.region.clone().or_else(|| settings.region.clone()),
    };

    let connector = AwsConnector::connect(&options).await?;

    eprintln!("Using profile: {}", connector.profile().cyan());
    eprintln!("With region: {}", connector.region().cyan());

    Ok(connector)
}
