//! Subcommand implementations.

use anyhow::{Context, Result};
use std::path::Path;

use mensa_core::{App, CanteenId, Config, EntityState};
use mensa_menu::MensaClient;
use mensa_setup::{CanteenChoice, ConfigEntry, SetupFlow, ZoneRegistry};

use crate::integration::MensaIntegration;

/// Register every configured canteen and set them up.
pub async fn start_app(config: Config) -> Result<App> {
    let integrations = MensaIntegration::from_config(&config);
    let mut app = App::new(config)?;

    for integration in integrations {
        app.register(Box::new(integration))?;
    }

    app.start().await;
    for err in app.not_ready() {
        tracing::warn!("{}", err);
    }
    Ok(app)
}

/// Keep every ready canteen refreshed until Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    let mut app = start_app(config).await?;
    if app.ready().is_empty() {
        tracing::warn!("No canteen is ready; add one with `mensa add`");
    }

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    app.shutdown().await;
    Ok(())
}

/// Sensor states after one setup pass
pub async fn show(config: Config) -> Result<Vec<EntityState>> {
    let mut app = start_app(config).await?;
    let entities = app.entities();
    app.shutdown().await;
    Ok(entities)
}

fn setup_flow(config: &Config) -> Result<SetupFlow> {
    let client = MensaClient::new(&config.api.base_url, config.api.request_timeout())?;
    Ok(SetupFlow::new(client, ZoneRegistry::from_config(config)))
}

/// Canteens within `radius_km` of a zone
pub async fn discover(config: &Config, zone: &str, radius_km: u32) -> Result<CanteenChoice> {
    let flow = setup_flow(config)?;
    let choice = flow.submit_zone(zone, radius_km).await?;
    Ok(choice)
}

/// Run the wizard for one canteen and append it to the config file at `path`.
pub async fn add_canteen(
    path: &Path,
    zone: &str,
    radius_km: u32,
    canteen_id: &CanteenId,
) -> Result<ConfigEntry> {
    let (mut config, _) = Config::load_validated_from(path)?;

    let choice = discover(&config, zone, radius_km).await?;
    let configured: Vec<CanteenId> = config
        .canteens
        .iter()
        .map(|c| c.canteen_id.clone())
        .collect();
    let entry = choice.select(canteen_id, &configured)?;

    config.canteens.push(entry.clone().into());
    config.save_to(path)?;

    tracing::info!("Added canteen {} ({})", entry.title, entry.canteen_id);
    Ok(entry)
}
