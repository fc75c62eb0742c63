pub mod app;
pub mod canteen_id;
pub mod config;
pub mod error;
pub mod integration;
pub mod scheduler;

pub use app::App;
pub use canteen_id::CanteenId;
pub use config::{ApiConfig, CanteenConfig, Config, RefreshConfig, ValidationResult, ZoneConfig};
pub use error::{AppError, ConfigError, IntegrationError, NetworkError, ReqwestErrorExt};
pub use integration::{EntityState, Integration, IntegrationContext};

use anyhow::Result;

/// Initialize logging for the host process
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Mensa core initialized");
    Ok(())
}
