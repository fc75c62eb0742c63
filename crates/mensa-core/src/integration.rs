use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::{Config, IntegrationError};

/// A unit of functionality the host sets up, polls and tears down.
///
/// `setup` runs once; if it fails the integration is considered not ready
/// and is never scheduled or asked for entities.
#[async_trait]
pub trait Integration: Send + Sync {
    /// Unique identifier for this integration instance
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Bring the integration online.
    async fn setup(&mut self, ctx: &IntegrationContext) -> Result<(), IntegrationError>;

    /// Cadence of scheduled refreshes, or `None` for no timer
    fn update_interval(&self) -> Option<Duration>;

    /// One scheduled refresh. Must not fail; problems are logged.
    async fn refresh(&self);

    /// Current state of every entity this integration publishes
    fn entities(&self) -> Vec<EntityState>;

    /// Release resources. Called once after the timer has stopped.
    async fn unload(&self);
}

/// Context handed to integrations during setup
pub struct IntegrationContext {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
}

impl IntegrationContext {
    pub fn new(config: Arc<Config>, http: reqwest::Client) -> Self {
        Self { config, http }
    }
}

/// Published state of one sensor entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityState {
    pub unique_id: String,
    pub name: String,
    pub icon: String,
    pub state: String,
    pub attributes: serde_json::Map<String, serde_json::Value>,
}
