use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::scheduler::spawn_timer;
use crate::{Config, EntityState, Integration, IntegrationContext, IntegrationError};

const USER_AGENT: &str = concat!("mensa/", env!("CARGO_PKG_VERSION"));

/// Host runtime: owns integrations, their timers and the shared HTTP client
pub struct App {
    config: Arc<Config>,
    context: IntegrationContext,
    pending: Vec<Box<dyn Integration>>,
    ready: Vec<Arc<dyn Integration>>,
    not_ready: Vec<IntegrationError>,
    cancel: CancellationToken,
    timers: Vec<JoinHandle<()>>,
}

impl App {
    /// Create a new application instance with its own HTTP client
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_http_client(config, http))
    }

    /// Create an application sharing an existing HTTP client
    pub fn with_http_client(config: Config, http: reqwest::Client) -> Self {
        let config = Arc::new(config);
        let context = IntegrationContext::new(config.clone(), http);

        Self {
            config,
            context,
            pending: Vec::new(),
            ready: Vec::new(),
            not_ready: Vec::new(),
            cancel: CancellationToken::new(),
            timers: Vec::new(),
        }
    }

    /// Register an integration. Ids must be unique.
    pub fn register(&mut self, integration: Box<dyn Integration>) -> Result<(), IntegrationError> {
        let id = integration.id();
        let taken = self.pending.iter().any(|i| i.id() == id)
            || self.ready.iter().any(|i| i.id() == id);
        if taken {
            return Err(IntegrationError::AlreadyRegistered(id.to_string()));
        }

        tracing::info!("Registering integration: {}", integration.name());
        self.pending.push(integration);
        Ok(())
    }

    /// Set up every registered integration and start timers for the ready ones.
    ///
    /// Returns the number of integrations that came online.
    pub async fn start(&mut self) -> usize {
        tracing::info!("Starting {} integrations", self.pending.len());

        for mut integration in std::mem::take(&mut self.pending) {
            tracing::debug!("Setting up integration: {}", integration.name());

            if let Err(e) = integration.setup(&self.context).await {
                tracing::error!("Setup of {} failed: {}", integration.name(), e);
                self.not_ready.push(e);
                continue;
            }

            let integration: Arc<dyn Integration> = Arc::from(integration);
            if let Some(period) = integration.update_interval() {
                self.timers.push(spawn_timer(
                    integration.clone(),
                    period,
                    self.cancel.child_token(),
                ));
            }
            self.ready.push(integration);
        }

        tracing::info!(
            "{} integrations ready, {} not ready",
            self.ready.len(),
            self.not_ready.len()
        );
        self.ready.len()
    }

    /// Stop all timers and unload ready integrations
    pub async fn shutdown(&mut self) {
        tracing::info!("Shutting down application");

        self.cancel.cancel();
        for timer in self.timers.drain(..) {
            if let Err(e) = timer.await {
                tracing::error!("Timer task ended abnormally: {}", e);
            }
        }

        for integration in self.ready.drain(..) {
            tracing::debug!("Unloading integration: {}", integration.name());
            integration.unload().await;
        }
    }

    /// Entities of every ready integration
    pub fn entities(&self) -> Vec<EntityState> {
        self.ready.iter().flat_map(|i| i.entities()).collect()
    }

    /// Refresh every ready integration immediately, outside the timer
    pub async fn refresh_all(&self) {
        for integration in &self.ready {
            integration.refresh().await;
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ready(&self) -> &[Arc<dyn Integration>] {
        &self.ready
    }

    pub fn not_ready(&self) -> &[IntegrationError] {
        &self.not_ready
    }

    /// Shortest timer period among ready integrations
    pub fn min_update_interval(&self) -> Option<Duration> {
        self.ready.iter().filter_map(|i| i.update_interval()).min()
    }
}
