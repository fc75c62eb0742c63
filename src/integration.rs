//! One configured canteen as a host integration.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use mensa_core::{
    CanteenConfig, Config, EntityState, Integration, IntegrationContext, IntegrationError,
};
use mensa_menu::{Clock, MensaClient, MenuCoordinator, RefreshOutcome, SystemClock, REFRESH_INTERVAL};
use mensa_sensor::{Sensor, TodaySensor, WeekSensor};

/// Owns the coordinator and the two sensors of one canteen.
///
/// Nothing exists until `setup` has completed the first refresh; a canteen
/// whose first refresh fails stays not ready.
pub struct MensaIntegration {
    id: String,
    canteen: CanteenConfig,
    clock: Arc<dyn Clock>,
    interval: Duration,
    coordinator: Option<MenuCoordinator>,
    sensors: Vec<Box<dyn Sensor>>,
}

impl MensaIntegration {
    pub fn new(canteen: CanteenConfig) -> Self {
        Self::with_clock(canteen, Arc::new(SystemClock))
    }

    pub fn with_clock(canteen: CanteenConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            id: format!("mensa_{}", canteen.canteen_id),
            canteen,
            clock,
            interval: REFRESH_INTERVAL,
            coordinator: None,
            sensors: Vec::new(),
        }
    }

    /// One integration per configured canteen
    pub fn from_config(config: &Config) -> Vec<Self> {
        config.canteens.iter().cloned().map(Self::new).collect()
    }

    pub fn coordinator(&self) -> Option<&MenuCoordinator> {
        self.coordinator.as_ref()
    }

    fn log_states(&self) {
        for sensor in &self.sensors {
            let state = sensor.state();
            tracing::info!("{} [{}]: {}", state.name, self.canteen.title, state.state);
        }
    }
}

#[async_trait]
impl Integration for MensaIntegration {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.canteen.title
    }

    async fn setup(&mut self, ctx: &IntegrationContext) -> Result<(), IntegrationError> {
        let client = MensaClient::with_http_client(
            ctx.http.clone(),
            &ctx.config.api.base_url,
            ctx.config.api.request_timeout(),
        )
        .map_err(|e| IntegrationError::not_ready(&self.id, e))?;
        let coordinator =
            MenuCoordinator::with_clock(self.canteen.canteen_id.clone(), client, self.clock.clone());

        let cache = coordinator
            .refresh_now()
            .await
            .map_err(|e| IntegrationError::not_ready(&self.id, e.user_message()))?;

        let canteen_id = &self.canteen.canteen_id;
        self.sensors.clear();
        self.sensors.push(Box::new(TodaySensor::new(
            canteen_id.clone(),
            cache.clone(),
            self.clock.clone(),
        )));
        self.sensors
            .push(Box::new(WeekSensor::new(canteen_id.clone(), cache)));
        self.interval = ctx.config.refresh.interval();
        self.coordinator = Some(coordinator);

        tracing::info!("Canteen {} ({}) ready", self.canteen.title, canteen_id);
        self.log_states();
        Ok(())
    }

    fn update_interval(&self) -> Option<Duration> {
        self.coordinator.as_ref().map(|_| self.interval)
    }

    async fn refresh(&self) {
        let Some(coordinator) = &self.coordinator else {
            return;
        };

        match coordinator.scheduled_refresh().await {
            RefreshOutcome::Completed(summary) => {
                tracing::debug!(
                    "{}: {} days fetched, {} failed",
                    self.id,
                    summary.fetched(),
                    summary.failures.len()
                );
                self.log_states();
            }
            RefreshOutcome::Failed(e) => {
                tracing::warn!("{}: {}", self.id, e.user_message());
            }
            RefreshOutcome::Skipped => {}
        }
    }

    fn entities(&self) -> Vec<EntityState> {
        self.sensors.iter().map(|s| s.state()).collect()
    }

    async fn unload(&self) {
        tracing::info!("Unloading canteen {}", self.canteen.title);
    }
}
