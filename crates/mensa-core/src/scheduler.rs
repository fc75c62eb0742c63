//! Timer tasks driving scheduled refreshes.
//!
//! The integrations never spawn their own background work; the host owns one
//! interval task per ready integration and stops it through a shared
//! cancellation token.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::Integration;

/// Spawns a task calling `integration.refresh()` every `period`.
///
/// The immediate first tick is skipped: setup has just refreshed.
pub fn spawn_timer(
    integration: Arc<dyn Integration>,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    tracing::debug!("Scheduled refresh for {}", integration.id());
                    integration.refresh().await;
                }
                _ = cancel.cancelled() => {
                    tracing::debug!("Timer for {} stopped", integration.id());
                    break;
                }
            }
        }
    })
}
