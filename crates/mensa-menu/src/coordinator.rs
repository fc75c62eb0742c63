//! Refresh coordinator for one canteen's 7-day menu window.
//!
//! The coordinator never schedules itself: the host calls `refresh_now` once
//! during setup and `scheduled_refresh` from its timer. Each cycle fetches
//! the seven days concurrently, merges the results with the previous
//! snapshot and publishes the new snapshot in one swap.

use chrono::{DateTime, NaiveDate, Utc};
use futures::future::join_all;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::cache::{window_dates, MenuCache, MenuSnapshot};
use crate::client::MensaClient;
use crate::clock::{Clock, SystemClock};
use crate::error::{FetchError, RefreshError};
use crate::types::{CanteenId, DayMenu};

/// Fixed refresh cadence
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(6 * 60 * 60);

/// A day that could not be fetched in a cycle
#[derive(Debug, Clone, PartialEq)]
pub struct DayFailure {
    pub date: NaiveDate,
    pub error: FetchError,
}

/// What one successful cycle did
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshSummary {
    pub window_start: NaiveDate,
    /// Days answered with a meal list
    pub open_days: usize,
    /// Days answered with 404
    pub closed_days: usize,
    /// Failed days that kept their entry from the previous snapshot
    pub retained: Vec<NaiveDate>,
    pub failures: Vec<DayFailure>,
}

impl RefreshSummary {
    /// Days with a fresh answer from the API
    pub fn fetched(&self) -> usize {
        self.open_days + self.closed_days
    }

    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Result of a scheduled refresh. Scheduled refreshes never fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Completed(RefreshSummary),
    /// Every day failed; the previous snapshot is still published
    Failed(RefreshError),
    /// Another refresh was in flight
    Skipped,
}

pub struct MenuCoordinator {
    canteen_id: CanteenId,
    client: MensaClient,
    clock: Arc<dyn Clock>,
    cache: MenuCache,
    last_refresh: RwLock<Option<DateTime<Utc>>>,
    refresh_lock: Mutex<()>,
}

impl MenuCoordinator {
    /// Create a coordinator with an empty cache. No network call.
    pub fn new(canteen_id: CanteenId, client: MensaClient) -> Self {
        Self::with_clock(canteen_id, client, Arc::new(SystemClock))
    }

    pub fn with_clock(canteen_id: CanteenId, client: MensaClient, clock: Arc<dyn Clock>) -> Self {
        let cache = MenuCache::new(MenuSnapshot::empty(clock.today()));

        Self {
            canteen_id,
            client,
            clock,
            cache,
            last_refresh: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn canteen_id(&self) -> &CanteenId {
        &self.canteen_id
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn refresh_interval(&self) -> Duration {
        REFRESH_INTERVAL
    }

    /// Time of the last published snapshot
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.read()
    }

    /// Read handle, available once a refresh has succeeded
    pub fn cache(&self) -> Option<MenuCache> {
        self.last_refresh.read().map(|_| self.cache.clone())
    }

    /// Mandatory first refresh.
    ///
    /// Waits for any refresh in flight, then runs a full cycle. On success
    /// the new snapshot is published and a read handle returned.
    ///
    /// # Errors
    ///
    /// `RefreshError` if no day of the window could be fetched; the cache is
    /// left untouched.
    #[instrument(skip(self), fields(canteen = %self.canteen_id))]
    pub async fn refresh_now(&self) -> Result<MenuCache, RefreshError> {
        let _guard = self.refresh_lock.lock().await;

        let (snapshot, summary) = self.run_cycle().await?;
        self.publish(snapshot, &summary);
        Ok(self.cache.clone())
    }

    /// Timer-driven refresh. Skips if another refresh is in flight and keeps
    /// the previous snapshot if every day fails.
    #[instrument(skip(self), fields(canteen = %self.canteen_id))]
    pub async fn scheduled_refresh(&self) -> RefreshOutcome {
        let Ok(_guard) = self.refresh_lock.try_lock() else {
            tracing::debug!("Refresh already in flight, skipping tick");
            return RefreshOutcome::Skipped;
        };

        match self.run_cycle().await {
            Ok((snapshot, summary)) => {
                self.publish(snapshot, &summary);
                RefreshOutcome::Completed(summary)
            }
            Err(e) => {
                tracing::warn!("Scheduled refresh failed, keeping previous menu: {}", e);
                RefreshOutcome::Failed(e)
            }
        }
    }

    async fn run_cycle(&self) -> Result<(MenuSnapshot, RefreshSummary), RefreshError> {
        let start = self.clock.today();
        let dates = window_dates(start);

        let fetches = dates
            .iter()
            .map(|date| self.client.fetch_day(&self.canteen_id, *date));
        let results = join_all(fetches).await;

        let previous = self.cache.snapshot();
        merge_cycle(start, dates.into_iter().zip(results), &previous, self.clock.now())
    }

    fn publish(&self, snapshot: MenuSnapshot, summary: &RefreshSummary) {
        let refreshed_at = snapshot.refreshed_at();
        self.cache.replace(snapshot);
        *self.last_refresh.write() = refreshed_at;

        if summary.is_partial() {
            tracing::warn!(
                "Menu refreshed from {} with {} of 7 days failing ({} kept from previous cycle)",
                summary.window_start,
                summary.failures.len(),
                summary.retained.len()
            );
        } else {
            tracing::info!(
                "Menu refreshed from {}: {} open, {} closed",
                summary.window_start,
                summary.open_days,
                summary.closed_days
            );
        }
    }
}

/// Merge one cycle's per-day results into a new snapshot.
///
/// A failed day keeps its entry from `previous` if there is one. Fails when
/// no day produced a fresh answer.
fn merge_cycle(
    window_start: NaiveDate,
    results: impl IntoIterator<Item = (NaiveDate, Result<DayMenu, FetchError>)>,
    previous: &MenuSnapshot,
    now: DateTime<Utc>,
) -> Result<(MenuSnapshot, RefreshSummary), RefreshError> {
    let mut days = BTreeMap::new();
    let mut summary = RefreshSummary {
        window_start,
        open_days: 0,
        closed_days: 0,
        retained: Vec::new(),
        failures: Vec::new(),
    };

    for (date, result) in results {
        match result {
            Ok(day) => {
                match day {
                    DayMenu::Open(_) => summary.open_days += 1,
                    DayMenu::Closed => summary.closed_days += 1,
                }
                days.insert(date, day);
            }
            Err(error) => {
                tracing::warn!("Fetching menu for {} failed: {}", date, error);
                if let Some(old) = previous.day(date) {
                    days.insert(date, old.clone());
                    summary.retained.push(date);
                }
                summary.failures.push(DayFailure { date, error });
            }
        }
    }

    if summary.fetched() == 0 {
        return Err(RefreshError::from_failures(
            summary.failures.iter().map(|f| &f.error),
        ));
    }

    Ok((MenuSnapshot::new(window_start, days, now), summary))
}
