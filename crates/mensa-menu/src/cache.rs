//! In-memory menu cache.
//!
//! A refresh builds a complete `MenuSnapshot` off to the side and swaps it in
//! with one write; readers clone the `Arc` and never see a half-built window.
//! Nothing is persisted.

use chrono::{DateTime, Days, NaiveDate, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::types::{DayMenu, Meal};

/// Number of days covered by one refresh window, starting today
pub const WINDOW_DAYS: u64 = 7;

/// Dates `start ..= start + 6`, ascending
pub fn window_dates(start: NaiveDate) -> Vec<NaiveDate> {
    (0..WINDOW_DAYS).map(|offset| start + Days::new(offset)).collect()
}

/// Immutable result of one refresh cycle
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSnapshot {
    window_start: NaiveDate,
    days: BTreeMap<NaiveDate, DayMenu>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl MenuSnapshot {
    /// A snapshot with no data, as held before the first refresh
    pub fn empty(window_start: NaiveDate) -> Self {
        Self {
            window_start,
            days: BTreeMap::new(),
            refreshed_at: None,
        }
    }

    /// Build a snapshot; entries outside the window are dropped.
    pub fn new(
        window_start: NaiveDate,
        mut days: BTreeMap<NaiveDate, DayMenu>,
        refreshed_at: DateTime<Utc>,
    ) -> Self {
        let window_end = window_start + Days::new(WINDOW_DAYS - 1);
        days.retain(|date, _| *date >= window_start && *date <= window_end);

        Self {
            window_start,
            days,
            refreshed_at: Some(refreshed_at),
        }
    }

    pub fn window_start(&self) -> NaiveDate {
        self.window_start
    }

    pub fn window(&self) -> Vec<NaiveDate> {
        window_dates(self.window_start)
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Menu state of `date`; `None` if never fetched or outside the window.
    pub fn day(&self, date: NaiveDate) -> Option<&DayMenu> {
        self.days.get(&date)
    }

    /// Meals for `date`; empty when closed, unknown or outside the window.
    pub fn meals(&self, date: NaiveDate) -> &[Meal] {
        self.day(date).map(DayMenu::meals).unwrap_or(&[])
    }

    /// Number of dates holding an entry
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// One entry per window date, ascending
    pub fn week(&self) -> Vec<(NaiveDate, Vec<Meal>)> {
        self.window()
            .into_iter()
            .map(|date| (date, self.meals(date).to_vec()))
            .collect()
    }
}

/// Shared read handle onto the current snapshot.
///
/// Cloning is cheap; every clone observes the same swaps.
#[derive(Debug, Clone)]
pub struct MenuCache {
    current: Arc<RwLock<Arc<MenuSnapshot>>>,
}

impl MenuCache {
    pub fn new(snapshot: MenuSnapshot) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    /// The snapshot currently published
    pub fn snapshot(&self) -> Arc<MenuSnapshot> {
        self.current.read().clone()
    }

    /// Meals for `date` from the cache. Never performs I/O.
    pub fn get_menu(&self, date: NaiveDate) -> Vec<Meal> {
        self.snapshot().meals(date).to_vec()
    }

    /// `(date, meals)` for the seven dates of the current window
    pub fn week_summary(&self) -> Vec<(NaiveDate, Vec<Meal>)> {
        self.snapshot().week()
    }

    pub(crate) fn replace(&self, snapshot: MenuSnapshot) {
        *self.current.write() = Arc::new(snapshot);
    }
}
