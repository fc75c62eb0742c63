//! OpenMensa menus for Mensa.
//!
//! Provides the API client, the in-memory 7-day menu cache and the refresh
//! coordinator that keeps it current.

pub mod cache;
pub mod client;
pub mod clock;
pub mod coordinator;
pub mod error;
pub mod types;

pub use cache::{MenuCache, MenuSnapshot, WINDOW_DAYS};
pub use client::MensaClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use coordinator::{DayFailure, MenuCoordinator, RefreshOutcome, RefreshSummary, REFRESH_INTERVAL};
pub use error::{FetchError, RefreshError};
pub use types::{Canteen, CanteenId, DayMenu, Meal};
