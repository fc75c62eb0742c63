//! OpenMensa v2 API client.

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::instrument;
use url::Url;

use crate::error::FetchError;
use crate::types::{Canteen, CanteenId, DayMenu, Meal};

pub use mensa_core::config::{DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};

const USER_AGENT: &str = concat!("mensa/", env!("CARGO_PKG_VERSION"));

/// Read-only client for the OpenMensa API.
///
/// The underlying `reqwest::Client` is usually supplied by the host and
/// shared between integrations; the per-request timeout is applied here.
#[derive(Debug, Clone)]
pub struct MensaClient {
    http: reqwest::Client,
    base: Url,
    timeout: Duration,
}

impl MensaClient {
    /// Create a client with its own connection pool
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::TransportUnavailable(e.to_string()))?;

        Self::with_http_client(http, base_url, timeout)
    }

    /// Create a client on top of a shared HTTP client.
    ///
    /// # Errors
    ///
    /// `FetchError::InvalidUrl` if `base_url` cannot carry path segments.
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        base.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(base_url.to_string()))?
            .pop_if_empty();

        Ok(Self {
            http,
            base,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `{base}/canteens/{id}/days/{date}/meals`, the id escaped as one segment
    pub fn meals_url(&self, canteen_id: &CanteenId, date: NaiveDate) -> Url {
        let date = date.format("%Y-%m-%d").to_string();
        self.endpoint(&["canteens", canteen_id.as_str(), "days", &date, "meals"])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked in the constructor
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Fetch the menu of one day.
    ///
    /// 200 yields the meal list (possibly empty), 404 means closed; any
    /// other status is an error.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_day(
        &self,
        canteen_id: &CanteenId,
        date: NaiveDate,
    ) -> Result<DayMenu, FetchError> {
        let url = self.meals_url(canteen_id, date);
        let response = self.http.get(url).timeout(self.timeout).send().await?;

        match response.status() {
            StatusCode::OK => {
                let meals: Vec<Meal> = Self::parse_body(response).await?;
                tracing::debug!("{} meals on {}", meals.len(), date);
                Ok(DayMenu::Open(meals))
            }
            StatusCode::NOT_FOUND => {
                tracing::debug!("Canteen {} closed on {}", canteen_id, date);
                Ok(DayMenu::Closed)
            }
            status => Err(FetchError::Http {
                status: status.as_u16(),
            }),
        }
    }

    /// Canteens within `dist_km` kilometres of a point.
    #[instrument(skip(self), level = "info")]
    pub async fn canteens_near(
        &self,
        latitude: f64,
        longitude: f64,
        dist_km: u32,
    ) -> Result<Vec<Canteen>, FetchError> {
        let url = self.endpoint(&["canteens"]);
        let response = self
            .http
            .get(url)
            .query(&[
                ("near[lat]", latitude.to_string()),
                ("near[lng]", longitude.to_string()),
                ("near[dist]", dist_km.to_string()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let canteens: Vec<Canteen> = Self::parse_body(response).await?;
        tracing::info!("Found {} canteens", canteens.len());
        Ok(canteens)
    }

    async fn parse_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
