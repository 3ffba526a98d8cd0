//! Client-side state for the property booking frontend.
//!
//! Each screen owns one orchestration unit from [`state`]. A unit holds the
//! data its screen renders, runs the API calls that change it, and reports
//! write outcomes through a [`contexts::toast::Notifier`]. Renderers only
//! read snapshots; nothing here draws anything.

pub mod api;
pub mod contexts;
pub mod error;
pub mod logs;
pub mod state;
pub mod time;
pub mod utils;

pub use api::BookingApi;
pub use error::Error;

use anyhow::Context;
use payloads::APIClient;
use secrecy::SecretString;

pub const DEFAULT_MAP_WINDOW_DAYS: i64 = 31;
/// Ten years of nights; the room map is not meant to span more.
pub const MAX_MAP_WINDOW_DAYS: i64 = 3650;
pub const DEFAULT_ROOM_TYPES_PER_PAGE: u32 = 10;
pub const DEFAULT_LOG_FILTER: &str = "error,ui=debug";

pub struct Config {
    /// Base address of the booking API, without the `/api` suffix.
    pub api_url: String,
    /// Token for the back office endpoints.
    pub api_token: Option<SecretString>,
    /// How many days past today the room map shows initially.
    pub map_window_days: i64,
    pub room_types_per_page: u32,
    pub log_filter: String,
}

impl Config {
    /// Read the configuration from the environment, loading `.env` first if
    /// there is one.
    pub fn from_env() -> anyhow::Result<Self> {
        // a missing .env is fine; real deployments set the variables
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let api_url =
            lookup("BOOKING_API_URL").context("BOOKING_API_URL is not set")?;

        let map_window_days = match lookup("MAP_WINDOW_DAYS") {
            Some(days) => days
                .trim()
                .parse()
                .with_context(|| format!("invalid MAP_WINDOW_DAYS: {days}"))?,
            None => DEFAULT_MAP_WINDOW_DAYS,
        };
        anyhow::ensure!(
            (1..=MAX_MAP_WINDOW_DAYS).contains(&map_window_days),
            "MAP_WINDOW_DAYS must be between 1 and {MAX_MAP_WINDOW_DAYS}"
        );

        let room_types_per_page = match lookup("ROOM_TYPES_PER_PAGE") {
            Some(per_page) => per_page.trim().parse().with_context(|| {
                format!("invalid ROOM_TYPES_PER_PAGE: {per_page}")
            })?,
            None => DEFAULT_ROOM_TYPES_PER_PAGE,
        };
        anyhow::ensure!(
            room_types_per_page > 0,
            "ROOM_TYPES_PER_PAGE must be positive"
        );

        Ok(Config {
            api_url,
            api_token: lookup("BOOKING_API_TOKEN")
                .filter(|token| !token.is_empty())
                .map(SecretString::from),
            map_window_days,
            room_types_per_page,
            log_filter: lookup("LOG_FILTER")
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    pub fn api_client(&self) -> APIClient {
        let client = APIClient::new(self.api_url.clone());
        match &self.api_token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }
}
