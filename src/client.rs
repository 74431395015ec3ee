//! Earthquake feed sources.
//!
//! Provides async HTTP access to the USGS summary feeds, plus a local-file
//! source for offline rendering. Uses reqwest with rustls for TLS.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use crate::errors::QuakemapError;
use crate::models::FeatureCollection;

/// Default request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent string for API requests.
const USER_AGENT: &str = concat!("quakemap/", env!("CARGO_PKG_VERSION"));

/// USGS base URL for earthquake feeds.
const USGS_BASE_URL: &str = "https://earthquake.usgs.gov";

/// Minimum magnitude class of a summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedLevel {
    All,
    Mag1,
    Mag25,
    Mag45,
    Significant,
}

/// Time window of a summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedWindow {
    Hour,
    Day,
    Week,
    Month,
}

/// One of the USGS summary feeds, e.g. `all_week`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedType {
    pub level: FeedLevel,
    pub window: FeedWindow,
}

impl FeedType {
    /// Every earthquake of the past seven days.
    pub const ALL_WEEK: Self = Self {
        level: FeedLevel::All,
        window: FeedWindow::Week,
    };

    /// Feed name as used in the URL path, e.g. `2.5_day`.
    #[must_use]
    pub fn name(self) -> String {
        let level = match self.level {
            FeedLevel::All => "all",
            FeedLevel::Mag1 => "1.0",
            FeedLevel::Mag25 => "2.5",
            FeedLevel::Mag45 => "4.5",
            FeedLevel::Significant => "significant",
        };
        let window = match self.window {
            FeedWindow::Hour => "hour",
            FeedWindow::Day => "day",
            FeedWindow::Week => "week",
            FeedWindow::Month => "month",
        };
        format!("{level}_{window}")
    }

    /// Path of this feed below the USGS host.
    #[must_use]
    pub fn path(self) -> String {
        format!("/earthquakes/feed/v1.0/summary/{}.geojson", self.name())
    }
}

impl Default for FeedType {
    fn default() -> Self {
        Self::ALL_WEEK
    }
}

impl std::str::FromStr for FeedType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        let (level, window) = lower
            .rsplit_once('_')
            .ok_or_else(|| format!("unknown feed type: {s} (expected e.g. all_week, 2.5_day)"))?;

        let level = match level {
            "all" => FeedLevel::All,
            "1.0" => FeedLevel::Mag1,
            "2.5" => FeedLevel::Mag25,
            "4.5" => FeedLevel::Mag45,
            "significant" => FeedLevel::Significant,
            _ => return Err(format!("unknown feed level in {s}")),
        };
        let window = match window {
            "hour" => FeedWindow::Hour,
            "day" => FeedWindow::Day,
            "week" => FeedWindow::Week,
            "month" => FeedWindow::Month,
            _ => return Err(format!("unknown feed window in {s}")),
        };

        Ok(Self { level, window })
    }
}

/// Anything that can produce one snapshot of the feed.
pub trait FeedSource {
    /// Short description for logs.
    fn describe(&self) -> String;

    /// Fetch and parse the feature collection.
    async fn fetch(&self) -> Result<FeatureCollection, QuakemapError>;
}

/// Client for USGS summary feeds.
#[derive(Debug, Clone)]
pub struct UsgsClient {
    client: Client,
    base_url: String,
    feed: FeedType,
}

impl UsgsClient {
    /// Create a client for one feed on the public USGS host.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(feed: FeedType) -> Result<Self, QuakemapError> {
        Self::with_base_url(feed, USGS_BASE_URL)
    }

    /// Create a client against another host serving the same paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_base_url(feed: FeedType, base_url: &str) -> Result<Self, QuakemapError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            feed,
        })
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.feed.path())
    }
}

impl FeedSource for UsgsClient {
    fn describe(&self) -> String {
        self.url()
    }

    #[instrument(skip(self), fields(feed = %self.feed.name()))]
    async fn fetch(&self) -> Result<FeatureCollection, QuakemapError> {
        let url = self.url();
        debug!("fetching feed from {}", url);

        let response = self.client.get(&url).send().await?;

        // Check status before parsing
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuakemapError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let bytes = response.bytes().await?;
        let feed: FeatureCollection = serde_json::from_slice(&bytes)?;
        feed.validate()?;

        debug!("fetched {} records", feed.features.len());
        Ok(feed)
    }
}

/// A GeoJSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<FeatureCollection, QuakemapError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let feed: FeatureCollection = serde_json::from_slice(&bytes)?;
        feed.validate()?;

        debug!("read {} records", feed.features.len());
        Ok(feed)
    }
}

/// The source chosen on the command line.
#[derive(Debug, Clone)]
pub enum Source {
    Usgs(UsgsClient),
    File(FileSource),
}

impl FeedSource for Source {
    fn describe(&self) -> String {
        match self {
            Self::Usgs(client) => client.describe(),
            Self::File(file) => file.describe(),
        }
    }

    async fn fetch(&self) -> Result<FeatureCollection, QuakemapError> {
        match self {
            Self::Usgs(client) => client.fetch().await,
            Self::File(file) => file.fetch().await,
        }
    }
}
