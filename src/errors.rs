//! Error types for quakemap.
//!
//! Uses `thiserror` for library-style error definitions.

use thiserror::Error;

/// Errors that can occur while loading the earthquake feed.
#[derive(Error, Debug)]
pub enum QuakemapError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Feed returned an error status
    #[error("USGS feed error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid response structure
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Local feed file could not be read
    #[error("Failed to read feed file: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single earthquake record was rejected before rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("record has no geometry")]
    MissingGeometry,

    #[error("expected Point geometry, got {0}")]
    NotAPoint(String),

    #[error("expected 3 coordinates, got {0}")]
    TooFewCoordinates(usize),

    #[error("{0} is missing or not a finite number")]
    BadCoordinate(&'static str),

    #[error("magnitude is missing or not a finite number")]
    BadMagnitude,

    #[error("magnitude {0} is outside the plausible range")]
    MagnitudeOutOfRange(f64),

    #[error("record is not a well-formed feature: {0}")]
    Malformed(String),
}
