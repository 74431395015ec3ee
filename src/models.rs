//! Data models for the USGS GeoJSON summary feed.
//!
//! Records are kept as raw JSON until [`validate_record`] types and checks
//! them one by one, so a single bad record never fails the whole collection.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::errors::{QuakemapError, RecordError};

/// Largest magnitude accepted as real data; anything beyond is a feed error.
pub const MAX_MAGNITUDE: f64 = 12.0;

/// Top-level GeoJSON response from USGS feeds.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    /// Always "FeatureCollection"
    #[serde(rename = "type")]
    pub type_: String,

    /// Feed metadata
    #[serde(default)]
    pub metadata: Option<Metadata>,

    /// Earthquake records, in feed order, not yet typed
    #[serde(default)]
    pub features: Vec<serde_json::Value>,
}

impl FeatureCollection {
    /// Validate the response structure.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a `FeatureCollection`.
    pub fn validate(&self) -> Result<(), QuakemapError> {
        if self.type_ != "FeatureCollection" {
            return Err(QuakemapError::InvalidResponse(format!(
                "expected type 'FeatureCollection', got '{}'",
                self.type_
            )));
        }
        Ok(())
    }

    /// When the feed was generated, if the metadata says so.
    #[must_use]
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        let generated = self.metadata.as_ref()?.generated?;
        Utc.timestamp_millis_opt(generated).single()
    }
}

/// Metadata about the feed response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    /// When this feed was generated (ms since epoch)
    pub generated: Option<i64>,

    /// Human-readable title
    pub title: Option<String>,

    /// Number of events in response
    pub count: Option<usize>,
}

/// One earthquake record as delivered by the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    /// Unique event ID
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub geometry: Option<Geometry>,

    /// GeoJSON allows `null` here
    #[serde(default)]
    pub properties: Option<Properties>,
}

/// Geographic geometry for an event.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// Always "Point"
    #[serde(rename = "type")]
    pub type_: String,

    /// Coordinates: [longitude, latitude, depth_km]
    pub coordinates: Vec<Option<f64>>,
}

/// The subset of event properties the map uses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Properties {
    /// Magnitude value
    pub mag: Option<f64>,

    /// Human-readable place description
    pub place: Option<String>,
}

/// A validated earthquake, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Quake {
    pub id: String,
    pub longitude: f64,
    pub latitude: f64,
    pub depth_km: f64,
    pub magnitude: f64,
    pub place: Option<String>,
}

impl Feature {
    /// Classify this record as well-formed or rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] naming the first field that makes the record
    /// undrawable. A missing place is not an error.
    pub fn validate(&self) -> Result<Quake, RecordError> {
        let geometry = self.geometry.as_ref().ok_or(RecordError::MissingGeometry)?;
        if geometry.type_ != "Point" {
            return Err(RecordError::NotAPoint(geometry.type_.clone()));
        }
        let coords = &geometry.coordinates;
        if coords.len() < 3 {
            return Err(RecordError::TooFewCoordinates(coords.len()));
        }

        let coordinate = |index: usize, name: &'static str| {
            coords[index]
                .filter(|v| v.is_finite())
                .ok_or(RecordError::BadCoordinate(name))
        };
        let longitude = coordinate(0, "longitude")?;
        let latitude = coordinate(1, "latitude")?;
        let depth_km = coordinate(2, "depth")?;

        let properties = self.properties.as_ref();
        let magnitude = properties
            .and_then(|p| p.mag)
            .filter(|m| m.is_finite())
            .ok_or(RecordError::BadMagnitude)?;
        if magnitude.abs() > MAX_MAGNITUDE {
            return Err(RecordError::MagnitudeOutOfRange(magnitude));
        }

        Ok(Quake {
            id: self.id.clone().unwrap_or_default(),
            longitude,
            latitude,
            depth_km,
            magnitude,
            place: properties.and_then(|p| p.place.clone()),
        })
    }
}

/// Type and validate one raw element of `features`.
///
/// # Errors
///
/// Returns [`RecordError::Malformed`] when the element does not have the
/// shape of a feature, otherwise whatever [`Feature::validate`] reports.
pub fn validate_record(raw: &serde_json::Value) -> Result<Quake, RecordError> {
    let feature = Feature::deserialize(raw).map_err(|e| RecordError::Malformed(e.to_string()))?;
    feature.validate()
}

/// Best-effort event ID of a raw record, for logging.
#[must_use]
pub fn record_id(raw: &serde_json::Value) -> Option<&str> {
    raw.get("id").and_then(serde_json::Value::as_str)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A one-feature collection shaped like the live feed.
    pub(crate) fn feed_json(features: &[serde_json::Value]) -> String {
        serde_json::json!({
            "type": "FeatureCollection",
            "metadata": {
                "generated": 1_760_000_000_000_i64,
                "title": "USGS All Earthquakes, Past Week",
                "count": features.len(),
            },
            "features": features,
        })
        .to_string()
    }

    pub(crate) fn quake_json(
        id: &str,
        coordinates: serde_json::Value,
        mag: serde_json::Value,
        place: serde_json::Value,
    ) -> serde_json::Value {
        serde_json::json!({
            "type": "Feature",
            "id": id,
            "geometry": { "type": "Point", "coordinates": coordinates },
            "properties": { "mag": mag, "place": place, "time": 1_760_000_000_000_i64 },
        })
    }

    fn parse_one(feature: serde_json::Value) -> Feature {
        serde_json::from_value(feature).expect("failed to parse feature")
    }

    #[test]
    fn test_parse_feed() {
        let json = feed_json(&[quake_json(
            "us7000abcd",
            serde_json::json!([-122.4, 37.8, 12.0]),
            serde_json::json!(4.2),
            serde_json::json!("10 km N of Somewhere"),
        )]);
        let feed: FeatureCollection = serde_json::from_str(&json).expect("failed to parse feed");

        feed.validate().expect("invalid feed");
        assert_eq!(feed.features.len(), 1);
        assert!(feed.generated_at().is_some());

        let quake = validate_record(&feed.features[0]).expect("invalid feature");
        assert_eq!(quake.id, "us7000abcd");
        assert!((quake.longitude - -122.4).abs() < f64::EPSILON);
        assert!((quake.latitude - 37.8).abs() < f64::EPSILON);
        assert!((quake.depth_km - 12.0).abs() < f64::EPSILON);
        assert_eq!(quake.place.as_deref(), Some("10 km N of Somewhere"));
    }

    #[test]
    fn test_rejects_wrong_document_type() {
        let feed: FeatureCollection =
            serde_json::from_str(r#"{"type": "Feature", "features": []}"#).expect("parse");
        assert!(matches!(
            feed.validate(),
            Err(QuakemapError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_missing_magnitude_is_rejected() {
        let feature = parse_one(quake_json(
            "a",
            serde_json::json!([1.0, 2.0, 3.0]),
            serde_json::Value::Null,
            serde_json::json!("x"),
        ));
        assert_eq!(feature.validate(), Err(RecordError::BadMagnitude));
    }

    #[test]
    fn test_null_depth_is_rejected() {
        let feature = parse_one(quake_json(
            "a",
            serde_json::json!([1.0, 2.0, null]),
            serde_json::json!(2.0),
            serde_json::json!("x"),
        ));
        assert_eq!(feature.validate(), Err(RecordError::BadCoordinate("depth")));
    }

    #[test]
    fn test_short_coordinates_are_rejected() {
        let feature = parse_one(quake_json(
            "a",
            serde_json::json!([1.0, 2.0]),
            serde_json::json!(2.0),
            serde_json::json!("x"),
        ));
        assert_eq!(feature.validate(), Err(RecordError::TooFewCoordinates(2)));
    }

    #[test]
    fn test_missing_geometry_is_rejected() {
        let feature: Feature =
            serde_json::from_str(r#"{"type": "Feature", "properties": {"mag": 1.0}}"#)
                .expect("parse");
        assert_eq!(feature.validate(), Err(RecordError::MissingGeometry));
    }

    #[test]
    fn test_non_point_geometry_is_rejected() {
        let feature: Feature = serde_json::from_str(
            r#"{"geometry": {"type": "LineString", "coordinates": [1.0, 2.0, 3.0]}, "properties": {"mag": 1.0}}"#,
        )
        .expect("parse");
        assert_eq!(
            feature.validate(),
            Err(RecordError::NotAPoint("LineString".to_string()))
        );
    }

    #[test]
    fn test_null_properties_is_a_rejected_record() {
        let raw = serde_json::json!({
            "type": "Feature",
            "id": "n1",
            "geometry": { "type": "Point", "coordinates": [1.0, 2.0, 3.0] },
            "properties": null,
        });
        assert_eq!(validate_record(&raw), Err(RecordError::BadMagnitude));
        assert_eq!(record_id(&raw), Some("n1"));
    }

    #[test]
    fn test_mistyped_field_is_a_rejected_record() {
        let raw = quake_json(
            "s1",
            serde_json::json!([1.0, 2.0, 3.0]),
            serde_json::json!("2.1"),
            serde_json::json!("x"),
        );
        assert!(matches!(validate_record(&raw), Err(RecordError::Malformed(_))));

        let feed: FeatureCollection =
            serde_json::from_str(&feed_json(&[raw])).expect("collection still parses");
        assert_eq!(feed.features.len(), 1);
    }

    #[test]
    fn test_implausible_magnitude_is_rejected() {
        let feature = parse_one(quake_json(
            "big",
            serde_json::json!([1.0, 2.0, 3.0]),
            serde_json::json!(1e308),
            serde_json::json!("x"),
        ));
        assert_eq!(
            feature.validate(),
            Err(RecordError::MagnitudeOutOfRange(1e308))
        );

        let feature = parse_one(quake_json(
            "tiny",
            serde_json::json!([1.0, 2.0, 3.0]),
            serde_json::json!(-1.2),
            serde_json::json!("x"),
        ));
        assert!(feature.validate().is_ok());
    }

    #[test]
    fn test_missing_place_is_accepted() {
        let feature = parse_one(quake_json(
            "a",
            serde_json::json!([1.0, 2.0, -1.5]),
            serde_json::json!(-0.4),
            serde_json::Value::Null,
        ));
        let quake = feature.validate().expect("should be drawable");
        assert!(quake.place.is_none());
        assert!((quake.depth_km - -1.5).abs() < f64::EPSILON);
    }
}
