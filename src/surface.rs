//! The drawing surface every renderer targets.
//!
//! A [`MapSurface`] is owned by whoever drives the load and is passed by
//! `&mut` to each renderer. [`crate::page::LeafletPage`] turns the calls into
//! a Leaflet document; tests use [`RecordingSurface`].

use crate::depth::Color;

/// Geographic position in the map library's (lat, lon) order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::str::FromStr for LatLng {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 2 {
            return Err(format!("center requires 2 values (lat,lon), got {}", parts.len()));
        }

        let lat: f64 = parts[0]
            .trim()
            .parse()
            .map_err(|e| format!("invalid latitude: {e}"))?;
        let lng: f64 = parts[1]
            .trim()
            .parse()
            .map_err(|e| format!("invalid longitude: {e}"))?;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!("latitude {lat} out of range [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!("longitude {lng} out of range [-180, 180]"));
        }

        Ok(Self::new(lat, lng))
    }
}

/// Initial viewport of the map canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: LatLng::new(0.0, 0.0),
            zoom: 3,
        }
    }
}

/// Raster base layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl TileLayer {
    /// Standard OpenStreetMap tiles.
    #[must_use]
    pub fn openstreetmap() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
        }
    }
}

/// Paint options for a circle marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Radius in screen pixels
    pub radius: f64,
    pub fill_color: Color,
    /// Stroke colour
    pub color: Color,
    /// Stroke width
    pub weight: f64,
    /// Stroke opacity
    pub opacity: f64,
    pub fill_opacity: f64,
}

/// A circle marker with its click popup and hover tooltip (both HTML).
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMarker {
    pub position: LatLng,
    pub style: MarkerStyle,
    pub popup: String,
    pub tooltip: String,
}

/// Fixed corner an overlay control is docked to.
///
/// Only the corner the legend uses is modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    BottomRight,
}

impl Corner {
    /// Leaflet position keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BottomRight => "bottomright",
        }
    }
}

/// Overlay control with static HTML content.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub position: Corner,
    /// CSS class of the container element
    pub class: String,
    /// Inner HTML of the container element
    pub html: String,
    /// Extra `data-*` attributes on the container
    pub data: Vec<(String, String)>,
}

/// Map canvas contract shared by the page builder and test doubles.
pub trait MapSurface {
    /// Centre and zoom the canvas.
    fn set_view(&mut self, view: MapView);

    fn add_tile_layer(&mut self, layer: TileLayer);

    fn add_circle_marker(&mut self, marker: CircleMarker);

    /// Dock a control; it is rendered once and never updated.
    fn add_control(&mut self, control: Control);
}

/// Surface that keeps every call as data.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub view: Option<MapView>,
    pub tile_layers: Vec<TileLayer>,
    pub markers: Vec<CircleMarker>,
    pub controls: Vec<Control>,
}

#[cfg(test)]
impl MapSurface for RecordingSurface {
    fn set_view(&mut self, view: MapView) {
        self.view = Some(view);
    }

    fn add_tile_layer(&mut self, layer: TileLayer) {
        self.tile_layers.push(layer);
    }

    fn add_circle_marker(&mut self, marker: CircleMarker) {
        self.markers.push(marker);
    }

    fn add_control(&mut self, control: Control) {
        self.controls.push(control);
    }
}
