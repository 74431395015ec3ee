//! Per-earthquake marker rendering.

use crate::depth::depth_color;
use crate::models::Quake;
use crate::surface::{CircleMarker, LatLng, MapSurface, MarkerStyle};

/// Pixels of marker radius per unit of magnitude.
pub const RADIUS_PER_MAGNITUDE: f64 = 5.0;

const STROKE_WEIGHT: f64 = 1.0;
const STROKE_OPACITY: f64 = 1.0;
const FILL_OPACITY: f64 = 0.8;

/// Shown in the tooltip when the feed has no place name.
const UNKNOWN_PLACE: &str = "Unknown location";

/// Marker paint for one earthquake.
///
/// Negative magnitudes are real (micro-events) and draw as a zero-radius dot.
#[must_use]
pub fn marker_style(quake: &Quake) -> MarkerStyle {
    let color = depth_color(quake.depth_km);
    MarkerStyle {
        radius: (quake.magnitude * RADIUS_PER_MAGNITUDE).max(0.0),
        fill_color: color,
        color,
        weight: STROKE_WEIGHT,
        opacity: STROKE_OPACITY,
        fill_opacity: FILL_OPACITY,
    }
}

/// Build the marker for one earthquake.
///
/// GeoJSON stores (lon, lat, depth); the map wants (lat, lon).
#[must_use]
pub fn build_marker(quake: &Quake) -> CircleMarker {
    let place = quake.place.as_deref().unwrap_or(UNKNOWN_PLACE);
    let (mag, depth) = (quake.magnitude, quake.depth_km);

    CircleMarker {
        position: LatLng::new(quake.latitude, quake.longitude),
        style: marker_style(quake),
        popup: format!("<b>Magnitude:</b> {mag}<br><b>Depth:</b> {depth} km"),
        tooltip: format!(
            "<b>Magnitude:</b> {mag}<br>\n<b>Depth:</b> {depth} km<br>\n<b>Location:</b> {}",
            escape_html(place)
        ),
    }
}

/// Draw one earthquake onto the surface.
pub fn render_quake<S: MapSurface>(surface: &mut S, quake: &Quake) {
    surface.add_circle_marker(build_marker(quake));
}

/// Escape text for inclusion in HTML content.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
