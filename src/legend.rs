//! Depth legend overlay.
//!
//! The legend pairs consecutive depth boundaries with the marker colours, then
//! closes with an open-ended entry for everything past the last boundary.

use crate::depth::Color;
use crate::marker::escape_html;
use crate::surface::{Control, Corner, MapSurface};

/// Depth boundaries shown in the legend, in kilometres.
pub const DEPTH_BOUNDARIES: [i32; 6] = [-10, 10, 30, 50, 70, 90];

/// Swatch colours, shallowest first.
pub const LEGEND_COLORS: [Color; 4] = [Color::Green, Color::Yellow, Color::Orange, Color::Red];

const LEGEND_CLASS: &str = "legend";

/// One swatch and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub color: Color,
    pub label: String,
}

/// The depth key, built once per load.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    /// Deepest accepted record of this load; informational only.
    pub max_depth: Option<f64>,
}

impl Legend {
    /// Build the legend from the fixed boundaries and colours.
    ///
    /// Boundary pairs without a colour are skipped.
    #[must_use]
    pub fn new(max_depth: Option<f64>) -> Self {
        let mut entries: Vec<LegendEntry> = DEPTH_BOUNDARIES
            .windows(2)
            .zip(LEGEND_COLORS)
            .map(|(pair, color)| LegendEntry {
                color,
                label: format!("{}-{} km", pair[0], pair[1]),
            })
            .collect();

        if let (Some(last), Some(color)) = (DEPTH_BOUNDARIES.last(), LEGEND_COLORS.last()) {
            entries.push(LegendEntry {
                color: *color,
                label: format!(">{last} km"),
            });
        }

        Self { entries, max_depth }
    }

    /// Container content: one `legend-item` child per entry.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "<div class=\"legend-item\"><i style=\"background:{}; width: 20px; height: 20px;\"></i>{}</div>",
                    entry.color,
                    escape_html(&entry.label)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Bottom-right overlay control carrying this legend.
    #[must_use]
    pub fn to_control(&self) -> Control {
        let data = self
            .max_depth
            .map(|d| vec![("max-depth".to_string(), d.to_string())])
            .unwrap_or_default();

        Control {
            position: Corner::BottomRight,
            class: LEGEND_CLASS.to_string(),
            html: self.to_html(),
            data,
        }
    }
}

/// Attach the depth legend to the surface.
pub fn add_legend<S: MapSurface>(surface: &mut S, max_depth: Option<f64>) {
    surface.add_control(Legend::new(max_depth).to_control());
}
