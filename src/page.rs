//! Standalone Leaflet page.
//!
//! [`LeafletPage`] records draw calls as Leaflet statements and wraps them in
//! a self-contained HTML document (the library itself comes from unpkg).

use crate::surface::{CircleMarker, Control, MapSurface, MapView, TileLayer};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Element id of the map container.
const MAP_ELEMENT_ID: &str = "map";

/// A map page under construction.
#[derive(Debug)]
pub struct LeafletPage {
    title: String,
    view: MapView,
    statements: Vec<String>,
}

impl LeafletPage {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            view: MapView::default(),
            statements: Vec::new(),
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.count_statements("L.circleMarker(")
    }

    #[cfg(test)]
    #[must_use]
    pub fn control_count(&self) -> usize {
        self.count_statements("(function () { var control = L.control(")
    }

    #[cfg(test)]
    fn count_statements(&self, prefix: &str) -> usize {
        self.statements.iter().filter(|s| s.starts_with(prefix)).count()
    }

    /// Render the complete HTML document.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut script = format!(
            "var map = L.map({}).setView([{}, {}], {});\n",
            js_string(MAP_ELEMENT_ID),
            self.view.center.lat,
            self.view.center.lng,
            self.view.zoom
        );
        for statement in &self.statements {
            script.push_str(statement);
            script.push('\n');
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{LEAFLET_CSS}" />
    <script src="{LEAFLET_JS}"></script>
    <style>
        html, body {{ height: 100%; margin: 0; }}
        #{MAP_ELEMENT_ID} {{ height: 100%; width: 100%; }}
        .legend {{ background: white; padding: 6px 8px; border-radius: 5px; line-height: 20px; color: #333; }}
        .legend-item {{ display: flex; align-items: center; gap: 6px; }}
        .legend-item i {{ display: inline-block; opacity: 0.8; }}
    </style>
</head>
<body>
    <div id="{MAP_ELEMENT_ID}"></div>
    <script>
{script}    </script>
</body>
</html>
"#,
            title = crate::marker::escape_html(&self.title),
        )
    }
}

impl MapSurface for LeafletPage {
    fn set_view(&mut self, view: MapView) {
        self.view = view;
    }

    fn add_tile_layer(&mut self, layer: TileLayer) {
        self.statements.push(format!(
            "L.tileLayer({}, {{ attribution: {} }}).addTo(map);",
            js_string(&layer.url_template),
            js_string(&layer.attribution)
        ));
    }

    fn add_circle_marker(&mut self, marker: CircleMarker) {
        let CircleMarker {
            position,
            style,
            popup,
            tooltip,
        } = marker;

        self.statements.push(format!(
            "L.circleMarker([{}, {}], {{ radius: {}, fillColor: {}, color: {}, weight: {}, opacity: {}, fillOpacity: {} }})\
             .bindPopup({})\
             .bindTooltip({})\
             .addTo(map);",
            position.lat,
            position.lng,
            style.radius,
            js_string(style.fill_color.as_str()),
            js_string(style.color.as_str()),
            style.weight,
            style.opacity,
            style.fill_opacity,
            js_string(&popup),
            js_string(&tooltip),
        ));
    }

    fn add_control(&mut self, control: Control) {
        let mut statement = format!(
            "(function () {{ var control = L.control({{ position: {} }}); \
             control.onAdd = function () {{ var div = L.DomUtil.create(\"div\", {}); ",
            js_string(control.position.as_str()),
            js_string(&control.class)
        );
        for (key, value) in &control.data {
            statement.push_str(&format!(
                "div.setAttribute({}, {}); ",
                js_string(&format!("data-{key}")),
                js_string(value)
            ));
        }
        statement.push_str(&format!(
            "div.innerHTML = {}; return div; }}; control.addTo(map); }})();",
            js_string(&control.html)
        ));

        self.statements.push(statement);
    }
}

/// Quote text as a JavaScript string literal that is safe inside `<script>`.
fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string())
        .to_string()
        .replace("</", "<\\/")
}
