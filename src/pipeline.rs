//! One load of the map: fetch, validate, draw every record, add the legend.
//!
//! A load either renders or fails; there is no retry. A failed fetch is
//! reported once through `tracing` and leaves the surface untouched.

use tracing::{error, info, warn};

use crate::client::FeedSource;
use crate::legend::add_legend;
use crate::marker::render_quake;
use crate::models::{FeatureCollection, Quake, record_id, validate_record};
use crate::page::LeafletPage;
use crate::surface::{MapSurface, MapView, TileLayer};

/// Title of generated pages.
pub const PAGE_TITLE: &str = "Earthquakes";

/// What a finished load produced.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    /// Markers drawn
    pub rendered: usize,
    /// Records rejected by validation
    pub rejected: usize,
    /// Deepest drawn record, if any
    pub max_depth: Option<f64>,
}

/// Terminal state of a load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Rendered(LoadSummary),
    Failed(String),
}

/// Set the initial view and base tiles; done once, before any load.
pub fn init_map<S: MapSurface>(surface: &mut S, view: MapView, tiles: TileLayer) {
    surface.set_view(view);
    surface.add_tile_layer(tiles);
}

/// Deepest depth among `quakes`, `None` when empty.
#[must_use]
pub fn max_depth(quakes: &[Quake]) -> Option<f64> {
    quakes.iter().map(|q| q.depth_km).reduce(f64::max)
}

/// Validate every record in feed order, logging the rejects.
fn accepted_quakes(feed: &FeatureCollection) -> (Vec<Quake>, usize) {
    let mut quakes = Vec::with_capacity(feed.features.len());
    let mut rejected = 0;

    for (index, raw) in feed.features.iter().enumerate() {
        match validate_record(raw) {
            Ok(quake) => quakes.push(quake),
            Err(e) => {
                rejected += 1;
                warn!(
                    index,
                    id = record_id(raw).unwrap_or("?"),
                    "skipping record: {e}"
                );
            }
        }
    }

    (quakes, rejected)
}

/// Run one load against `source`, drawing onto `surface`.
pub async fn load<F, S>(source: &F, surface: &mut S) -> LoadOutcome
where
    F: FeedSource,
    S: MapSurface,
{
    let feed = match source.fetch().await {
        Ok(feed) => feed,
        Err(e) => {
            error!(source = %source.describe(), "Error fetching earthquake data: {e}");
            return LoadOutcome::Failed(e.to_string());
        }
    };

    if let (Some(metadata), Some(generated)) = (&feed.metadata, feed.generated_at()) {
        info!(
            count = ?metadata.count,
            "loaded {} (generated {})",
            metadata.title.as_deref().unwrap_or("untitled feed"),
            generated.to_rfc3339()
        );
    }

    let (quakes, rejected) = accepted_quakes(&feed);
    let max_depth = max_depth(&quakes);

    for quake in &quakes {
        render_quake(surface, quake);
    }
    add_legend(surface, max_depth);

    info!(
        rendered = quakes.len(),
        rejected,
        max_depth = ?max_depth,
        "map rendered"
    );

    LoadOutcome::Rendered(LoadSummary {
        rendered: quakes.len(),
        rejected,
        max_depth,
    })
}

/// Build a complete page: base map first, then one load on top of it.
///
/// The page is usable either way; a failed load leaves only the base map.
pub async fn render_page<F: FeedSource>(source: &F, view: MapView) -> (LeafletPage, LoadOutcome) {
    let mut page = LeafletPage::new(PAGE_TITLE);
    init_map(&mut page, view, TileLayer::openstreetmap());
    let outcome = load(source, &mut page).await;
    (page, outcome)
}
