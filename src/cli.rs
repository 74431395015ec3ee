//! Command-line interface definitions.
//!
//! Uses clap derive API for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::client::FeedType;
use crate::surface::{LatLng, MapView};

/// Plot recent earthquakes on an interactive world map.
#[derive(Parser, Debug)]
#[command(name = "quakemap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    pub quiet: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the feed once and write the map page
    Render(RenderArgs),

    /// Serve the map page, loading the feed on every request
    Serve(ServeArgs),
}

/// Where the data comes from and how the map opens.
#[derive(Args, Debug, Clone)]
pub struct MapArgs {
    /// USGS summary feed, e.g. all_week or 2.5_day
    #[arg(long, default_value = "all_week", value_parser = parse_feed_type)]
    pub feed: FeedType,

    /// Read a local GeoJSON file instead of the USGS feed
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Initial map centre: lat,lon
    #[arg(long, default_value = "0,0", value_parser = parse_center, allow_hyphen_values = true)]
    pub center: LatLng,

    /// Initial zoom level
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u8).range(0..=19))]
    pub zoom: u8,
}

impl MapArgs {
    #[must_use]
    pub fn view(&self) -> MapView {
        MapView {
            center: self.center,
            zoom: self.zoom,
        }
    }
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Output HTML file, or `-` for stdout
    #[arg(long, short = 'o', default_value = "earthquakes.html")]
    pub output: PathBuf,
}

/// Arguments for the `serve` command.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Port to listen on
    #[arg(long, short = 'p', default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

/// Parse a feed type from string.
fn parse_feed_type(s: &str) -> Result<FeedType, String> {
    s.parse()
}

/// Parse a map centre from string.
fn parse_center(s: &str) -> Result<LatLng, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let cli = Cli::try_parse_from(["quakemap", "render"]).expect("valid args");
        let Command::Render(args) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(args.map.feed, FeedType::ALL_WEEK);
        assert_eq!(args.map.view(), MapView::default());
        assert_eq!(args.output, PathBuf::from("earthquakes.html"));
        assert!(args.map.input.is_none());
    }

    #[test]
    fn test_serve_options() {
        let cli = Cli::try_parse_from([
            "quakemap", "serve", "--feed", "4.5_month", "--center", "-33.4,-70.6", "--zoom", "5",
            "--port", "9000", "--verbose",
        ])
        .expect("valid args");
        assert!(cli.verbose);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.map.feed.name(), "4.5_month");
        assert_eq!(args.map.center, LatLng::new(-33.4, -70.6));
        assert_eq!(args.map.zoom, 5);
        assert_eq!(args.port, 9000);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["quakemap", "render", "--feed", "all_year"]).is_err());
        assert!(Cli::try_parse_from(["quakemap", "render", "--zoom", "30"]).is_err());
        assert!(Cli::try_parse_from(["quakemap", "render", "--center", "95,0"]).is_err());
    }
}
