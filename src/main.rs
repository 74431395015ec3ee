//! quakemap - plot recent earthquakes on an interactive world map.
//!
//! Fetches the USGS GeoJSON feed, draws one circle marker per earthquake
//! (sized by magnitude, coloured by depth) plus a depth legend, and writes the
//! result as a standalone Leaflet page or serves it over HTTP.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

mod cli;
mod client;
mod depth;
mod errors;
mod legend;
mod marker;
mod models;
mod page;
mod pipeline;
mod server;
mod surface;

use cli::{Cli, Command, MapArgs};
use client::{FileSource, Source, UsgsClient};
use pipeline::{LoadOutcome, render_page};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Render(args) => cmd_render(&args),
        Command::Serve(args) => cmd_serve(args),
    }
}

/// Initialize tracing subscriber.
fn init_tracing(verbose: bool, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Resolve the feed source selected on the command line.
fn build_source(args: &MapArgs) -> Result<Source> {
    match &args.input {
        Some(path) => Ok(Source::File(FileSource::new(path))),
        None => Ok(Source::Usgs(
            UsgsClient::new(args.feed).context("failed to create USGS client")?,
        )),
    }
}

/// Single-threaded runtime; the fetch is the only suspension point.
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")
}

/// Execute the `render` command - one load, one page.
fn cmd_render(args: &cli::RenderArgs) -> Result<()> {
    let source = build_source(&args.map)?;
    let (page, outcome) = runtime()?.block_on(render_page(&source, args.map.view()));

    // A failed load has already been logged; the base map is still written.
    if let LoadOutcome::Rendered(summary) = &outcome {
        tracing::debug!(
            rendered = summary.rendered,
            rejected = summary.rejected,
            max_depth = ?summary.max_depth,
            "load finished"
        );
    }

    let html = page.to_html();
    if args.output == Path::new("-") {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(html.as_bytes())?;
        handle.flush()?;
    } else {
        std::fs::write(&args.output, html)
            .with_context(|| format!("failed to write {}", args.output.display()))?;
        tracing::info!("wrote {}", args.output.display());
    }

    Ok(())
}

/// Execute the `serve` command - start web server.
fn cmd_serve(args: cli::ServeArgs) -> Result<()> {
    let config = server::ServerConfig {
        port: args.port,
        host: args.host.clone(),
        view: args.map.view(),
        source: build_source(&args.map)?,
    };

    // Print startup message
    let url = format!("http://{}:{}", args.host, args.port);
    println!("\x1b[1m🌍 quakemap\x1b[0m");
    println!("\x1b[2m───────────────────────────────────────\x1b[0m");
    println!("  Local:   \x1b[96m{url}\x1b[0m");
    match &args.map.input {
        Some(path) => println!("  Input:   {}", path.display()),
        None => println!("  Feed:    {}", args.map.feed.name()),
    }
    println!("\x1b[2m───────────────────────────────────────\x1b[0m");
    println!("\x1b[2mPress Ctrl+C to stop\x1b[0m\n");

    // Open browser if requested (using xdg-open/open command)
    if args.open {
        #[cfg(target_os = "linux")]
        let _ = std::process::Command::new("xdg-open").arg(&url).spawn();
        #[cfg(target_os = "macos")]
        let _ = std::process::Command::new("open").arg(&url).spawn();
        #[cfg(target_os = "windows")]
        let _ = std::process::Command::new("cmd").args(["/c", "start", &url]).spawn();
    }

    runtime()?.block_on(server::run_server(config))
}
