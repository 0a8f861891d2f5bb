//! CLI tool for downloading SlidesLive slide decks.

use anyhow::{Context, Result};
use clap::Parser;
use slides_core::config::{
    DEFAULT_BASE_DATA_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, DEFAULT_WAIT_TIME_SECS,
};
use slides_core::{
    parse_presentation_url, DownloadConfig, ImageSize, PresentationLayout, RefreshPolicy,
    TimelineFormatter,
};
use slides_fetch::{Downloader, FixedDelay, HttpClient};
use slides_pdf::PdfAssembler;
use std::path::PathBuf;
use std::time::Duration;

/// Download the slides of a SlidesLive presentation, write an ffmpeg
/// concat timeline and assemble a PDF.
#[derive(Parser, Debug)]
#[command(name = "slideslive-dl")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Presentation URL, e.g. https://slideslive.com/38943570/some-talk
    url: String,

    /// Image size to download, as named by the service (medium or big)
    #[arg(long, default_value = "big")]
    size: ImageSize,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    useragent: String,

    /// Base URL of the manifest and image service
    #[arg(long, default_value = DEFAULT_BASE_DATA_URL)]
    basedataurl: String,

    /// Seconds to wait after each download
    #[arg(long, default_value_t = DEFAULT_WAIT_TIME_SECS)]
    waittime: f64,

    /// Directory to create the presentation folder in
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Keep slide images that were already downloaded
    #[arg(long)]
    skip_existing: bool,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Do not assemble the PDF
    #[arg(long)]
    no_pdf: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let config = build_config(&args)?;
    run(&args, config)
}

/// Turn the command line into an immutable download configuration.
fn build_config(args: &Args) -> Result<DownloadConfig> {
    let refresh = if args.skip_existing {
        RefreshPolicy::SkipExisting
    } else {
        RefreshPolicy::Always
    };

    let config = DownloadConfig::new()
        .with_size(args.size.clone())
        .with_user_agent(args.useragent.clone())
        .with_base_data_url(args.basedataurl.clone())
        .with_wait_time_secs(args.waittime)?
        .with_refresh(refresh)
        .with_output_root(args.output.clone())
        .with_timeout(Duration::from_secs(args.timeout));

    Ok(config)
}

/// Run the whole pipeline for one presentation.
fn run(args: &Args, config: DownloadConfig) -> Result<()> {
    let presentation = parse_presentation_url(&args.url)?;
    log::debug!("presentation {} ({})", presentation.id, presentation.name);

    let layout = PresentationLayout::new(&config.output_root, presentation);
    let size = config.size.clone();

    let client = HttpClient::from_config(&config)?;
    let throttle = FixedDelay::new(config.wait_time);
    let mut downloader = Downloader::new(client, throttle, config);

    let manifest = downloader
        .load_manifest(&layout)
        .with_context(|| format!("Failed to load manifest for {}", layout.presentation()))?;
    log::info!("{} slides", manifest.len());

    TimelineFormatter::new()
        .write(&layout, &manifest, &size)
        .with_context(|| format!("Failed to write {}", layout.timeline_path().display()))?;

    downloader.download_images(&layout, &manifest)?;

    if args.no_pdf {
        return Ok(());
    }

    let pdf_path = PdfAssembler::new()
        .assemble_presentation(&layout, &manifest, &size)
        .with_context(|| format!("Failed to create {}", layout.pdf_path().display()))?;
    println!("{}", pdf_path.display());

    Ok(())
}
