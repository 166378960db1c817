use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::Parser;
use matchday::{Config, Generator, LogoCatalog, OutputLayout, Rasterizer, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "matchday", version, about = "Render match-day posts from a fixture calendar")]
struct Cli {
    /// iCalendar (.ics) fixture feed.
    calendar: PathBuf,

    /// JSON configuration overriding the built-in tables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Template directory (default from config).
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Logo directory (default from config).
    #[arg(long)]
    logos: Option<PathBuf>,

    /// Output root; `svg/` and `png/` are created below it.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Skip dates before this one (YYYY-MM-DD). Defaults to today.
    #[arg(long, conflicts_with = "all")]
    since: Option<NaiveDate>,

    /// Render every date in the feed, including past ones.
    #[arg(long, default_value_t = false)]
    all: bool,

    /// Write SVGs only.
    #[arg(long, default_value_t = false)]
    no_raster: bool,

    /// Rasterizer executable (default from config).
    #[arg(long)]
    rasterizer: Option<PathBuf>,

    /// Raster width in pixels.
    #[arg(long, default_value_t = matchday::DEFAULT_WIDTH_PX)]
    width: u32,

    /// Per-file rasterizer timeout.
    #[arg(long, default_value_t = matchday::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Warnings and errors only.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `Ok(true)` when nothing was skipped.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };

    let paths = &config.paths;
    let templates = cli.templates.unwrap_or_else(|| paths.templates.clone());
    let logos = cli.logos.unwrap_or_else(|| paths.logos.clone());
    let out = cli.out.unwrap_or_else(|| paths.output.clone());

    let rasterizer = (!cli.no_raster).then(|| Rasterizer {
        program: cli.rasterizer.unwrap_or_else(|| paths.rasterizer.clone()),
        width_px: cli.width,
        timeout: Duration::from_secs(cli.timeout_secs),
    });
    let since = if cli.all {
        None
    } else {
        Some(cli.since.unwrap_or_else(|| chrono::Local::now().date_naive()))
    };

    let catalog = LogoCatalog::from_config(&config, logos);
    let layout = OutputLayout::new(templates, &out);
    let options = RunOptions { since, rasterizer };
    let report = Generator::new(&config, &catalog, &layout, &options)
        .run_calendar(&cli.calendar)
        .with_context(|| format!("generate posts from '{}'", cli.calendar.display()))?;

    eprintln!(
        "wrote {} svg, {} png, skipped {}",
        report.written.len(),
        report.rasterized.len(),
        report.skipped.len()
    );
    Ok(report.is_clean())
}
