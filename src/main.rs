use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::error;

use cursorgen::{BuildSettings, HotspotMap, ThemeAssembler, ThemeInfo};

#[derive(Parser, Debug)]
#[command(
    name = "cursorgen",
    version,
    about = "Build X11 and Windows cursor themes from square PNG bitmaps"
)]
struct Cli {
    /// Directory of source *.png bitmaps.
    #[arg(long = "bitmaps-dir")]
    bitmaps_dir: PathBuf,

    /// Output directory for the built themes.
    #[arg(long = "out-dir", default_value = "./themes")]
    out_dir: PathBuf,

    /// Theme name.
    #[arg(long)]
    name: String,

    /// Theme author.
    #[arg(long)]
    author: String,

    /// Theme comment (defaults to "<name> By <author>").
    #[arg(long)]
    comment: Option<String>,

    /// Theme homepage.
    #[arg(long)]
    url: Option<String>,

    /// X11 output sizes in pixels.
    #[arg(long, value_delimiter = ',', default_values_t = [24u32, 28, 32])]
    sizes: Vec<u32>,

    /// Frame delay for animated X11 cursors, in milliseconds.
    #[arg(long, default_value_t = 50)]
    delay: u32,

    /// JSON file mapping cursor keys to {"xhot": .., "yhot": ..}.
    #[arg(long)]
    hotspots: Option<PathBuf>,

    /// Timeout for a single external compiler run, in seconds.
    #[arg(long, default_value_t = 60)]
    compiler_timeout: u64,

    /// Verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let hotspots = match &cli.hotspots {
        Some(path) => HotspotMap::load(path)?,
        None => HotspotMap::default(),
    };

    let info = ThemeInfo::new(cli.name, cli.author, cli.comment, cli.url);
    let settings = BuildSettings {
        bitmaps_dir: cli.bitmaps_dir,
        out_dir: cli.out_dir,
        sizes: cli.sizes,
        animation_delay: cli.delay,
        hotspots,
        compiler_timeout: Duration::from_secs(cli.compiler_timeout),
        ..Default::default()
    };

    let report = ThemeAssembler::new(info, settings).assemble()?;

    for failure in &report.failed {
        error!(cursor = %failure.key, reason = %failure.reason, "cursor failed");
    }
    Ok(report.is_success())
}
