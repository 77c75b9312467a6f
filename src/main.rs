use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use direwatch::config::{ConfigFile, Decoding, Profile, WatchConfig, parse_columns};
use direwatch::render::{Color, OutputFormat, create_renderer};
use direwatch::tail::{FileTailer, SleepIdle};
use direwatch::watch::Watcher;

#[derive(Parser, Debug)]
#[command(name = "direwatch")]
#[command(about = "Render the latest APRS station heard by Direwolf as a status image", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Behaviour profile: bpq, digipi
    #[arg(short, long, value_enum)]
    profile: Option<Profile>,

    /// Direwolf log file to follow
    #[arg(long, alias = "log_file")]
    log_file: Option<PathBuf>,

    /// Where the image is written
    #[arg(long, alias = "output_image")]
    output_image: Option<PathBuf>,

    /// Output: image, text, json
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Image width in pixels
    #[arg(long, alias = "image_width")]
    image_width: Option<u32>,

    /// Image height in pixels
    #[arg(long, alias = "image_height")]
    image_height: Option<u32>,

    /// TrueType font file
    #[arg(long, alias = "font_path")]
    font_path: Option<PathBuf>,

    /// Text displayed in the banner
    #[arg(long, alias = "banner_title")]
    banner_title: Option<String>,

    /// Log columns to display, in order
    #[arg(long, num_args = 1..)]
    columns: Option<Vec<String>>,

    /// Round latitude and longitude to 5 decimals
    #[arg(long, conflicts_with = "raw_coordinates")]
    normalize_coordinates: bool,

    /// Show latitude and longitude exactly as logged
    #[arg(long)]
    raw_coordinates: bool,

    /// Handling of invalid UTF-8 in the log: strict, lossy
    #[arg(long, value_enum)]
    decoding: Option<Decoding>,

    /// Banner background color (name or #rrggbb)
    #[arg(long, alias = "banner_background_color")]
    banner_background_color: Option<Color>,

    /// Banner text color
    #[arg(long, alias = "banner_text_color")]
    banner_text_color: Option<Color>,

    /// Row text color
    #[arg(long, alias = "row_text_color")]
    row_text_color: Option<Color>,

    /// Row background colors, cycled
    #[arg(long, alias = "row_colors", num_args = 1..)]
    row_colors: Option<Vec<Color>>,

    /// Delay between polls when the log has no new line
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;
    log::info!(
        "Profile {:?}: {} -> {} ({:?}), columns: {}",
        config.profile,
        config.log_file.display(),
        config.output_image.display(),
        config.format,
        config
            .columns
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let renderer = create_renderer(&config).context("Failed to set up output")?;
    let mut source = FileTailer::open(&config.log_file, config.decoding)
        .context("Failed to open Direwolf log")?;
    let mut idle = SleepIdle::new(config.poll_interval);

    let mut watcher = Watcher::new(&config, renderer);
    let stats = watcher.run(&mut source, &mut idle)?;
    log::info!("Stopped after {} lines: {:?}", stats.lines, stats);

    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<WatchConfig> {
    let file = match args.config {
        Some(ref path) => ConfigFile::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => ConfigFile::default(),
    };

    let profile = args.profile.or(file.profile).unwrap_or_default();
    let mut config = WatchConfig::for_profile(profile);
    config.apply_file(&file)?;

    if let Some(ref path) = args.log_file {
        config.log_file = path.clone();
    }
    if let Some(ref path) = args.output_image {
        config.output_image = path.clone();
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(ref columns) = args.columns {
        config.columns = parse_columns(columns)?;
    }
    if args.normalize_coordinates {
        config.normalize_coordinates = true;
    }
    if args.raw_coordinates {
        config.normalize_coordinates = false;
    }
    if let Some(decoding) = args.decoding {
        config.decoding = decoding;
    }
    if let Some(ms) = args.poll_interval_ms {
        config.poll_interval = std::time::Duration::from_millis(ms);
    }

    let display = &mut config.display;
    if let Some(width) = args.image_width {
        display.width = width;
    }
    if let Some(height) = args.image_height {
        display.height = height;
    }
    if let Some(ref path) = args.font_path {
        display.font_path = path.clone();
    }
    if let Some(ref title) = args.banner_title {
        display.banner_title = title.clone();
    }
    if let Some(color) = args.banner_background_color {
        display.banner_background = color;
    }
    if let Some(color) = args.banner_text_color {
        display.banner_text = color;
    }
    if let Some(color) = args.row_text_color {
        display.row_text = color;
    }
    if let Some(ref colors) = args.row_colors {
        display.row_colors = colors.clone();
    }

    config.validate()?;
    Ok(config)
}
