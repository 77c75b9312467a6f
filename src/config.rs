//! Configuration for the direwatch display generator.
//!
//! ## Profiles
//!
//! Two generations of the tool have been deployed and they disagree on a few
//! details. Rather than pick one, each is a [`Profile`] that supplies the
//! defaults; every individual setting can still be overridden.
//!
//! | setting                | `bpq`                                  | `digipi`                        |
//! |------------------------|----------------------------------------|---------------------------------|
//! | columns                | source heard latitude longitude speed  | same, plus altitude             |
//! | banner title           | `APRS BPQ`                             | `APRS`                          |
//! | coordinate rounding    | off                                    | 5 decimals                      |
//! | invalid UTF-8 in log   | fatal                                  | replaced with U+FFFD            |
//!
//! Settings are resolved once at startup in this order: command line, then the
//! optional TOML file, then the profile defaults. The resulting
//! [`WatchConfig`] is immutable and passed by reference.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{DirewatchError, Result};
use crate::record::Field;
use crate::render::{Color, OutputFormat};

pub const DEFAULT_LOG_FILE: &str = "/home/fcosta/digipi/direwolf.log";
pub const DEFAULT_OUTPUT_IMAGE: &str = "/tmp/direwatch.png";
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Behaviour set of one historical release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Configurable columns and title, raw coordinates
    #[default]
    Bpq,
    /// Fixed column set with altitude, coordinates rounded to 5 places
    Digipi,
}

impl Profile {
    pub fn columns(self) -> Vec<Field> {
        let mut columns = vec![
            Field::Source,
            Field::Heard,
            Field::Latitude,
            Field::Longitude,
            Field::Speed,
        ];
        if self == Profile::Digipi {
            columns.push(Field::Altitude);
        }
        columns
    }

    pub fn banner_title(self) -> &'static str {
        match self {
            Profile::Bpq => "APRS BPQ",
            Profile::Digipi => "APRS",
        }
    }

    pub fn normalize_coordinates(self) -> bool {
        self == Profile::Digipi
    }

    pub fn decoding(self) -> Decoding {
        match self {
            Profile::Bpq => Decoding::Strict,
            Profile::Digipi => Decoding::Lossy,
        }
    }
}

/// How bytes that are not valid UTF-8 are handled when reading the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Decoding {
    /// Stop with an error
    Strict,
    /// Substitute U+FFFD and carry on
    Lossy,
}

/// Image size, font and colours
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// TrueType font used for banner and rows
    pub font_path: PathBuf,
    /// Text shown in the banner
    pub banner_title: String,
    pub banner_background: Color,
    pub banner_text: Color,
    pub row_text: Color,
    /// Row backgrounds, cycled when there are more rows than colours
    pub row_colors: Vec<Color>,
}

impl DisplayConfig {
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            width: 320,
            height: 240,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            banner_title: profile.banner_title().to_string(),
            banner_background: Color::new(0, 0, 128),
            banner_text: Color::new(255, 255, 0),
            row_text: Color::new(255, 255, 255),
            row_colors: vec![
                Color::new(255, 0, 0),
                Color::new(0, 128, 0),
                Color::new(0, 0, 255),
                Color::new(128, 0, 128),
                Color::new(255, 165, 0),
            ],
        }
    }

    /// Background colour of the row at `index`, or the banner background
    /// when no row colours are configured
    pub fn row_color(&self, index: usize) -> Color {
        match self.row_colors.len() {
            0 => self.banner_background,
            n => self.row_colors[index % n],
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub profile: Profile,
    /// Direwolf log being followed
    pub log_file: PathBuf,
    /// Destination of the rendered image
    pub output_image: PathBuf,
    pub format: OutputFormat,
    /// Columns shown, in display order
    pub columns: Vec<Field>,
    pub normalize_coordinates: bool,
    pub decoding: Decoding,
    /// Sleep between polls when the log has no new line
    pub poll_interval: Duration,
    pub display: DisplayConfig,
}

impl WatchConfig {
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            profile,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            output_image: PathBuf::from(DEFAULT_OUTPUT_IMAGE),
            format: OutputFormat::Image,
            columns: profile.columns(),
            normalize_coordinates: profile.normalize_coordinates(),
            decoding: profile.decoding(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            display: DisplayConfig::for_profile(profile),
        }
    }

    /// Overlay every setting present in a config file
    pub fn apply_file(&mut self, file: &ConfigFile) -> Result<()> {
        if let Some(ref path) = file.log_file {
            self.log_file = path.clone();
        }
        if let Some(ref path) = file.output_image {
            self.output_image = path.clone();
        }
        if let Some(format) = file.format {
            self.format = format;
        }
        if let Some(ref columns) = file.columns {
            self.columns = parse_columns(columns)?;
        }
        if let Some(normalize) = file.normalize_coordinates {
            self.normalize_coordinates = normalize;
        }
        if let Some(decoding) = file.decoding {
            self.decoding = decoding;
        }
        if let Some(ms) = file.poll_interval_ms {
            self.poll_interval = Duration::from_millis(ms);
        }

        let display = &file.display;
        if let Some(width) = display.image_width {
            self.display.width = width;
        }
        if let Some(height) = display.image_height {
            self.display.height = height;
        }
        if let Some(ref path) = display.font_path {
            self.display.font_path = path.clone();
        }
        if let Some(ref title) = display.banner_title {
            self.display.banner_title = title.clone();
        }
        if let Some(color) = display.banner_background_color {
            self.display.banner_background = color;
        }
        if let Some(color) = display.banner_text_color {
            self.display.banner_text = color;
        }
        if let Some(color) = display.row_text_color {
            self.display.row_text = color;
        }
        if let Some(ref colors) = display.row_colors {
            self.display.row_colors = colors.clone();
        }
        Ok(())
    }

    /// Reject settings that cannot produce an image
    pub fn validate(&self) -> Result<()> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(DirewatchError::Config(format!(
                "image size must be positive, got {}x{}",
                self.display.width, self.display.height
            )));
        }
        if self.columns.is_empty() {
            return Err(DirewatchError::Config(
                "at least one column must be selected".to_string(),
            ));
        }
        if self.display.row_colors.is_empty() {
            return Err(DirewatchError::Config(
                "at least one row color is required".to_string(),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(DirewatchError::Config(
                "poll interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

/// Parse column names, rejecting any that are not log fields
pub fn parse_columns<S: AsRef<str>>(names: &[S]) -> Result<Vec<Field>> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}

/// Optional TOML configuration file
///
/// Every key is optional. Keys mirror the command line options:
///
/// ```toml
/// profile = "digipi"
/// log_file = "/var/log/direwolf/today.log"
/// columns = ["source", "heard", "speed"]
///
/// [display]
/// image_width = 480
/// row_colors = ["red", "#008000"]
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub profile: Option<Profile>,
    pub log_file: Option<PathBuf>,
    pub output_image: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub columns: Option<Vec<String>>,
    pub normalize_coordinates: Option<bool>,
    pub decoding: Option<Decoding>,
    pub poll_interval_ms: Option<u64>,
    #[serde(default)]
    pub display: DisplaySection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplaySection {
    pub image_width: Option<u32>,
    pub image_height: Option<u32>,
    pub font_path: Option<PathBuf>,
    pub banner_title: Option<String>,
    pub banner_background_color: Option<Color>,
    pub banner_text_color: Option<Color>,
    pub row_text_color: Option<Color>,
    pub row_colors: Option<Vec<Color>>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DirewatchError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DirewatchError::Config(e.to_string()))
    }
}
