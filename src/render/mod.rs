mod color;
mod json;
pub mod layout;
mod raster;
mod text;

use std::io::{self, Write};

use chrono::Utc;
use serde::Deserialize;

use crate::config::WatchConfig;
use crate::error::{DirewatchError, Result};
use crate::record::FilteredReport;

pub use self::color::Color;
pub use self::json::JsonFormatter;
pub use self::layout::{Layout, Region};
pub use self::raster::{ImageRenderer, paint_background};
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Overwrite the output image on every report
    Image,
    /// One `field: value` line per report on stdout
    Text,
    /// One JSON object per report on stdout
    Json,
}

/// Consumer of displayable reports
pub trait Renderer {
    fn render(&mut self, report: &FilteredReport) -> Result<()>;
}

/// Single-line textual rendering of a report
pub trait Formatter {
    fn format(&self, report: &FilteredReport) -> String;
}

/// Writes each formatted report as one line to a stream
pub struct StreamRenderer<W: Write> {
    formatter: Box<dyn Formatter>,
    out: W,
}

impl<W: Write> StreamRenderer<W> {
    pub fn new(formatter: Box<dyn Formatter>, out: W) -> Self {
        Self { formatter, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for StreamRenderer<W> {
    fn render(&mut self, report: &FilteredReport) -> Result<()> {
        let line = self.formatter.format(report);
        writeln!(self.out, "{}", line)
            .and_then(|_| self.out.flush())
            .map_err(|e| DirewatchError::Output(e.to_string()))
    }
}

/// Build the renderer selected by `config.format`
///
/// The image renderer loads its font here, so a missing or unreadable font
/// fails at startup rather than on the first report.
pub fn create_renderer(config: &WatchConfig) -> Result<Box<dyn Renderer>> {
    let renderer: Box<dyn Renderer> = match config.format {
        OutputFormat::Image => Box::new(ImageRenderer::new(
            config.display.clone(),
            config.output_image.clone(),
        )?),
        OutputFormat::Text => Box::new(StreamRenderer::new(
            Box::new(TextFormatter),
            io::stdout(),
        )),
        OutputFormat::Json => Box::new(StreamRenderer::new(
            Box::new(JsonFormatter),
            io::stdout(),
        )),
    };
    Ok(renderer)
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
