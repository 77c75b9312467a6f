//! Line-to-display pipeline.

use crate::config::WatchConfig;
use crate::error::Result;
use crate::record::{Field, FilteredReport, LogRecord};
use crate::render::Renderer;
use crate::tail::{self, Idle, LineSource};

/// What happened to one log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Direwolf column header, ignored
    Header,
    /// None of the selected columns had a value; nothing rendered
    Empty,
    Rendered,
    /// The renderer failed; the error has been logged
    RenderFailed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchStats {
    pub lines: u64,
    pub headers: u64,
    pub empty: u64,
    pub rendered: u64,
    pub render_failures: u64,
}

/// Parses, filters and renders log lines one at a time
pub struct Watcher<'a> {
    config: &'a WatchConfig,
    renderer: Box<dyn Renderer + 'a>,
    stats: WatchStats,
}

impl<'a> Watcher<'a> {
    pub fn new(config: &'a WatchConfig, renderer: Box<dyn Renderer + 'a>) -> Self {
        Self {
            config,
            renderer,
            stats: WatchStats::default(),
        }
    }

    pub fn stats(&self) -> WatchStats {
        self.stats
    }

    pub fn handle_line(&mut self, line: &str) -> Outcome {
        self.stats.lines += 1;

        let mut record = LogRecord::parse(line);
        if record.is_header() {
            log::debug!("Skipping log header");
            self.stats.headers += 1;
            return Outcome::Header;
        }
        if self.config.normalize_coordinates {
            record.normalize_coordinates();
        }

        let Some(report) = FilteredReport::from_record(&record, &self.config.columns) else {
            log::debug!("No displayable fields in: {}", line.trim_end());
            self.stats.empty += 1;
            return Outcome::Empty;
        };

        match self.renderer.render(&report) {
            Ok(()) => {
                log::info!(
                    "Rendered report from {} ({} rows)",
                    report.get(Field::Source).unwrap_or("?"),
                    report.len()
                );
                self.stats.rendered += 1;
                Outcome::Rendered
            }
            Err(e) => {
                log::error!("Render failed: {}", e);
                self.stats.render_failures += 1;
                Outcome::RenderFailed
            }
        }
    }

    /// Follow `source` until `idle` stops the loop or the source fails
    pub fn run<S, I>(&mut self, source: &mut S, idle: &mut I) -> Result<WatchStats>
    where
        S: LineSource + ?Sized,
        I: Idle + ?Sized,
    {
        tail::run(source, idle, |line| {
            self.handle_line(line);
            Ok(())
        })?;
        Ok(self.stats)
    }
}
