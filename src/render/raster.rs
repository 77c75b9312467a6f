use std::fs;
use std::path::PathBuf;

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use super::{Layout, Region, Renderer};
use crate::config::DisplayConfig;
use crate::error::{DirewatchError, Result};
use crate::record::FilteredReport;

/// Renders reports into an image file for the station display
///
/// The file is overwritten in place on every report. A reader polling the
/// file can catch it half-written.
pub struct ImageRenderer {
    display: DisplayConfig,
    output: PathBuf,
    font: FontVec,
}

impl ImageRenderer {
    pub fn new(display: DisplayConfig, output: PathBuf) -> Result<Self> {
        if display.row_colors.is_empty() {
            return Err(DirewatchError::Config(
                "at least one row colour is required".to_string(),
            ));
        }
        let bytes = fs::read(&display.font_path).map_err(|source| {
            DirewatchError::FontRead {
                path: display.font_path.clone(),
                source,
            }
        })?;
        let font = FontVec::try_from_vec(bytes)
            .map_err(|_| DirewatchError::InvalidFont(display.font_path.clone()))?;

        log::info!("Loaded font {}", display.font_path.display());
        Ok(Self {
            display,
            output,
            font,
        })
    }

    /// Draw `report` into a new image without touching the filesystem
    pub fn compose(&self, report: &FilteredReport) -> RgbImage {
        let layout = Layout::compute(self.display.width, self.display.height, report.len());
        let mut image = paint_background(&self.display, &layout);

        let title_scale = PxScale::from(layout.title_px);
        self.draw_centered(
            &mut image,
            &layout.banner,
            &self.display.banner_title,
            title_scale,
            self.display.banner_text.to_rgb(),
        );

        let row_scale = PxScale::from(layout.row_px);
        for ((field, value), region) in report.iter().zip(&layout.rows) {
            let text = format!("{}: {}", field, value);
            self.draw_centered(
                &mut image,
                region,
                &text,
                row_scale,
                self.display.row_text.to_rgb(),
            );
        }

        image
    }

    fn draw_centered(
        &self,
        image: &mut RgbImage,
        region: &Region,
        text: &str,
        scale: PxScale,
        color: Rgb<u8>,
    ) {
        if text.is_empty() {
            return;
        }
        let (text_width, text_height) = text_size(scale, &self.font, text);
        let (x, y) = region.centered(text_width, text_height);
        draw_text_mut(image, color, x, y, scale, &self.font, text);
    }
}

impl Renderer for ImageRenderer {
    fn render(&mut self, report: &FilteredReport) -> Result<()> {
        let image = self.compose(report);
        image
            .save(&self.output)
            .map_err(|source| DirewatchError::ImageWrite {
                path: self.output.clone(),
                source,
            })?;
        log::debug!("Wrote {} rows to {}", report.len(), self.output.display());
        Ok(())
    }
}

/// Fill banner and row backgrounds
///
/// The whole canvas starts in the banner colour, which also shows through
/// below the last row when the height does not divide evenly. Row fills are
/// inclusive of their bottom edge, so each row covers the first line of the
/// next one until that row is painted over it.
pub fn paint_background(display: &DisplayConfig, layout: &Layout) -> RgbImage {
    let mut image = RgbImage::from_pixel(
        display.width,
        display.height,
        display.banner_background.to_rgb(),
    );

    for (i, region) in layout.rows.iter().enumerate() {
        if region.width == 0 || region.height == 0 {
            continue;
        }
        let rect =
            Rect::at(region.x as i32, region.y as i32).of_size(region.width, region.height + 1);
        draw_filled_rect_mut(&mut image, rect, display.row_color(i).to_rgb());
    }

    image
}
