//! Banner and row geometry.
//!
//! The banner takes the top 15% of the image. The rest is split into equal
//! rows, one per report entry, using integer division; any remainder at the
//! bottom is left in the background colour. Existing displays depend on this
//! arrangement, so it is fixed rather than configurable.

/// Fraction of the image height used by the banner
pub const BANNER_HEIGHT_RATIO: f64 = 0.15;
/// Banner font size as a fraction of image height
pub const TITLE_FONT_RATIO: f64 = 0.10;
/// Row font size as a fraction of image height
pub const ROW_FONT_RATIO: f64 = 0.07;

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Top-left position that centres a `text_width` x `text_height` box
    ///
    /// Text larger than the region gets a negative offset and is clipped on
    /// both sides.
    pub fn centered(&self, text_width: u32, text_height: u32) -> (i32, i32) {
        let x = self.x as i32 + (self.width as i32 - text_width as i32) / 2;
        let y = self.y as i32 + (self.height as i32 - text_height as i32) / 2;
        (x, y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub banner: Region,
    pub rows: Vec<Region>,
    /// Banner font size in pixels
    pub title_px: f32,
    /// Row font size in pixels
    pub row_px: f32,
}

impl Layout {
    /// Compute geometry for an image of `width` x `height` with `row_count` rows
    pub fn compute(width: u32, height: u32, row_count: usize) -> Self {
        let banner_height = (height as f64 * BANNER_HEIGHT_RATIO) as u32;
        let banner = Region {
            x: 0,
            y: 0,
            width,
            height: banner_height,
        };

        let row_height = if row_count == 0 {
            0
        } else {
            (height - banner_height) / row_count as u32
        };
        let rows = (0..row_count as u32)
            .map(|i| Region {
                x: 0,
                y: banner_height + i * row_height,
                width,
                height: row_height,
            })
            .collect();

        Self {
            banner,
            rows,
            title_px: (height as f64 * TITLE_FONT_RATIO).floor() as f32,
            row_px: (height as f64 * ROW_FONT_RATIO).floor() as f32,
        }
    }
}
