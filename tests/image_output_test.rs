use std::path::PathBuf;

use image::Rgb;

use direwatch::config::DisplayConfig;
use direwatch::record::{Field, FilteredReport, LogRecord};
use direwatch::render::{Color, ImageRenderer, Renderer};

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
];

fn find_font() -> Option<PathBuf> {
    FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Anti-aliased glyph pixels may miss the exact colour by a rounding step
fn near(pixel: &Rgb<u8>, color: Color) -> bool {
    let want = color.to_rgb();
    pixel
        .0
        .iter()
        .zip(want.0.iter())
        .all(|(a, b)| a.abs_diff(*b) <= 8)
}

fn report(line: &str, columns: &[Field]) -> FilteredReport {
    FilteredReport::from_record(&LogRecord::parse(line), columns).unwrap()
}

#[test]
fn test_single_field_report_writes_banner_and_one_row() {
    let Some(font_path) = find_font() else {
        eprintln!("No DejaVu font installed, skipping");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("direwatch.png");

    let display = DisplayConfig {
        font_path,
        ..DisplayConfig::default()
    };
    let mut renderer = ImageRenderer::new(display, output.clone()).unwrap();
    renderer
        .render(&report("0,1,2,N0CALL", &[Field::Source, Field::Heard]))
        .unwrap();

    let image = image::open(&output).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (320, 240));

    // Banner corner and row corner are clear of any text
    assert_eq!(*image.get_pixel(2, 2), Color::new(0, 0, 128).to_rgb());
    assert_eq!(*image.get_pixel(2, 40), Color::new(255, 0, 0).to_rgb());
    assert_eq!(*image.get_pixel(317, 237), Color::new(255, 0, 0).to_rgb());

    // Banner title and row text were drawn somewhere
    let banner_text = (0..320)
        .flat_map(|x| (0..36).map(move |y| (x, y)))
        .any(|(x, y)| near(image.get_pixel(x, y), Color::new(255, 255, 0)));
    assert!(banner_text);
    let row_text = (0..320)
        .flat_map(|x| (36..240).map(move |y| (x, y)))
        .any(|(x, y)| near(image.get_pixel(x, y), Color::new(255, 255, 255)));
    assert!(row_text);
}

#[test]
fn test_render_overwrites_previous_image() {
    let Some(font_path) = find_font() else {
        eprintln!("No DejaVu font installed, skipping");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("direwatch.png");

    let display = DisplayConfig {
        font_path,
        width: 160,
        height: 128,
        ..DisplayConfig::default()
    };
    let mut renderer = ImageRenderer::new(display, output.clone()).unwrap();

    let columns = [Field::Source, Field::Heard, Field::Speed];
    renderer
        .render(&report("0,1,2,N0CALL,WIDE1-1,,,,,,,,12", &columns))
        .unwrap();
    renderer
        .render(&report("0,1,2,N0CALL", &columns))
        .unwrap();

    let image = image::open(&output).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (160, 128));
    // One row now fills everything below the banner
    assert_eq!(*image.get_pixel(1, 126), Color::new(255, 0, 0).to_rgb());
}

#[test]
fn test_invalid_font_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("not-a-font.ttf");
    std::fs::write(&bogus, b"definitely not truetype").unwrap();

    let display = DisplayConfig {
        font_path: bogus,
        ..DisplayConfig::default()
    };
    let result = ImageRenderer::new(display, dir.path().join("out.png"));
    assert!(matches!(
        result,
        Err(direwatch::DirewatchError::InvalidFont(_))
    ));
}
