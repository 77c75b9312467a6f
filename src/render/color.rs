use std::fmt;
use std::str::FromStr;

use image::Rgb;
use serde::Deserialize;

use crate::error::DirewatchError;

/// RGB colour given by name or hex code
///
/// # Parsing formats
/// - `navy`, `Yellow`, `cornflowerblue` - any CSS named colour, case insensitive
/// - `#ff8000` - six hex digits
/// - `#f80` - three hex digits, each doubled
/// - `rgb(255, 128, 0)`, `hsl(30, 100%, 50%)` - CSS functional notation
///
/// Alpha, where given, is ignored.
///
/// # Example
/// ```
/// use direwatch::render::Color;
///
/// let navy: Color = "navy".parse().unwrap();
/// assert_eq!(navy, Color::new(0, 0, 128));
/// assert_eq!("#f80".parse::<Color>().unwrap(), Color::new(255, 136, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = DirewatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // "Dark Green" and "dark_green" name the same colour as "darkgreen"
        let spec = if s.starts_with('#') || s.contains('(') {
            s.to_string()
        } else {
            s.replace([' ', '_'], "")
        };

        let [r, g, b, _] = csscolorparser::parse(&spec)
            .map_err(|_| DirewatchError::InvalidColor(s.to_string()))?
            .to_rgba8();
        Ok(Self::new(r, g, b))
    }
}

impl TryFrom<String> for Color {
    type Error = DirewatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!("navy".parse::<Color>().unwrap(), Color::new(0, 0, 128));
        assert_eq!("Yellow".parse::<Color>().unwrap(), Color::new(255, 255, 0));
        assert_eq!("green".parse::<Color>().unwrap(), Color::new(0, 128, 0));
        assert_eq!("orange".parse::<Color>().unwrap(), Color::new(255, 165, 0));
        assert_eq!("Dark Green".parse::<Color>().unwrap(), Color::new(0, 100, 0));
    }

    #[test]
    fn test_less_common_css_names() {
        assert_eq!("lightblue".parse::<Color>().unwrap(), Color::new(173, 216, 230));
        assert_eq!("darkslateblue".parse::<Color>().unwrap(), Color::new(72, 61, 139));
        assert_eq!("lightgreen".parse::<Color>().unwrap(), Color::new(144, 238, 144));
        assert_eq!("beige".parse::<Color>().unwrap(), Color::new(245, 245, 220));
        assert_eq!("CornflowerBlue".parse::<Color>().unwrap(), Color::new(100, 149, 237));
    }

    #[test]
    fn test_functional_notation() {
        assert_eq!("rgb(255,0,0)".parse::<Color>().unwrap(), Color::new(255, 0, 0));
        assert_eq!("rgb(0, 0, 128)".parse::<Color>().unwrap(), Color::new(0, 0, 128));
        assert_eq!("hsl(0, 100%, 50%)".parse::<Color>().unwrap(), Color::new(255, 0, 0));
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!("#000080".parse::<Color>().unwrap(), Color::new(0, 0, 128));
        assert_eq!("#FFF".parse::<Color>().unwrap(), Color::new(255, 255, 255));
    }

    #[test]
    fn test_invalid_colors() {
        assert!("not-a-color".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(Color::new(255, 136, 0).to_string(), "#ff8800");
    }
}
