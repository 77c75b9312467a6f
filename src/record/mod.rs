//! Direwolf log records.
//!
//! Direwolf's `-L` log is a comma-separated file with one received packet per
//! line and a fixed 22-column layout:
//!
//! ```text
//! chan,utime,isotime,source,heard,level,error,dti,name,symbol,latitude,longitude,speed,course,altitude,frequency,offset,tone,system,status,telemetry,comment
//! ```
//!
//! Lines are split on bare commas. There is no quoting, so a comma inside the
//! free-text `comment` column shifts everything after it.

mod field;
mod report;

pub use field::{FIELD_COUNT, Field};
pub use report::FilteredReport;

/// One parsed log line
///
/// Always holds exactly [`FIELD_COUNT`] values. Missing trailing columns are
/// empty strings and surplus columns are discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogRecord {
    values: [String; FIELD_COUNT],
}

impl LogRecord {
    /// Parse a raw line (with or without its trailing newline)
    ///
    /// # Example
    /// ```
    /// use direwatch::record::{Field, LogRecord};
    ///
    /// let record = LogRecord::parse("0,1700000000,2023-11-14T22:13:20Z,N0CALL,WIDE1-1\n");
    /// assert_eq!(record.get(Field::Source), "N0CALL");
    /// assert_eq!(record.get(Field::Comment), "");
    /// ```
    pub fn parse(line: &str) -> Self {
        let mut values: [String; FIELD_COUNT] = Default::default();
        for (slot, value) in values.iter_mut().zip(line.trim_end().split(',')) {
            *slot = value.to_string();
        }
        Self { values }
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Iterate `(field, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }

    /// True for Direwolf's own column header line
    ///
    /// Direwolf writes the header whenever it starts a fresh log file, so it
    /// can show up in the middle of a tailed stream.
    pub fn is_header(&self) -> bool {
        self.get(Field::Chan) == Field::Chan.name()
            && self.get(Field::Source) == Field::Source.name()
    }

    /// Rewrite latitude and longitude with exactly five decimals
    ///
    /// Both coordinates are blanked if either one is missing or is not a
    /// finite number. A good latitude is never shown next to a bad longitude.
    pub fn normalize_coordinates(&mut self) {
        let lat = parse_coordinate(self.get(Field::Latitude));
        let lon = parse_coordinate(self.get(Field::Longitude));

        match (lat, lon) {
            (Some(lat), Some(lon)) => {
                self.set(Field::Latitude, format!("{:.5}", lat));
                self.set(Field::Longitude, format!("{:.5}", lon));
            }
            _ => {
                self.set(Field::Latitude, String::new());
                self.set(Field::Longitude, String::new());
            }
        }
    }
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
