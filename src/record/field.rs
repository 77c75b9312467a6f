use std::fmt;
use std::str::FromStr;

use crate::error::DirewatchError;

/// Number of positional fields in a Direwolf log line
pub const FIELD_COUNT: usize = 22;

/// One column of the Direwolf CSV log
///
/// Variants are declared in log order, so `field as usize` is the column
/// position within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Chan,
    Utime,
    Isotime,
    Source,
    Heard,
    Level,
    Error,
    Dti,
    Name,
    Symbol,
    Latitude,
    Longitude,
    Speed,
    Course,
    Altitude,
    Frequency,
    Offset,
    Tone,
    System,
    Status,
    Telemetry,
    Comment,
}

impl Field {
    /// All fields in log column order
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Chan,
        Field::Utime,
        Field::Isotime,
        Field::Source,
        Field::Heard,
        Field::Level,
        Field::Error,
        Field::Dti,
        Field::Name,
        Field::Symbol,
        Field::Latitude,
        Field::Longitude,
        Field::Speed,
        Field::Course,
        Field::Altitude,
        Field::Frequency,
        Field::Offset,
        Field::Tone,
        Field::System,
        Field::Status,
        Field::Telemetry,
        Field::Comment,
    ];

    /// Column position within a log line
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name as written in the Direwolf log header
    pub fn name(self) -> &'static str {
        match self {
            Field::Chan => "chan",
            Field::Utime => "utime",
            Field::Isotime => "isotime",
            Field::Source => "source",
            Field::Heard => "heard",
            Field::Level => "level",
            Field::Error => "error",
            Field::Dti => "dti",
            Field::Name => "name",
            Field::Symbol => "symbol",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::Speed => "speed",
            Field::Course => "course",
            Field::Altitude => "altitude",
            Field::Frequency => "frequency",
            Field::Offset => "offset",
            Field::Tone => "tone",
            Field::System => "system",
            Field::Status => "status",
            Field::Telemetry => "telemetry",
            Field::Comment => "comment",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = DirewatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DirewatchError::UnknownField(s.to_string()))
    }
}
