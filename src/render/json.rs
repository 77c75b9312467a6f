use serde::Serialize;

use super::{Formatter, iso8601_timestamp};
use crate::record::FilteredReport;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonLine<'a> {
    ts: String,
    #[serde(flatten)]
    report: &'a FilteredReport,
}

impl Formatter for JsonFormatter {
    fn format(&self, report: &FilteredReport) -> String {
        let line = JsonLine {
            ts: iso8601_timestamp(),
            report,
        };
        // Only string keys and values, serialization cannot fail
        serde_json::to_string(&line).unwrap_or_default()
    }
}
