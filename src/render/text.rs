use super::Formatter;
use crate::record::FilteredReport;

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format(&self, report: &FilteredReport) -> String {
        report
            .iter()
            .map(|(field, value)| format!("{}: {}", field, value))
            .collect::<Vec<_>>()
            .join("  ")
    }
}
