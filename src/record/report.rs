use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{Field, LogRecord};

/// The displayable subset of a record
///
/// Holds only non-empty values of the selected columns, in the order the
/// columns were selected. A column listed twice appears once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredReport {
    entries: Vec<(Field, String)>,
}

impl FilteredReport {
    /// Select `columns` from `record`
    ///
    /// Returns `None` when none of the selected columns has a value, in which
    /// case there is nothing to display for this line.
    pub fn from_record(record: &LogRecord, columns: &[Field]) -> Option<Self> {
        let mut entries: Vec<(Field, String)> = Vec::with_capacity(columns.len());
        for &field in columns {
            let value = record.get(field);
            if value.is_empty() || entries.iter().any(|(f, _)| *f == field) {
                continue;
            }
            entries.push((field, value.to_string()));
        }

        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a report built by [`FilteredReport::from_record`]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

impl Serialize for FilteredReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}
