//! Locations of diagnostic causes inside a schema.

use std::fmt;

/// Where in the schema a diagnostic originates: a record-type path and,
/// optionally, one of its fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    record: String,
    field: Option<String>,
}

impl Location {
    /// A location naming a whole record type.
    pub fn record(record: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            field: None,
        }
    }

    /// A location naming a field of a record type.
    pub fn field(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            field: Some(field.into()),
        }
    }

    /// The record-type path.
    pub fn record_path(&self) -> &str {
        &self.record
    }

    /// The field name, if the location names a field.
    pub fn field_name(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}.{}", self.record, field),
            None => write!(f, "{}", self.record),
        }
    }
}
