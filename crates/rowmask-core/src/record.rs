//! Record and value model
//!
//! A record is one row of the stream: an ordered list of optional values,
//! one slot per schema column. `None` is the null value; masking never
//! operates on absence.

use crate::schema::ColumnType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A typed column value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Text(String),
    Boolean(bool),
    Double(f64),
    Long(i64),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
}

impl Value {
    /// The column type this value conforms to
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Text(_) => ColumnType::Text,
            Value::Boolean(_) => ColumnType::Boolean,
            Value::Double(_) => ColumnType::Double,
            Value::Long(_) => ColumnType::Long,
            Value::Timestamp(_) => ColumnType::Timestamp,
            Value::Json(_) => ColumnType::Json,
        }
    }

    /// Canonical text rendering used as masking input for scalar columns.
    ///
    /// Text is verbatim, booleans are `true`/`false`, longs are decimal,
    /// doubles use Rust's shortest-roundtrip formatting, timestamps are
    /// RFC 3339 in UTC. JSON values render to their compact JSON text.
    pub fn render_text(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Boolean(b) => b.to_string(),
            Value::Double(d) => d.to_string(),
            Value::Long(l) => l.to_string(),
            Value::Timestamp(ts) => ts.to_rfc3339(),
            Value::Json(v) => v.to_string(),
        }
    }
}

/// One row of the stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    values: Vec<Option<Value>>,
}

impl Record {
    pub fn new(values: Vec<Option<Value>>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Option<Value>> {
        self.values.get(index)
    }

    pub fn into_values(self) -> Vec<Option<Value>> {
        self.values
    }
}

impl From<Vec<Option<Value>>> for Record {
    fn from(values: Vec<Option<Value>>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn render_text_scalars() {
        assert_eq!(Value::Text("hello".into()).render_text(), "hello");
        assert_eq!(Value::Boolean(true).render_text(), "true");
        assert_eq!(Value::Long(-42).render_text(), "-42");
        assert_eq!(Value::Double(1.5).render_text(), "1.5");

        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(Value::Timestamp(ts).render_text(), "2024-05-01T12:30:00+00:00");
    }

    #[test]
    fn value_reports_its_column_type() {
        assert_eq!(Value::Long(1).column_type(), ColumnType::Long);
        assert_eq!(
            Value::Json(serde_json::json!({"a": 1})).column_type(),
            ColumnType::Json
        );
    }
}
