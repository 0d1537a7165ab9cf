//! Time-series normalizer
//!
//! Providers ship two payload shapes: a wrapped record list
//! (`{"data": [{"t_2m:C": 21.4, ...}, ...]}`) and a flat mapping of variable
//! name to series (`{"t_2m:C": [{"date": ..., "value": ...}, ...], ...}`).
//! Both collapse into a [`NormalizedTable`] with lower-cased column names so
//! downstream lookups are case-insensitive.

use serde_json::Value;

use super::{RiskError, RiskResult};

/// Key under which record-list payloads wrap their rows.
const RECORD_LIST_KEY: &str = "data";

/// One named column of optional readings.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Column {
    pub(crate) name: String,
    pub(crate) values: Vec<Option<f64>>,
}

impl Column {
    /// Arithmetic mean of the non-missing readings. NaN when the column has
    /// zero observations, which the scorer folds into a zero contribution.
    pub(crate) fn mean(&self) -> f64 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for value in self.values.iter().flatten() {
            sum += value;
            count += 1;
        }
        if count == 0 {
            f64::NAN
        } else {
            sum / count as f64
        }
    }
}

/// Tabular view of a time-series payload: one row per timestamp index, one
/// column per variable, column names lower-cased on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    columns: Vec<Column>,
}

impl NormalizedTable {
    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of timestamp rows (longest column).
    pub fn num_rows(&self) -> usize {
        self.columns.iter().map(|c| c.values.len()).max().unwrap_or(0)
    }

    /// Cell at (row, column index), `None` when unset or out of range.
    pub fn cell(&self, row: usize, column: usize) -> Option<f64> {
        self.columns
            .get(column)
            .and_then(|c| c.values.get(row))
            .copied()
            .flatten()
    }

    /// First column whose name contains any of the given substrings.
    /// Substrings are expected lower-case; names already are.
    pub(crate) fn find_column(&self, substrings: &[&str]) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| substrings.iter().any(|s| c.name.contains(s)))
    }
}

/// Normalize a provider payload into a [`NormalizedTable`].
///
/// # Errors
///
/// [`RiskError::InvalidPayloadKind`] when the payload is not a JSON object;
/// [`RiskError::Computation`] when a wrapped record list is malformed.
pub fn normalize(payload: &Value) -> RiskResult<NormalizedTable> {
    let map = payload.as_object().ok_or(RiskError::InvalidPayloadKind)?;

    let columns = match map.get(RECORD_LIST_KEY) {
        Some(Value::Array(records)) => columns_from_records(records)?,
        Some(other) => {
            return Err(RiskError::Computation(format!(
                "'{RECORD_LIST_KEY}' holds {} instead of a record list",
                json_kind(other)
            )))
        }
        None => columns_from_series(map),
    };

    Ok(NormalizedTable { columns })
}

/// Build columns from a wrapped record list: every record is a mapping of
/// variable name to value, and row `i` comes from record `i`. Keys missing
/// from a record leave that row unset.
fn columns_from_records(records: &[Value]) -> RiskResult<Vec<Column>> {
    let mut columns: Vec<Column> = Vec::new();

    for (row, record) in records.iter().enumerate() {
        let fields = record.as_object().ok_or_else(|| {
            RiskError::Computation(format!(
                "record {row} is {} instead of a mapping",
                json_kind(record)
            ))
        })?;

        for (name, value) in fields {
            let name = name.to_lowercase();
            let index = match columns.iter().position(|c| c.name == name) {
                Some(existing) => existing,
                None => {
                    columns.push(Column {
                        name,
                        values: Vec::with_capacity(records.len()),
                    });
                    columns.len() - 1
                }
            };
            columns[index].values.resize(row, None);
            columns[index].values.push(value.as_f64());
        }
    }

    // Trailing rows that never mentioned a column stay unset.
    for column in &mut columns {
        column.values.resize(records.len(), None);
    }

    Ok(columns)
}

/// Build columns from a flat mapping of variable name to series. Series
/// entries are `{date, value}` objects or bare numbers; anything else —
/// including a non-list value such as an upstream `{"error": "..."}` field —
/// contributes zero observations rather than failing here, so the scorer can
/// report the absence of usable variables.
fn columns_from_series(map: &serde_json::Map<String, Value>) -> Vec<Column> {
    map.iter()
        .map(|(name, value)| Column {
            name: name.to_lowercase(),
            values: match value {
                Value::Array(entries) => entries.iter().map(series_entry_value).collect(),
                _ => Vec::new(),
            },
        })
        .collect()
}

fn series_entry_value(entry: &Value) -> Option<f64> {
    match entry {
        Value::Object(fields) => fields.get("value").and_then(Value::as_f64),
        _ => entry.as_f64(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
