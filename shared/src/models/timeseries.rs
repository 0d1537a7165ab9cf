//! Time-series data models
//!
//! Providers hand the backend loosely-structured JSON; only the flat-series
//! entry has a stable shape worth typing. The full payload stays a
//! `serde_json::Value` until the normalizer turns it into a table.

use serde::{Deserialize, Serialize};

/// One entry of a flat provider series: a timestamp and an optional reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataPoint {
    pub date: String,
    pub value: Option<f64>,
}

impl DataPoint {
    pub fn new(date: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}
