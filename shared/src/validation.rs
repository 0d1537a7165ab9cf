//! Validation utilities for Check-Now queries
//!
//! Boundary checks applied before any upstream call is made.

use chrono::{NaiveDate, NaiveDateTime};

/// Date format accepted by the range endpoints.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Date-time format accepted by the unified query endpoint.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Validate a latitude/longitude pair is on the globe.
pub fn validate_lat_lon(lat: f64, lon: f64) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(date: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| "Date must be YYYY-MM-DD")
}

/// Parse a `YYYY-MM-DDTHH:MM` date-time string.
pub fn parse_date_time(date_time: &str) -> Result<NaiveDateTime, &'static str> {
    NaiveDateTime::parse_from_str(date_time, DATE_TIME_FORMAT)
        .map_err(|_| "Date/time must be YYYY-MM-DDTHH:MM")
}

/// Validate a start/end date pair is ordered.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), &'static str> {
    if start > end {
        return Err("start must not be after end");
    }
    Ok(())
}

/// Assemble a geocoder query from the optional location parts, most specific
/// first. Returns an error when every part is empty or absent.
pub fn build_location_query(
    country: Option<&str>,
    city: Option<&str>,
    locality: Option<&str>,
) -> Result<String, &'static str> {
    let parts: Vec<&str> = [locality, city, country]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        return Err("Provide coordinates or at least one location field");
    }
    Ok(parts.join(", "))
}
