//! Weather query and summary models

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::types::GpsCoordinates;

/// Which upstream provider produced a response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WeatherSource {
    Meteomatics,
    #[serde(rename = "NASA POWER")]
    NasaPower,
}

/// Unified weather query as submitted by the frontend.
///
/// Either explicit coordinates or at least one free-text location field must
/// be present; `date_time` is always required.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WeatherQuery {
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub lon: Option<f64>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub locality: Option<String>,
    #[serde(rename = "dateTime")]
    pub date_time: String,
}

/// Condensed single-day view of a weather series.
///
/// Field values come from the first entry of each variable's series; absent
/// variables stay `None` rather than zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub source: WeatherSource,
    pub location: GpsCoordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_celsius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed_mps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solar_radiation_wm2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_probability_percent: Option<f64>,
}

/// Hourly precipitation above this is counted as a rainy hour.
const RAINY_HOUR_THRESHOLD_MM: f64 = 0.1;

/// Share of hours with measurable precipitation, as a percentage rounded to
/// one decimal. `None` when the payload carries no precipitation series.
pub fn rain_probability_percent(payload: &Value) -> Option<f64> {
    let hours = payload.get("precip_1h:mm")?.as_array()?;
    if hours.is_empty() {
        return None;
    }

    let rainy = hours
        .iter()
        .filter(|h| {
            h.get("value")
                .and_then(Value::as_f64)
                .is_some_and(|v| v > RAINY_HOUR_THRESHOLD_MM)
        })
        .count();

    Some((rainy as f64 / hours.len() as f64 * 1000.0).round() / 10.0)
}

/// First reading of a flat-mapping series, if any.
fn first_series_value(payload: &Value, key: &str) -> Option<f64> {
    payload
        .get(key)?
        .as_array()?
        .first()?
        .get("value")?
        .as_f64()
}

/// Condense a Meteomatics flat-mapping payload into a summary.
pub fn summarize_meteomatics(payload: &Value, location: GpsCoordinates) -> WeatherSummary {
    WeatherSummary {
        source: WeatherSource::Meteomatics,
        location,
        temperature_celsius: first_series_value(payload, "t_2m:C"),
        precipitation_mm: first_series_value(payload, "precip_1h:mm"),
        wind_speed_mps: first_series_value(payload, "wind_speed_10m:ms"),
        solar_radiation_wm2: first_series_value(payload, "global_rad:wm2"),
        rain_probability_percent: rain_probability_percent(payload),
    }
}

/// First daily reading of a NASA POWER parameter
/// (`properties.parameter.<name>` maps date keys to values).
fn first_daily_value(payload: &Value, parameter: &str) -> Option<f64> {
    payload
        .get("properties")?
        .get("parameter")?
        .get(parameter)?
        .as_object()?
        .values()
        .next()?
        .as_f64()
}

/// Condense a NASA POWER daily payload into a summary. The daily API carries
/// no wind series, so `wind_speed_mps` stays unset.
pub fn summarize_nasa_power(payload: &Value, location: GpsCoordinates) -> WeatherSummary {
    WeatherSummary {
        source: WeatherSource::NasaPower,
        location,
        temperature_celsius: first_daily_value(payload, "T2M"),
        precipitation_mm: first_daily_value(payload, "PRECTOT"),
        wind_speed_mps: None,
        solar_radiation_wm2: first_daily_value(payload, "ALLSKY_SFC_SW_DWN"),
        rain_probability_percent: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rain_probability_counts_wet_hours() {
        let payload = json!({
            "precip_1h:mm": [
                {"date": "h0", "value": 0.0},
                {"date": "h1", "value": 0.5},
                {"date": "h2", "value": 1.2},
                {"date": "h3", "value": 0.05},
            ]
        });
        assert_eq!(rain_probability_percent(&payload), Some(50.0));
    }

    #[test]
    fn rain_probability_is_none_without_series() {
        assert_eq!(rain_probability_percent(&json!({})), None);
        assert_eq!(rain_probability_percent(&json!({"precip_1h:mm": []})), None);
    }

    #[test]
    fn meteomatics_summary_takes_first_values() {
        let payload = json!({
            "t_2m:C": [{"date": "h0", "value": 25.5}, {"date": "h1", "value": 26.0}],
            "wind_speed_10m:ms": [{"date": "h0", "value": 5.2}],
            "precip_1h:mm": [{"date": "h0", "value": 0.0}],
            "global_rad:wm2": [{"date": "h0", "value": 600.0}],
        });
        let summary = summarize_meteomatics(&payload, GpsCoordinates::new(14.6, -90.5));
        assert_eq!(summary.temperature_celsius, Some(25.5));
        assert_eq!(summary.wind_speed_mps, Some(5.2));
        assert_eq!(summary.solar_radiation_wm2, Some(600.0));
        assert_eq!(summary.rain_probability_percent, Some(0.0));
    }

    #[test]
    fn meteomatics_summary_tolerates_missing_series() {
        let payload = json!({"t_2m:C": [{"date": "h0", "value": 19.0}]});
        let summary = summarize_meteomatics(&payload, GpsCoordinates::new(0.0, 0.0));
        assert_eq!(summary.temperature_celsius, Some(19.0));
        assert_eq!(summary.wind_speed_mps, None);
        assert_eq!(summary.precipitation_mm, None);
    }

    #[test]
    fn nasa_summary_reads_daily_parameters() {
        let payload = json!({
            "properties": {
                "parameter": {
                    "T2M": {"20241005": 20.1},
                    "PRECTOT": {"20241005": 1.5},
                    "ALLSKY_SFC_SW_DWN": {"20241005": 550.0},
                }
            }
        });
        let summary = summarize_nasa_power(&payload, GpsCoordinates::new(14.6, -90.5));
        assert_eq!(summary.temperature_celsius, Some(20.1));
        assert_eq!(summary.precipitation_mm, Some(1.5));
        assert_eq!(summary.solar_radiation_wm2, Some(550.0));
        assert_eq!(summary.wind_speed_mps, None);
    }
}
