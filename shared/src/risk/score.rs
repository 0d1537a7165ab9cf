//! Risk scorer
//!
//! Derives a four-category risk distribution (hot, cold, windy, wet) from a
//! normalized time series. The heuristic is a deliberately simple
//! placeholder: per-category mean-based contributions clamped to [0, 1],
//! scaled into percentages that sum to ~100.

use serde_json::Value;

use super::{normalize, NormalizedTable, RiskError, RiskResult};
use crate::models::RiskScore;

/// Ordered semantic-column alias table. The first column whose lower-cased
/// name contains one of the substrings resolves that variable.
pub const SEMANTIC_COLUMNS: &[(&str, &[&str])] = &[
    ("temperature", &["temp", "t_2m"]),
    ("wind", &["wind", "speed"]),
    ("precipitation", &["precip", "rain"]),
];

/// Hot risk ramps from 0 to 1 as the mean temperature goes 25°C → 35°C.
const HOT_ONSET_CELSIUS: f64 = 25.0;
/// Cold risk ramps from 0 to 1 as the mean temperature goes 15°C → 5°C.
const COLD_ONSET_CELSIUS: f64 = 15.0;
/// Span of both temperature ramps, in °C.
const TEMP_RAMP_CELSIUS: f64 = 10.0;
/// Mean wind speed at which windy risk saturates, in m/s.
const WIND_SATURATION_MPS: f64 = 15.0;
/// Mean precipitation at which wet risk saturates, in mm.
const PRECIP_SATURATION_MM: f64 = 10.0;
/// Guard against division by zero when every raw contribution is zero.
const NORMALIZATION_EPSILON: f64 = 1e-9;

/// Score a normalized table into a [`RiskScore`].
///
/// # Errors
///
/// [`RiskError::NoUsableVariables`] when none of the temperature, wind or
/// precipitation columns resolve.
pub fn score(table: &NormalizedTable) -> RiskResult<RiskScore> {
    let [mean_temp, mean_wind, mean_precip] = resolve_means(table)?;

    let risk_hot = contribution((mean_temp - HOT_ONSET_CELSIUS) / TEMP_RAMP_CELSIUS);
    let risk_cold = contribution((COLD_ONSET_CELSIUS - mean_temp) / TEMP_RAMP_CELSIUS);
    let risk_windy = contribution(mean_wind / WIND_SATURATION_MPS);
    let risk_wet = contribution(mean_precip / PRECIP_SATURATION_MM);

    let raw = [risk_hot, risk_cold, risk_windy, risk_wet];
    let sum: f64 = raw.iter().sum();
    let [hot, cold, windy, wet] = raw.map(|r| round2(r / (sum + NORMALIZATION_EPSILON) * 100.0));

    Ok(RiskScore {
        hot,
        cold,
        windy,
        wet,
    })
}

/// Normalize a raw provider payload and score it in one step.
///
/// # Errors
///
/// Any [`RiskError`] from [`normalize`] or [`score`].
pub fn compute_risk(payload: &Value) -> RiskResult<RiskScore> {
    let table = normalize(payload)?;
    score(&table)
}

/// Means for temperature, wind and precipitation, in the order of
/// [`SEMANTIC_COLUMNS`]. An unresolved variable yields a NaN mean.
fn resolve_means(table: &NormalizedTable) -> RiskResult<[f64; 3]> {
    let mut means = [f64::NAN; 3];
    let mut any_resolved = false;

    for (slot, (_, substrings)) in SEMANTIC_COLUMNS.iter().enumerate() {
        if let Some(column) = table.find_column(substrings) {
            means[slot] = column.mean();
            any_resolved = true;
        }
    }

    if !any_resolved {
        return Err(RiskError::NoUsableVariables);
    }
    Ok(means)
}

/// A raw risk contribution: NaN means (unresolved or empty columns) count as
/// zero, everything else clamps to [0, 1].
fn contribution(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat_payload(temp: f64, wind: f64, precip: f64) -> Value {
        json!({
            "t_2m:C": [{"date": "2024-10-05T12:00:00Z", "value": temp}],
            "wind_speed_10m:ms": [{"date": "2024-10-05T12:00:00Z", "value": wind}],
            "precip_1h:mm": [{"date": "2024-10-05T12:00:00Z", "value": precip}],
        })
    }

    #[test]
    fn hot_day_takes_the_whole_distribution() {
        let risk = compute_risk(&flat_payload(35.0, 0.0, 0.0)).unwrap();
        assert_eq!(risk.hot, 100.0);
        assert_eq!(risk.cold, 0.0);
        assert_eq!(risk.windy, 0.0);
        assert_eq!(risk.wet, 0.0);
    }

    #[test]
    fn saturated_wind_and_rain_split_evenly() {
        let risk = compute_risk(&flat_payload(20.0, 15.0, 10.0)).unwrap();
        assert_eq!(risk.hot, 0.0);
        assert_eq!(risk.cold, 0.0);
        assert_eq!(risk.windy, 50.0);
        assert_eq!(risk.wet, 50.0);
    }

    #[test]
    fn cold_windy_wet_day_splits_half_quarter_quarter() {
        let risk = compute_risk(&flat_payload(5.0, 7.5, 5.0)).unwrap();
        assert_eq!(risk.hot, 0.0);
        assert_eq!(risk.cold, 50.0);
        assert_eq!(risk.windy, 25.0);
        assert_eq!(risk.wet, 25.0);
    }

    #[test]
    fn mild_calm_day_degenerates_to_near_zero() {
        let risk = compute_risk(&flat_payload(20.0, 0.0, 0.0)).unwrap();
        assert!(risk.total().abs() < 0.1);
        for value in risk.as_array() {
            assert!(value >= 0.0);
        }
    }

    #[test]
    fn scoring_is_idempotent() {
        let table = normalize(&flat_payload(31.0, 6.0, 2.5)).unwrap();
        let first = score(&table).unwrap();
        let second = score(&table).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn column_resolution_is_case_insensitive() {
        let upper = json!({"T_2M": [{"date": "d", "value": 35.0}]});
        let suffixed = json!({"t_2m:C": [{"date": "d", "value": 35.0}]});
        assert_eq!(
            compute_risk(&upper).unwrap(),
            compute_risk(&suffixed).unwrap()
        );
    }

    #[test]
    fn wind_only_table_still_yields_four_categories() {
        let payload = json!({"wind_speed_10m:ms": [{"date": "d", "value": 12.0}]});
        let risk = compute_risk(&payload).unwrap();
        assert_eq!(risk.hot, 0.0);
        assert_eq!(risk.cold, 0.0);
        assert_eq!(risk.wet, 0.0);
        assert_eq!(risk.windy, 100.0);
    }

    #[test]
    fn unrecognized_columns_report_no_usable_variables() {
        let payload = json!({"humidity": [{"date": "d", "value": 80.0}], "pressure": [1013.0]});
        assert!(matches!(
            compute_risk(&payload),
            Err(RiskError::NoUsableVariables)
        ));
    }

    #[test]
    fn error_shaped_mapping_reports_no_usable_variables() {
        let payload = json!({"error": "Error 502: upstream unavailable"});
        assert!(matches!(
            compute_risk(&payload),
            Err(RiskError::NoUsableVariables)
        ));
    }

    #[test]
    fn string_payload_is_rejected_not_iterated() {
        let payload = json!("{\"oops\": \"stringified body\"}");
        assert!(matches!(
            compute_risk(&payload),
            Err(RiskError::InvalidPayloadKind)
        ));
    }

    #[test]
    fn output_is_bounded_and_sums_to_one_hundred() {
        let risk = compute_risk(&flat_payload(-3.0, 4.0, 1.0)).unwrap();
        for value in risk.as_array() {
            assert!((0.0..=100.0).contains(&value));
        }
        assert!((risk.total() - 100.0).abs() < 0.1);
    }

    #[test]
    fn record_list_payload_scores_like_flat_payload() {
        let wrapped = json!({
            "data": [
                {"temp": 35.0, "wind": 0.0, "precip": 0.0},
                {"temp": 35.0, "wind": 0.0, "precip": 0.0},
            ]
        });
        let risk = compute_risk(&wrapped).unwrap();
        assert_eq!(risk.hot, 100.0);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_distribution_is_bounded(
                temp in -60.0f64..60.0,
                wind in 0.0f64..80.0,
                precip in 0.0f64..200.0,
            ) {
                let risk = compute_risk(&flat_payload(temp, wind, precip)).unwrap();
                for value in risk.as_array() {
                    prop_assert!((0.0..=100.0).contains(&value));
                }
            }
        }
    }
}
