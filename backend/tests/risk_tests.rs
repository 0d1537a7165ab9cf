//! Risk scoring integration tests
//!
//! Tests for the normalizer + scorer pipeline including:
//! - Distribution bounds and the sum-to-100 law
//! - Degenerate all-zero-contribution behavior
//! - Column alias resolution and missing-variable tolerance
//! - Malformed payload rejection

use proptest::prelude::*;
use serde_json::{json, Value};
use shared::models::RiskScore;
use shared::risk::{compute_risk, normalize, score, RiskError};

/// Build a flat-mapping payload with one hourly reading per variable.
fn payload(temp: f64, wind: f64, precip: f64) -> Value {
    json!({
        "t_2m:C": [{"date": "2024-10-05T12:00:00Z", "value": temp}],
        "wind_speed_10m:ms": [{"date": "2024-10-05T12:00:00Z", "value": wind}],
        "precip_1h:mm": [{"date": "2024-10-05T12:00:00Z", "value": precip}],
    })
}

/// Raw (pre-normalization) contributions for the given means.
fn raw_contributions(temp: f64, wind: f64, precip: f64) -> [f64; 4] {
    [
        ((temp - 25.0) / 10.0).clamp(0.0, 1.0),
        ((15.0 - temp) / 10.0).clamp(0.0, 1.0),
        (wind / 15.0).clamp(0.0, 1.0),
        (precip / 10.0).clamp(0.0, 1.0),
    ]
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Hot day with no wind or rain concentrates on the hot category
    #[test]
    fn test_hot_day_distribution() {
        let risk = compute_risk(&payload(35.0, 0.0, 0.0)).unwrap();
        assert_eq!(
            risk,
            RiskScore {
                hot: 100.0,
                cold: 0.0,
                windy: 0.0,
                wet: 0.0
            }
        );
    }

    /// Neutral temperature with saturated wind and rain splits 50/50
    #[test]
    fn test_windy_wet_split() {
        let risk = compute_risk(&payload(20.0, 15.0, 10.0)).unwrap();
        assert_eq!(
            risk,
            RiskScore {
                hot: 0.0,
                cold: 0.0,
                windy: 50.0,
                wet: 50.0
            }
        );
    }

    /// Cold day with half-saturated wind and rain splits 50/25/25
    #[test]
    fn test_cold_windy_wet_split() {
        let risk = compute_risk(&payload(5.0, 7.5, 5.0)).unwrap();
        assert_eq!(
            risk,
            RiskScore {
                hot: 0.0,
                cold: 50.0,
                windy: 25.0,
                wet: 25.0
            }
        );
    }

    /// Mild calm day yields the degenerate near-zero distribution, not an error
    #[test]
    fn test_degenerate_all_zero_case() {
        let risk = compute_risk(&payload(20.0, 0.0, 0.0)).unwrap();
        assert!(risk.total().abs() < 0.1);
    }

    /// Scoring the same table twice is bit-identical
    #[test]
    fn test_idempotence() {
        let table = normalize(&payload(28.5, 4.2, 1.1)).unwrap();
        assert_eq!(score(&table).unwrap(), score(&table).unwrap());
    }

    /// Column resolution is case-insensitive and tolerates unit suffixes
    #[test]
    fn test_alias_resolution() {
        let upper = json!({"T_2M": [{"date": "d", "value": 35.0}]});
        let suffixed = json!({"t_2m:C": [{"date": "d", "value": 35.0}]});
        let spelled = json!({"Temperature_2m": [{"date": "d", "value": 35.0}]});

        let expected = compute_risk(&suffixed).unwrap();
        assert_eq!(compute_risk(&upper).unwrap(), expected);
        assert_eq!(compute_risk(&spelled).unwrap(), expected);
    }

    /// A wind-only table still produces all four categories
    #[test]
    fn test_missing_variable_tolerance() {
        let wind_only = json!({"wind_speed_10m:ms": [{"date": "d", "value": 15.0}]});
        let risk = compute_risk(&wind_only).unwrap();
        assert_eq!(risk.hot, 0.0);
        assert_eq!(risk.cold, 0.0);
        assert_eq!(risk.wet, 0.0);
        assert_eq!(risk.windy, 100.0);
    }

    /// A raw string payload is rejected, never iterated as columns
    #[test]
    fn test_string_payload_rejected() {
        let result = compute_risk(&json!("upstream error body"));
        assert!(matches!(result, Err(RiskError::InvalidPayloadKind)));
    }

    /// An error-shaped mapping surfaces as insufficient data, not a crash
    #[test]
    fn test_error_mapping_rejected() {
        let result = compute_risk(&json!({"error": "Error 502: bad gateway"}));
        assert!(matches!(result, Err(RiskError::NoUsableVariables)));
    }

    /// A payload with no recognizable variable surfaces as insufficient data
    #[test]
    fn test_no_usable_variables() {
        let result = compute_risk(&json!({"humidity": [{"date": "d", "value": 70.0}]}));
        assert!(matches!(result, Err(RiskError::NoUsableVariables)));
    }

    /// Wrapped record lists and flat mappings score identically
    #[test]
    fn test_record_list_equivalence() {
        let wrapped = json!({
            "data": [
                {"temp": 5.0, "wind": 7.5, "precip": 5.0},
                {"temp": 5.0, "wind": 7.5, "precip": 5.0},
            ]
        });
        assert_eq!(
            compute_risk(&wrapped).unwrap(),
            compute_risk(&payload(5.0, 7.5, 5.0)).unwrap()
        );
    }

    /// Null readings are skipped by the mean, not treated as zero
    #[test]
    fn test_null_readings_skipped() {
        let with_nulls = json!({
            "t_2m:C": [
                {"date": "h0", "value": 35.0},
                {"date": "h1", "value": null},
                {"date": "h2", "value": 35.0},
            ],
        });
        let risk = compute_risk(&with_nulls).unwrap();
        assert_eq!(risk.hot, 100.0);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Every output value is a percentage in [0, 100]
    #[test]
    fn prop_output_is_bounded(
        temp in -60.0f64..60.0,
        wind in 0.0f64..80.0,
        precip in 0.0f64..200.0,
    ) {
        let risk = compute_risk(&payload(temp, wind, precip)).unwrap();
        for value in risk.as_array() {
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }

    /// The distribution sums to ~100, except in the all-zero case where it
    /// sums to ~0
    #[test]
    fn prop_sum_law(
        temp in -60.0f64..60.0,
        wind in 0.0f64..80.0,
        precip in 0.0f64..200.0,
    ) {
        let raw_sum: f64 = raw_contributions(temp, wind, precip).iter().sum();
        // Contributions at the scale of the normalization epsilon neither
        // sum to 100 nor to 0; skip that sliver of the input space.
        prop_assume!(raw_sum == 0.0 || raw_sum > 1e-6);
        let risk = compute_risk(&payload(temp, wind, precip)).unwrap();

        if raw_sum == 0.0 {
            prop_assert!(risk.total().abs() < 0.1);
        } else {
            prop_assert!((risk.total() - 100.0).abs() < 0.1);
        }
    }

    /// Scoring is deterministic across repeated calls
    #[test]
    fn prop_idempotent(
        temp in -60.0f64..60.0,
        wind in 0.0f64..80.0,
        precip in 0.0f64..200.0,
    ) {
        let table = normalize(&payload(temp, wind, precip)).unwrap();
        prop_assert_eq!(score(&table).unwrap(), score(&table).unwrap());
    }

    /// Column-name casing never changes the result
    #[test]
    fn prop_case_insensitive(
        temp in -60.0f64..60.0,
        wind in 0.0f64..80.0,
        precip in 0.0f64..200.0,
    ) {
        let lower = payload(temp, wind, precip);
        let upper = json!({
            "T_2M:C": [{"date": "2024-10-05T12:00:00Z", "value": temp}],
            "WIND_SPEED_10M:MS": [{"date": "2024-10-05T12:00:00Z", "value": wind}],
            "PRECIP_1H:MM": [{"date": "2024-10-05T12:00:00Z", "value": precip}],
        });
        prop_assert_eq!(compute_risk(&lower).unwrap(), compute_risk(&upper).unwrap());
    }
}
