//! Risk score models

use serde::{Deserialize, Serialize};

/// Normalized risk distribution across the four hazard categories.
///
/// Each field is a percentage in `[0, 100]` rounded to two decimals. The
/// four values sum to ~100 whenever at least one category carries a non-zero
/// raw contribution, and to ~0 in the degenerate no-risk case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskScore {
    pub hot: f64,
    pub cold: f64,
    pub windy: f64,
    pub wet: f64,
}

impl RiskScore {
    /// The four category values in declaration order (hot, cold, windy, wet).
    pub fn as_array(&self) -> [f64; 4] {
        [self.hot, self.cold, self.windy, self.wet]
    }

    /// Sum of the four category percentages.
    pub fn total(&self) -> f64 {
        self.hot + self.cold + self.windy + self.wet
    }
}
