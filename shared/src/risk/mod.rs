//! Weather risk scoring core
//!
//! Two pure components layered on top of each other: the [`normalize`]
//! routine turns a loosely-structured provider payload into a
//! [`NormalizedTable`], and [`score`] derives a bounded four-category risk
//! distribution from that table. Both are synchronous, allocation-only
//! computations with no shared state, safe to call concurrently from any
//! number of request handlers.

mod normalize;
mod score;

pub use normalize::{normalize, NormalizedTable};
pub use score::{compute_risk, score, SEMANTIC_COLUMNS};

use thiserror::Error;

/// Errors produced by the risk scoring core.
#[derive(Debug, Error)]
pub enum RiskError {
    /// The payload is not a mapping of weather variables. Raised before any
    /// table construction so a raw string (or an upstream error body) is
    /// never iterated as if it were columns.
    #[error("payload is not a mapping of weather variables")]
    InvalidPayloadKind,

    /// None of the temperature/wind/precipitation columns resolved — the
    /// payload carried no recognizable weather variable.
    #[error("no usable weather variables found in payload")]
    NoUsableVariables,

    /// Unexpected failure while building the table or computing statistics,
    /// carrying a description of the cause.
    #[error("risk computation failed: {0}")]
    Computation(String),
}

/// Result type alias for the risk core.
pub type RiskResult<T> = Result<T, RiskError>;
