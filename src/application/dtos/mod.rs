use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{DistributionParams, DomainError};

/// Decoded `key=value` pairs of a query string, in request order.
pub type QueryPairs = [(String, String)];

/// First value given for `key`, ignoring any repeats.
fn first_value<'a>(pairs: &'a QueryPairs, key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn parse_param<T: FromStr>(pairs: &QueryPairs, keys: &[&str]) -> Result<Option<T>, DomainError>
where
    T::Err: std::fmt::Display,
{
    let Some((key, raw)) = keys
        .iter()
        .find_map(|key| first_value(pairs, key).map(|raw| (*key, raw)))
    else {
        return Ok(None);
    };

    raw.trim().parse().map(Some).map_err(|err| {
        DomainError::validation(format!("invalid `{key}` parameter `{raw}`: {err}"))
    })
}

/// Query string accepted by both response endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponsesQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ResponsesQuery {
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            kind: first_value(pairs, "type").map(str::to_string),
        }
    }
}

/// Acknowledgement returned after a document has been written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
}

impl SaveResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Optional curve parameters; anything left out comes from the configured defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistributionQuery {
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub points: Option<usize>,
}

impl DistributionQuery {
    /// Parse `mean`, `std_dev` (or `stdDev`) and `points` (or `numPoints`).
    pub fn from_pairs(pairs: &QueryPairs) -> Result<Self, DomainError> {
        Ok(Self {
            mean: parse_param(pairs, &["mean"])?,
            std_dev: parse_param(pairs, &["std_dev", "stdDev"])?,
            points: parse_param(pairs, &["points", "numPoints"])?,
        })
    }

    pub fn resolve(&self, defaults: DistributionParams) -> DistributionParams {
        DistributionParams {
            mean: self.mean.unwrap_or(defaults.mean),
            std_dev: self.std_dev.unwrap_or(defaults.std_dev),
            num_points: self.points.unwrap_or(defaults.num_points),
        }
    }
}

/// Health/readiness report for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatusResponse {
    pub ok: bool,
    pub message: String,
    pub details: Option<String>,
}
