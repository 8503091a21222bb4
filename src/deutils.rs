// src/deutils.rs
use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;

use crate::constants::DEFAULT_SECONDS_PER_PAGE;

pub fn default_seconds_per_page() -> f64 { DEFAULT_SECONDS_PER_PAGE }

/// Coerces a JSON value to a number the way a loose front end would:
/// numbers pass, numeric strings are parsed, everything else is `None`.
pub fn value_to_f64(v: &Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
}

/// True when `secs` converts to a non-zero `Duration`. Rejects negatives,
/// NaN, infinities, overflow and values too small to register.
pub fn is_usable_interval(secs: f64) -> bool {
    Duration::try_from_secs_f64(secs).is_ok_and(|d| !d.is_zero())
}

/// Interval in seconds; missing, non-numeric or unusable values become the
/// default rather than an error.
pub fn deserialize_seconds_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    match value_to_f64(&v) {
        Some(n) if is_usable_interval(n) => Ok(n),
        _ => {
            warn!("secondsPerPage {} is not a positive number, using {}", v, DEFAULT_SECONDS_PER_PAGE);
            Ok(DEFAULT_SECONDS_PER_PAGE)
        }
    }
}

/// List of resource locators; a non-array becomes empty and non-string
/// entries are skipped.
pub fn deserialize_locators_lenient<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    let Value::Array(items) = v else {
        if !v.is_null() {
            warn!("pages is not a list ({}), playlist left empty", v);
        }
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            other => {
                warn!("skipping non-string page entry {}", other);
                None
            }
        })
        .collect())
}

/// Treats an explicit JSON `null` like an absent field.
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
