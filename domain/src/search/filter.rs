//! Declarative result filtering.
//!
//! [`FilterSpec`] describes constraints on rating, price and opening state;
//! [`ResultFilter`] narrows a candidate list to the places satisfying all of
//! them. Both are pure: no I/O, no failure modes.
//!
//! Interpreted filters arrive as loosely-typed JSON (`{"rating_min": ">4.5"}`),
//! so [`FilterSpec::from_filters`] converts them leniently and reports every
//! value it had to drop as a [`FilterIssue`] instead of failing.

use crate::search::place::PlaceCandidate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Keys accepted for the minimum-rating axis, canonical name first.
const RATING_KEYS: &[&str] = &["rating_min", "min_rating", "minimum_rating", "rating"];

/// Keys accepted for the price ceiling axis, canonical name first.
const PRICE_KEYS: &[&str] = &["price_level", "max_price", "price"];

/// Keys accepted for the open-now axis, canonical name first.
const OPEN_KEYS: &[&str] = &["open_now", "open"];

/// Constraints applied to place candidates
///
/// Every field is optional; `None` means "no constraint on that axis".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Keep places rated at least this much
    pub rating_min: Option<f64>,
    /// Keep places whose price tier is at most this
    pub price_level: Option<u8>,
    /// Keep places whose opening state equals this
    pub open_now: Option<bool>,
}

/// A filter value that could not be converted and was dropped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterIssue {
    pub key: String,
    pub value: Value,
    pub reason: String,
}

impl std::fmt::Display for FilterIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "filter '{}' = {} dropped: {}", self.key, self.value, self.reason)
    }
}

impl FilterSpec {
    pub fn with_rating_min(mut self, rating_min: f64) -> Self {
        self.rating_min = Some(rating_min);
        self
    }

    pub fn with_price_level(mut self, price_level: u8) -> Self {
        self.price_level = Some(price_level);
        self
    }

    pub fn with_open_now(mut self, open_now: bool) -> Self {
        self.open_now = Some(open_now);
        self
    }

    /// True when no axis is constrained
    pub fn is_unconstrained(&self) -> bool {
        self.rating_min.is_none() && self.price_level.is_none() && self.open_now.is_none()
    }

    /// Check a single candidate against every set axis
    pub fn matches(&self, place: &PlaceCandidate) -> bool {
        if let Some(min) = self.rating_min {
            match place.rating {
                Some(rating) if rating >= min => {}
                _ => return false,
            }
        }

        if let Some(ceiling) = self.price_level {
            match place.price_level {
                Some(level) if level <= ceiling => {}
                _ => return false,
            }
        }

        if let Some(wanted) = self.open_now
            && place.open_now != Some(wanted)
        {
            return false;
        }

        true
    }

    /// Convert interpreted filter values into a `FilterSpec`.
    ///
    /// Keys are matched case-insensitively against known aliases, canonical
    /// name first; the first alias whose value converts wins. When no alias
    /// converts, only that axis is dropped and the first failure is returned
    /// alongside the filter built from everything else. Unknown keys and
    /// `null` values are ignored.
    pub fn from_filters(filters: &BTreeMap<String, Value>) -> (Self, Vec<FilterIssue>) {
        let normalized: BTreeMap<String, &Value> = filters
            .iter()
            .map(|(key, value)| (key.trim().to_lowercase(), value))
            .collect();

        let mut issues = Vec::new();
        let spec = FilterSpec {
            rating_min: resolve(&normalized, RATING_KEYS, parse_rating, &mut issues),
            price_level: resolve(&normalized, PRICE_KEYS, parse_price_level, &mut issues),
            open_now: resolve(&normalized, OPEN_KEYS, parse_open_now, &mut issues),
        };

        (spec, issues)
    }
}

/// Applies a [`FilterSpec`] to candidate lists
pub struct ResultFilter;

impl ResultFilter {
    /// Return the order-preserving subsequence of `candidates` matching `spec`.
    ///
    /// An unconstrained spec returns the input unchanged.
    pub fn apply(candidates: &[PlaceCandidate], spec: &FilterSpec) -> Vec<PlaceCandidate> {
        if spec.is_unconstrained() {
            return candidates.to_vec();
        }

        candidates
            .iter()
            .filter(|place| spec.matches(place))
            .cloned()
            .collect()
    }
}

fn resolve<T>(
    normalized: &BTreeMap<String, &Value>,
    keys: &[&'static str],
    parse: fn(&Value) -> Result<T, String>,
    issues: &mut Vec<FilterIssue>,
) -> Option<T> {
    let mut first_failure = None;
    for key in keys {
        let Some(&value) = normalized.get(*key).filter(|value| !value.is_null()) else {
            continue;
        };
        match parse(value) {
            Ok(parsed) => return Some(parsed),
            Err(reason) => {
                first_failure.get_or_insert_with(|| issue(key, value, reason));
            }
        }
    }
    issues.extend(first_failure);
    None
}

fn issue(key: &str, value: &Value, reason: String) -> FilterIssue {
    FilterIssue {
        key: key.to_string(),
        value: value.clone(),
        reason,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Accepts `4.5`, `"4.5"`, `">4.5"` and `">= 4.5"`.
///
/// A strict `>` prefix is read as `>=`: the rating axis is a single
/// inclusive minimum, so `">4.5"` keeps a place rated exactly 4.5.
fn parse_rating(value: &Value) -> Result<f64, String> {
    let rating = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("{} is not representable as a float", n))?,
        Value::String(s) => {
            let stripped = s.trim().trim_start_matches(['>', '=']).trim();
            stripped
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", s))?
        }
        other => return Err(format!("expected a number, got {}", json_type(other))),
    };

    if !rating.is_finite() {
        return Err(format!("{} is not a finite rating", rating));
    }
    Ok(rating)
}

/// Accepts `2`, `2.0`, `"2"` and `"$$"`.
fn parse_price_level(value: &Value) -> Result<u8, String> {
    match value {
        Value::Number(n) => {
            if let Some(level) = n.as_u64() {
                return u8::try_from(level).map_err(|_| format!("{} is out of range", level));
            }
            match n.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u8::MAX) => Ok(f as u8),
                _ => Err(format!("{} is not a non-negative integer", n)),
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if !trimmed.is_empty() && trimmed.chars().all(|c| c == '$') {
                return u8::try_from(trimmed.len())
                    .map_err(|_| format!("'{}' is out of range", s));
            }
            trimmed
                .parse::<u8>()
                .map_err(|_| format!("'{}' is not a price level", s))
        }
        other => Err(format!("expected an integer, got {}", json_type(other))),
    }
}

/// Accepts booleans, `0`/`1` and `true/false/yes/no` strings.
fn parse_open_now(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_u64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(format!("{} is not a boolean", n)),
        },
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(format!("'{}' is not a boolean", s)),
        },
        other => Err(format!("expected a boolean, got {}", json_type(other))),
    }
}
