//! Lenient readers for vendor JSON. Upstream documents are not validated
//! beyond presence checks, so every reader here falls back instead of failing.

use crate::domain::model::{round_to, Coordinate};
use serde_json::Value;

/// Decimal places kept for coordinates.
pub const COORDINATE_PRECISION: i32 = 6;

/// Reads an area that may arrive as a number or as a string with a comma
/// decimal separator. Anything unusable, negative or non-finite becomes 0.
pub fn parse_area(value: Option<&Value>) -> f64 {
    let area = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    if area.is_finite() && area > 0.0 {
        area
    } else {
        0.0
    }
}

/// String field with a default; empty strings count as absent.
pub fn string_or(object: Option<&Value>, key: &str, default: &str) -> String {
    object
        .and_then(|o| o.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Truthiness the way the vendor APIs use it: null, false, 0, "" and empty
/// containers are all "no".
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Builds a `[lat, lon]` pair from longitude/latitude, rounded.
pub fn lat_lon(lon: f64, lat: f64) -> Coordinate {
    [
        round_to(lat, COORDINATE_PRECISION),
        round_to(lon, COORDINATE_PRECISION),
    ]
}
