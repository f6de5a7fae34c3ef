use crate::domain::model::{GatewayResponse, PlotResult};
use crate::utils::error::LookupError;
use std::collections::HashMap;

pub const CORS_ALLOW_ORIGIN: (&str, &str) = ("Access-Control-Allow-Origin", "*");
pub const CONTENT_TYPE_JSON: (&str, &str) = ("Content-Type", "application/json");

pub const PREFLIGHT_HEADERS: [(&str, &str); 4] = [
    CORS_ALLOW_ORIGIN,
    ("Access-Control-Allow-Methods", "GET, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Max-Age", "86400"),
];

pub const JSON_HEADERS: [(&str, &str); 2] = [CONTENT_TYPE_JSON, CORS_ALLOW_ORIGIN];

fn header_map(headers: &[(&str, &str)]) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn json_response(status_code: u16, body: String) -> GatewayResponse {
    GatewayResponse {
        status_code,
        headers: header_map(&JSON_HEADERS),
        body,
    }
}

pub fn preflight() -> GatewayResponse {
    GatewayResponse {
        status_code: 200,
        headers: header_map(&PREFLIGHT_HEADERS),
        body: String::new(),
    }
}

pub fn success(result: &PlotResult) -> GatewayResponse {
    match serde_json::to_string(result) {
        Ok(body) => json_response(200, body),
        Err(e) => failure(&LookupError::from(e)),
    }
}

pub fn failure(error: &LookupError) -> GatewayResponse {
    // ErrorBody is two plain strings; serializing it cannot fail
    let body = serde_json::to_string(&error.error_body()).unwrap_or_default();
    json_response(error.status_code(), body)
}
