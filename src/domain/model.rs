use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// `[lat, lon]` pair.
pub type Coordinate = [f64; 2];

/// Incoming event as delivered by the HTTP gateway in front of the function.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl GatewayRequest {
    pub fn get(cadastral_number: &str) -> Self {
        let mut params = HashMap::new();
        params.insert("cadastralNumber".to_string(), cadastral_number.to_string());
        Self {
            http_method: Some("GET".to_string()),
            query_string_parameters: Some(params),
        }
    }

    pub fn method(&self) -> &str {
        self.http_method.as_deref().unwrap_or("GET")
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub cadastral_number: String,
}

/// One outbound call, fully described before it is made.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
    /// Human-readable service name used in error messages.
    pub service: String,
}

/// Fields a source extracts from its upstream document, before pricing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotFields {
    pub address: String,
    pub area: f64,
    pub category: String,
    pub coordinates: Vec<Coordinate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceEstimate {
    pub points_count: u64,
    pub cost_per_point: u64,
    pub total_cost: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotResult {
    pub cadastral_number: String,
    pub address: String,
    pub area: f64,
    pub category: String,
    pub cost_per_point: u64,
    pub points_count: u64,
    pub total_cost: u64,
    pub coordinates: Vec<Coordinate>,
    pub source: String,
}

impl PlotResult {
    pub fn new(
        cadastral_number: String,
        fields: PlotFields,
        estimate: PriceEstimate,
        source: &str,
    ) -> Self {
        Self {
            cadastral_number,
            address: fields.address,
            area: round_to(fields.area, 2),
            category: fields.category,
            cost_per_point: estimate.cost_per_point,
            points_count: estimate.points_count,
            total_cost: estimate.total_cost,
            coordinates: fields.coordinates,
            source: source.to_string(),
        }
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
