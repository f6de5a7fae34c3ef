use crate::config::NspdSettings;
use crate::core::fields::{is_truthy, lat_lon, parse_area, string_or};
use crate::core::{PlotFields, PlotSource, Result, UpstreamRequest};
use crate::domain::model::Coordinate;
use crate::utils::error::LookupError;
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const NSPD_TAG: &str = "NSPD";
const SERVICE_NAME: &str = "NSPD";
const THEMATIC_SEARCH_ID: &str = "1";

const DEFAULT_ADDRESS: &str = "Адрес не указан";
const DEFAULT_CATEGORY: &str = "Не указана";
/// Only the first corners of the outer ring are reported.
const MAX_VERTICES: usize = 4;

/// Search-style lookup against the NSPD geoportal.
#[derive(Debug, Clone)]
pub struct NspdSource {
    settings: NspdSettings,
}

impl NspdSource {
    pub fn new(settings: NspdSettings) -> Self {
        Self { settings }
    }
}

impl PlotSource for NspdSource {
    fn tag(&self) -> &'static str {
        NSPD_TAG
    }

    fn build_request(&self, cadastral_number: &str) -> Result<UpstreamRequest> {
        let mut url = Url::parse(&self.settings.search_url).map_err(|e| LookupError::Internal {
            message: format!("Invalid NSPD search URL: {}", e),
        })?;
        url.query_pairs_mut()
            .append_pair("thematicSearchId", THEMATIC_SEARCH_ID)
            .append_pair("query", cadastral_number);

        Ok(UpstreamRequest {
            url,
            headers: vec![("User-Agent".to_string(), self.settings.user_agent.clone())],
            timeout: Duration::from_secs(self.settings.timeout_secs),
            service: SERVICE_NAME.to_string(),
        })
    }

    fn extract(&self, document: &Value) -> Result<PlotFields> {
        let feature = document
            .get("data")
            .filter(|data| is_truthy(Some(*data)))
            .and_then(|data| data.get("features"))
            .and_then(Value::as_array)
            .and_then(|features| features.first())
            .ok_or_else(|| LookupError::NotFound {
                error: "Участок не найден в НСПД".to_string(),
                message: "Возможно, объект снят с учета или указан неверный кадастровый номер"
                    .to_string(),
            })?;

        let properties = feature.get("properties");

        Ok(PlotFields {
            address: string_or(properties, "address", DEFAULT_ADDRESS),
            area: parse_area(properties.and_then(|p| p.get("area"))),
            category: string_or(properties, "category", DEFAULT_CATEGORY),
            coordinates: polygon_corners(feature.get("geometry")),
        })
    }
}

/// First vertices of a Polygon's outer ring as `[lat, lon]`. Any other
/// geometry, or a malformed one, yields no coordinates.
fn polygon_corners(geometry: Option<&Value>) -> Vec<Coordinate> {
    let Some(geometry) = geometry else {
        return Vec::new();
    };
    if geometry.get("type").and_then(Value::as_str) != Some("Polygon") {
        return Vec::new();
    }

    let outer_ring = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .and_then(|rings| rings.first())
        .and_then(Value::as_array);

    outer_ring
        .map(|ring| {
            ring.iter()
                .take(MAX_VERTICES)
                .filter_map(|vertex| {
                    let position = vertex.as_array()?;
                    let lon = position.first()?.as_f64()?;
                    let lat = position.get(1)?.as_f64()?;
                    Some(lat_lon(lon, lat))
                })
                .collect()
        })
        .unwrap_or_default()
}
