use crate::config::PkkSettings;
use crate::core::fields::{is_truthy, lat_lon, parse_area, string_or};
use crate::core::{PlotFields, PlotSource, Result, UpstreamRequest};
use crate::domain::model::Coordinate;
use crate::utils::error::LookupError;
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const PKK_TAG: &str = "PKK";
const SERVICE_NAME: &str = "ПКК Росреестра";

const DEFAULT_CATEGORY: &str = "Не указана";
const LANDMARK_PREFIX: &str = "Местоположение установлено относительно ориентира";
const UNKNOWN_LANDMARK: &str = "не указано";

/// Feature-by-id lookup against the Rosreestr public cadastral map.
#[derive(Debug, Clone)]
pub struct PkkSource {
    settings: PkkSettings,
}

impl PkkSource {
    pub fn new(settings: PkkSettings) -> Self {
        Self { settings }
    }
}

fn not_found() -> LookupError {
    LookupError::NotFound {
        error: "Участок не найден в ПКК Росреестра".to_string(),
        message: "Проверьте правильность кадастрового номера".to_string(),
    }
}

impl PlotSource for PkkSource {
    fn tag(&self) -> &'static str {
        PKK_TAG
    }

    fn build_request(&self, cadastral_number: &str) -> Result<UpstreamRequest> {
        let invalid_base = || LookupError::Internal {
            message: format!("Invalid PKK feature URL: {}", self.settings.feature_url),
        };

        let mut url = Url::parse(&self.settings.feature_url).map_err(|_| invalid_base())?;
        url.path_segments_mut()
            .map_err(|_| invalid_base())?
            .pop_if_empty()
            .push(cadastral_number);

        Ok(UpstreamRequest {
            url,
            headers: vec![
                ("User-Agent".to_string(), self.settings.user_agent.clone()),
                ("Referer".to_string(), self.settings.referer.clone()),
            ],
            timeout: Duration::from_secs(self.settings.timeout_secs),
            service: SERVICE_NAME.to_string(),
        })
    }

    fn extract(&self, document: &Value) -> Result<PlotFields> {
        if document.is_null() || is_truthy(document.get("error")) {
            return Err(not_found());
        }

        // a missing feature only means every field falls back to its default
        let feature = document.get("feature");
        let attrs = feature.and_then(|f| f.get("attrs"));

        Ok(PlotFields {
            address: address_or_landmark(attrs),
            area: parse_area(attrs.and_then(|a| a.get("area_value"))),
            category: string_or(attrs, "category_type", DEFAULT_CATEGORY),
            coordinates: extent_corners(feature.and_then(|f| f.get("extent"))),
        })
    }
}

/// Plots without a postal address are described relative to a landmark.
fn address_or_landmark(attrs: Option<&Value>) -> String {
    match attrs.and_then(|a| a.get("address")).and_then(Value::as_str) {
        Some(address) if !address.is_empty() && address != "None" => address.to_string(),
        _ => format!(
            "{}: {}",
            LANDMARK_PREFIX,
            string_or(attrs, "util_by_doc", UNKNOWN_LANDMARK)
        ),
    }
}

/// Corners of the bounding box in the order (min,min), (max,min), (max,max),
/// (min,max). x is longitude, y is latitude.
fn extent_corners(extent: Option<&Value>) -> Vec<Coordinate> {
    let bound = |key: &str| {
        extent
            .and_then(|e| e.get(key))
            .and_then(Value::as_f64)
            .filter(|v| *v != 0.0)
    };

    match (bound("xmin"), bound("ymin"), bound("xmax"), bound("ymax")) {
        (Some(xmin), Some(ymin), Some(xmax), Some(ymax)) => vec![
            lat_lon(xmin, ymin),
            lat_lon(xmax, ymin),
            lat_lon(xmax, ymax),
            lat_lon(xmin, ymax),
        ],
        _ => Vec::new(),
    }
}
