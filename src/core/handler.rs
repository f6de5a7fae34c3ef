use crate::core::pricing;
use crate::core::response;
use crate::core::validator::{validate_request, ValidatedRequest};
use crate::core::{PlotSource, UpstreamClient};
use crate::domain::model::{GatewayRequest, GatewayResponse, LookupRequest, PlotResult};
use crate::utils::error::Result;

/// Validate, call upstream, extract, price, respond. One source per handler.
pub struct PlotLookupHandler<C: UpstreamClient> {
    source: Box<dyn PlotSource>,
    client: C,
}

impl<C: UpstreamClient> PlotLookupHandler<C> {
    pub fn new(source: Box<dyn PlotSource>, client: C) -> Self {
        Self { source, client }
    }

    pub fn source_tag(&self) -> &'static str {
        self.source.tag()
    }

    /// Always produces exactly one response; failures become error envelopes.
    pub async fn handle(&self, request: &GatewayRequest) -> GatewayResponse {
        let lookup = match validate_request(request) {
            Ok(ValidatedRequest::Preflight) => return response::preflight(),
            Ok(ValidatedRequest::Lookup(lookup)) => lookup,
            Err(e) => {
                tracing::warn!("Rejected {} request: {}", request.method(), e);
                return response::failure(&e);
            }
        };

        match self.lookup(&lookup).await {
            Ok(result) => {
                tracing::info!(
                    cadastral_number = %result.cadastral_number,
                    source = %result.source,
                    area = result.area,
                    total_cost = result.total_cost,
                    "Plot lookup succeeded"
                );
                response::success(&result)
            }
            Err(e) => {
                if e.is_client_error() {
                    tracing::warn!(
                        cadastral_number = %lookup.cadastral_number,
                        status = e.status_code(),
                        "Plot lookup failed: {}",
                        e
                    );
                } else {
                    tracing::error!(
                        cadastral_number = %lookup.cadastral_number,
                        status = e.status_code(),
                        "Plot lookup failed: {}",
                        e
                    );
                }
                response::failure(&e)
            }
        }
    }

    pub async fn lookup(&self, request: &LookupRequest) -> Result<PlotResult> {
        let upstream = self.source.build_request(&request.cadastral_number)?;
        tracing::debug!("Querying {} at {}", upstream.service, upstream.url);

        let document = self.client.fetch_json(&upstream).await?;
        let fields = self.source.extract(&document)?;
        let estimate = pricing::estimate(fields.area);

        Ok(PlotResult::new(
            request.cadastral_number.clone(),
            fields,
            estimate,
            self.source.tag(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PlotFields, UpstreamRequest};
    use crate::utils::error::{ErrorBody, LookupError};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;
    use url::Url;

    struct StubSource;

    impl PlotSource for StubSource {
        fn tag(&self) -> &'static str {
            "STUB"
        }

        fn build_request(&self, cadastral_number: &str) -> Result<UpstreamRequest> {
            Ok(UpstreamRequest {
                url: Url::parse(&format!("http://stub.local/{}", cadastral_number))
                    .map_err(|e| LookupError::Internal {
                        message: e.to_string(),
                    })?,
                headers: vec![],
                timeout: Duration::from_secs(1),
                service: "STUB".to_string(),
            })
        }

        fn extract(&self, document: &serde_json::Value) -> Result<PlotFields> {
            if document.get("missing").is_some() {
                return Err(LookupError::NotFound {
                    error: "Участок не найден".to_string(),
                    message: "stub".to_string(),
                });
            }
            Ok(PlotFields {
                address: "stub address".to_string(),
                area: crate::core::fields::parse_area(document.get("area")),
                category: "stub".to_string(),
                coordinates: vec![],
            })
        }
    }

    /// Returns a canned outcome and records how often it was called.
    #[derive(Clone)]
    struct MockClient {
        outcome: Arc<dyn Fn() -> Result<serde_json::Value> + Send + Sync>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl MockClient {
        fn new(outcome: impl Fn() -> Result<serde_json::Value> + Send + Sync + 'static) -> Self {
            Self {
                outcome: Arc::new(outcome),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl UpstreamClient for MockClient {
        async fn fetch_json(&self, request: &UpstreamRequest) -> Result<serde_json::Value> {
            self.calls.lock().await.push(request.url.to_string());
            (self.outcome)()
        }
    }

    #[tokio::test]
    async fn test_successful_lookup_prices_area() {
        let client = MockClient::new(|| Ok(serde_json::json!({"area": "6000,4"})));
        let handler = PlotLookupHandler::new(Box::new(StubSource), client.clone());

        let response = handler.handle(&GatewayRequest::get("1:2:3:4")).await;

        assert_eq!(response.status_code, 200);
        let result: PlotResult = serde_json::from_str(&response.body).unwrap();
        assert_eq!(result.cadastral_number, "1:2:3:4");
        assert_eq!(result.area, 6000.4);
        assert_eq!(result.points_count, 34);
        assert_eq!(result.cost_per_point, 4000);
        assert_eq!(result.total_cost, 136000);
        assert_eq!(result.source, "STUB");
        assert_eq!(client.calls.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_preflight_never_calls_upstream() {
        let client = MockClient::new(|| Ok(serde_json::json!({})));
        let handler = PlotLookupHandler::new(Box::new(StubSource), client.clone());

        let request = GatewayRequest {
            http_method: Some("OPTIONS".to_string()),
            query_string_parameters: None,
        };
        let response = handler.handle(&request).await;

        assert_eq!(response.status_code, 200);
        assert!(response.body.is_empty());
        assert!(client.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_parameter_never_calls_upstream() {
        let client = MockClient::new(|| Ok(serde_json::json!({})));
        let handler = PlotLookupHandler::new(Box::new(StubSource), client.clone());

        let response = handler.handle(&GatewayRequest::default()).await;

        assert_eq!(response.status_code, 400);
        let body: ErrorBody = serde_json::from_str(&response.body).unwrap();
        assert!(!body.error.is_empty());
        assert!(client.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_from_extraction() {
        let client = MockClient::new(|| Ok(serde_json::json!({"missing": true})));
        let handler = PlotLookupHandler::new(Box::new(StubSource), client);

        let response = handler.handle(&GatewayRequest::get("1:2:3:4")).await;
        assert_eq!(response.status_code, 404);
    }

    #[tokio::test]
    async fn test_upstream_unavailable_maps_to_503() {
        let client = MockClient::new(|| {
            Err(LookupError::UpstreamUnavailable {
                service: "STUB".to_string(),
                reason: "operation timed out".to_string(),
            })
        });
        let handler = PlotLookupHandler::new(Box::new(StubSource), client);

        let response = handler.handle(&GatewayRequest::get("1:2:3:4")).await;

        assert_eq!(response.status_code, 503);
        let body: ErrorBody = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body.error, "Сервис временно недоступен");
    }
}
