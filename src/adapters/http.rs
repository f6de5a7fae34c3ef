use crate::core::{Result, UpstreamClient, UpstreamRequest};
use crate::utils::error::LookupError;
use async_trait::async_trait;
use reqwest::Client;

/// Single-shot GET over `reqwest`. No retries; redirects use the client default.
#[derive(Debug, Clone, Default)]
pub struct ReqwestUpstreamClient {
    client: Client,
}

impl ReqwestUpstreamClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

fn classify(service: &str, err: reqwest::Error) -> LookupError {
    if err.is_builder() {
        return LookupError::Internal {
            message: err.to_string(),
        };
    }
    // DNS, refused connections, timeouts and broken bodies all look the same
    // to the caller: the service could not be reached.
    LookupError::UpstreamUnavailable {
        service: service.to_string(),
        reason: err.to_string(),
    }
}

#[async_trait]
impl UpstreamClient for ReqwestUpstreamClient {
    async fn fetch_json(&self, request: &UpstreamRequest) -> Result<serde_json::Value> {
        let mut builder = self
            .client
            .get(request.url.clone())
            .timeout(request.timeout);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify(&request.service, e))?;

        let status = response.status();
        tracing::debug!("{} response status: {}", request.service, status);

        if !status.is_success() {
            return Err(LookupError::UpstreamHttp {
                service: request.service.clone(),
                code: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify(&request.service, e))?;
        tracing::debug!("{} response body: {} bytes", request.service, body.len());

        Ok(serde_json::from_slice(&body)?)
    }
}
